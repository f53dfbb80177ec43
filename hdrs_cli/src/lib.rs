use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	name = "hdrs",
	author,
	version,
	about = "Suggest the headers a C or C++ source file needs to include.",
	long_about = "hdrs reads each source file, extracts every qualified identifier and looks \
	              it up in a header database.\n\nExact mappings (`std::vector = <vector>`) win \
	              over wildcard rules. Deny rules (`! std::__*`) and wildcard mappings \
	              (`std::chrono::* = <chrono>`) apply in file order, and query rules (`? \
	              boost::*`) ask you which header an identifier needs. Every answer is saved \
	              to the database straight away.\n\nAnswers:\n  <header>             map this \
	              identifier to <header>\n  !                    this identifier needs no \
	              header\n  ! pattern            no identifier matching pattern needs a \
	              header\n  pattern = <header>   every identifier matching pattern needs \
	              <header>"
)]
pub struct HdrsCli {
	/// Source files to resolve, processed in order.
	pub files: Vec<PathBuf>,

	/// Path to the header database. Overrides the `database` key of
	/// `hdrs.toml`.
	#[arg(long, short, env = "HDRS_DATABASE")]
	pub database: Option<PathBuf>,

	/// Path to the project root used to discover `hdrs.toml`.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// List identifiers that no rule matches after each file's includes.
	#[arg(long, default_value_t = false)]
	pub report_unmatched: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}
