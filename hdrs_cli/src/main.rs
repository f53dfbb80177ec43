use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::CommandFactory;
use clap::Parser;
use hdrs_cli::HdrsCli;
use hdrs_core::DatabaseStore;
use hdrs_core::HdrsConfig;
use hdrs_core::HdrsError;
use hdrs_core::HdrsResult;
use hdrs_core::Session;
use hdrs_core::StdioPrompter;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = HdrsCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(args.verbose, use_color);

	if args.files.is_empty() {
		println!("{}", HdrsCli::command().render_usage());
		return;
	}

	let (session, report_unmatched) = match open_session(&args) {
		Ok(opened) => opened,
		Err(e) => {
			print_error(e);
			process::exit(2);
		}
	};

	let failed = run(session, &args.files, report_unmatched);

	if failed > 0 {
		eprintln!(
			"{} {failed} of {} file(s) could not be resolved",
			colored!("error:", red),
			args.files.len()
		);
		process::exit(1);
	}
}

fn init_logging(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &HdrsCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load the config and the database. Any failure here aborts the run before
/// a single file is read.
fn open_session(args: &HdrsCli) -> HdrsResult<(Session, bool)> {
	let root = resolve_root(args);
	let config = HdrsConfig::load(&root)?.unwrap_or_default();
	let database_path = config.database_path(&root, args.database.as_deref());

	tracing::debug!(path = %database_path.display(), "using database");

	let session = Session::open(DatabaseStore::new(database_path))?;
	Ok((session, args.report_unmatched || config.report_unmatched))
}

/// Resolve every file in order and return how many of them failed.
fn run(mut session: Session, files: &[PathBuf], report_unmatched: bool) -> usize {
	let stdin = std::io::stdin();
	let mut prompter = StdioPrompter::new(stdin.lock(), std::io::stderr());
	let mut failed = 0;

	for file in files {
		match session.resolve_file(file, &mut prompter) {
			Ok(resolution) => {
				if let Err(e) = print_report(&resolution.render(file.display())) {
					print_error(e);
					failed += 1;
					continue;
				}

				if report_unmatched {
					for identifier in &resolution.unmatched {
						eprintln!("{} no rule matches {identifier}", colored!("note:", yellow));
					}
				}
			}
			Err(e) => {
				print_error(e);
				failed += 1;
			}
		}
	}

	if let Err(e) = session.close() {
		print_error(e);
		process::exit(2);
	}

	failed
}

fn print_report(report: &str) -> HdrsResult<()> {
	let mut stdout = std::io::stdout().lock();
	stdout.write_all(report.as_bytes())?;
	stdout.flush()?;
	Ok(())
}

fn print_error(error: HdrsError) {
	let report: miette::Report = error.into();
	eprintln!("{report:?}");
}
