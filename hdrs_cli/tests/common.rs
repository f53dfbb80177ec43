use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn hdrs_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("hdrs"));
	cmd.env("NO_COLOR", "1")
		.env_remove("HDRS_DATABASE")
		.env_remove("RUST_LOG");
	cmd
}

/// The `hdrs` binary as a plain [`std::process::Command`], for tests that
/// redirect its standard streams themselves.
#[allow(dead_code)]
pub fn hdrs_process() -> std::process::Command {
	let mut cmd = std::process::Command::new(get_cargo_bin("hdrs"));
	cmd.env("NO_COLOR", "1")
		.env_remove("HDRS_DATABASE")
		.env_remove("RUST_LOG");
	cmd
}
