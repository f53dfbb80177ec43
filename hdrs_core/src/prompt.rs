use std::io::BufRead;
use std::io::Write;

use crate::HdrsResult;

/// Supplies answers for identifiers matched by a query rule.
pub trait Prompter {
	/// Ask which header `identifier` needs. `Ok(None)` means the input is
	/// exhausted and no answer will ever come.
	fn ask(&mut self, identifier: &str) -> HdrsResult<Option<String>>;

	/// Report that the previous answer for `identifier` was not accepted. The
	/// identifier is asked again afterwards.
	fn reject(&mut self, _identifier: &str, _reason: &str) -> HdrsResult<()> {
		Ok(())
	}
}

/// Line based prompter: writes `identifier: ` to `output` and reads one line
/// from `input`.
#[derive(Debug)]
pub struct StdioPrompter<R, W> {
	input: R,
	output: W,
}

impl<R: BufRead, W: Write> StdioPrompter<R, W> {
	pub fn new(input: R, output: W) -> Self {
		Self { input, output }
	}

	pub fn into_inner(self) -> (R, W) {
		(self.input, self.output)
	}
}

impl<R: BufRead, W: Write> Prompter for StdioPrompter<R, W> {
	fn ask(&mut self, identifier: &str) -> HdrsResult<Option<String>> {
		write!(self.output, "{identifier}: ")?;
		self.output.flush()?;

		let mut line = String::new();
		if self.input.read_line(&mut line)? == 0 {
			writeln!(self.output)?;
			return Ok(None);
		}

		Ok(Some(line.trim().to_string()))
	}

	fn reject(&mut self, identifier: &str, reason: &str) -> HdrsResult<()> {
		writeln!(self.output, "{identifier}: {reason}")?;
		Ok(())
	}
}
