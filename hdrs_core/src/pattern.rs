use std::fmt::Display;

use regex::Regex;

use crate::HdrsError;
use crate::HdrsResult;

/// The scope separator used in qualified names and wildcard patterns.
pub const SCOPE_SEPARATOR: &str = "::";

/// A validated wildcard pattern such as `std::*` or `boost::asio::*_error`.
///
/// The normalised source text is kept for persistence while the compiled
/// regular expression is used for matching. Every `*` matches zero or more
/// characters, including `::`, so `std::*` also covers `std::chrono::seconds`.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
	source: String,
	regex: Regex,
}

impl WildcardPattern {
	/// The normalised pattern text, e.g. `std::*`.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// The anchored regular expression this pattern compiles to.
	pub fn regex(&self) -> &Regex {
		&self.regex
	}

	/// Whether the pattern contains at least one `*`.
	pub fn is_wildcard(&self) -> bool {
		self.source.contains('*')
	}

	/// Whether `identifier` is matched by this pattern as a whole.
	pub fn matches(&self, identifier: &str) -> bool {
		self.regex.is_match(identifier)
	}
}

impl PartialEq for WildcardPattern {
	fn eq(&self, other: &Self) -> bool {
		self.source == other.source
	}
}

impl Eq for WildcardPattern {}

impl Display for WildcardPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.source)
	}
}

/// Validate `pattern` against the scoped-name grammar and compile it.
///
/// `line` is the 1-based line the pattern was read from and is only used for
/// the error message. Whitespace around `::` is dropped, so `std :: *` and
/// `std::*` compile to the same pattern.
pub fn validate(pattern: &str, line: usize) -> HdrsResult<WildcardPattern> {
	let invalid = || {
		HdrsError::InvalidWildcard {
			pattern: pattern.trim().to_string(),
			line,
		}
	};

	let segments: Vec<&str> = pattern.split(SCOPE_SEPARATOR).map(str::trim).collect();
	if !segments.iter().all(|segment| is_valid_segment(segment)) {
		return Err(invalid());
	}

	let source = segments.join(SCOPE_SEPARATOR);
	let regex = Regex::new(&compile(&source)).map_err(|_| invalid())?;

	Ok(WildcardPattern { source, regex })
}

/// A segment is either a name or a name-like run in which `*` may stand in
/// for any character, e.g. `vector`, `*`, `basic_*`.
fn is_valid_segment(segment: &str) -> bool {
	let mut chars = segment.chars();
	chars
		.next()
		.is_some_and(|first| first == '*' || first == '_' || first.is_ascii_alphabetic())
		&& chars.all(|ch| ch == '*' || ch == '_' || ch.is_ascii_alphanumeric())
}

/// Translate a normalised pattern into an anchored regular expression.
fn compile(source: &str) -> String {
	let body = source
		.split('*')
		.map(regex::escape)
		.collect::<Vec<_>>()
		.join(".*");

	format!("^(?:{body})$")
}
