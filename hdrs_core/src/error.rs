use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum HdrsError {
	#[error(transparent)]
	#[diagnostic(code(hdrs::io_error))]
	Io(#[from] std::io::Error),

	#[error("database format error on line {line}: `{content}`")]
	#[diagnostic(
		code(hdrs::database_format),
		help("each line must be `? pattern`, `! pattern`, `pattern = header` or `identifier = header`")
	)]
	DatabaseFormat { line: usize, content: String },

	#[error("invalid wildcard `{pattern}` on line {line}")]
	#[diagnostic(
		code(hdrs::invalid_wildcard),
		help("a wildcard is a `::` separated list of names where `*` matches any characters")
	)]
	InvalidWildcard { pattern: String, line: usize },

	#[error("failed to read `{path}`: {source}")]
	#[diagnostic(code(hdrs::read_source))]
	ReadSource {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write database `{path}`: {reason}")]
	#[diagnostic(
		code(hdrs::database_write),
		help("check that the database directory exists and is writable")
	)]
	DatabaseWrite { path: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(hdrs::config_parse),
		help("check that hdrs.toml is valid TOML with optional `database` and `report_unmatched` keys")
	)]
	ConfigParse(String),

	#[error("input closed while waiting for a header for `{0}`")]
	#[diagnostic(
		code(hdrs::prompt_closed),
		help("answer with a header such as `<vector>`, or `!` to ignore the identifier")
	)]
	PromptClosed(String),
}

pub type HdrsResult<T> = Result<T, HdrsError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
