use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::HdrsError;
use crate::HdrsResult;
use crate::pattern::WildcardPattern;
use crate::pattern::validate;

/// Default file name of the rule database.
pub const DEFAULT_DATABASE_FILE: &str = "header_database.txt";

/// A rule keyed by a wildcard pattern. Kept in an ordered list where the
/// position decides which rule wins when several patterns match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardRule {
	/// `! pattern`: matching identifiers need no header.
	Deny(WildcardPattern),
	/// `pattern = header`: matching identifiers need `header`.
	Mapping {
		pattern: WildcardPattern,
		header: String,
	},
	/// `? pattern`: matching identifiers are resolved by asking the user.
	Query(WildcardPattern),
}

impl WildcardRule {
	pub fn pattern(&self) -> &WildcardPattern {
		match self {
			Self::Deny(pattern) | Self::Query(pattern) | Self::Mapping { pattern, .. } => pattern,
		}
	}

	pub fn is_query(&self) -> bool {
		matches!(self, Self::Query(_))
	}

	fn write_line(&self, output: &mut String) {
		let _ = match self {
			Self::Query(pattern) => writeln!(output, "? {pattern}"),
			Self::Deny(pattern) => writeln!(output, "! {pattern}"),
			Self::Mapping { pattern, header } => writeln!(output, "{pattern} = {header}"),
		};
	}
}

/// A single parsed database line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
	/// `identifier = header`: the identifier is matched literally.
	Exact { identifier: String, header: String },
	Wildcard(WildcardRule),
}

impl Rule {
	/// Parse one trimmed, non-blank database line. `line` is 1-based.
	pub fn parse(content: &str, line: usize) -> HdrsResult<Self> {
		if let Some(pattern) = content.strip_prefix('?') {
			return Ok(Self::Wildcard(WildcardRule::Query(validate(pattern, line)?)));
		}

		if let Some(pattern) = content.strip_prefix('!') {
			return Ok(Self::Wildcard(WildcardRule::Deny(validate(pattern, line)?)));
		}

		let format_error = || {
			HdrsError::DatabaseFormat {
				line,
				content: content.to_string(),
			}
		};

		let Some((lhs, rhs)) = content.split_once('=') else {
			return Err(format_error());
		};

		let header = rhs.trim();
		if header.is_empty() || header.contains('=') {
			return Err(format_error());
		}

		if lhs.contains('*') {
			return Ok(Self::Wildcard(WildcardRule::Mapping {
				pattern: validate(lhs, line)?,
				header: header.to_string(),
			}));
		}

		let identifier = validate(lhs, line).map_err(|_| format_error())?;

		Ok(Self::Exact {
			identifier: identifier.as_str().to_string(),
			header: header.to_string(),
		})
	}
}

/// The in-memory rule set.
///
/// `wildcards` is kept partitioned: every deny and mapping rule comes before
/// every query rule, and rules of the same partition keep the order in which
/// they were declared or learned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
	exact: BTreeMap<String, String>,
	wildcards: Vec<WildcardRule>,
}

impl Database {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse the line oriented database format.
	///
	/// Blank lines are skipped and surrounding whitespace is ignored. The
	/// first malformed line aborts parsing.
	pub fn parse(content: &str) -> HdrsResult<Self> {
		let mut exact = BTreeMap::new();
		let mut wildcards = Vec::new();

		for (index, line) in content.lines().enumerate() {
			let line_content = line.trim();
			if line_content.is_empty() {
				continue;
			}

			match Rule::parse(line_content, index + 1)? {
				Rule::Exact { identifier, header } => {
					exact.insert(identifier, header);
				}
				Rule::Wildcard(rule) => wildcards.push(rule),
			}
		}

		// Stable: declared order survives inside each partition.
		wildcards.sort_by_key(WildcardRule::is_query);

		Ok(Self { exact, wildcards })
	}

	/// Serialise in persisted order: query rules, then deny and mapping rules,
	/// then exact mappings sorted by `(header, identifier)`.
	pub fn render(&self) -> String {
		let mut output = String::new();

		let (queries, others): (Vec<_>, Vec<_>) =
			self.wildcards.iter().partition(|rule| rule.is_query());

		for rule in queries.into_iter().chain(others) {
			rule.write_line(&mut output);
		}

		let mut exact: Vec<_> = self.exact.iter().collect();
		exact.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

		for (identifier, header) in exact {
			let _ = writeln!(output, "{identifier} = {header}");
		}

		output
	}

	pub fn exact(&self) -> &BTreeMap<String, String> {
		&self.exact
	}

	/// Wildcard rules in match-priority order.
	pub fn wildcards(&self) -> &[WildcardRule] {
		&self.wildcards
	}

	pub fn is_empty(&self) -> bool {
		self.exact.is_empty() && self.wildcards.is_empty()
	}

	/// The header of the exact mapping for `identifier`, if any.
	pub fn header_for(&self, identifier: &str) -> Option<&str> {
		self.exact.get(identifier).map(String::as_str)
	}

	/// Record an exact mapping, replacing any previous header.
	pub fn insert_exact(&mut self, identifier: impl Into<String>, header: impl Into<String>) {
		self.exact.insert(identifier.into(), header.into());
	}

	/// Add a wildcard rule and return its index in match-priority order.
	///
	/// Deny and mapping rules go after the existing deny and mapping rules and
	/// ahead of every query, which is the same slot they get when the file is
	/// loaded again. Query rules are appended.
	pub fn insert_wildcard(&mut self, rule: WildcardRule) -> usize {
		let index = if rule.is_query() {
			self.wildcards.len()
		} else {
			self.wildcards.partition_point(|existing| !existing.is_query())
		};

		self.wildcards.insert(index, rule);
		index
	}
}

/// Owns the on-disk location of a [`Database`].
#[derive(Debug, Clone)]
pub struct DatabaseStore {
	path: PathBuf,
}

impl DatabaseStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Read and parse the database. A missing file is an empty database.
	pub fn load(&self) -> HdrsResult<Database> {
		let content = match std::fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %self.path.display(), "no database yet, starting empty");
				return Ok(Database::new());
			}
			Err(error) => return Err(error.into()),
		};

		let database = Database::parse(&content)?;
		tracing::debug!(
			path = %self.path.display(),
			exact = database.exact.len(),
			wildcards = database.wildcards.len(),
			"loaded database"
		);

		Ok(database)
	}

	/// Atomically replace the database file with the rendered `database`.
	pub fn store(&self, database: &Database) -> HdrsResult<()> {
		self.stage(database)?.commit()
	}

	/// Write the rendered `database` to a temporary file next to the
	/// destination without touching the destination itself.
	pub fn stage(&self, database: &Database) -> HdrsResult<StagedDatabase> {
		let directory = match self.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};

		std::fs::create_dir_all(directory).map_err(|e| self.write_error(&e))?;

		let mut file = tempfile::Builder::new()
			.prefix(".hdrs-database")
			.suffix(".tmp")
			.tempfile_in(directory)
			.map_err(|e| self.write_error(&e))?;

		file.write_all(database.render().as_bytes())
			.and_then(|()| file.as_file().sync_all())
			.map_err(|e| self.write_error(&e))?;

		Ok(StagedDatabase {
			file,
			destination: self.path.clone(),
		})
	}

	fn write_error(&self, error: &impl std::error::Error) -> HdrsError {
		HdrsError::DatabaseWrite {
			path: self.path.display().to_string(),
			reason: error.to_string(),
		}
	}
}

/// A fully written temporary copy of the database waiting to be renamed over
/// its destination. Dropping it without calling [`commit`](Self::commit)
/// removes the temporary file and leaves the destination untouched.
#[derive(Debug)]
pub struct StagedDatabase {
	file: NamedTempFile,
	destination: PathBuf,
}

impl StagedDatabase {
	pub fn temp_path(&self) -> &Path {
		self.file.path()
	}

	/// Rename the staged file over the destination, replacing any existing
	/// file.
	pub fn commit(self) -> HdrsResult<()> {
		let Self { file, destination } = self;

		file.persist(&destination)
			.map_err(|error| {
				HdrsError::DatabaseWrite {
					path: destination.display().to_string(),
					reason: error.error.to_string(),
				}
			})?;

		tracing::debug!(path = %destination.display(), "stored database");
		Ok(())
	}
}
