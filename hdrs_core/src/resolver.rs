use std::collections::BTreeSet;
use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Write as _;
use std::path::Path;

use crate::HdrsError;
use crate::HdrsResult;
use crate::database::Database;
use crate::database::DatabaseStore;
use crate::database::WildcardRule;
use crate::extractor::extract_identifiers;
use crate::matcher::PriorityMatcher;
use crate::pattern::WildcardPattern;
use crate::pattern::validate;
use crate::prompt::Prompter;

/// The headers one source file needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
	/// Required headers, system headers (`<...>`) before user headers
	/// (`"..."`), each group in alphabetical order.
	pub headers: Vec<String>,
	/// Identifiers no rule matched, in first-seen order.
	pub unmatched: Vec<String>,
}

impl Resolution {
	/// Render the include report for `file`: a title line, one `#include`
	/// per header and a trailing blank line.
	pub fn render(&self, file: impl Display) -> String {
		let mut output = format!("Includes for {file}:\n");

		for header in &self.headers {
			let _ = writeln!(output, "#include {header}");
		}

		output.push('\n');
		output
	}
}

/// Sort headers so that quoted headers come after angle-bracket headers.
pub fn sort_headers(headers: impl IntoIterator<Item = String>) -> Vec<String> {
	let mut headers: Vec<String> = headers.into_iter().collect();
	headers.sort_by_cached_key(|header| header.replace('"', "~"));
	headers
}

/// A parsed answer to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
	Deny(WildcardPattern),
	Mapping(WildcardPattern, String),
	Header(String),
}

impl Answer {
	/// Interpret `answer` for `identifier`, or explain why it was refused.
	fn parse(answer: &str, identifier: &str) -> Result<Self, String> {
		let answer = answer.trim();

		if answer.is_empty() {
			return Err(
				"an empty answer is not a header; enter a header, `!` to ignore it or `pattern = \
				 header`"
					.to_string(),
			);
		}

		if answer == "!" {
			return validate(identifier, 0)
				.map(Self::Deny)
				.map_err(|e| e.to_string());
		}

		if let Some(pattern) = answer.strip_prefix('!') {
			return covering_pattern(pattern, identifier).map(Self::Deny);
		}

		if let Some((lhs, rhs)) = answer.split_once('=') {
			if !lhs.contains('*') {
				return Err(format!(
					"`{}` has no wildcard; answer with just the header to map `{identifier}`",
					lhs.trim()
				));
			}

			let header = rhs.trim();
			if header.is_empty() {
				return Err(format!("missing header after `=` in `{answer}`"));
			}

			let pattern = covering_pattern(lhs, identifier)?;
			return Ok(Self::Mapping(pattern, header.to_string()));
		}

		Ok(Self::Header(answer.to_string()))
	}
}

/// Validate `pattern` and require that it matches `identifier`.
fn covering_pattern(pattern: &str, identifier: &str) -> Result<WildcardPattern, String> {
	let pattern = validate(pattern, 0)
		.map_err(|_| format!("`{}` is not a valid wildcard", pattern.trim()))?;

	if !pattern.matches(identifier) {
		return Err(format!("`{pattern}` does not match `{identifier}`"));
	}

	Ok(pattern)
}

/// A loaded database together with its matcher, resolving files one at a
/// time and persisting every learned rule immediately.
#[derive(Debug)]
pub struct Session {
	store: DatabaseStore,
	database: Database,
	matcher: PriorityMatcher,
}

impl Session {
	/// Load the database behind `store` and rewrite it in normalised order.
	pub fn open(store: DatabaseStore) -> HdrsResult<Self> {
		let database = store.load()?;
		store.store(&database)?;

		let matcher = PriorityMatcher::new(database.wildcards());

		Ok(Self {
			store,
			database,
			matcher,
		})
	}

	pub fn database(&self) -> &Database {
		&self.database
	}

	pub fn store(&self) -> &DatabaseStore {
		&self.store
	}

	/// Read `path` and resolve its identifiers.
	pub fn resolve_file(
		&mut self,
		path: &Path,
		prompter: &mut impl Prompter,
	) -> HdrsResult<Resolution> {
		let source = std::fs::read_to_string(path).map_err(|source| {
			HdrsError::ReadSource {
				path: path.display().to_string(),
				source,
			}
		})?;

		self.resolve_source(&source, prompter)
	}

	pub fn resolve_source(
		&mut self,
		source: &str,
		prompter: &mut impl Prompter,
	) -> HdrsResult<Resolution> {
		self.resolve_identifiers(extract_identifiers(source), prompter)
	}

	/// Resolve a sequence of qualified identifiers belonging to one file.
	///
	/// Each identifier is considered at most once. Exact mappings win over
	/// wildcard rules. Identifiers no rule matches contribute nothing and are
	/// reported in [`Resolution::unmatched`].
	pub fn resolve_identifiers(
		&mut self,
		identifiers: impl IntoIterator<Item = String>,
		prompter: &mut impl Prompter,
	) -> HdrsResult<Resolution> {
		let mut handled = HashSet::new();
		let mut headers = BTreeSet::new();
		let mut unmatched = Vec::new();

		for identifier in identifiers {
			if handled.contains(&identifier) {
				continue;
			}

			if let Some(header) = self.database.header_for(&identifier) {
				headers.insert(header.to_string());
				handled.insert(identifier);
				continue;
			}

			let Some(index) = self.matcher.find(&identifier) else {
				if !unmatched.contains(&identifier) {
					tracing::debug!(%identifier, "no rule matches");
					unmatched.push(identifier);
				}
				continue;
			};

			handled.insert(identifier.clone());

			match self.database.wildcards()[index].clone() {
				WildcardRule::Deny(pattern) => {
					tracing::debug!(%identifier, %pattern, "denied");
				}
				WildcardRule::Mapping { pattern, header } => {
					tracing::debug!(%identifier, %pattern, %header, "mapped");
					headers.insert(header);
				}
				WildcardRule::Query(pattern) => {
					tracing::debug!(%identifier, %pattern, "asking");
					if let Some(header) = self.learn(&identifier, prompter)? {
						headers.insert(header);
					}
				}
			}
		}

		// A rule learned later in the file may have picked these up.
		unmatched.retain(|identifier| !handled.contains(identifier));

		Ok(Resolution {
			headers: sort_headers(headers),
			unmatched,
		})
	}

	/// Persist the database one last time.
	pub fn close(self) -> HdrsResult<()> {
		self.store.store(&self.database)
	}

	/// Ask until an acceptable answer arrives, record it and return the header
	/// it contributes for `identifier`, if any.
	fn learn(
		&mut self,
		identifier: &str,
		prompter: &mut impl Prompter,
	) -> HdrsResult<Option<String>> {
		let answer = loop {
			let Some(text) = prompter.ask(identifier)? else {
				return Err(HdrsError::PromptClosed(identifier.to_string()));
			};

			match Answer::parse(&text, identifier) {
				Ok(answer) => break answer,
				Err(reason) => {
					tracing::debug!(%identifier, answer = %text, %reason, "answer rejected");
					prompter.reject(identifier, &reason)?;
				}
			}
		};

		let header = match answer {
			Answer::Deny(pattern) => {
				tracing::info!(%identifier, %pattern, "learned deny rule");
				self.add_wildcard(WildcardRule::Deny(pattern));
				None
			}
			Answer::Mapping(pattern, header) => {
				tracing::info!(%identifier, %pattern, %header, "learned wildcard mapping");
				self.add_wildcard(WildcardRule::Mapping {
					pattern,
					header: header.clone(),
				});
				Some(header)
			}
			Answer::Header(header) => {
				tracing::info!(%identifier, %header, "learned exact mapping");
				self.database.insert_exact(identifier, header.clone());
				Some(header)
			}
		};

		self.store.store(&self.database)?;

		Ok(header)
	}

	fn add_wildcard(&mut self, rule: WildcardRule) {
		self.database.insert_wildcard(rule);
		self.matcher = PriorityMatcher::new(self.database.wildcards());
	}
}
