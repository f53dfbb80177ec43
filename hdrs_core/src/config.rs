use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::HdrsError;
use crate::HdrsResult;
use crate::database::DEFAULT_DATABASE_FILE;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["hdrs.toml", ".hdrs.toml", ".config/hdrs.toml"];

/// Environment variable overriding the database location.
pub const DATABASE_ENV_VAR: &str = "HDRS_DATABASE";

/// Configuration loaded from an `hdrs.toml` file.
///
/// ```toml
/// database = "tools/header_database.txt"
/// report_unmatched = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HdrsConfig {
	/// Path to the rule database, relative to the project root.
	#[serde(default)]
	pub database: Option<PathBuf>,
	/// List identifiers that no rule matches after each file's includes.
	#[serde(default)]
	pub report_unmatched: bool,
}

impl HdrsConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> HdrsResult<Option<HdrsConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: HdrsConfig =
			toml::from_str(&content).map_err(|e| HdrsError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// The database path for a project rooted at `root`. An explicit path
	/// (flag or environment) wins over the config file, which wins over
	/// `<root>/header_database.txt`.
	pub fn database_path(&self, root: &Path, explicit: Option<&Path>) -> PathBuf {
		if let Some(path) = explicit {
			return path.to_path_buf();
		}

		let relative = self
			.database
			.as_deref()
			.unwrap_or(Path::new(DEFAULT_DATABASE_FILE));

		root.join(relative)
	}
}
