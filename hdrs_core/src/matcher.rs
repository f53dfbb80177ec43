use regex::Regex;

use crate::database::WildcardRule;

/// Index of a rule in [`Database::wildcards`](crate::Database::wildcards).
pub type RuleIndex = usize;

/// Matches identifiers against the wildcard rules in priority order.
///
/// Patterns may overlap. The rule with the lowest index wins, so deny and
/// mapping rules are tried in declared order before any query rule.
#[derive(Debug, Clone, Default)]
pub struct PriorityMatcher {
	patterns: Vec<Regex>,
}

impl PriorityMatcher {
	/// Build a matcher over `rules`. Must be rebuilt whenever the rule list
	/// changes since indices are positional.
	pub fn new(rules: &[WildcardRule]) -> Self {
		let patterns = rules
			.iter()
			.map(|rule| rule.pattern().regex().clone())
			.collect();

		Self { patterns }
	}

	/// The index of the first rule whose pattern matches `identifier`.
	pub fn find(&self, identifier: &str) -> Option<RuleIndex> {
		self.patterns
			.iter()
			.position(|pattern| pattern.is_match(identifier))
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}
}
