//! System column exclusion rules

use serde::{Deserialize, Serialize};

/// Audit columns excluded from comparison by default
///
/// These are populated by load tooling and differ between environments
/// without indicating schema drift.
pub const DEFAULT_SYSTEM_COLUMNS: [&str; 5] = [
    "CREATED_AT",
    "UPDATED_AT",
    "CREATED_BY",
    "UPDATED_BY",
    "LOAD_TIMESTAMP",
];

/// Matches system-generated column names
///
/// Patterns match case-insensitively. A pattern containing `*` is a simple
/// glob (e.g. `_FIVETRAN_*`); anything else is an exact name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemColumnFilter {
    /// Lower-cased patterns
    patterns: Vec<String>,
}

impl SystemColumnFilter {
    /// Create a filter from patterns
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .collect(),
        }
    }

    /// A filter that keeps every column
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The default audit-column set
    pub fn default_audit_columns() -> Self {
        Self::new(DEFAULT_SYSTEM_COLUMNS)
    }

    /// Check whether a column should be excluded from comparison
    pub fn is_system_column(&self, column_name: &str) -> bool {
        let name = column_name.to_lowercase();
        self.patterns.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, &name)
            } else {
                pattern == &name
            }
        })
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for SystemColumnFilter {
    /// The default filter excludes the standard audit columns
    fn default() -> Self {
        Self::default_audit_columns()
    }
}

/// Simple glob matching on the first `*` wildcard
///
/// Both sides are already lower-cased.
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    if let Some(star_pos) = pattern.find('*') {
        let prefix = &pattern[..star_pos];
        let suffix = &pattern[star_pos + 1..];

        text.starts_with(prefix)
            && text.ends_with(suffix)
            && text.len() >= prefix.len() + suffix.len()
    } else {
        pattern == text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_matches_any_casing() {
        let filter = SystemColumnFilter::default();

        assert!(filter.is_system_column("CREATED_AT"));
        assert!(filter.is_system_column("created_at"));
        assert!(filter.is_system_column("Load_Timestamp"));
        assert!(!filter.is_system_column("ORDER_CREATED_AT"));
        assert!(!filter.is_system_column("AMOUNT"));
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = SystemColumnFilter::empty();

        assert!(filter.is_empty());
        assert!(!filter.is_system_column("CREATED_AT"));
    }

    #[test]
    fn glob_patterns() {
        let filter = SystemColumnFilter::new(["_fivetran_*", "*_etl"]);

        assert!(filter.is_system_column("_FIVETRAN_SYNCED"));
        assert!(filter.is_system_column("batch_etl"));
        assert!(!filter.is_system_column("fivetran_synced"));
        assert!(!filter.is_system_column("etl_batch"));
    }

    #[test]
    fn glob_requires_both_ends() {
        // Text shorter than prefix + suffix must not match
        assert!(glob_match("ab*cd", "abxcd"));
        assert!(glob_match("ab*cd", "abcd"));
        assert!(!glob_match("ab*cd", "abd"));
        assert!(glob_match("*", "anything"));
    }

    #[test]
    fn exact_patterns_are_not_substrings() {
        let filter = SystemColumnFilter::new(["updated_by"]);

        assert!(filter.is_system_column("UPDATED_BY"));
        assert!(!filter.is_system_column("last_updated_by_user"));
    }
}
