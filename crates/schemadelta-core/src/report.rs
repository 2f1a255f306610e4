//! Comparison report schema (stable v1)
//!
//! This is the persisted output format. Breaking changes require a new
//! version.

use crate::discrepancy::Discrepancy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    /// Total number of discrepancies
    pub total: usize,

    /// Tables present in both environments
    pub tables_compared: usize,

    /// Columns compared across shared tables
    pub columns_compared: usize,

    /// Count per discrepancy kind (observed kinds only), keyed by the
    /// stable kind identifier
    pub by_kind: BTreeMap<String, usize>,
}

/// Comparison report (report.json v1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: ReportVersion,

    /// Generation timestamp (ISO 8601)
    pub generated_at: String,

    /// Baseline environment label
    pub baseline_env: String,

    /// Target environment label
    pub target_env: String,

    /// Content hash of the normalized baseline schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_fingerprint: Option<String>,

    /// Content hash of the normalized target schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_fingerprint: Option<String>,

    /// Summary statistics
    pub summary: ReportSummary,

    /// All discrepancies in report order
    pub discrepancies: Vec<Discrepancy>,
}

impl Report {
    /// Create a report from discrepancies
    ///
    /// The list is re-sorted here, so report order never depends on how the
    /// caller assembled it.
    pub fn from_discrepancies(
        baseline_env: impl Into<String>,
        target_env: impl Into<String>,
        mut discrepancies: Vec<Discrepancy>,
    ) -> Self {
        discrepancies.sort_by_cached_key(|d| d.sort_key());

        let mut by_kind = BTreeMap::new();
        for discrepancy in &discrepancies {
            *by_kind
                .entry(discrepancy.kind.as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            version: ReportVersion::CURRENT,
            generated_at: chrono::Utc::now().to_rfc3339(),
            baseline_env: baseline_env.into(),
            target_env: target_env.into(),
            baseline_fingerprint: None,
            target_fingerprint: None,
            summary: ReportSummary {
                total: discrepancies.len(),
                tables_compared: 0,
                columns_compared: 0,
                by_kind,
            },
            discrepancies,
        }
    }

    /// Attach schema fingerprints
    pub fn with_fingerprints(
        mut self,
        baseline: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.baseline_fingerprint = Some(baseline.into());
        self.target_fingerprint = Some(target.into());
        self
    }

    /// Attach comparison coverage counts
    pub fn with_coverage(mut self, tables_compared: usize, columns_compared: usize) -> Self {
        self.summary.tables_compared = tables_compared;
        self.summary.columns_compared = columns_compared;
        self
    }

    /// Check if the report contains any discrepancies
    pub fn has_discrepancies(&self) -> bool {
        !self.discrepancies.is_empty()
    }

    /// Check if the two environments matched
    pub fn is_match(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }

    /// Load from file
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discrepancy::DiscrepancyKind;

    #[test]
    fn empty_report() {
        let report = Report::from_discrepancies("prod", "qa", Vec::new());

        assert_eq!(report.version, ReportVersion::CURRENT);
        assert_eq!(report.summary.total, 0);
        assert!(report.is_match());
        assert!(!report.has_discrepancies());
    }

    #[test]
    fn summary_counts_by_kind() {
        let discrepancies = vec![
            Discrepancy::column_level(DiscrepancyKind::MissingColumn, "ORDERS", "DISCOUNT"),
            Discrepancy::column_level(DiscrepancyKind::MissingColumn, "CUSTOMERS", "PHONE"),
            Discrepancy::table_level(DiscrepancyKind::ExtraTable, "STAGING_TMP"),
        ];

        let report = Report::from_discrepancies("prod", "qa", discrepancies);

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.by_kind.get("MISSING_COLUMN"), Some(&2));
        assert_eq!(report.summary.by_kind.get("EXTRA_TABLE"), Some(&1));
        assert_eq!(report.summary.by_kind.get("MISSING_TABLE"), None);
    }

    #[test]
    fn report_order_does_not_depend_on_input_order() {
        let forward = vec![
            Discrepancy::column_level(DiscrepancyKind::TypeMismatch, "ORDERS", "AMOUNT"),
            Discrepancy::table_level(DiscrepancyKind::MissingTable, "REPORTS"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = Report::from_discrepancies("prod", "qa", forward);
        let b = Report::from_discrepancies("prod", "qa", reversed);

        assert_eq!(a.discrepancies, b.discrepancies);
        assert_eq!(a.discrepancies[0].table_name, "ORDERS");
    }

    #[test]
    fn report_serialization_round_trip() {
        let report = Report::from_discrepancies(
            "prod",
            "qa",
            vec![Discrepancy::column_level(
                DiscrepancyKind::LengthMismatch,
                "CUSTOMERS",
                "NAME",
            )
            .with_values(Some("16777216".to_string()), Some("8388607".to_string()))],
        )
        .with_fingerprints("abc123", "def456")
        .with_coverage(4, 120);

        let json = report.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("LENGTH_MISMATCH"));
        assert!(json.contains("abc123"));

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
