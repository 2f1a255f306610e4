//! Discrepancy kinds and records
//!
//! Kind identifiers are stable and versioned. Never rename or remove a
//! kind - add new ones only.

use serde::{Deserialize, Serialize};

/// Discrepancy kind registry (v1)
///
/// Declaration order doubles as the tie-break order when sorting
/// discrepancies that share a table and column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscrepancyKind {
    /// Table present in the baseline but not in the target
    MissingTable,

    /// Table present in the target but not in the baseline
    ExtraTable,

    /// Column present in the baseline table but not in the target table
    MissingColumn,

    /// Column present in the target table but not in the baseline table
    ExtraColumn,

    /// Data types differ
    TypeMismatch,

    /// Numeric precision differs
    PrecisionMismatch,

    /// Numeric scale differs
    ScaleMismatch,

    /// Maximum character length differs
    LengthMismatch,
}

impl DiscrepancyKind {
    /// Get the kind as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTable => "MISSING_TABLE",
            Self::ExtraTable => "EXTRA_TABLE",
            Self::MissingColumn => "MISSING_COLUMN",
            Self::ExtraColumn => "EXTRA_COLUMN",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::PrecisionMismatch => "PRECISION_MISMATCH",
            Self::ScaleMismatch => "SCALE_MISMATCH",
            Self::LengthMismatch => "LENGTH_MISMATCH",
        }
    }

    /// True for kinds that carry baseline/target values
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch
                | Self::PrecisionMismatch
                | Self::ScaleMismatch
                | Self::LengthMismatch
        )
    }
}

impl std::fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single schema difference between two environments
///
/// `baseline` and `target` are populated for mismatch kinds only. A `None`
/// there means the attribute is absent on that side, which is itself a
/// reportable difference from a present value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// What differs
    pub kind: DiscrepancyKind,

    /// Table the discrepancy belongs to (original casing)
    pub table_name: String,

    /// Column, absent for table-level discrepancies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,

    /// Baseline-side value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<String>,

    /// Target-side value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Discrepancy {
    /// Create a table-level discrepancy
    pub fn table_level(kind: DiscrepancyKind, table_name: impl Into<String>) -> Self {
        Self {
            kind,
            table_name: table_name.into(),
            column_name: None,
            baseline: None,
            target: None,
        }
    }

    /// Create a column-level discrepancy
    pub fn column_level(
        kind: DiscrepancyKind,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            table_name: table_name.into(),
            column_name: Some(column_name.into()),
            baseline: None,
            target: None,
        }
    }

    /// Set baseline/target values for mismatch kinds
    pub fn with_values(mut self, baseline: Option<String>, target: Option<String>) -> Self {
        self.baseline = baseline;
        self.target = target;
        self
    }

    /// Sort key: normalized table, then column (table-level first), then kind
    pub fn sort_key(&self) -> (String, Option<String>, DiscrepancyKind) {
        (
            self.table_name.to_lowercase(),
            self.column_name.as_ref().map(|c| c.to_lowercase()),
            self.kind,
        )
    }
}

impl std::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.table_name)?;
        if let Some(column) = &self.column_name {
            write!(f, ".{}", column)?;
        }
        if self.kind.is_mismatch() {
            write!(
                f,
                " (baseline: {}, target: {})",
                self.baseline.as_deref().unwrap_or("-"),
                self.target.as_deref().unwrap_or("-"),
            )?;
        }
        Ok(())
    }
}
