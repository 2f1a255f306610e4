//! Schema comparison engine
//!
//! Compares two normalized schemas table by table and column by column.
//! Every difference is collected before anything is reported; the walk
//! never short-circuits, so one column can contribute several
//! discrepancies.

use schemadelta_core::config::DiffConfig;
use schemadelta_core::{Column, Discrepancy, DiscrepancyKind, Report, Schema, Table};
use serde::{Deserialize, Serialize};

/// Comparison tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffOptions {
    /// Character length pairs treated as equal in either direction
    pub equivalent_lengths: Vec<(u32, u32)>,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set length pairs treated as equal
    pub fn with_equivalent_lengths(mut self, pairs: Vec<(u32, u32)>) -> Self {
        self.equivalent_lengths = pairs;
        self
    }

    /// Length equality under the configured equivalences
    ///
    /// An absent length never equals a present one.
    fn lengths_equal(&self, baseline: Option<u32>, target: Option<u32>) -> bool {
        match (baseline, target) {
            (None, None) => true,
            (Some(b), Some(t)) => {
                b == t
                    || self
                        .equivalent_lengths
                        .iter()
                        .any(|&(x, y)| (b == x && t == y) || (b == y && t == x))
            }
            _ => false,
        }
    }
}

impl From<&DiffConfig> for DiffOptions {
    fn from(config: &DiffConfig) -> Self {
        Self {
            equivalent_lengths: config.equivalent_lengths.clone(),
        }
    }
}

/// Result of comparing two schemas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDiff {
    /// Baseline environment label
    pub baseline_env: String,

    /// Target environment label
    pub target_env: String,

    /// Tables present in both environments
    pub tables_compared: usize,

    /// Columns compared across shared tables
    pub columns_compared: usize,

    /// All discrepancies in report order
    pub discrepancies: Vec<Discrepancy>,
}

impl SchemaDiff {
    /// Compare two schemas
    ///
    /// Discrepancy records carry the baseline's original casing for shared
    /// tables; one-sided records carry the casing of the side that has the
    /// object.
    pub fn compare(baseline: &Schema, target: &Schema, options: &DiffOptions) -> Self {
        let mut discrepancies = Vec::new();
        let mut tables_compared = 0;
        let mut columns_compared = 0;

        for table in baseline.tables() {
            match target.table(&table.name) {
                Some(target_table) => {
                    tables_compared += 1;
                    columns_compared +=
                        compare_table(table, target_table, options, &mut discrepancies);
                }
                None => discrepancies.push(Discrepancy::table_level(
                    DiscrepancyKind::MissingTable,
                    table.name.clone(),
                )),
            }
        }

        for table in target.tables() {
            if baseline.table(&table.name).is_none() {
                discrepancies.push(Discrepancy::table_level(
                    DiscrepancyKind::ExtraTable,
                    table.name.clone(),
                ));
            }
        }

        // Sort for deterministic output
        discrepancies.sort_by_cached_key(|d| d.sort_key());

        tracing::debug!(
            baseline = %baseline.environment,
            target = %target.environment,
            tables_compared,
            columns_compared,
            discrepancies = discrepancies.len(),
            "schema comparison complete"
        );

        Self {
            baseline_env: baseline.environment.clone(),
            target_env: target.environment.clone(),
            tables_compared,
            columns_compared,
            discrepancies,
        }
    }

    /// Check if any discrepancy was found
    pub fn has_discrepancies(&self) -> bool {
        !self.discrepancies.is_empty()
    }

    /// Check if the schemas matched
    pub fn is_match(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Count discrepancies of one kind
    pub fn count(&self, kind: DiscrepancyKind) -> usize {
        self.discrepancies.iter().filter(|d| d.kind == kind).count()
    }

    /// Build the report for this comparison
    pub fn into_report(self) -> Report {
        Report::from_discrepancies(self.baseline_env, self.target_env, self.discrepancies)
            .with_coverage(self.tables_compared, self.columns_compared)
    }
}

/// Compare the columns of a table present in both environments
///
/// Returns the number of columns compared on both sides.
fn compare_table(
    baseline: &Table,
    target: &Table,
    options: &DiffOptions,
    discrepancies: &mut Vec<Discrepancy>,
) -> usize {
    let mut compared = 0;

    for column in baseline.columns() {
        match target.column(&column.name) {
            Some(target_column) => {
                compared += 1;
                compare_column(&baseline.name, column, target_column, options, discrepancies);
            }
            None => discrepancies.push(Discrepancy::column_level(
                DiscrepancyKind::MissingColumn,
                baseline.name.clone(),
                column.name.clone(),
            )),
        }
    }

    for column in target.columns() {
        if baseline.column(&column.name).is_none() {
            discrepancies.push(Discrepancy::column_level(
                DiscrepancyKind::ExtraColumn,
                baseline.name.clone(),
                column.name.clone(),
            ));
        }
    }

    compared
}

/// Compare one column present on both sides
///
/// Checks run in a fixed order: data type, precision, scale, length. Data
/// types were upper-cased at normalization time, so plain equality is the
/// case-insensitive comparison.
fn compare_column(
    table_name: &str,
    baseline: &Column,
    target: &Column,
    options: &DiffOptions,
    discrepancies: &mut Vec<Discrepancy>,
) {
    if baseline.data_type != target.data_type {
        discrepancies.push(
            Discrepancy::column_level(DiscrepancyKind::TypeMismatch, table_name, &baseline.name)
                .with_values(
                    Some(baseline.data_type.clone()),
                    Some(target.data_type.clone()),
                ),
        );
    }

    if baseline.precision != target.precision {
        discrepancies.push(
            Discrepancy::column_level(
                DiscrepancyKind::PrecisionMismatch,
                table_name,
                &baseline.name,
            )
            .with_values(
                baseline.precision.map(|v| v.to_string()),
                target.precision.map(|v| v.to_string()),
            ),
        );
    }

    if baseline.scale != target.scale {
        discrepancies.push(
            Discrepancy::column_level(DiscrepancyKind::ScaleMismatch, table_name, &baseline.name)
                .with_values(
                    baseline.scale.map(|v| v.to_string()),
                    target.scale.map(|v| v.to_string()),
                ),
        );
    }

    if !options.lengths_equal(baseline.max_length, target.max_length) {
        discrepancies.push(
            Discrepancy::column_level(DiscrepancyKind::LengthMismatch, table_name, &baseline.name)
                .with_values(
                    baseline.max_length.map(|v| v.to_string()),
                    target.max_length.map(|v| v.to_string()),
                ),
        );
    }
}
