//! Catalog normalization
//!
//! Turns the raw column rows of one environment into the canonical schema
//! model: system columns are dropped, data types are upper-cased, and
//! identifiers keep their original casing while matching case-insensitively.
//! Structural problems in the input fail the whole run; no partial schema
//! escapes this module.

use schemadelta_core::{CatalogRow, Column, Schema, SystemColumnFilter, Table};
use std::collections::{BTreeMap, HashSet};

/// Errors produced while normalizing a raw catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The same (table, column) pair appeared twice in the input
    #[error("Duplicate column '{column}' in table '{table}' of environment '{environment}'")]
    DuplicateColumn {
        environment: String,
        table: String,
        column: String,
    },

    /// No columns survived filtering
    #[error("Environment '{environment}' produced an empty schema")]
    EmptySchema { environment: String },
}

/// Normalize raw catalog rows into a schema
///
/// Duplicates are detected on the raw input, before filtering: a duplicated
/// audit column still means the catalog query misbehaved. Filtering happens
/// before table construction, so a table whose every column is excluded
/// does not appear in the result.
pub fn normalize(
    environment: impl Into<String>,
    rows: Vec<CatalogRow>,
    filter: &SystemColumnFilter,
) -> Result<Schema, NormalizeError> {
    let environment = environment.into();
    let input_rows = rows.len();

    let mut seen = HashSet::new();
    for row in &rows {
        let key = (row.table_name.to_lowercase(), row.column_name.to_lowercase());
        if !seen.insert(key) {
            return Err(NormalizeError::DuplicateColumn {
                environment,
                table: row.table_name.clone(),
                column: row.column_name.clone(),
            });
        }
    }

    // Group surviving rows per table, keyed case-insensitively
    let mut grouped: BTreeMap<String, (String, Vec<Column>)> = BTreeMap::new();
    let mut excluded = 0usize;
    for row in rows {
        if filter.is_system_column(&row.column_name) {
            excluded += 1;
            continue;
        }

        let key = row.table_name.to_lowercase();
        grouped
            .entry(key)
            .or_insert_with(|| (row.table_name.clone(), Vec::new()))
            .1
            .push(Column::from(row));
    }

    if grouped.is_empty() {
        return Err(NormalizeError::EmptySchema { environment });
    }

    let tables: Vec<Table> = grouped
        .into_values()
        .map(|(name, columns)| Table::from_columns(name, columns))
        .collect();

    let schema = Schema::from_tables(environment, tables);

    tracing::debug!(
        environment = %schema.environment,
        tables = schema.table_count(),
        columns = schema.column_count(),
        excluded,
        input_rows,
        "normalized catalog"
    );

    Ok(schema)
}
