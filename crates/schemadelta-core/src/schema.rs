//! Schema model for warehouse catalog comparison

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// A single row from a warehouse column catalog
///
/// Mirrors the shape of an INFORMATION_SCHEMA.COLUMNS result. Optional
/// fields are absent for types that do not carry them (e.g. no numeric
/// precision on a text column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Table the column belongs to
    pub table_name: String,

    /// Column name
    pub column_name: String,

    /// Declared data type (e.g. NUMBER, TEXT, TIMESTAMP_NTZ)
    pub data_type: String,

    /// Numeric precision
    #[serde(default)]
    pub numeric_precision: Option<u32>,

    /// Numeric scale
    #[serde(default)]
    pub numeric_scale: Option<u32>,

    /// Maximum character length
    #[serde(default)]
    pub character_maximum_length: Option<u32>,
}

impl CatalogRow {
    /// Create a row with no precision, scale, or length
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_type: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            data_type: data_type.into(),
            numeric_precision: None,
            numeric_scale: None,
            character_maximum_length: None,
        }
    }

    /// Set numeric precision and scale
    pub fn with_numeric(mut self, precision: u32, scale: u32) -> Self {
        self.numeric_precision = Some(precision);
        self.numeric_scale = Some(scale);
        self
    }

    /// Set maximum character length
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.character_maximum_length = Some(max_length);
        self
    }
}

/// A column after normalization
///
/// The data type is upper-cased so type comparison is case-insensitive.
/// The name keeps its original casing for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name with original casing
    pub name: String,

    /// Upper-cased data type
    pub data_type: String,

    /// Numeric precision
    pub precision: Option<u32>,

    /// Numeric scale
    pub scale: Option<u32>,

    /// Maximum character length
    pub max_length: Option<u32>,
}

impl Column {
    /// Create a column with no precision, scale, or length
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into().to_uppercase(),
            precision: None,
            scale: None,
            max_length: None,
        }
    }

    /// Set numeric precision and scale
    pub fn with_numeric(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Set maximum character length
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

impl From<CatalogRow> for Column {
    fn from(row: CatalogRow) -> Self {
        Self {
            name: row.column_name,
            data_type: row.data_type.to_uppercase(),
            precision: row.numeric_precision,
            scale: row.numeric_scale,
            max_length: row.character_maximum_length,
        }
    }
}

/// The columns of one table, keyed case-insensitively
///
/// Columns are stored under their lower-cased name, so lookups match the
/// warehouse's case-insensitive identifier resolution. Iteration order is
/// the normalized name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name with original casing
    pub name: String,

    columns: BTreeMap<String, Column>,
}

impl Table {
    /// Build a table from its columns
    ///
    /// Callers guarantee column names are unique case-insensitively; the
    /// normalizer rejects duplicates before construction.
    pub fn from_columns(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let mut map = BTreeMap::new();
        for column in columns {
            map.insert(column.name.to_lowercase(), column);
        }
        Self {
            name: name.into(),
            columns: map,
        }
    }

    /// Case-insensitive column lookup
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(&name.to_lowercase())
    }

    /// Columns in normalized name order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Column names with original casing, in normalized order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.values().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// All tables of one environment, keyed case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Environment label (e.g. "prod", "qa")
    pub environment: String,

    tables: BTreeMap<String, Table>,
}

impl Schema {
    /// Build a schema from its tables
    pub fn from_tables(environment: impl Into<String>, tables: Vec<Table>) -> Self {
        let mut map = BTreeMap::new();
        for table in tables {
            map.insert(table.name.to_lowercase(), table);
        }
        Self {
            environment: environment.into(),
            tables: map,
        }
    }

    /// Case-insensitive table lookup
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(&name.to_lowercase())
    }

    /// Tables in normalized name order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Table names with original casing, in normalized order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.values().map(|t| t.name.as_str()).collect()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(Table::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Content hash of the normalized schema
    ///
    /// Identifier casing does not affect the hash, matching the comparison
    /// semantics. The environment label is not part of the hash, so two
    /// environments with identical content fingerprint identically.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (table_key, table) in &self.tables {
            hasher.update(table_key.as_bytes());
            hasher.update([0u8]);
            for column in table.columns() {
                let line = format!(
                    "{}|{}|{}|{}|{}\n",
                    column.name.to_lowercase(),
                    column.data_type,
                    fmt_opt(column.precision),
                    fmt_opt(column.scale),
                    fmt_opt(column.max_length),
                );
                hasher.update(line.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}

fn fmt_opt(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_from_row_uppercases_type() {
        let row = CatalogRow::new("ORDERS", "Amount", "number").with_numeric(12, 2);
        let column = Column::from(row);

        assert_eq!(column.name, "Amount");
        assert_eq!(column.data_type, "NUMBER");
        assert_eq!(column.precision, Some(12));
        assert_eq!(column.scale, Some(2));
        assert_eq!(column.max_length, None);
    }

    #[test]
    fn table_lookup_is_case_insensitive() {
        let table = Table::from_columns(
            "Orders",
            vec![
                Column::new("Id", "NUMBER"),
                Column::new("AMOUNT", "NUMBER").with_numeric(12, 2),
            ],
        );

        assert!(table.column("id").is_some());
        assert!(table.column("ID").is_some());
        assert!(table.column("amount").is_some());
        assert!(table.column("missing").is_none());
        assert_eq!(table.column("id").map(|c| c.name.as_str()), Some("Id"));
    }

    #[test]
    fn table_iteration_is_ordered() {
        let table = Table::from_columns(
            "orders",
            vec![
                Column::new("zeta", "TEXT"),
                Column::new("alpha", "TEXT"),
                Column::new("Mid", "TEXT"),
            ],
        );

        assert_eq!(table.column_names(), vec!["alpha", "Mid", "zeta"]);
    }

    #[test]
    fn schema_lookup_and_counts() {
        let schema = Schema::from_tables(
            "prod",
            vec![
                Table::from_columns("ORDERS", vec![Column::new("id", "NUMBER")]),
                Table::from_columns(
                    "customers",
                    vec![Column::new("id", "NUMBER"), Column::new("name", "TEXT")],
                ),
            ],
        );

        assert_eq!(schema.table_count(), 2);
        assert_eq!(schema.column_count(), 3);
        assert!(schema.table("orders").is_some());
        assert!(schema.table("CUSTOMERS").is_some());
        assert_eq!(schema.table_names(), vec!["customers", "ORDERS"]);
    }

    #[test]
    fn fingerprint_ignores_identifier_casing() {
        let upper = Schema::from_tables(
            "prod",
            vec![Table::from_columns(
                "ORDERS",
                vec![Column::new("AMOUNT", "NUMBER").with_numeric(12, 2)],
            )],
        );
        let lower = Schema::from_tables(
            "qa",
            vec![Table::from_columns(
                "orders",
                vec![Column::new("amount", "NUMBER").with_numeric(12, 2)],
            )],
        );

        assert_eq!(upper.fingerprint(), lower.fingerprint());
    }

    #[test]
    fn fingerprint_tracks_content() {
        let base = Schema::from_tables(
            "prod",
            vec![Table::from_columns(
                "orders",
                vec![Column::new("amount", "NUMBER").with_numeric(12, 2)],
            )],
        );
        let changed = Schema::from_tables(
            "prod",
            vec![Table::from_columns(
                "orders",
                vec![Column::new("amount", "NUMBER").with_numeric(10, 2)],
            )],
        );

        assert_ne!(base.fingerprint(), changed.fingerprint());
    }

    #[test]
    fn fingerprint_distinguishes_absent_from_present() {
        let absent = Schema::from_tables(
            "prod",
            vec![Table::from_columns(
                "orders",
                vec![Column::new("amount", "NUMBER")],
            )],
        );
        let present = Schema::from_tables(
            "prod",
            vec![Table::from_columns(
                "orders",
                vec![Column::new("amount", "NUMBER").with_numeric(0, 0)],
            )],
        );

        assert_ne!(absent.fingerprint(), present.fingerprint());
    }
}
