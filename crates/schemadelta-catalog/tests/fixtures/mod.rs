//! Test fixtures for catalog source integration tests
//!
//! This module provides reusable catalog-row inventories for testing
//! sources and the comparison pipeline. The fixtures mirror the column
//! metadata a warehouse information schema typically returns.

use schemadelta_catalog::Snapshot;
use schemadelta_core::CatalogRow;

/// Create a typical production catalog
///
/// Two business tables plus the audit columns a loader stamps on
/// everything:
/// - ORDERS (id, amount, discount, created_at)
/// - CUSTOMERS (id, name, email, updated_by)
pub fn prod_catalog() -> Vec<CatalogRow> {
    vec![
        CatalogRow::new("ORDERS", "ID", "NUMBER").with_numeric(38, 0),
        CatalogRow::new("ORDERS", "AMOUNT", "NUMBER").with_numeric(10, 2),
        CatalogRow::new("ORDERS", "DISCOUNT", "NUMBER").with_numeric(10, 2),
        CatalogRow::new("ORDERS", "CREATED_AT", "TIMESTAMP_NTZ"),
        CatalogRow::new("CUSTOMERS", "ID", "NUMBER").with_numeric(38, 0),
        CatalogRow::new("CUSTOMERS", "NAME", "TEXT").with_max_length(100),
        CatalogRow::new("CUSTOMERS", "EMAIL", "TEXT").with_max_length(320),
        CatalogRow::new("CUSTOMERS", "UPDATED_BY", "TEXT").with_max_length(50),
    ]
}

/// Create the same catalog with drift applied
///
/// Relative to [`prod_catalog`]:
/// - ORDERS.AMOUNT became TEXT
/// - ORDERS.DISCOUNT was dropped
/// - STAGING_IMPORT appeared
pub fn drifted_catalog() -> Vec<CatalogRow> {
    vec![
        CatalogRow::new("ORDERS", "ID", "NUMBER").with_numeric(38, 0),
        CatalogRow::new("ORDERS", "AMOUNT", "TEXT").with_max_length(100),
        CatalogRow::new("ORDERS", "CREATED_AT", "TIMESTAMP_NTZ"),
        CatalogRow::new("CUSTOMERS", "ID", "NUMBER").with_numeric(38, 0),
        CatalogRow::new("CUSTOMERS", "NAME", "TEXT").with_max_length(100),
        CatalogRow::new("CUSTOMERS", "EMAIL", "TEXT").with_max_length(320),
        CatalogRow::new("CUSTOMERS", "UPDATED_BY", "TEXT").with_max_length(50),
        CatalogRow::new("STAGING_IMPORT", "ID", "NUMBER").with_numeric(38, 0),
    ]
}

/// Create a minimal single-row catalog
pub fn minimal_catalog() -> Vec<CatalogRow> {
    vec![CatalogRow::new("EVENTS", "ID", "NUMBER").with_numeric(38, 0)]
}

/// Create a wide catalog (many tables, many columns)
///
/// Useful for exercising sources with realistic volumes.
pub fn wide_catalog(num_tables: usize, columns_per_table: usize) -> Vec<CatalogRow> {
    let mut rows = Vec::with_capacity(num_tables * columns_per_table);
    for t in 0..num_tables {
        let table = format!("TABLE_{}", t);
        for c in 0..columns_per_table {
            let row = if c % 2 == 0 {
                CatalogRow::new(&table, format!("COL_{}", c), "NUMBER").with_numeric(38, 0)
            } else {
                CatalogRow::new(&table, format!("COL_{}", c), "TEXT").with_max_length(4096)
            };
            rows.push(row);
        }
    }
    rows
}

/// Create a snapshot wrapping [`prod_catalog`] under the given label
pub fn prod_snapshot(label: &str) -> Snapshot {
    Snapshot::new(label, prod_catalog())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prod_catalog() {
        let rows = prod_catalog();
        assert_eq!(rows.len(), 8);
        assert!(rows.iter().any(|r| r.table_name == "ORDERS"));
        assert!(rows.iter().any(|r| r.table_name == "CUSTOMERS"));
        assert!(rows.iter().any(|r| r.column_name == "CREATED_AT"));
    }

    #[test]
    fn test_drifted_catalog() {
        let rows = drifted_catalog();
        assert!(rows.iter().any(|r| r.table_name == "STAGING_IMPORT"));
        assert!(!rows.iter().any(|r| r.column_name == "DISCOUNT"));

        let amount = rows
            .iter()
            .find(|r| r.column_name == "AMOUNT")
            .unwrap();
        assert_eq!(amount.data_type, "TEXT");
    }

    #[test]
    fn test_wide_catalog() {
        let rows = wide_catalog(10, 20);
        assert_eq!(rows.len(), 200);
        assert!(rows.iter().any(|r| r.table_name == "TABLE_0"));
        assert!(rows.iter().any(|r| r.table_name == "TABLE_9"));
    }

    #[test]
    fn test_prod_snapshot() {
        let snapshot = prod_snapshot("prod");
        assert_eq!(snapshot.environment, "prod");
        assert_eq!(snapshot.row_count(), 8);
    }
}
