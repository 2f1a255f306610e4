//! Catalog snapshots stored as JSON files
//!
//! A snapshot is the column inventory of one environment, exported ahead
//! of time by whatever has warehouse access. Comparisons then run fully
//! offline against the files.

use crate::source::{FetchError, SchemaSource};
use schemadelta_core::CatalogRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A catalog export for one environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Environment the rows were exported from
    pub environment: String,

    /// Raw catalog rows
    pub rows: Vec<CatalogRow>,
}

impl Snapshot {
    /// Create a snapshot from rows
    pub fn new(environment: impl Into<String>, rows: Vec<CatalogRow>) -> Self {
        Self {
            environment: environment.into(),
            rows,
        }
    }

    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FetchError::Io(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| FetchError::InvalidSnapshot(format!("{}: {}", path.display(), e)))
    }

    /// Save the snapshot as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), FetchError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FetchError::InvalidSnapshot(e.to_string()))?;

        std::fs::write(path, json)
            .map_err(|e| FetchError::Io(format!("{}: {}", path.display(), e)))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Serves previously loaded snapshots by environment label
///
/// Loading a second snapshot with the same label replaces the first.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    catalogs: HashMap<String, Vec<CatalogRow>>,
}

impl SnapshotSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self {
            catalogs: HashMap::new(),
        }
    }

    /// Add an already-loaded snapshot
    pub fn add(&mut self, snapshot: Snapshot) {
        self.catalogs.insert(snapshot.environment, snapshot.rows);
    }

    /// Load a snapshot file and register it under its own label
    ///
    /// Returns the label the file declared.
    pub fn add_file(&mut self, path: &Path) -> Result<String, FetchError> {
        let snapshot = Snapshot::from_file(path)?;
        let label = snapshot.environment.clone();
        self.add(snapshot);
        Ok(label)
    }

    /// Build a source from a set of snapshot files
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, FetchError> {
        let mut source = Self::new();
        for path in paths {
            source.add_file(path.as_ref())?;
        }
        Ok(source)
    }

    /// Get all loaded environment labels
    pub fn environments(&self) -> Vec<String> {
        self.catalogs.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

#[async_trait::async_trait]
impl SchemaSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "Snapshot"
    }

    async fn fetch_catalog(&self, environment: &str) -> Result<Vec<CatalogRow>, FetchError> {
        self.catalogs
            .get(environment)
            .cloned()
            .ok_or_else(|| FetchError::EnvironmentNotFound(environment.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_json_round_trip() {
        let snapshot = Snapshot::new(
            "prod",
            vec![
                CatalogRow::new("ORDERS", "ID", "NUMBER").with_numeric(38, 0),
                CatalogRow::new("CUSTOMERS", "NAME", "TEXT").with_max_length(100),
            ],
        );

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
        assert_eq!(parsed.row_count(), 2);
    }

    #[test]
    fn snapshot_parses_minimal_rows() {
        // Optional fields may be omitted entirely in hand-written files
        let json = r#"{
            "environment": "qa",
            "rows": [
                {"table_name": "ORDERS", "column_name": "STATUS", "data_type": "TEXT"}
            ]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.environment, "qa");
        assert_eq!(snapshot.rows[0].numeric_precision, None);
        assert_eq!(snapshot.rows[0].character_maximum_length, None);
    }

    #[tokio::test]
    async fn source_serves_by_label() {
        let mut source = SnapshotSource::new();
        source.add(Snapshot::new(
            "prod",
            vec![CatalogRow::new("ORDERS", "ID", "NUMBER")],
        ));

        let rows = source.fetch_catalog("prod").await.unwrap();
        assert_eq!(rows.len(), 1);

        let missing = source.fetch_catalog("qa").await;
        assert!(matches!(missing, Err(FetchError::EnvironmentNotFound(_))));
    }

    #[tokio::test]
    async fn later_snapshot_replaces_earlier() {
        let mut source = SnapshotSource::new();
        source.add(Snapshot::new(
            "prod",
            vec![CatalogRow::new("ORDERS", "ID", "NUMBER")],
        ));
        source.add(Snapshot::new(
            "prod",
            vec![
                CatalogRow::new("ORDERS", "ID", "NUMBER"),
                CatalogRow::new("ORDERS", "STATUS", "TEXT"),
            ],
        ));

        let rows = source.fetch_catalog("prod").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(source.environments(), vec!["prod".to_string()]);
    }
}
