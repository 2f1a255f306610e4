//! Mock catalog source for testing
//!
//! Returns predefined catalogs without touching any warehouse. Useful for:
//! - Unit testing normalization and comparison logic
//! - Integration testing CI/CD pipelines
//! - Simulating fetch failures per environment
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemadelta_catalog::{MockSource, SchemaSource};
//! use schemadelta_core::CatalogRow;
//!
//! let source = MockSource::new();
//! source.add_catalog("prod", vec![
//!     CatalogRow::new("ORDERS", "ID", "NUMBER").with_numeric(38, 0),
//! ]).await;
//!
//! let rows = source.fetch_catalog("prod").await?;
//! ```

use crate::source::{FetchError, SchemaSource};
use schemadelta_core::CatalogRow;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mock catalog source for testing
///
/// Stores catalogs in memory keyed by environment label. Clones share
/// state, so a test can keep a handle while the source is passed elsewhere.
pub struct MockSource {
    /// Predefined catalogs by environment label
    catalogs: Arc<RwLock<HashMap<String, Vec<CatalogRow>>>>,

    /// Errors to return for specific environments
    errors: Arc<RwLock<HashMap<String, FetchError>>>,

    /// Name to return from name() method
    source_name: &'static str,
}

impl MockSource {
    /// Create a mock source with no predefined catalogs
    pub fn new() -> Self {
        Self {
            catalogs: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            source_name: "Mock",
        }
    }

    /// Add a catalog for an environment
    pub async fn add_catalog(&self, environment: impl Into<String>, rows: Vec<CatalogRow>) {
        self.catalogs.write().await.insert(environment.into(), rows);
    }

    /// Configure an error to be returned for an environment
    ///
    /// The error takes precedence over any catalog stored under the same
    /// label.
    pub async fn add_error(&self, environment: impl Into<String>, error: FetchError) {
        self.errors.write().await.insert(environment.into(), error);
    }

    /// Set a custom source name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.source_name = name;
        self
    }

    /// Create a mock source from a pre-built map of catalogs
    pub fn from_catalogs(catalogs: HashMap<String, Vec<CatalogRow>>) -> Self {
        Self {
            catalogs: Arc::new(RwLock::new(catalogs)),
            errors: Arc::new(RwLock::new(HashMap::new())),
            source_name: "Mock",
        }
    }

    /// Get the number of stored catalogs
    pub async fn catalog_count(&self) -> usize {
        self.catalogs.read().await.len()
    }

    /// Check if a catalog exists for an environment
    pub async fn has_catalog(&self, environment: &str) -> bool {
        self.catalogs.read().await.contains_key(environment)
    }

    /// Get all environment labels that have catalogs
    pub async fn environment_names(&self) -> Vec<String> {
        self.catalogs.read().await.keys().cloned().collect()
    }

    /// Clear all stored catalogs and errors
    pub async fn clear(&self) {
        self.catalogs.write().await.clear();
        self.errors.write().await.clear();
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockSource {
    fn clone(&self) -> Self {
        Self {
            catalogs: Arc::clone(&self.catalogs),
            errors: Arc::clone(&self.errors),
            source_name: self.source_name,
        }
    }
}

#[async_trait::async_trait]
impl SchemaSource for MockSource {
    fn name(&self) -> &'static str {
        self.source_name
    }

    async fn fetch_catalog(&self, environment: &str) -> Result<Vec<CatalogRow>, FetchError> {
        // Check for configured errors first
        if let Some(error) = self.errors.read().await.get(environment) {
            return Err(error.clone());
        }

        let catalogs = self.catalogs.read().await;
        catalogs
            .get(environment)
            .cloned()
            .ok_or_else(|| FetchError::EnvironmentNotFound(environment.to_string()))
    }
}
