//! Source trait for fetching environment column catalogs

use schemadelta_core::CatalogRow;

/// Errors that can occur when fetching a catalog
///
/// Clone-able so mocks can store an error per environment and hand out
/// copies on every fetch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("Environment not found: {0}")]
    EnvironmentNotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Trait for sources that can fetch a column catalog by environment label
///
/// Labels are opaque strings ("prod", "qa"); a source decides what they
/// resolve to.
#[async_trait::async_trait]
pub trait SchemaSource: Send + Sync {
    /// Get the source name (e.g. "Mock", "Snapshot")
    fn name(&self) -> &'static str;

    /// Fetch every catalog row for an environment
    ///
    /// Row order is whatever the backing store produced; callers must not
    /// rely on it.
    async fn fetch_catalog(&self, environment: &str) -> Result<Vec<CatalogRow>, FetchError>;
}

/// Fetch the two sides of a comparison concurrently
///
/// Fails as soon as either side fails; no partial result escapes.
pub async fn fetch_pair(
    source: &dyn SchemaSource,
    baseline_env: &str,
    target_env: &str,
) -> Result<(Vec<CatalogRow>, Vec<CatalogRow>), FetchError> {
    tokio::try_join!(
        source.fetch_catalog(baseline_env),
        source.fetch_catalog(target_env),
    )
}
