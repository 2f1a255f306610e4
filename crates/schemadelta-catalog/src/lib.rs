//! Catalog sources for cross-environment schema comparison
//!
//! A source hands back the raw column inventory of a named environment,
//! shaped like an INFORMATION_SCHEMA.COLUMNS export. Two offline
//! implementations ship here: an in-memory mock for tests and a JSON
//! snapshot reader for catalogs exported ahead of time.
//!
//! ## Example
//!
//! ```rust,ignore
//! use schemadelta_catalog::{fetch_pair, SchemaSource, SnapshotSource};
//!
//! let mut source = SnapshotSource::new();
//! source.add_file(Path::new("snapshots/prod.json"))?;
//! source.add_file(Path::new("snapshots/qa.json"))?;
//!
//! let (baseline, target) = fetch_pair(&source, "prod", "qa").await?;
//! ```

pub mod mock;
pub mod snapshot;
pub mod source;

pub use mock::MockSource;
pub use snapshot::{Snapshot, SnapshotSource};
pub use source::{fetch_pair, FetchError, SchemaSource};
