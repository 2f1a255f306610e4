//! SchemaDelta engine - Core comparison logic
//!
//! This crate implements the two stages of a comparison:
//! - Catalog normalization (raw rows -> canonical schema)
//! - Schema diffing (two schemas -> ordered discrepancy list)

pub mod diff;
pub mod normalize;

pub use diff::{DiffOptions, SchemaDiff};
pub use normalize::{normalize, NormalizeError};
