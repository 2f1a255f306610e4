//! SchemaDelta Core
//!
//! Canonical domain model for cross-environment schema comparison.
//! Discrepancy kind identifiers are stable - never rename them.

pub mod config;
pub mod discrepancy;
pub mod filter;
pub mod report;
pub mod schema;

pub use config::{Config, ConfigError, DiffConfig, EnvironmentConfig, FilterConfig};
pub use discrepancy::{Discrepancy, DiscrepancyKind};
pub use filter::{SystemColumnFilter, DEFAULT_SYSTEM_COLUMNS};
pub use report::{Report, ReportSummary, ReportVersion};
pub use schema::{CatalogRow, Column, Schema, Table};
