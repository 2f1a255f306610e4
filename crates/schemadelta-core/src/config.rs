//! Configuration schema (schemadelta.toml)

use crate::filter::{SystemColumnFilter, DEFAULT_SYSTEM_COLUMNS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Column exclusion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Column name patterns dropped before comparison
    #[serde(default = "default_exclude_columns")]
    pub exclude_columns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_columns: default_exclude_columns(),
        }
    }
}

fn default_exclude_columns() -> Vec<String> {
    DEFAULT_SYSTEM_COLUMNS.iter().map(|s| s.to_string()).collect()
}

impl FilterConfig {
    /// Build the column filter these settings describe
    pub fn build_filter(&self) -> SystemColumnFilter {
        SystemColumnFilter::new(self.exclude_columns.iter().cloned())
    }
}

/// Comparison tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffConfig {
    /// Pairs of character lengths treated as equal in either direction,
    /// e.g. `[[16777216, 8388607]]` for warehouses that report different
    /// text ceilings per deployment edition
    #[serde(default)]
    pub equivalent_lengths: Vec<(u32, u32)>,
}

/// Where to read an environment's catalog from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Path to a catalog snapshot file, relative to the config location
    pub snapshot: PathBuf,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Column exclusion settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// Comparison tuning
    #[serde(default)]
    pub diff: DiffConfig,

    /// Environment label -> catalog location
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,

    /// Config file location (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            diff: DiffConfig::default(),
            environments: BTreeMap::new(),
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        // Resolve snapshot paths against the config file's directory
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Resolve an environment's snapshot path
    ///
    /// Relative paths resolve against the config file's directory. Labels
    /// are opaque and match exactly.
    pub fn snapshot_path(&self, label: &str) -> Option<PathBuf> {
        let environment = self.environments.get(label)?;
        if environment.snapshot.is_absolute() {
            Some(environment.snapshot.clone())
        } else {
            Some(self.project_root.join(&environment.snapshot))
        }
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
