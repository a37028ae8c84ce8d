//! Tracker configuration, loaded from TOML.

use std::path::Path;

use serde::Deserialize;
use tabtrail_types::{Result, TabScope, TabtrailError};

use crate::history::BranchPolicy;

/// History store settings (`[history]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// How an activation treats the forward branch it replaces.
    pub branch_policy: BranchPolicy,
}

/// Bulk cleanup settings (`[cleanup]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Which tabs `close_duplicated_tabs` and `close_all_other_tabs` see.
    pub scope: TabScope,
}

/// Top-level tracker configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub history: HistoryConfig,
    pub cleanup: CleanupConfig,
}

impl TrackerConfig {
    /// Parse a configuration document. Missing tables and keys default.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| TabtrailError::Config(format!("tabtrail.toml: {e}")))
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&source)?;
        log::info!(
            "Loaded config from {} (branch_policy={}, scope={})",
            path.display(),
            config.history.branch_policy,
            config.cleanup.scope,
        );
        Ok(config)
    }
}
