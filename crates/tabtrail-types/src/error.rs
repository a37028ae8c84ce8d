//! Error types for tabtrail.
//!
//! Missing history (an unknown tab, an empty neighbour) is never an error;
//! these variants cover host faults, bad input and configuration only.

use std::io;

use crate::tab::TabId;

/// Errors produced by tabtrail.
#[derive(Debug, thiserror::Error)]
pub enum TabtrailError {
    #[error("host error: {0}")]
    Host(String),

    #[error("tab not found: {0}")]
    TabNotFound(TabId),

    #[error("command error: {0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TabtrailError>;
