//! Tab identifiers and descriptors as reported by the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle the host assigns to an open tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TabId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Host window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tab as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: TabId,
    pub url: String,
    pub window: WindowId,
}

impl TabInfo {
    pub fn new(id: impl Into<TabId>, url: &str, window: WindowId) -> Self {
        Self {
            id: id.into(),
            url: url.to_string(),
            window,
        }
    }
}

/// Which tabs a host enumeration covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabScope {
    /// Only the window the user focused last.
    #[default]
    LastFocusedWindow,
    /// Every window the host exposes.
    AllWindows,
}

impl fmt::Display for TabScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastFocusedWindow => write!(f, "last_focused_window"),
            Self::AllWindows => write!(f, "all_windows"),
        }
    }
}
