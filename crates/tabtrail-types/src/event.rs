//! The serial tab event feed delivered by the host.

use std::fmt;

use crate::tab::TabId;

/// A tab lifecycle event, delivered one at a time in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    /// A tab became the active tab.
    Activated(TabId),
    /// A tab was closed.
    Removed(TabId),
}

impl fmt::Display for TabEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activated(id) => write!(f, "activated({id})"),
            Self::Removed(id) => write!(f, "removed({id})"),
        }
    }
}
