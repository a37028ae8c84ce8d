//! Foundation types for tabtrail.
//!
//! This crate contains the host-agnostic types shared by all tabtrail
//! crates: tab identifiers and descriptors, the tab event feed, and the
//! error type.

pub mod error;
pub mod event;
pub mod tab;

pub use error::{Result, TabtrailError};
pub use event::TabEvent;
pub use tab::{TabId, TabInfo, TabScope, WindowId};
