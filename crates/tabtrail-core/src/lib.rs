//! Tab activation history and navigation.
//!
//! The [`HistoryStore`] links tabs in the order they were activated. The
//! [`NavigationController`] walks those links to go back and forward, and
//! runs the bulk cleanup commands. [`TabTracker`] feeds both from a host's
//! event stream, one event at a time.

pub mod cleanup;
pub mod commands;
pub mod config;
pub mod history;
pub mod nav;
pub mod tracker;

#[cfg(test)]
mod test_utils;

pub use commands::{CommandOutcome, TabCommand};
pub use config::{CleanupConfig, HistoryConfig, TrackerConfig};
pub use history::{BranchPolicy, HistoryNode, HistoryStore, Link, Violation};
pub use nav::{NavigationController, TrackingState};
pub use tracker::TabTracker;
