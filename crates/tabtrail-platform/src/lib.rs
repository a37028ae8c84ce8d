//! Host tab-management services.
//!
//! The tracker never talks to a browser directly. Everything it needs from
//! the host (querying tabs, activating one, removing a set, and the event
//! feed) goes through [`TabService`]. [`MemoryTabHost`] is a self-contained
//! host used by the app binary and by tests.

mod services;

pub use services::{MemoryTabHost, TabService};
