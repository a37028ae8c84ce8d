//! Serialized event loop tying a host to the navigation controller.
//!
//! Exactly one event or command is handled at a time, to completion. Host
//! calls are synchronous, so nothing else can interleave with a handler
//! while it waits on the host, and no locking is needed.

use tabtrail_platform::TabService;
use tabtrail_types::{Result, TabEvent, TabId};

use crate::commands::{CommandOutcome, TabCommand};
use crate::config::TrackerConfig;
use crate::nav::NavigationController;

/// Owns the host and the controller, and routes events and commands.
pub struct TabTracker<H: TabService> {
    host: H,
    nav: NavigationController,
}

impl<H: TabService> TabTracker<H> {
    pub fn new(host: H, config: &TrackerConfig) -> Self {
        Self {
            host,
            nav: NavigationController::new(config),
        }
    }

    /// Seed the history with the host's active tab.
    ///
    /// Events the host queued before this point predate tracking and are
    /// dropped.
    pub fn start(&mut self) -> Result<TabId> {
        let stale = self.host.drain_events();
        if !stale.is_empty() {
            log::debug!("tracker: dropping {} event(s) from before start", stale.len());
        }
        let tab = self.host.active_tab()?;
        self.nav.initialize(tab.id);
        log::info!("Tracking tab history from tab {} ({})", tab.id, tab.url);
        Ok(tab.id)
    }

    /// Process one host event.
    pub fn handle_event(&mut self, event: TabEvent) {
        log::trace!("tracker: {event}");
        self.nav.apply(event);
    }

    /// Handle every event the host has queued, in order.
    ///
    /// Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let events = self.host.drain_events();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    /// Run a command, then handle the events it caused.
    ///
    /// Host failures are logged and returned; there are no retries.
    pub fn dispatch(&mut self, command: TabCommand) -> Result<CommandOutcome> {
        self.pump();
        log::info!("Running {command}");
        let outcome = command.execute(&mut self.nav, &mut self.host);
        self.pump();
        match &outcome {
            Ok(result) => log::info!("{command}: {result}"),
            Err(e) => log::warn!("{command} failed: {e}"),
        }
        outcome
    }

    /// Run a command by its dispatch name.
    pub fn dispatch_named(&mut self, name: &str) -> Result<CommandOutcome> {
        let command = name.parse::<TabCommand>()?;
        self.dispatch(command)
    }

    pub fn controller(&self) -> &NavigationController {
        &self.nav
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to simulate user actions.
    ///
    /// Events those actions produce are handled on the next [`pump`](Self::pump).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
