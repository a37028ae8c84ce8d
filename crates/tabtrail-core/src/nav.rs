//! Navigation controller: current tab, previous/next, bulk cleanup.
//!
//! Owns the [`HistoryStore`] and the current-tab pointer. Programmatic
//! activations run inside a suppression window so the browser's echo of
//! them is not mistaken for the user switching tabs.

use tabtrail_platform::TabService;
use tabtrail_types::{Result, TabEvent, TabId, TabScope};

use crate::cleanup;
use crate::config::TrackerConfig;
use crate::history::HistoryStore;

/// Whether activation events are being recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackingState {
    #[default]
    Tracking,
    /// A programmatic activation is in flight; activations are ignored.
    Suppressed,
}

/// Navigation controller managing activation history.
#[derive(Debug, Default)]
pub struct NavigationController {
    store: HistoryStore,
    current: Option<TabId>,
    state: TrackingState,
    scope: TabScope,
}

impl NavigationController {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            store: HistoryStore::new(config.history.branch_policy),
            current: None,
            state: TrackingState::Tracking,
            scope: config.cleanup.scope,
        }
    }

    /// Start tracking from `id`, discarding any earlier history.
    pub fn initialize(&mut self, id: TabId) {
        self.store.initialize(id);
        self.current = Some(id);
    }

    /// Handle an activation reported by the host.
    ///
    /// Returns `false` if it was ignored because tracking is suppressed.
    pub fn record_activation(&mut self, id: TabId) -> bool {
        if self.state == TrackingState::Suppressed {
            log::debug!("nav: ignoring activation of {id} while suppressed");
            return false;
        }
        self.store.record_activation(self.current, id);
        self.current = Some(id);
        true
    }

    /// Handle a removal reported by the host. `id` need not be current.
    pub fn remove_tab(&mut self, id: TabId) -> bool {
        self.store.remove(id)
    }

    /// Apply one host event.
    pub fn apply(&mut self, event: TabEvent) {
        match event {
            TabEvent::Activated(id) => {
                self.record_activation(id);
            },
            TabEvent::Removed(id) => {
                self.remove_tab(id);
            },
        }
    }

    /// Activate the tab before the current one.
    ///
    /// Returns the tab switched to, or `None` at the oldest tracked tab, in
    /// which case the host is not called.
    pub fn go_to_previous<H: TabService + ?Sized>(&mut self, host: &mut H) -> Result<Option<TabId>> {
        let target = self.current.and_then(|id| self.store.previous(id));
        self.go_to(host, target)
    }

    /// Activate the tab after the current one.
    ///
    /// Returns the tab switched to, or `None` at the newest tracked tab.
    pub fn go_to_next<H: TabService + ?Sized>(&mut self, host: &mut H) -> Result<Option<TabId>> {
        let target = self.current.and_then(|id| self.store.next(id));
        self.go_to(host, target)
    }

    fn go_to<H: TabService + ?Sized>(
        &mut self,
        host: &mut H,
        target: Option<TabId>,
    ) -> Result<Option<TabId>> {
        let Some(target) = target else {
            log::debug!("nav: no history in that direction");
            return Ok(None);
        };

        self.state = TrackingState::Suppressed;
        let activated = host.activate_tab(target);
        // Whatever the host fired during the call belongs to the window.
        for event in host.drain_events() {
            self.apply(event);
        }
        self.state = TrackingState::Tracking;

        activated?;
        self.current = Some(target);
        Ok(Some(target))
    }

    /// Close every tab whose URL appeared earlier in the listing.
    pub fn close_duplicate_tabs<H: TabService + ?Sized>(&mut self, host: &mut H) -> Result<Vec<TabId>> {
        cleanup::close_duplicate_tabs(host, self.scope)
    }

    /// Close every tab except the active one.
    pub fn close_all_other_tabs<H: TabService + ?Sized>(&mut self, host: &mut H) -> Result<Vec<TabId>> {
        cleanup::close_all_other_tabs(host, self.scope)
    }

    pub fn current(&self) -> Option<TabId> {
        self.current
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.state
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn can_go_back(&self) -> bool {
        self.current.and_then(|id| self.store.previous(id)).is_some()
    }

    pub fn can_go_forward(&self) -> bool {
        self.current.and_then(|id| self.store.next(id)).is_some()
    }
}
