//! Shared test utilities for the tracker.
//!
//! Provides a [`MockTabHost`] that records every host call so tests can
//! assert exactly what the tracker asked the browser to do.

use std::cell::RefCell;

use tabtrail_platform::TabService;
use tabtrail_types::{Result, TabEvent, TabId, TabInfo, TabScope, TabtrailError, WindowId};

/// A recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ActiveTab,
    Tabs(TabScope),
    Activate(TabId),
    Remove(Vec<TabId>),
}

/// A single-window host that records calls and echoes activations back as
/// events, the way a browser does.
pub struct MockTabHost {
    pub tabs: Vec<TabInfo>,
    pub active: TabId,
    pub fail_activation: bool,
    pub fail_removal: bool,
    calls: RefCell<Vec<HostCall>>,
    pending: Vec<TabEvent>,
}

impl MockTabHost {
    pub fn with_tabs(entries: &[(u32, &str)], active: u32) -> Self {
        Self {
            tabs: entries
                .iter()
                .map(|(id, url)| TabInfo::new(*id, url, WindowId(1)))
                .collect(),
            active: TabId(active),
            fail_activation: false,
            fail_removal: false,
            calls: RefCell::new(Vec::new()),
            pending: Vec::new(),
        }
    }

    /// Queue an event as if the browser had fired it.
    pub fn push_event(&mut self, event: TabEvent) {
        self.pending.push(event);
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Ids passed to each `remove_tabs` call.
    pub fn removals(&self) -> Vec<Vec<TabId>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HostCall::Remove(ids) => Some(ids.clone()),
                _ => None,
            })
            .collect()
    }

    /// Ids passed to each `activate_tab` call.
    pub fn activations(&self) -> Vec<TabId> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HostCall::Activate(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl TabService for MockTabHost {
    fn active_tab(&self) -> Result<TabInfo> {
        self.record(HostCall::ActiveTab);
        self.tabs
            .iter()
            .find(|t| t.id == self.active)
            .cloned()
            .ok_or(TabtrailError::TabNotFound(self.active))
    }

    fn tabs(&self, scope: TabScope) -> Result<Vec<TabInfo>> {
        self.record(HostCall::Tabs(scope));
        Ok(self.tabs.clone())
    }

    fn activate_tab(&mut self, id: TabId) -> Result<()> {
        self.record(HostCall::Activate(id));
        if self.fail_activation {
            return Err(TabtrailError::Host("activation refused".into()));
        }
        if !self.tabs.iter().any(|t| t.id == id) {
            return Err(TabtrailError::TabNotFound(id));
        }
        self.active = id;
        self.pending.push(TabEvent::Activated(id));
        Ok(())
    }

    fn remove_tabs(&mut self, ids: &[TabId]) -> Result<()> {
        self.record(HostCall::Remove(ids.to_vec()));
        if self.fail_removal {
            return Err(TabtrailError::Host("removal refused".into()));
        }
        self.tabs.retain(|t| !ids.contains(&t.id));
        self.pending.extend(ids.iter().map(|id| TabEvent::Removed(*id)));
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<TabEvent> {
        std::mem::take(&mut self.pending)
    }
}
