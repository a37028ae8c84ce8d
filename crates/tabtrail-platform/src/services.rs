//! Tab service trait and in-memory host implementation.

use std::collections::HashMap;

use tabtrail_types::{Result, TabEvent, TabId, TabInfo, TabScope, TabtrailError, WindowId};

// ---------------------------------------------------------------------------
// Tab service
// ---------------------------------------------------------------------------

/// Abstraction over the host's tab-management API.
///
/// Calls are synchronous: once a call returns, the host-side effect has
/// completed (or failed). Nothing here retries.
pub trait TabService {
    /// The active tab of the last-focused window.
    fn active_tab(&self) -> Result<TabInfo>;

    /// All tabs within `scope`, in host enumeration order.
    fn tabs(&self, scope: TabScope) -> Result<Vec<TabInfo>>;

    /// Make `id` the active tab of its window.
    fn activate_tab(&mut self, id: TabId) -> Result<()>;

    /// Close every tab in `ids` in one call.
    fn remove_tabs(&mut self, ids: &[TabId]) -> Result<()>;

    /// Events produced since the last drain, oldest first.
    ///
    /// Hosts that deliver their event feed some other way return nothing.
    fn drain_events(&mut self) -> Vec<TabEvent> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// In-memory host
// ---------------------------------------------------------------------------

/// A browser simulated in memory.
///
/// Tabs keep their creation order. Each window has at most one active tab,
/// and one window is the last-focused one. Activation and removal queue the
/// same events a real browser would fire.
#[derive(Debug, Default)]
pub struct MemoryTabHost {
    tabs: Vec<TabInfo>,
    active: HashMap<WindowId, TabId>,
    focused: Option<WindowId>,
    next_id: u32,
    events: Vec<TabEvent>,
}

impl MemoryTabHost {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Open a tab at the end of `window`.
    ///
    /// The first tab of a window is always activated, as is any tab opened
    /// with `activate`. A window opened while nothing is focused becomes the
    /// focused one.
    pub fn open_tab(&mut self, window: WindowId, url: &str, activate: bool) -> TabId {
        let id = TabId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.tabs.push(TabInfo::new(id, url, window));
        log::debug!("host: opened tab {id} ({url}) in window {window}");

        if self.focused.is_none() {
            self.focused = Some(window);
        }
        if activate || !self.active.contains_key(&window) {
            self.active.insert(window, id);
            self.events.push(TabEvent::Activated(id));
        }
        id
    }

    /// Mark `window` as the last-focused window.
    pub fn focus_window(&mut self, window: WindowId) -> Result<()> {
        if !self.tabs.iter().any(|t| t.window == window) {
            return Err(TabtrailError::Host(format!("no such window: {window}")));
        }
        self.focused = Some(window);
        Ok(())
    }

    /// Look up a tab by id.
    pub fn tab(&self, id: TabId) -> Option<&TabInfo> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Active tab of `window`, if it has any tabs.
    pub fn active_in(&self, window: WindowId) -> Option<TabId> {
        self.active.get(&window).copied()
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        self.focused
    }

    /// Every open tab, across all windows.
    pub fn all_tabs(&self) -> &[TabInfo] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Remove one known tab, handing activation to a neighbour when the
    /// active tab of a window goes away.
    fn remove_one(&mut self, id: TabId) {
        let Some(pos) = self.tabs.iter().position(|t| t.id == id) else {
            return;
        };
        let window = self.tabs[pos].window;

        if self.active.get(&window) == Some(&id) {
            // Prefer the tab to the right, then the one to the left.
            let right = self.tabs[pos + 1..].iter().find(|t| t.window == window);
            let left = self.tabs[..pos].iter().rev().find(|t| t.window == window);
            match right.or(left).map(|t| t.id) {
                Some(successor) => {
                    self.active.insert(window, successor);
                    self.events.push(TabEvent::Activated(successor));
                },
                None => {
                    self.active.remove(&window);
                },
            }
        }

        self.tabs.remove(pos);
        self.events.push(TabEvent::Removed(id));
        log::debug!("host: removed tab {id} from window {window}");

        if self.focused == Some(window) && !self.active.contains_key(&window) {
            self.focused = self.tabs.first().map(|t| t.window);
        }
    }
}

impl TabService for MemoryTabHost {
    fn active_tab(&self) -> Result<TabInfo> {
        let window = self
            .focused
            .ok_or_else(|| TabtrailError::Host("no focused window".into()))?;
        let id = self
            .active
            .get(&window)
            .ok_or_else(|| TabtrailError::Host(format!("window {window} has no active tab")))?;
        self.tab(*id).cloned().ok_or(TabtrailError::TabNotFound(*id))
    }

    fn tabs(&self, scope: TabScope) -> Result<Vec<TabInfo>> {
        match scope {
            TabScope::AllWindows => Ok(self.tabs.clone()),
            TabScope::LastFocusedWindow => {
                let Some(window) = self.focused else {
                    return Ok(Vec::new());
                };
                Ok(self
                    .tabs
                    .iter()
                    .filter(|t| t.window == window)
                    .cloned()
                    .collect())
            },
        }
    }

    fn activate_tab(&mut self, id: TabId) -> Result<()> {
        let window = self.tab(id).ok_or(TabtrailError::TabNotFound(id))?.window;
        if self.active.insert(window, id) != Some(id) {
            self.events.push(TabEvent::Activated(id));
        }
        Ok(())
    }

    fn remove_tabs(&mut self, ids: &[TabId]) -> Result<()> {
        // All-or-nothing: validate before touching anything.
        if let Some(missing) = ids.iter().find(|id| self.tab(**id).is_none()) {
            return Err(TabtrailError::TabNotFound(*missing));
        }
        for &id in ids {
            self.remove_one(id);
        }
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<TabEvent> {
        std::mem::take(&mut self.events)
    }
}
