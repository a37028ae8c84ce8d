//! Bulk tab cleanup: close duplicates, close everything but the active tab.
//!
//! The removal sets are computed by pure functions over the host's tab
//! listing; the host sees at most one `remove_tabs` call per operation.

use std::collections::HashSet;

use tabtrail_platform::TabService;
use tabtrail_types::{Result, TabId, TabInfo, TabScope};

/// Every tab whose URL already appeared earlier in `tabs`.
///
/// URLs are compared as exact strings.
pub fn duplicate_tab_ids(tabs: &[TabInfo]) -> Vec<TabId> {
    let mut seen = HashSet::new();
    tabs.iter()
        .filter(|tab| !seen.insert(tab.url.as_str()))
        .map(|tab| tab.id)
        .collect()
}

/// Every tab except `keep`.
pub fn other_tab_ids(tabs: &[TabInfo], keep: TabId) -> Vec<TabId> {
    tabs.iter().map(|tab| tab.id).filter(|id| *id != keep).collect()
}

/// Close all but the first tab of each URL within `scope`.
///
/// Returns the ids that were removed.
pub fn close_duplicate_tabs<H: TabService + ?Sized>(
    host: &mut H,
    scope: TabScope,
) -> Result<Vec<TabId>> {
    let tabs = host.tabs(scope)?;
    let doomed = duplicate_tab_ids(&tabs);
    remove(host, doomed)
}

/// Close every tab within `scope` except the active one.
///
/// Returns the ids that were removed.
pub fn close_all_other_tabs<H: TabService + ?Sized>(
    host: &mut H,
    scope: TabScope,
) -> Result<Vec<TabId>> {
    let active = host.active_tab()?;
    let tabs = host.tabs(scope)?;
    let doomed = other_tab_ids(&tabs, active.id);
    remove(host, doomed)
}

fn remove<H: TabService + ?Sized>(host: &mut H, ids: Vec<TabId>) -> Result<Vec<TabId>> {
    if ids.is_empty() {
        log::debug!("cleanup: nothing to close");
        return Ok(ids);
    }
    host.remove_tabs(&ids)?;
    log::info!("cleanup: closed {} tab(s)", ids.len());
    Ok(ids)
}
