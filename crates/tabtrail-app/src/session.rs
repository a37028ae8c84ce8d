//! Applies script actions to a running tracker.

use tabtrail_core::TabTracker;
use tabtrail_platform::{MemoryTabHost, TabService};
use tabtrail_types::{Result, TabScope, TabtrailError};

use crate::script::{self, Action};

/// Run one action and describe what happened.
pub fn run(tracker: &mut TabTracker<MemoryTabHost>, action: Action) -> Result<String> {
    match action {
        Action::Open { url, window } => {
            let id = tracker.host_mut().open_tab(window, &url, true);
            tracker.pump();
            Ok(format!("opened tab {id} ({url}) in window {window}"))
        },
        Action::Focus(window) => {
            tracker.host_mut().focus_window(window)?;
            Ok(format!("focused window {window}"))
        },
        Action::Activate(id) => {
            tracker.host_mut().activate_tab(id)?;
            tracker.pump();
            Ok(format!("activated tab {id}"))
        },
        Action::Close(id) => {
            tracker.host_mut().remove_tabs(&[id])?;
            tracker.pump();
            Ok(format!("closed tab {id}"))
        },
        Action::Tabs => tabs(tracker),
        Action::History => Ok(history(tracker)),
        Action::Dump => Ok(serde_json::to_string_pretty(
            &tracker.controller().store().snapshot(),
        )?),
        Action::Check => {
            let violations = tracker.controller().store().verify();
            if violations.is_empty() {
                return Ok("history is consistent".to_string());
            }
            let lines: Vec<String> = violations.iter().map(ToString::to_string).collect();
            Ok(lines.join("\n"))
        },
        Action::Run(command) => Ok(tracker.dispatch(command)?.to_string()),
        Action::Help => Ok(script::help()),
        Action::Quit => Err(TabtrailError::Command("quit is handled by the caller".into())),
    }
}

fn tabs(tracker: &TabTracker<MemoryTabHost>) -> Result<String> {
    let host = tracker.host();
    let focused = host.focused_window();
    let current = tracker.controller().current();
    let lines: Vec<String> = host
        .tabs(TabScope::AllWindows)?
        .iter()
        .map(|tab| {
            let active = if host.active_in(tab.window) == Some(tab.id) {
                "*"
            } else {
                " "
            };
            let tracked = if current == Some(tab.id) { " (current)" } else { "" };
            let window = if focused == Some(tab.window) {
                format!("[{}]", tab.window)
            } else {
                format!(" {} ", tab.window)
            };
            format!("{window} {active} {:>3}  {}{tracked}", tab.id, tab.url)
        })
        .collect();
    if lines.is_empty() {
        return Ok("no open tabs".to_string());
    }
    Ok(lines.join("\n"))
}

/// The chain through the current tab, oldest first, current in brackets.
fn history(tracker: &TabTracker<MemoryTabHost>) -> String {
    let nav = tracker.controller();
    let Some(current) = nav.current() else {
        return "not tracking".to_string();
    };
    let store = nav.store();
    if !store.contains(current) {
        return format!("no history for tab {current}");
    }

    let mut parts: Vec<String> = store
        .walk_back(current)
        .iter()
        .skip(1)
        .rev()
        .map(ToString::to_string)
        .collect();
    parts.push(format!("[{current}]"));
    parts.extend(store.walk_forward(current).iter().skip(1).map(ToString::to_string));
    parts.join(" -> ")
}
