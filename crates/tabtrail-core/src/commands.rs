//! The four user-invokable commands and their dispatch.

use std::fmt;
use std::str::FromStr;

use tabtrail_platform::TabService;
use tabtrail_types::{Result, TabId, TabtrailError};

use crate::nav::NavigationController;

/// A command the host's command layer can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabCommand {
    CloseAllOtherTabs,
    CloseDuplicatedTabs,
    GoToPreviousTab,
    GoToNextTab,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Switched to this tab.
    Navigated(TabId),
    /// No history in the requested direction; nothing happened.
    NoHistory,
    /// These tabs were closed (possibly none).
    Closed(Vec<TabId>),
}

impl TabCommand {
    /// Every command, in registration order.
    pub const ALL: [TabCommand; 4] = [
        Self::CloseAllOtherTabs,
        Self::CloseDuplicatedTabs,
        Self::GoToPreviousTab,
        Self::GoToNextTab,
    ];

    /// The name the command layer dispatches on.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CloseAllOtherTabs => "close_all_other_tabs",
            Self::CloseDuplicatedTabs => "close_duplicated_tabs",
            Self::GoToPreviousTab => "go_to_previous_tab",
            Self::GoToNextTab => "go_to_next_tab",
        }
    }

    /// One-line description for `help`.
    pub fn description(&self) -> &'static str {
        match self {
            Self::CloseAllOtherTabs => "Close every tab except the active one",
            Self::CloseDuplicatedTabs => "Close tabs whose URL is already open",
            Self::GoToPreviousTab => "Switch to the previously active tab",
            Self::GoToNextTab => "Switch forward again after going back",
        }
    }

    /// Run the command against `nav` and `host`.
    pub fn execute<H: TabService + ?Sized>(
        &self,
        nav: &mut NavigationController,
        host: &mut H,
    ) -> Result<CommandOutcome> {
        let outcome = match self {
            Self::CloseAllOtherTabs => CommandOutcome::Closed(nav.close_all_other_tabs(host)?),
            Self::CloseDuplicatedTabs => CommandOutcome::Closed(nav.close_duplicate_tabs(host)?),
            Self::GoToPreviousTab => nav
                .go_to_previous(host)?
                .map_or(CommandOutcome::NoHistory, CommandOutcome::Navigated),
            Self::GoToNextTab => nav
                .go_to_next(host)?
                .map_or(CommandOutcome::NoHistory, CommandOutcome::Navigated),
        };
        Ok(outcome)
    }
}

impl fmt::Display for TabCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TabCommand {
    type Err = TabtrailError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name() == s)
            .ok_or_else(|| TabtrailError::Command(format!("unknown command: {s}")))
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigated(id) => write!(f, "switched to tab {id}"),
            Self::NoHistory => write!(f, "no history in that direction"),
            Self::Closed(ids) if ids.is_empty() => write!(f, "nothing to close"),
            Self::Closed(ids) => {
                let list: Vec<String> = ids.iter().map(ToString::to_string).collect();
                write!(f, "closed tab(s) {}", list.join(", "))
            },
        }
    }
}
