//! Script line parsing.

use tabtrail_core::TabCommand;
use tabtrail_types::{Result, TabId, TabtrailError, WindowId};

/// One line of a driver script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open a tab in a window and make it active.
    Open { url: String, window: WindowId },
    Focus(WindowId),
    /// The user clicks on a tab.
    Activate(TabId),
    /// The user closes a tab.
    Close(TabId),
    Tabs,
    History,
    Dump,
    Check,
    Run(TabCommand),
    Help,
    Quit,
}

const HELP: &str = "\
open <url> [window]   open a tab and switch to it
focus <window>        focus a window
activate <id>         switch to a tab
close <id>            close a tab
tabs                  list open tabs
history               show the history chain around the current tab
dump                  print the history store as JSON
check                 verify the history store
help                  show this text
quit                  exit";

/// Driver actions followed by one line per tracker command.
pub fn help() -> String {
    let mut text = HELP.to_string();
    for cmd in TabCommand::ALL {
        text.push_str(&format!("\n{:<22}{}", cmd.name(), cmd.description()));
    }
    text
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Action>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let action = match (verb, args.as_slice()) {
        ("open", [url]) => Action::Open {
            url: url.to_string(),
            window: WindowId(1),
        },
        ("open", [url, window]) => Action::Open {
            url: url.to_string(),
            window: WindowId(number(window)?),
        },
        ("focus", [window]) => Action::Focus(WindowId(number(window)?)),
        ("activate", [id]) => Action::Activate(TabId(number(id)?)),
        ("close", [id]) => Action::Close(TabId(number(id)?)),
        ("tabs", []) => Action::Tabs,
        ("history", []) => Action::History,
        ("dump", []) => Action::Dump,
        ("check", []) => Action::Check,
        ("help", []) => Action::Help,
        ("quit" | "exit", []) => Action::Quit,
        (name, []) => Action::Run(name.parse()?),
        _ => return Err(TabtrailError::Command(format!("bad arguments: {line}"))),
    };
    Ok(Some(action))
}

fn number(word: &str) -> Result<u32> {
    word.parse()
        .map_err(|_| TabtrailError::Command(format!("expected a number, got {word:?}")))
}
