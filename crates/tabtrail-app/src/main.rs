//! tabtrail driver.
//!
//! Runs the tab history tracker against an in-memory browser and reads a
//! script from stdin, one action per line. Pass a config path as the first
//! argument or in `TABTRAIL_CONFIG`. Type `help` for the action list.

mod script;
mod session;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use script::Action;
use tabtrail_core::{TabTracker, TrackerConfig};
use tabtrail_platform::MemoryTabHost;
use tabtrail_types::WindowId;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TABTRAIL_CONFIG").ok())
    {
        Some(path) => {
            TrackerConfig::load(&path).with_context(|| format!("loading config from {path}"))?
        },
        None => TrackerConfig::default(),
    };

    let mut host = MemoryTabHost::new();
    host.open_tab(WindowId(1), "about:newtab", true);
    let mut tracker = TabTracker::new(host, &config);
    tracker.start().context("starting tracker")?;

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let action = match script::parse_line(&line) {
            Ok(Some(Action::Quit)) => break,
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            },
        };
        match session::run(&mut tracker, action) {
            Ok(text) => writeln!(out, "{text}")?,
            Err(e) => {
                log::warn!("{line}: {e}");
                writeln!(out, "error: {e}")?;
            },
        }
    }

    log::info!(
        "Exiting with {} tracked tab(s)",
        tracker.controller().store().len()
    );
    Ok(())
}
