//! Bodies of the one-shot `cmdhist` subcommands

use crate::cli::app::ConfigAction;
use crate::cli::output;
use crate::cli::shell::TerminalEditor;
use crate::config::HistoryConfig;
use crate::error::{HistoryError, Result};
use crate::session::HistorySession;
use std::io::Write;
use std::path::Path;
use tracing::warn;

pub fn list<W: Write>(
    session: &HistorySession,
    max: Option<usize>,
    timestamps: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let show_timestamps = timestamps || session.config().show_timestamps;
    if json {
        output::write_entries_json(out, session.history(), max)?;
    } else {
        output::write_entries(out, session.history(), max, show_timestamps)?;
    }
    Ok(())
}

pub fn add<W: Write>(
    session: &mut HistorySession,
    text: &str,
    quiet: bool,
    out: &mut W,
) -> Result<()> {
    if session.commit_line(text) {
        if !quiet {
            writeln!(out, "Recorded entry {}", session.history().len() - 1)?;
        }
    } else if session.history().store().is_disabled() {
        warn!("History is disabled (capacity 0); nothing recorded");
    }
    Ok(())
}

pub fn get<W: Write>(session: &HistorySession, index: usize, out: &mut W) -> Result<()> {
    let entry = session.get(index)?;
    writeln!(out, "{}", entry.text)?;
    Ok(())
}

pub fn delete<W: Write>(
    session: &mut HistorySession,
    index: usize,
    quiet: bool,
    out: &mut W,
) -> Result<()> {
    let removed = session.delete(index)?;
    if !quiet {
        writeln!(out, "Deleted entry {}: {}", index, removed.text)?;
    }
    Ok(())
}

pub fn expand<W: Write>(
    session: &mut HistorySession,
    query: &str,
    rest: &str,
    out: &mut W,
) -> Result<()> {
    let mut editor = TerminalEditor::new();
    session.expand(query, rest, &mut editor)?;
    writeln!(out, "{}", editor.input())?;
    Ok(())
}

pub fn clear<W: Write>(session: &mut HistorySession, quiet: bool, out: &mut W) -> Result<()> {
    let count = session.history().len();
    session.clear();
    if !quiet {
        writeln!(out, "Cleared {} entries", count)?;
    }
    Ok(())
}

pub fn capacity<W: Write>(
    session: &mut HistorySession,
    capacity: i64,
    quiet: bool,
    out: &mut W,
) -> Result<()> {
    let before = session.history().len();
    session.set_capacity(capacity)?;
    if !quiet {
        let dropped = before - session.history().len();
        writeln!(
            out,
            "History capacity set to {} ({} entries dropped)",
            capacity, dropped
        )?;
    }
    Ok(())
}

pub fn config<W: Write>(
    action: &ConfigAction,
    config: &HistoryConfig,
    config_path: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(config).map_err(|e| {
                HistoryError::configuration(format!("Failed to serialize config: {}", e))
            })?;
            write!(out, "{}", content)?;
        }
        ConfigAction::Path => {
            let path = match config_path {
                Some(path) => path.to_path_buf(),
                None => HistoryConfig::default_path()?,
            };
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}
