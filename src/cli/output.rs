//! Output formatting and display utilities

use crate::error::HistoryError;
use crate::history::{History, HistoryEntry};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Entry as printed by `list --json`
#[derive(Debug, Serialize)]
struct ListedEntry<'a> {
    index: usize,
    #[serde(flatten)]
    entry: &'a HistoryEntry,
}

/// Entries to list: the most recent `max`, oldest first
fn listed(history: &History, max: Option<usize>) -> impl Iterator<Item = (usize, &HistoryEntry)> {
    let skip = max.map_or(0, |max| history.len().saturating_sub(max));
    history.store().iter().enumerate().skip(skip)
}

/// Print a colored listing, one entry per line
pub fn write_entries<W: Write>(
    out: &mut W,
    history: &History,
    max: Option<usize>,
    show_timestamps: bool,
) -> io::Result<()> {
    if history.store().is_disabled() {
        writeln!(out, "{}", "History is disabled (capacity 0)".yellow())?;
        return Ok(());
    }

    for (index, entry) in listed(history, max) {
        let number = format!("{:>5}", index).cyan();
        if show_timestamps {
            let stamp = entry.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string();
            writeln!(out, "{}  {}  {}", number, stamp.dimmed(), entry.text)?;
        } else {
            writeln!(out, "{}  {}", number, entry.text)?;
        }
    }
    Ok(())
}

/// Print the listing as a JSON array
pub fn write_entries_json<W: Write>(
    out: &mut W,
    history: &History,
    max: Option<usize>,
) -> io::Result<()> {
    let entries: Vec<_> = listed(history, max)
        .map(|(index, entry)| ListedEntry { index, entry })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)
}

/// Print an error in the form shown to users
pub fn write_error<W: Write>(out: &mut W, error: &HistoryError) -> io::Result<()> {
    writeln!(out, "{} {}", "Error:".red().bold(), error.user_message())
}
