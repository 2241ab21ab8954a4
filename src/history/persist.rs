//! Line-oriented history file format
//!
//! Each line is `<RFC3339 timestamp> <text>`. Lines without a leading
//! timestamp are taken verbatim, so plain one-command-per-line files load too.

use super::{History, HistoryEntry};
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{info, warn};

/// Render an entry as one history file line (without the newline)
pub fn format_line(entry: &HistoryEntry) -> String {
    format!(
        "{} {}",
        entry.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        entry.text
    )
}

/// Split a history file line into its timestamp, if any, and its text.
///
/// The text is whatever follows the first run of whitespace after the
/// timestamp. Returns `None` for lines carrying no text.
pub fn parse_line(line: &str) -> Option<(Option<DateTime<Utc>>, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let parsed = line.split_once(char::is_whitespace).and_then(|(stamp, rest)| {
        DateTime::parse_from_rfc3339(stamp)
            .ok()
            .map(|t| (Some(t.with_timezone(&Utc)), rest.trim_start()))
    });

    let (recorded_at, text) = match parsed {
        Some(parsed) => parsed,
        None if DateTime::parse_from_rfc3339(line.trim()).is_ok() => return None,
        None => (None, line),
    };

    if text.trim().is_empty() {
        None
    } else {
        Some((recorded_at, text))
    }
}

impl History {
    /// Add every line from a history file's worth of lines.
    ///
    /// Each line goes through the normal add policy. Lines carrying no text
    /// are skipped. Returns the number of entries actually added.
    pub fn load<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for line in lines {
            if self.load_line(line.as_ref()) {
                added += 1;
            }
        }
        added
    }

    /// Render every entry as a history file line, oldest first
    pub fn serialize(&self) -> Vec<String> {
        self.store.iter().map(format_line).collect()
    }

    /// Load entries from the history file at `path`.
    ///
    /// Only a failure to open the file is reported. Undecodable lines are
    /// skipped, and a read failure part way through keeps what was loaded.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut added = 0;
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        line = line_no + 1,
                        error = %e,
                        "Stopped reading history file"
                    );
                    break;
                }
            }
            line_no += 1;

            match std::str::from_utf8(&buf) {
                Ok(line) => {
                    if self.load_line(line) {
                        added += 1;
                    }
                }
                Err(_) => {
                    warn!(
                        path = %path.display(),
                        line = line_no,
                        "Skipping undecodable history line"
                    );
                }
            }
        }

        info!(path = %path.display(), added, "Loaded history file");
        Ok(added)
    }

    /// Write every entry to the history file at `path`, replacing it.
    ///
    /// Returns the number of entries written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);
        {
            let mut file = fs::File::create(&tmp)?;
            for line in self.serialize() {
                file.write_all(line.as_bytes())?;
                file.write_all(b"\n")?;
            }
            file.flush()?;
        }
        fs::rename(&tmp, path)?;

        info!(path = %path.display(), entries = self.store.len(), "Saved history file");
        Ok(self.store.len())
    }

    fn load_line(&mut self, line: &str) -> bool {
        let Some((recorded_at, text)) = parse_line(line) else {
            return false;
        };
        match recorded_at {
            Some(recorded_at) if self.restore_timestamps => {
                let added = self
                    .store
                    .push(HistoryEntry::recorded_at(text, recorded_at));
                if added {
                    self.cursor.reset();
                }
                added
            }
            _ => self.add(text),
        }
    }
}
