//! Command-line history buffer
//!
//! This module handles:
//! - Recording entered lines under a capacity and dedupe policy
//! - Backward/forward navigation with optional circular wrap
//! - Retrieval of past entries by index or prefix
//! - Loading and saving the buffer as a line-oriented file

pub mod cursor;
pub mod expand;
pub mod persist;
pub mod store;

#[cfg(test)]
pub mod store_test;

pub use cursor::HistoryCursor;
pub use expand::{Expansion, Query};
pub use store::HistoryStore;

use crate::config::HistoryConfig;
use crate::error::{HistoryError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One recorded input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry recorded now
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self::recorded_at(text, Utc::now())
    }

    /// Create an entry with a known recording time
    pub fn recorded_at<S: Into<String>>(text: S, recorded_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            recorded_at,
        }
    }
}

/// A history store and the navigation cursor over it.
///
/// All store mutations go through this type so that the cursor never points
/// at a removed or shifted entry.
#[derive(Debug, Clone)]
pub struct History {
    store: HistoryStore,
    cursor: HistoryCursor,
    last_query: Option<String>,
    restore_timestamps: bool,
}

impl History {
    /// Create an empty history with the given capacity and all policies off
    pub fn new(capacity: usize) -> Self {
        Self {
            store: HistoryStore::new(capacity),
            cursor: HistoryCursor::default(),
            last_query: None,
            restore_timestamps: false,
        }
    }

    /// Create an empty history using the options from `config`
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            store: HistoryStore::new(config.capacity)
                .with_remove_duplicates(config.remove_duplicates),
            cursor: HistoryCursor::new(config.circular_wrap, config.save_position),
            last_query: None,
            restore_timestamps: config.restore_timestamps,
        }
    }

    /// Apply changed option values without touching the recorded entries
    /// beyond what a capacity change requires
    pub fn apply_config(&mut self, config: &HistoryConfig) {
        self.store.set_remove_duplicates(config.remove_duplicates);
        self.cursor.set_circular_wrap(config.circular_wrap);
        self.cursor
            .set_preserve_position_across_search(config.save_position);
        self.restore_timestamps = config.restore_timestamps;
        if config.capacity != self.store.capacity() {
            self.resize(config.capacity);
        }
    }

    pub fn with_remove_duplicates(mut self, enabled: bool) -> Self {
        self.store.set_remove_duplicates(enabled);
        self
    }

    pub fn with_circular_wrap(mut self, enabled: bool) -> Self {
        self.cursor.set_circular_wrap(enabled);
        self
    }

    pub fn with_preserve_position_across_search(mut self, enabled: bool) -> Self {
        self.cursor.set_preserve_position_across_search(enabled);
        self
    }

    pub fn with_restore_timestamps(mut self, enabled: bool) -> Self {
        self.restore_timestamps = enabled;
        self
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn cursor(&self) -> &HistoryCursor {
        &self.cursor
    }

    pub fn set_remove_duplicates(&mut self, enabled: bool) {
        self.store.set_remove_duplicates(enabled);
    }

    pub fn set_circular_wrap(&mut self, enabled: bool) {
        self.cursor.set_circular_wrap(enabled);
    }

    pub fn set_preserve_position_across_search(&mut self, enabled: bool) {
        self.cursor.set_preserve_position_across_search(enabled);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Record a line. Returns `true` if an entry was appended.
    pub fn add(&mut self, text: &str) -> bool {
        let added = self.store.add(text);
        if added {
            self.cursor.reset();
        }
        added
    }

    pub fn get(&self, index: usize) -> Result<&HistoryEntry> {
        self.store.get(index)
    }

    /// Remove the entry at `index`
    pub fn delete_at(&mut self, index: usize) -> Result<HistoryEntry> {
        let removed = self.store.delete_at(index)?;
        self.cursor.entry_removed(index);
        Ok(removed)
    }

    pub fn find_by_prefix(&self, prefix: &str) -> Result<(usize, &HistoryEntry)> {
        self.store.find_by_prefix(prefix)
    }

    /// Set the maximum number of retained entries.
    ///
    /// Negative values are rejected; 0 clears the history and disables
    /// recording.
    pub fn set_capacity(&mut self, capacity: i64) -> Result<()> {
        let capacity = usize::try_from(capacity).map_err(|_| {
            HistoryError::invalid_argument(format!(
                "history capacity must not be negative, got {}",
                capacity
            ))
        })?;
        self.resize(capacity);
        Ok(())
    }

    /// Remove every entry and stop browsing
    pub fn clear(&mut self) {
        self.store.clear();
        self.cursor.reset();
    }

    /// Step to an older entry, returning the text for the input line
    pub fn step_backward(&mut self, current_input: &str) -> String {
        self.cursor.step_backward(&mut self.store, current_input)
    }

    /// Step to a newer entry, returning the text for the input line
    pub fn step_forward(&mut self, current_input: &str) -> String {
        self.cursor.step_forward(&mut self.store, current_input)
    }

    /// Move the navigation position to the entry at `index`.
    ///
    /// The next step backward or forward continues from that entry.
    pub fn set_position(&mut self, index: usize) -> Result<()> {
        self.store.get(index)?;
        self.cursor.point_at(index);
        Ok(())
    }

    /// Stop browsing. The caller blanks its input line.
    pub fn reset(&mut self) {
        self.cursor.reset();
    }

    /// Record a submitted line and stop browsing
    pub fn record_and_commit(&mut self, text: &str) -> bool {
        let added = self.store.add(text);
        self.cursor.reset();
        added
    }

    /// Park the current input line in history without submitting it.
    ///
    /// The caller blanks its input line afterwards.
    pub fn shove(&mut self, current_input: &str) -> bool {
        debug!("Shoving input line to history");
        self.record_and_commit(current_input)
    }

    /// Render the entries as `"<index>: <text>"` lines, oldest first.
    ///
    /// With `max`, only the most recent `max` entries are listed.
    pub fn list(&self, max: Option<usize>, show_timestamps: bool) -> Vec<String> {
        let skip = max.map_or(0, |max| self.store.len().saturating_sub(max));
        self.store
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(index, entry)| {
                if show_timestamps {
                    format!(
                        "{}: {} {}",
                        index,
                        entry.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                        entry.text
                    )
                } else {
                    format!("{}: {}", index, entry.text)
                }
            })
            .collect()
    }

    fn resize(&mut self, capacity: usize) {
        let trimmed = self.store.set_capacity(capacity);
        if capacity == 0 {
            self.cursor.reset();
        } else {
            self.cursor.front_trimmed(trimmed);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::from_config(&HistoryConfig::default())
    }
}
