//! Bounded, ordered storage of recorded lines
//!
//! The store knows nothing about navigation. Callers that keep a cursor over
//! it (see [`super::History`]) use the return values of the mutating methods
//! to keep that cursor pointing at a valid index.

use super::HistoryEntry;
use crate::error::{HistoryError, Result};
use std::collections::VecDeque;
use tracing::debug;

/// Ordered history entries, index 0 being the oldest
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    remove_duplicates: bool,
}

impl HistoryStore {
    /// Create an empty store holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            remove_duplicates: false,
        }
    }

    /// Enable or disable removal of earlier copies of a line being added
    pub fn with_remove_duplicates(mut self, enabled: bool) -> Self {
        self.remove_duplicates = enabled;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remove_duplicates(&self) -> bool {
        self.remove_duplicates
    }

    pub fn set_remove_duplicates(&mut self, enabled: bool) {
        self.remove_duplicates = enabled;
    }

    /// Whether recording is currently disabled (capacity 0)
    pub fn is_disabled(&self) -> bool {
        self.capacity == 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Record `text` with the current time.
    ///
    /// Returns `false` without touching the store when `text` is empty or
    /// history is disabled.
    pub fn add(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.push(HistoryEntry::new(text))
    }

    /// Record an already-built entry, applying the same policy as [`add`](Self::add)
    pub fn push(&mut self, entry: HistoryEntry) -> bool {
        if entry.text.is_empty() || self.is_disabled() {
            return false;
        }

        if self.remove_duplicates {
            let before = self.entries.len();
            self.entries.retain(|e| e.text != entry.text);
            let removed = before - self.entries.len();
            if removed > 0 {
                debug!(removed, "Removed duplicate history entries");
            }
        }

        self.entries.push_back(entry);
        let trimmed = self.trim_to_capacity();
        debug!(len = self.entries.len(), trimmed, "Added history entry");
        true
    }

    /// Get the entry at `index`
    pub fn get(&self, index: usize) -> Result<&HistoryEntry> {
        self.entries.get(index).ok_or(HistoryError::NotFound(index))
    }

    /// Remove the entry at `index`, shifting newer entries down by one
    pub fn delete_at(&mut self, index: usize) -> Result<HistoryEntry> {
        let removed = self
            .entries
            .remove(index)
            .ok_or(HistoryError::NotFound(index))?;
        debug!(index, "Deleted history entry");
        Ok(removed)
    }

    /// Find the most recent entry whose text starts with `prefix`.
    ///
    /// Matching is a plain case-sensitive prefix comparison.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<(usize, &HistoryEntry)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .find(|(_, e)| e.text.starts_with(prefix))
            .ok_or_else(|| HistoryError::no_match(prefix))
    }

    /// Change the capacity, dropping the oldest entries that no longer fit.
    ///
    /// Returns how many entries were removed from the front. A capacity of 0
    /// clears the store and disables recording until it is raised again.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        let trimmed = self.trim_to_capacity();
        debug!(capacity, trimmed, "History capacity changed");
        trimmed
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        debug!("Cleared history");
    }

    fn trim_to_capacity(&mut self) -> usize {
        let excess = self.entries.len().saturating_sub(self.capacity);
        self.entries.drain(..excess);
        excess
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CAPACITY)
    }
}
