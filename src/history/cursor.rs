//! Backward/forward navigation over a [`HistoryStore`]

use super::store::HistoryStore;
use tracing::trace;

/// Navigation pointer used by the up/down keys
///
/// `position` is either unset or a valid index into the store it was last
/// moved over. The owning [`History`](super::History) notifies the cursor of
/// every store mutation that could shift indices.
#[derive(Debug, Clone, Default)]
pub struct HistoryCursor {
    position: Option<usize>,
    circular_wrap: bool,
    preserve_position_across_search: bool,
}

impl HistoryCursor {
    pub fn new(circular_wrap: bool, preserve_position_across_search: bool) -> Self {
        Self {
            position: None,
            circular_wrap,
            preserve_position_across_search,
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn circular_wrap(&self) -> bool {
        self.circular_wrap
    }

    pub fn set_circular_wrap(&mut self, enabled: bool) {
        self.circular_wrap = enabled;
    }

    pub fn preserve_position_across_search(&self) -> bool {
        self.preserve_position_across_search
    }

    pub fn set_preserve_position_across_search(&mut self, enabled: bool) {
        self.preserve_position_across_search = enabled;
    }

    pub fn is_browsing(&self) -> bool {
        self.position.is_some()
    }

    /// Step to the next older entry and return the text to display.
    ///
    /// When browsing starts with a non-empty input line, that line is
    /// recorded first and becomes the reference point, so the first step
    /// shows the entry before it.
    pub(crate) fn step_backward(
        &mut self,
        store: &mut HistoryStore,
        current_input: &str,
    ) -> String {
        self.discard_if_stale(store);

        let position = match self.position {
            Some(position) => position,
            None if current_input.is_empty() => {
                self.position = store.len().checked_sub(1);
                trace!(position = ?self.position, "Started history browsing");
                return self.current_text(store);
            }
            None => {
                store.add(current_input);
                match store.len().checked_sub(1) {
                    Some(newest) => newest,
                    None => return String::new(),
                }
            }
        };

        let next = match position {
            0 if self.circular_wrap => store.len() - 1,
            0 => 0,
            p => p - 1,
        };
        self.position = Some(next);
        trace!(position = next, "Stepped backward");
        self.current_text(store)
    }

    /// Step to the next newer entry and return the text to display.
    ///
    /// An empty string means the caller should blank its input line.
    pub(crate) fn step_forward(
        &mut self,
        store: &mut HistoryStore,
        current_input: &str,
    ) -> String {
        self.discard_if_stale(store);

        if self.position.is_none() && !current_input.is_empty() {
            store.add(current_input);
        }

        let len = store.len();
        if len == 0 {
            self.position = None;
            return String::new();
        }

        match self.position {
            Some(p) if p + 1 < len => self.position = Some(p + 1),
            _ if self.circular_wrap => self.position = Some(0),
            _ => {
                self.position = None;
                trace!("Stepped past newest entry");
                return String::new();
            }
        }
        trace!(position = ?self.position, "Stepped forward");
        self.current_text(store)
    }

    /// Stop browsing
    pub fn reset(&mut self) {
        self.position = None;
    }

    /// Point at `index` after a successful prefix search, if the cursor is
    /// configured to follow searches
    pub(crate) fn follow_search(&mut self, index: usize) {
        if self.preserve_position_across_search {
            self.position = Some(index);
        }
    }

    /// Browse from `index`; the caller has checked it against the store
    pub(crate) fn point_at(&mut self, index: usize) {
        self.position = Some(index);
        trace!(position = index, "Moved history position");
    }

    /// Adjust for the removal of the entry at `index`
    pub(crate) fn entry_removed(&mut self, index: usize) {
        self.position = match self.position {
            Some(p) if p == index => None,
            Some(p) if p > index => Some(p - 1),
            other => other,
        };
    }

    /// Adjust for `count` entries dropped from the front of the store
    pub(crate) fn front_trimmed(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.position = match self.position {
            Some(p) if p >= count => Some(p - count),
            _ => None,
        };
    }

    fn current_text(&self, store: &HistoryStore) -> String {
        self.position
            .and_then(|p| store.get(p).ok())
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    fn discard_if_stale(&mut self, store: &HistoryStore) {
        if matches!(self.position, Some(p) if p >= store.len()) {
            self.position = None;
        }
    }
}
