//! Binding of the history buffer to a host line editor
//!
//! This module handles:
//! - The narrow interface the host editor implements
//! - Default key bindings for history navigation
//! - Routing operation results back to the editor
//! - Loading and saving the history file over a session's lifetime

#[cfg(test)]
pub(crate) mod mocks;

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::history::{Expansion, History, HistoryEntry};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// History operations a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryAction {
    StepBackward,
    StepForward,
    Erase,
    ShoveToHistory,
}

/// Key bindings installed by [`HistorySession::install_bindings`]
pub const DEFAULT_BINDINGS: &[(&str, HistoryAction)] = &[
    ("UP", HistoryAction::StepBackward),
    ("DOWN", HistoryAction::StepForward),
    ("^U", HistoryAction::Erase),
    ("^X", HistoryAction::ShoveToHistory),
];

/// The host line editor, as seen from the history buffer
pub trait LineEditor {
    /// Show an informational line to the user
    fn display(&mut self, line: &str);

    /// Replace the whole input line with `text`
    fn replace_input_line(&mut self, text: &str);

    /// Route `key` to `action`; the editor calls back into
    /// [`HistorySession::perform`] when the key is pressed
    fn bind(&mut self, key: &str, action: HistoryAction);
}

/// One interactive session's history and options
#[derive(Debug)]
pub struct HistorySession {
    history: History,
    config: HistoryConfig,
}

impl HistorySession {
    /// Create a session with an empty history
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            history: History::from_config(&config),
            config,
        }
    }

    /// Create a session, loading the save file when history is persistent.
    ///
    /// A save file that does not exist yet is not an error.
    pub fn open(config: HistoryConfig) -> Result<Self> {
        let mut session = Self::new(config);
        if session.config.persistent {
            let path = session.config.save_file_path();
            if path.exists() {
                session.history.load_from_file(&path)?;
            } else {
                debug!(path = %path.display(), "No history file yet");
            }
        }
        Ok(session)
    }

    /// End the session, saving the history when it is persistent
    pub fn close(&self) -> Result<()> {
        if self.config.persistent {
            self.history.save_to_file(self.config.save_file_path())?;
        }
        info!(entries = self.history.len(), "History session closed");
        Ok(())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Adopt new option values from the settings store
    pub fn apply_config(&mut self, config: HistoryConfig) {
        self.history.apply_config(&config);
        self.config = config;
    }

    /// Register the default history keys with the editor
    pub fn install_bindings<E: LineEditor>(&self, editor: &mut E) {
        for (key, action) in DEFAULT_BINDINGS {
            editor.bind(key, *action);
        }
    }

    /// Run a bound action against the editor's current input line
    pub fn perform<E: LineEditor>(
        &mut self,
        action: HistoryAction,
        current_input: &str,
        editor: &mut E,
    ) {
        match action {
            HistoryAction::StepBackward => self.step_backward(current_input, editor),
            HistoryAction::StepForward => self.step_forward(current_input, editor),
            HistoryAction::Erase => self.erase(editor),
            HistoryAction::ShoveToHistory => self.shove(current_input, editor),
        }
    }

    pub fn add(&mut self, text: &str) -> bool {
        self.history.add(text)
    }

    /// Display the history listing, limited to the most recent `max` entries
    pub fn list<E: LineEditor>(&self, max: Option<usize>, editor: &mut E) {
        editor.display("Command History:");
        for line in self.history.list(max, self.config.show_timestamps) {
            editor.display(&line);
        }
    }

    pub fn step_backward<E: LineEditor>(&mut self, current_input: &str, editor: &mut E) {
        let text = self.history.step_backward(current_input);
        editor.replace_input_line(&text);
    }

    pub fn step_forward<E: LineEditor>(&mut self, current_input: &str, editor: &mut E) {
        let text = self.history.step_forward(current_input);
        editor.replace_input_line(&text);
    }

    /// Stop browsing and blank the input line
    pub fn erase<E: LineEditor>(&mut self, editor: &mut E) {
        self.history.reset();
        editor.replace_input_line("");
    }

    /// Park the input line in history and blank it
    pub fn shove<E: LineEditor>(&mut self, current_input: &str, editor: &mut E) {
        self.history.shove(current_input);
        editor.replace_input_line("");
    }

    /// Make the next step start from the entry at `index`
    pub fn set_position(&mut self, index: usize) -> Result<()> {
        self.history.set_position(index)
    }

    /// Record a submitted line
    pub fn commit_line(&mut self, text: &str) -> bool {
        self.history.record_and_commit(text)
    }

    pub fn delete(&mut self, index: usize) -> Result<HistoryEntry> {
        self.history.delete_at(index)
    }

    pub fn get(&self, index: usize) -> Result<&HistoryEntry> {
        self.history.get(index)
    }

    /// Retrieve an entry by index or prefix and place it in the input line
    pub fn expand<E: LineEditor>(
        &mut self,
        query: &str,
        rest: &str,
        editor: &mut E,
    ) -> Result<Expansion> {
        let expansion = self.history.expand(query, rest)?;
        editor.replace_input_line(&expansion.text);
        Ok(expansion)
    }

    pub fn set_capacity(&mut self, capacity: i64) -> Result<()> {
        self.history.set_capacity(capacity)?;
        self.config.capacity = self.history.store().capacity();
        Ok(())
    }

    /// Load a history file, defaulting to the configured save file
    pub fn load_from_file(&mut self, path: Option<&Path>) -> Result<usize> {
        let path = self.resolve_path(path);
        self.history.load_from_file(path)
    }

    /// Save to a history file, defaulting to the configured save file
    pub fn save_to_file(&self, path: Option<&Path>) -> Result<usize> {
        let path = self.resolve_path(path);
        self.history.save_to_file(path)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    fn resolve_path(&self, path: Option<&Path>) -> PathBuf {
        path.map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.save_file_path())
    }
}
