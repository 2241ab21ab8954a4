//! Mock line editor for testing

use super::{HistoryAction, HistorySession, LineEditor};
use std::collections::HashMap;

/// Line editor that records everything the session asks of it
#[derive(Debug, Default)]
pub struct MockEditor {
    pub input: String,
    pub displayed: Vec<String>,
    pub bindings: HashMap<String, HistoryAction>,
}

impl MockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action_for(&self, key: &str) -> Option<HistoryAction> {
        self.bindings.get(key).copied()
    }

    /// Simulate a key press, dispatching to the bound action if any
    pub fn press(&mut self, key: &str, session: &mut HistorySession) {
        if let Some(action) = self.action_for(key) {
            let input = self.input.clone();
            session.perform(action, &input, self);
        }
    }
}

impl LineEditor for MockEditor {
    fn display(&mut self, line: &str) {
        self.displayed.push(line.to_string());
    }

    fn replace_input_line(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn bind(&mut self, key: &str, action: HistoryAction) {
        self.bindings.insert(key.to_string(), action);
    }
}
