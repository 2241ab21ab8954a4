//! Retrieval of a past entry by index or prefix (`!query`)

use super::History;
use crate::error::{HistoryError, Result};
use tracing::debug;

/// How a retrieval query token is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'a> {
    /// All digits: an absolute entry index
    Index(usize),
    /// Anything else: the most recent entry starting with this text
    Prefix(&'a str),
}

impl<'a> Query<'a> {
    /// Classify a query token.
    ///
    /// Fails only for an all-digit token too large to be an index.
    pub fn parse(token: &'a str) -> Result<Self> {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self::Prefix(token));
        }
        token.parse().map(Self::Index).map_err(|_| {
            HistoryError::invalid_argument(format!("history index out of range: {}", token))
        })
    }
}

/// A retrieved entry, ready to be placed in the input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Index of the entry that matched
    pub index: usize,
    /// Entry text followed by the remainder of the input line, if any
    pub text: String,
}

impl History {
    /// Retrieve an entry by index or prefix and append `rest` to it.
    ///
    /// An empty `query` repeats the previous non-empty query. A prefix match
    /// moves the navigation cursor to the found entry when the cursor is set
    /// to follow searches. Nothing is recorded.
    pub fn expand(&mut self, query: &str, rest: &str) -> Result<Expansion> {
        let query = if query.is_empty() {
            self.last_query.clone().unwrap_or_default()
        } else {
            self.last_query = Some(query.to_string());
            query.to_string()
        };

        let index = match Query::parse(&query)? {
            Query::Index(index) => {
                self.store.get(index)?;
                index
            }
            Query::Prefix(prefix) => {
                let (index, _) = self.store.find_by_prefix(prefix)?;
                self.cursor.follow_search(index);
                index
            }
        };
        debug!(query = %query, index, "Expanded history query");

        let entry = self.store.get(index)?;
        let rest = rest.trim();
        let text = if rest.is_empty() {
            entry.text.clone()
        } else {
            format!("{} {}", entry.text, rest)
        };
        Ok(Expansion { index, text })
    }
}
