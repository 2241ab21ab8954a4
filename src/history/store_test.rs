//! Unit and property tests for the history buffer
//!
//! This module covers:
//! - Capacity enforcement and front trimming
//! - Duplicate removal
//! - Index and prefix retrieval
//! - Navigation with and without circular wrap
//! - Save/load round trips through the history file

use super::{History, HistoryEntry, HistoryStore};
use crate::error::HistoryError;
use chrono::{Duration, Utc};
use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::tempdir;

/// Test fixture holding a populated history and a scratch history file
pub struct HistoryTestFixture {
    pub history: History,
    pub temp_dir: tempfile::TempDir,
    pub history_file: PathBuf,
}

impl HistoryTestFixture {
    /// Create a fixture with a few shell-like entries
    pub fn new() -> Self {
        Self::with_entries(&["build foo", "build bar", "test x", "build baz"])
    }

    pub fn with_entries(texts: &[&str]) -> Self {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let history_file = temp_dir.path().join("history");

        let mut history = History::new(150);
        for text in texts {
            history.add(text);
        }

        Self {
            history,
            temp_dir,
            history_file,
        }
    }

    pub fn texts(&self) -> Vec<String> {
        texts_of(self.history.store())
    }
}

pub fn texts_of(store: &HistoryStore) -> Vec<String> {
    store.iter().map(|e| e.text.clone()).collect()
}

pub mod property_strategies {
    use proptest::prelude::*;

    /// Short non-empty command lines drawn from a small alphabet so that
    /// duplicates and shared prefixes are common
    pub fn command_text() -> impl Strategy<Value = String> {
        "[a-c]{1,3}( [x-z]{1,2})?"
    }

    pub fn command_list(max_len: usize) -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(command_text(), 1..max_len)
    }
}

mod core_operations_tests {
    use super::property_strategies::*;
    use super::*;

    #[test]
    fn test_capacity_drops_oldest() {
        let mut store = HistoryStore::new(2);
        for text in ["a", "b", "c"] {
            assert!(store.add(text));
        }
        assert_eq!(texts_of(&store), vec!["b", "c"]);
    }

    #[test]
    fn test_dedupe_keeps_single_copy() {
        let mut store = HistoryStore::new(150).with_remove_duplicates(true);
        store.add("ls");
        store.add("ls");
        assert_eq!(texts_of(&store), vec!["ls"]);
    }

    #[test]
    fn test_dedupe_removes_every_earlier_copy() {
        let mut store = HistoryStore::new(150);
        for text in ["ls", "pwd", "ls", "cd", "ls"] {
            store.add(text);
        }
        store.set_remove_duplicates(true);
        store.add("ls");
        assert_eq!(texts_of(&store), vec!["pwd", "cd", "ls"]);
    }

    #[test]
    fn test_without_dedupe_duplicates_are_kept() {
        let mut store = HistoryStore::new(150);
        store.add("ls");
        store.add("ls");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_empty_line_not_recorded() {
        let mut store = HistoryStore::new(150);
        assert!(!store.add(""));
        assert!(store.is_empty());
    }

    #[test]
    fn test_disabled_store_records_nothing() {
        let mut store = HistoryStore::new(0);
        assert!(store.is_disabled());
        assert!(!store.add("ls"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_out_of_range() {
        let fixture = HistoryTestFixture::with_entries(&["a", "b", "c"]);
        let result = fixture.history.get(5);
        assert!(matches!(result, Err(HistoryError::NotFound(5))));
    }

    #[test]
    fn test_delete_shifts_later_entries() {
        let mut fixture = HistoryTestFixture::with_entries(&["a", "b", "c"]);
        let removed = fixture.history.delete_at(1).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(fixture.texts(), vec!["a", "c"]);
        assert!(matches!(
            fixture.history.delete_at(2),
            Err(HistoryError::NotFound(2))
        ));
    }

    #[test]
    fn test_push_keeps_given_timestamp() {
        let mut store = HistoryStore::new(10);
        let when = Utc::now() - Duration::days(3);
        store.push(HistoryEntry::recorded_at("old", when));
        assert_eq!(store.get(0).unwrap().recorded_at, when);
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(
            capacity in 1usize..20,
            texts in command_list(60),
            dedupe in any::<bool>(),
        ) {
            let mut store = HistoryStore::new(capacity).with_remove_duplicates(dedupe);
            for text in &texts {
                store.add(text);
                prop_assert!(store.len() <= capacity);
            }
            prop_assert_eq!(store.iter().last().map(|e| e.text.clone()), texts.last().cloned());
        }

        #[test]
        fn prop_shrinking_capacity_is_idempotent(
            texts in command_list(40),
            capacity in 0usize..30,
        ) {
            let mut once = HistoryStore::new(100);
            for text in &texts {
                once.add(text);
            }
            once.set_capacity(capacity);
            let mut twice = once.clone();
            prop_assert_eq!(twice.set_capacity(capacity), 0);
            prop_assert_eq!(texts_of(&once), texts_of(&twice));
        }

        #[test]
        fn prop_shrink_keeps_newest_entries(
            texts in command_list(40),
            capacity in 0usize..30,
        ) {
            let mut store = HistoryStore::new(100);
            for text in &texts {
                store.add(text);
            }
            let before = texts_of(&store);
            let trimmed = store.set_capacity(capacity);
            let kept = before.len().min(capacity);
            prop_assert_eq!(trimmed, before.len() - kept);
            prop_assert_eq!(texts_of(&store), before[before.len() - kept..].to_vec());
        }

        #[test]
        fn prop_dedupe_leaves_one_copy(texts in command_list(50)) {
            let mut store = HistoryStore::new(150).with_remove_duplicates(true);
            for text in &texts {
                store.add(text);
            }
            let mut seen = std::collections::HashSet::new();
            for entry in store.iter() {
                prop_assert!(seen.insert(entry.text.clone()));
            }
        }
    }
}

mod retrieval_tests {
    use super::*;

    #[test]
    fn test_prefix_finds_most_recent_match() {
        let fixture = HistoryTestFixture::new();
        let (index, entry) = fixture.history.find_by_prefix("build").unwrap();
        assert_eq!(index, 3);
        assert_eq!(entry.text, "build baz");
    }

    #[test]
    fn test_prefix_without_match() {
        let fixture = HistoryTestFixture::new();
        let result = fixture.history.find_by_prefix("deploy");
        assert!(matches!(result, Err(HistoryError::NoMatch(p)) if p == "deploy"));
    }

    #[test]
    fn test_expand_by_index_and_prefix() {
        let mut fixture = HistoryTestFixture::new();
        let by_index = fixture.history.expand("2", "").unwrap();
        assert_eq!(by_index.index, 2);
        assert_eq!(by_index.text, "test x");

        let by_prefix = fixture.history.expand("build b", "--release").unwrap();
        assert_eq!(by_prefix.index, 3);
        assert_eq!(by_prefix.text, "build baz --release");

        // Retrieval never records
        assert_eq!(fixture.history.len(), 4);
    }
}

mod navigation_tests {
    use super::property_strategies::*;
    use super::*;

    #[test]
    fn test_backward_then_forward() {
        let mut history = HistoryTestFixture::with_entries(&["a", "b", "c"]).history;
        assert_eq!(history.step_backward(""), "c");
        assert_eq!(history.step_backward(""), "b");
        assert_eq!(history.step_forward(""), "c");
    }

    #[test]
    fn test_circular_wrap_at_both_ends() {
        let mut history = HistoryTestFixture::with_entries(&["a", "b"])
            .history
            .with_circular_wrap(true);
        assert_eq!(history.step_backward(""), "b");
        assert_eq!(history.step_backward(""), "a");
        assert_eq!(history.step_backward(""), "b");
        assert_eq!(history.step_forward(""), "a");
    }

    #[test]
    fn test_forward_past_newest_without_wrap_blanks_input() {
        let mut history = HistoryTestFixture::with_entries(&["a", "b"])
            .history
            .with_circular_wrap(false);
        history.step_backward("");
        assert_eq!(history.step_forward(""), "");
        assert!(!history.cursor().is_browsing());
    }

    #[test]
    fn test_typed_line_is_recorded_when_browsing_starts() {
        let mut history = HistoryTestFixture::with_entries(&["a", "b"]).history;
        assert_eq!(history.step_backward("draft"), "b");
        assert_eq!(history.get(2).unwrap().text, "draft");
    }

    #[test]
    fn test_navigation_on_empty_history() {
        let mut history = History::new(10);
        assert_eq!(history.step_backward(""), "");
        assert_eq!(history.step_forward(""), "");
        assert!(!history.cursor().is_browsing());
    }

    proptest! {
        #[test]
        fn prop_full_circular_cycle_returns_to_start(texts in command_list(20)) {
            let mut history = History::new(150).with_circular_wrap(true);
            for text in &texts {
                history.add(text);
            }
            let len = history.len();

            history.step_backward("");
            let start = history.cursor().position();
            for _ in 0..len {
                history.step_backward("");
            }
            prop_assert_eq!(history.cursor().position(), start);

            for _ in 0..len {
                history.step_forward("");
            }
            prop_assert_eq!(history.cursor().position(), start);
        }

        #[test]
        fn prop_backward_without_wrap_stops_at_oldest(
            texts in command_list(20),
            extra in 1usize..5,
        ) {
            let mut history = History::new(150).with_circular_wrap(false);
            for text in &texts {
                history.add(text);
            }
            let len = history.len();
            let mut shown = String::new();
            for _ in 0..len + extra {
                shown = history.step_backward("");
            }
            prop_assert_eq!(history.cursor().position(), Some(0));
            prop_assert_eq!(shown, history.get(0).unwrap().text.clone());
        }

        #[test]
        fn prop_cursor_stays_valid_after_mutation(
            texts in command_list(20),
            steps in 0usize..10,
            capacity in 0usize..20,
        ) {
            let mut history = History::new(150);
            for text in &texts {
                history.add(text);
            }
            for _ in 0..steps {
                history.step_backward("");
            }
            history.set_capacity(capacity as i64).unwrap();
            if let Some(position) = history.cursor().position() {
                prop_assert!(position < history.len());
            }
        }
    }
}

mod storage_management_tests {
    use super::*;

    #[test]
    fn test_save_and_reload_keeps_text() {
        let fixture = HistoryTestFixture::new();
        let written = fixture
            .history
            .save_to_file(&fixture.history_file)
            .unwrap();
        assert_eq!(written, 4);

        let mut reloaded = History::new(150);
        let loaded = reloaded.load_from_file(&fixture.history_file).unwrap();
        assert_eq!(loaded, 4);
        assert_eq!(texts_of(reloaded.store()), fixture.texts());
    }

    #[test]
    fn test_reload_stamps_entries_with_load_time() {
        // Reloaded entries are timestamped when they are read back unless
        // timestamp restoring is switched on.
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("history");
        std::fs::write(&path, "2001-02-03T04:05:06Z old command\n").unwrap();

        let before = Utc::now();
        let mut fresh = History::new(10);
        fresh.load_from_file(&path).unwrap();
        assert_eq!(fresh.get(0).unwrap().text, "old command");
        assert!(fresh.get(0).unwrap().recorded_at >= before);

        let mut restored = History::new(10).with_restore_timestamps(true);
        restored.load_from_file(&path).unwrap();
        assert_eq!(
            restored.get(0).unwrap().recorded_at.to_rfc3339(),
            "2001-02-03T04:05:06+00:00"
        );
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("history");
        let fixture = HistoryTestFixture::with_entries(&["ls"]);
        fixture.history.save_to_file(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_applies_capacity_and_dedupe() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("history");
        std::fs::write(&path, "ls\npwd\nls\ncd\n").unwrap();

        let mut history = History::new(2).with_remove_duplicates(true);
        history.load_from_file(&path).unwrap();
        assert_eq!(texts_of(history.store()), vec!["ls", "cd"]);
    }
}
