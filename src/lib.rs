//! Command-line history buffer.
//!
//! Records entered lines in order, lets a line editor step backward and
//! forward through them, retrieves past entries by index or prefix, and
//! persists the buffer across sessions.
//!
//! ## Usage
//!
//! ```
//! use cmdline_history::History;
//!
//! let mut history = History::new(100).with_circular_wrap(true);
//! history.record_and_commit("cargo build");
//! history.record_and_commit("cargo test");
//!
//! assert_eq!(history.step_backward(""), "cargo test");
//! assert_eq!(history.step_backward(""), "cargo build");
//! assert_eq!(history.expand("cargo b", "--release").unwrap().text, "cargo build --release");
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod session;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::HistoryConfig;
pub use error::{HistoryError, Result, UserFriendlyError};
pub use history::{Expansion, History, HistoryCursor, HistoryEntry, HistoryStore};
pub use session::{HistoryAction, HistorySession, LineEditor};

/// Version information for the history crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default directory for storing the history file and configuration
pub fn default_data_dir() -> std::path::PathBuf {
    directories::ProjectDirs::from("", "", "cmdline-history")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            // Fallback to home directory if project dirs not available
            dirs::home_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join(".cmdline-history")
        })
}

/// Initialize the data directory if it doesn't exist
pub fn ensure_data_dir() -> Result<std::path::PathBuf> {
    let data_dir = default_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
    }
    Ok(data_dir)
}
