//! Command-line host for the history buffer.
//!
//! ## Usage
//!
//! ```bash
//! # Show the last 20 entries with their timestamps
//! cmdhist list 20 --timestamps
//!
//! # Record a line, then retrieve it by prefix
//! cmdhist add cargo build --release
//! cmdhist expand cargo
//!
//! # Interactive line-oriented shell over the history file
//! cmdhist shell
//! ```

pub mod app;
pub mod commands;
pub mod output;
pub mod shell;


pub use app::{Cli, Commands, ConfigAction};
pub use shell::TerminalEditor;
