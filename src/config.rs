use crate::error::{HistoryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of entries retained when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 150;

/// History options consumed by the buffer and its host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of retained entries; 0 disables history
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Treat the buffer as a ring when stepping past either end
    #[serde(default = "default_true")]
    pub circular_wrap: bool,

    /// Load the save file on start and write it back on exit
    #[serde(default = "default_true")]
    pub persistent: bool,

    /// Drop every earlier copy of a line when it is recorded again
    #[serde(default)]
    pub remove_duplicates: bool,

    /// History file location (if not using the default data directory)
    pub save_file: Option<PathBuf>,

    /// Let a prefix retrieval move the up/down navigation position
    #[serde(default = "default_true")]
    pub save_position: bool,

    /// Show each entry's recording time in listings
    #[serde(default)]
    pub show_timestamps: bool,

    /// Keep the timestamps stored in the history file when loading it
    #[serde(default)]
    pub restore_timestamps: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            circular_wrap: default_true(),
            persistent: default_true(),
            remove_duplicates: false,
            save_file: None,
            save_position: default_true(),
            show_timestamps: false,
            restore_timestamps: false,
        }
    }
}

/// Command-line values that take priority over the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub capacity: Option<usize>,
    pub save_file: Option<PathBuf>,
    pub remove_duplicates: bool,
    pub show_timestamps: bool,
    pub no_wrap: bool,
}

impl HistoryConfig {
    /// Load configuration from file, with fallback to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create default config file
            let config = Self::default();
            config.save_to_file(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: HistoryConfig = toml::from_str(&content).map_err(|e| {
            HistoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            HistoryError::configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = crate::ensure_data_dir()?;
        Ok(data_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from_file(path)
    }

    /// History file to load and save, falling back to the data directory
    pub fn save_file_path(&self) -> PathBuf {
        self.save_file
            .clone()
            .unwrap_or_else(|| crate::default_data_dir().join("history"))
    }

    /// Merge with command-line arguments, giving priority to CLI args
    pub fn merge_with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(capacity) = overrides.capacity {
            self.capacity = capacity;
        }
        if let Some(ref save_file) = overrides.save_file {
            self.save_file = Some(save_file.clone());
        }
        if overrides.remove_duplicates {
            self.remove_duplicates = true;
        }
        if overrides.show_timestamps {
            self.show_timestamps = true;
        }
        if overrides.no_wrap {
            self.circular_wrap = false;
        }

        self
    }
}

// Helper functions for default values
fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_true() -> bool {
    true
}
