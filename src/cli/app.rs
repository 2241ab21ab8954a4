use crate::cli::commands;
use crate::config::{ConfigOverrides, HistoryConfig};
use crate::error::Result;
use crate::session::HistorySession;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io::{self, Write};
use std::path::PathBuf;

/// Inspect and edit a command-line history file
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// History file (defaults to the configured save file)
    #[arg(short, long, global = true, env = "CMDHIST_FILE")]
    pub file: Option<PathBuf>,

    /// Custom configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum number of retained entries for this run
    #[arg(long, global = true)]
    pub capacity: Option<usize>,

    /// Remove earlier copies of a line when it is recorded again
    #[arg(long, global = true)]
    pub dedupe: bool,

    /// Stop at the oldest/newest entry instead of wrapping around
    #[arg(long, global = true)]
    pub no_wrap: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recorded entries, oldest first
    List {
        /// Only list the most recent N entries
        max: Option<usize>,

        /// Show when each entry was recorded
        #[arg(short, long)]
        timestamps: bool,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a line
    Add {
        /// Words of the line to record
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Print the entry at INDEX
    Get { index: usize },

    /// Delete the entry at INDEX
    Delete { index: usize },

    /// Retrieve an entry by index or prefix, appending REST
    Expand {
        query: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        rest: Vec<String>,
    },

    /// Delete every entry
    Clear,

    /// Change the number of retained entries (0 disables history)
    Capacity {
        #[arg(allow_negative_numbers = true)]
        size: i64,
    },

    /// Line-oriented shell that records what you type
    Shell,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    /// Whether the command can change the recorded entries
    pub fn mutates_history(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::Delete { .. }
                | Self::Clear
                | Self::Capacity { .. }
                | Self::Shell
        )
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file location
    Path,
}

impl Cli {
    /// Command-line values that override the configuration file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            capacity: self.capacity,
            save_file: self.file.clone(),
            remove_duplicates: self.dedupe,
            show_timestamps: matches!(
                self.command,
                Commands::List {
                    timestamps: true,
                    ..
                }
            ),
            no_wrap: self.no_wrap,
        }
    }

    /// Load the configuration file, then merge with CLI args
    pub fn load_config(&self) -> Result<HistoryConfig> {
        let config = match &self.config {
            Some(path) => HistoryConfig::load_from_file(path)?,
            None => HistoryConfig::load_default().unwrap_or_default(),
        };
        Ok(config.merge_with_overrides(&self.overrides()))
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match &self.command {
            Commands::Completion { shell } => {
                generate_completion(*shell, &mut out);
                return Ok(());
            }
            Commands::Config { action } => {
                let config = self.load_config()?;
                return commands::config(action, &config, self.config.as_deref(), &mut out);
            }
            _ => {}
        }

        let config = self.load_config()?;
        self.run_with_config(config, &mut io::stdin().lock(), &mut out)
    }

    /// Open a session on the configured history file, run the command and
    /// write the file back if the command changed the buffer.
    ///
    /// The file's own timestamps are kept, so listing does not restamp
    /// entries and read-only commands leave the file untouched.
    pub fn run_with_config<R: io::BufRead, W: Write>(
        self,
        mut config: HistoryConfig,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        config.restore_timestamps = true;
        let mut session = HistorySession::open(config)?;
        let save = self.command.mutates_history();
        self.run(&mut session, input, out)?;
        if save {
            session.close()?;
        }
        Ok(())
    }

    /// Run a history command against an open session
    pub fn run<R: io::BufRead, W: Write>(
        self,
        session: &mut HistorySession,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        match self.command {
            Commands::List {
                max,
                timestamps,
                json,
            } => commands::list(session, max, timestamps, json, out),
            Commands::Add { text } => commands::add(session, &text.join(" "), self.quiet, out),
            Commands::Get { index } => commands::get(session, index, out),
            Commands::Delete { index } => commands::delete(session, index, self.quiet, out),
            Commands::Expand { query, rest } => {
                commands::expand(session, &query, &rest.join(" "), out)
            }
            Commands::Clear => commands::clear(session, self.quiet, out),
            Commands::Capacity { size } => commands::capacity(session, size, self.quiet, out),
            Commands::Shell => crate::cli::shell::run_shell(session, input, out),
            Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
        }
    }
}

/// Generate shell completion script
fn generate_completion<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}
