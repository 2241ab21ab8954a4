use anyhow::Result;
use clap::Parser;
use cmdline_history::cli::Cli;
use tracing::{debug, error};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    // Initialize tracing with environment-based filtering; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Starting cmdhist");

    if let Err(e) = cli.execute() {
        error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}
