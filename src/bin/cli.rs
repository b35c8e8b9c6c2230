//! kenmei-notifier CLI
//!
//! Runs the notification pipeline once and exits. Meant to be scheduled
//! externally (cron, systemd timer).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kenmei_notifier::{
    error::Result,
    models::{Config, Credentials},
    pipeline::{self, RunOptions, RunReport},
    storage::LocalStateStore,
};

/// Push a notification when a title on your Kenmei list gets a new chapter
#[derive(Parser, Debug)]
#[command(name = "kenmei-notifier", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// State file location (default: unread.json beside the executable)
    #[arg(short, long)]
    state_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log what would be sent without notifying or saving state
    #[arg(long)]
    dry_run: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load config and credentials, then run the pipeline once.
async fn run(cli: Cli) -> Result<RunReport> {
    let mut config = Config::load_or_default(&cli.config);
    if let Some(path) = cli.state_file {
        config.storage.state_file = Some(path);
    }
    config.validate()?;

    let credentials = Credentials::from_env()?;
    let store = LocalStateStore::new(config.state_file()?);
    log::info!("Using state file {}", store.path().display());

    let options = RunOptions {
        dry_run: cli.dry_run,
    };
    pipeline::run_pipeline(&config, &credentials, &store, options).await
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("kenmei-notifier starting...");

    // Run on a task so a panic surfaces as a JoinError instead of unwinding
    // through main.
    match tokio::spawn(run(cli)).await {
        Ok(Ok(report)) => {
            report.log_summary();
            log::info!("Done!");
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            log::error!("Run failed: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("Run aborted unexpectedly: {}", e);
            ExitCode::FAILURE
        }
    }
}
