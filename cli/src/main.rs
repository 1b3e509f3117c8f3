//! # precheck Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the precheck CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up logging based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each top-level command (`check`, `run`, `fs`) is a variant of `Commands`
//! - Commands map to handler functions in their modules under `commands::`
//! - All errors propagate to this level, are logged, printed, and turned into
//!   exit status 1
//!
//! Logging (`tracing`) goes to stderr; the shell-style transcript of what is
//! being run goes to stdout.
//!
//! ## Examples
//!
//! ```bash
//! # Run the configured checks
//! precheck check
//!
//! # Same, with info-level logs
//! precheck -v check
//!
//! # Run ad-hoc commands, stopping at the first failure
//! precheck run "cargo fmt --check" "cargo clippy" "cargo test"
//!
//! # Start from another directory, like `make -C`
//! precheck --chdir backend check
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (check, run, fs)
mod common; // Shared utilities (process, fs, system, ui)
mod core; // Core infrastructure (errors, config)

use common::fs::io;
use common::system::platform;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "precheck",
    about = "Run the checks that should pass before submitting a change",
    long_about = "Runs formatters, linters, type checkers and tests one after another,\n\
                  printing each command like a shell transcript and stopping at the first failure.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Change to DIR before doing anything else.
    #[arg(long, global = true, value_name = "DIR")]
    chdir: Option<PathBuf>,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Run the configured check list
    #[command(alias = "c")]
    Check(commands::check::CheckArgs),
    /// Run shell commands in order, stopping at the first failure
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    /// Filesystem helpers that log what they find
    Fs(commands::fs::FsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);
    tracing::debug!("Platform: {}", platform::describe());

    if let Err(e) = dispatch(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    if let Some(dir) = &cli.chdir {
        io::chdir(dir)?;
    }
    match cli.command {
        Commands::Check(args) => commands::check::handle_check(args).await,
        Commands::Run(args) => commands::run::handle_run(args).await,
        Commands::Fs(args) => commands::fs::handle_fs(args).await,
    }
}
