//! # precheck Check Command
//!
//! File: cli/src/commands/check/mod.rs
//!
//! ## Overview
//!
//! Implements `precheck check`: the series of checks that should all pass
//! before a pull request is submitted (ideally before every commit). The list
//! comes from configuration and defaults to a Python toolchain:
//!
//! ```text
//! black --check .
//! flake8
//! mypy --install-types --non-interactive
//! pytest
//! ```
//!
//! ## Architecture
//!
//! 1. Optionally enter `--dir` with a `DirectoryScope`.
//! 2. Load the layered configuration (`core::config::load_config`).
//! 3. Export `[runner.env]` into the process environment.
//! 4. Run the list through `common::process::run` as one batch. By default the
//!    first failing check aborts the rest; with `--keep-going` every check runs
//!    and the command fails afterwards if any of them did.
//!
//! ## Usage
//!
//! ```bash
//! precheck check
//! precheck check --keep-going
//! precheck check --dir backend --capture
//! ```
//!
use crate::common::fs::scope::DirectoryScope;
use crate::common::process::{self, ExecutionResult, RunOptions, RunOutput};
use crate::common::system::env;
use crate::common::ui::flush_println;
use crate::core::config::{self, RunnerConfig};
use crate::core::error::{describe_exit, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Arguments for `precheck check`.
#[derive(Parser, Debug, Default)]
pub struct CheckArgs {
    /// Run every check even after one fails; still exit non-zero if any failed.
    #[arg(long)]
    keep_going: bool,
    /// Run the checks from this directory instead of the current one.
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,
    /// Capture check output and only print it for failures.
    #[arg(long)]
    capture: bool,
}

/// Handler for `precheck check`.
pub async fn handle_check(args: CheckArgs) -> Result<()> {
    info!("Handling check command...");
    let _scope = match &args.dir {
        Some(dir) => Some(DirectoryScope::enter(dir, true)?),
        None => None,
    };

    // Loaded after entering --dir so that directory's .precheck.toml applies.
    let cfg = config::load_config()?;
    for (key, value) in &cfg.runner.env {
        env::set(key, value)?;
    }

    let options = run_options(&cfg.runner, &args);
    let output = process::run(&cfg.checks.commands, &options).await?;
    report(&output)
}

fn run_options(runner: &RunnerConfig, args: &CheckArgs) -> RunOptions {
    let mut options = RunOptions::default()
        .check(!args.keep_going)
        .capture(args.capture || runner.capture);
    if let Some(secs) = runner.timeout_secs {
        options = options.timeout(Duration::from_secs(secs));
    }
    if let Some(shell) = &runner.shell {
        options = options.shell_path(shell);
    }
    options
}

/// Prints the summary; fails if any check failed (only reachable with `--keep-going`).
fn report(output: &RunOutput) -> Result<()> {
    let results = output.results();
    if output.all_succeeded() {
        flush_println(&format!("All {} checks passed.", results.len()));
        return Ok(());
    }
    let failed: Vec<&ExecutionResult> = results.iter().filter(|r| !r.success()).collect();
    for result in &failed {
        if !result.stderr.is_empty() || !result.stdout.is_empty() {
            flush_println(format!("{}{}", result.stderr, result.stdout).trim_end());
        }
        flush_println(&format!(
            "FAILED: {} ({})",
            result.command,
            describe_exit(&result.code)
        ));
    }
    anyhow::bail!("{} of {} checks failed", failed.len(), results.len())
}
