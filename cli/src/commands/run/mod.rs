//! # precheck Run Command
//!
//! File: cli/src/commands/run/mod.rs
//!
//! ## Overview
//!
//! Implements `precheck run`, which exposes the command runner directly: each
//! positional argument is one shell command, run in order, stopping at the
//! first failure unless `--no-check` is given.
//!
//! ## Usage
//!
//! ```bash
//! # Fail-fast batch: the third command never runs.
//! precheck run true false true
//!
//! # Keep going, in another directory, with an extra variable.
//! precheck run --no-check -C docs -e SPHINXOPTS=-W "make html" "make linkcheck"
//!
//! # Temporarily pushd for the whole batch.
//! precheck run --pushd frontend "npm ci" "npm test"
//!
//! # Bound each command's runtime.
//! precheck run --timeout 30 "pytest -x"
//! ```
//!
use crate::common::fs::scope::DirectoryScope;
use crate::common::process::{self, RunOptions};
use crate::common::ui::flush_print;
use crate::core::config;
use crate::core::error::{PrecheckError, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Arguments for `precheck run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Shell commands to run, in order.
    #[arg(required = true, value_name = "COMMAND")]
    commands: Vec<String>,
    /// Keep running after a command exits non-zero.
    #[arg(long)]
    no_check: bool,
    /// Execute each command directly (split on whitespace) instead of through a shell.
    #[arg(long)]
    no_shell: bool,
    /// Working directory for the spawned commands.
    #[arg(short = 'C', long = "cwd", value_name = "DIR")]
    cwd: Option<PathBuf>,
    /// Extra environment variable for the spawned commands (repeatable).
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,
    /// Capture output; it is printed after each command, and on failure stderr comes first.
    #[arg(long)]
    capture: bool,
    /// Kill a command that runs longer than this many seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
    /// Change into this directory for the whole batch and change back afterwards.
    #[arg(long, value_name = "DIR")]
    pushd: Option<PathBuf>,
}

/// Handler for `precheck run`.
pub async fn handle_run(args: RunArgs) -> Result<()> {
    info!("Handling run command with {} command(s)", args.commands.len());
    let _scope = match &args.pushd {
        Some(dir) => Some(DirectoryScope::enter(dir, true)?),
        None => None,
    };

    // Only `[runner]` matters here; the check list is not validated.
    let runner = config::load_runner_config()?;
    let options = run_options(&args, runner.shell.as_deref());
    let output = process::run(&args.commands, &options).await?;

    if options.capture {
        for result in output.results() {
            flush_print(&result.stdout);
            if !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
        }
    }
    Ok(())
}

fn run_options(args: &RunArgs, shell: Option<&str>) -> RunOptions {
    let mut options = RunOptions::default()
        .check(!args.no_check)
        .shell(!args.no_shell)
        .capture(args.capture);
    if let Some(cwd) = &args.cwd {
        options = options.cwd(cwd);
    }
    for (key, value) in &args.env {
        options = options.env(key, value);
    }
    if let Some(secs) = args.timeout {
        options = options.timeout(Duration::from_secs(secs));
    }
    if let Some(shell) = shell {
        options = options.shell_path(shell);
    }
    options
}

/// Parses `KEY=VALUE`; the value may itself contain `=`.
fn parse_env_pair(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(PrecheckError::ArgumentParsing(format!(
            "expected KEY=VALUE, got '{}'",
            raw
        ))
        .to_string()),
    }
}
