//! # precheck CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests (`run.rs`, `check.rs`, `fs.rs`, ...).
//! Each `.rs` file in `cli/tests/` is compiled as its own test crate and runs
//! the compiled `precheck` binary through `assert_cmd`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get precheck Command (`precheck_cmd`)
///
/// Creates an `assert_cmd::Command` for the `precheck` binary built for this
/// test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn precheck_cmd() -> Command {
    Command::cargo_bin("precheck").expect("Failed to find precheck binary for testing")
}

/// # Isolated precheck Command (`precheck_in`)
///
/// Like `precheck_cmd`, but running inside `dir` with the user configuration
/// location pointed at `dir` as well, so a developer's own
/// `~/.config/precheck/config.toml` cannot leak into the test.
pub fn precheck_in(dir: &Path) -> Command {
    let mut cmd = precheck_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("PRECHECK_SHELL")
        .env_remove("RUST_LOG");
    cmd
}

/// # Project Fixture (`write_project`)
///
/// Marks `dir` as a repository root (so the config search stops there) and
/// writes `.precheck.toml` with the given content.
pub fn write_project(dir: &Path, config: &str) {
    std::fs::create_dir_all(dir.join(".git")).expect("Failed to create .git");
    std::fs::write(dir.join(".precheck.toml"), config).expect("Failed to write .precheck.toml");
}
