//! # precheck Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the top-level command groups of the precheck CLI so `main.rs`
//! can route to them.
//!
//! ## Command Groups
//!
//! - `check`: run the configured check list
//! - `run`: run arbitrary shell commands with the same runner
//! - `fs`: transcript-logging filesystem helpers (`isfile`, `isdir`, `mkdir`)
//!
//! Each group defines its own arguments structure and an async handler.
//!

/// Runs the configured check list, fail-fast by default.
pub mod check;
/// Filesystem helper subcommands: `isfile`, `isdir`, `mkdir`.
pub mod fs;
/// Runs ad-hoc shell commands through the runner.
pub mod run;
