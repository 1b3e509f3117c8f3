//! # precheck Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Root of the shared utility modules used by the command handlers. Keeping
//! them here separates command-specific logic (`commands::`) from the reusable
//! pieces (`common::`) and the infrastructure (`core::`).
//!
//! ## Architecture
//!
//! - **`fs`**: directory creation, existence checks, `chdir`, and the scoped
//!   working-directory guard.
//! - **`process`**: the sequential, fail-fast command runner.
//! - **`system`**: environment variables and platform flags.
//! - **`ui`**: flushed transcript output.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{fs::scope::DirectoryScope, process};
//! use crate::core::error::Result;
//!
//! # async fn run_example() -> Result<()> {
//! let _scope = DirectoryScope::enter("backend", true)?;
//! process::run(["flake8", "pytest"], &process::RunOptions::default()).await?;
//! # Ok(())
//! # }
//! ```
//!

/// Filesystem helpers and the scoped working-directory guard.
pub mod fs;
/// Sequential execution of shell commands.
pub mod process;
/// Environment variable access and platform detection.
pub mod system;
/// Flushed transcript output.
pub mod ui;
