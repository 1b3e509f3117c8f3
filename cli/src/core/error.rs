//! # precheck Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout precheck. Specific,
//! matchable failures are variants of `PrecheckError`; everything else travels
//! as an `anyhow::Error` with context attached at the point of failure.
//!
//! ## Architecture
//!
//! - `PrecheckError`: a `thiserror` enum for failures callers may want to inspect
//! - `Result<T>`: an alias for `anyhow::Result<T>`
//!
//! The variants cover:
//! - Command execution (`CommandFailed`, `Spawn`, `Timeout`)
//! - Working-directory changes (`DirectoryNotFound`)
//! - Configuration and filesystem problems
//!
//! ## Examples
//!
//! ```rust
//! match process::run(["pytest"], &RunOptions::default()).await {
//!     Ok(output) => println!("{} command(s) ran", output.results().len()),
//!     Err(e) => match e.downcast_ref::<PrecheckError>() {
//!         Some(PrecheckError::CommandFailed { code, .. }) => println!("exit code {:?}", code),
//!         _ => return Err(e),
//!     },
//! }
//! ```
//!
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Custom error type for precheck.
// No PartialEq: `Spawn` carries an io::Error.
#[derive(Error, Debug)]
pub enum PrecheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Directory not found or not accessible: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Command `{cmd}` failed with {}", describe_exit(.code))]
    CommandFailed {
        cmd: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to start command `{cmd}`: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{cmd}` timed out after {limit:?}")]
    Timeout { cmd: String, limit: Duration },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Renders an exit code for messages; `None` means the process was killed by a signal.
pub fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
