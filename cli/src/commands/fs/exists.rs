//! # precheck Existence Check Handlers
//!
//! File: cli/src/commands/fs/exists.rs
//!
//! `precheck fs isfile` and `precheck fs isdir`. The answer is printed as a
//! transcript line; a negative answer also makes the command exit non-zero so
//! shell scripts can branch on it.
//!
use crate::common::fs::io;
use crate::core::error::{PrecheckError, Result};
use clap::Parser;
use std::path::PathBuf;

/// Arguments shared by `isfile` and `isdir`.
#[derive(Parser, Debug)]
pub struct ExistsArgs {
    /// Path to check.
    path: PathBuf,
}

pub fn handle_isfile(args: ExistsArgs) -> Result<()> {
    if io::is_file(&args.path) {
        Ok(())
    } else {
        anyhow::bail!(PrecheckError::FileSystem(format!(
            "Not a file: {}",
            args.path.display()
        )))
    }
}

pub fn handle_isdir(args: ExistsArgs) -> Result<()> {
    if io::is_dir(&args.path) {
        Ok(())
    } else {
        anyhow::bail!(PrecheckError::FileSystem(format!(
            "Not a directory: {}",
            args.path.display()
        )))
    }
}
