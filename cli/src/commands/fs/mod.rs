//! # precheck Filesystem Command Group
//!
//! File: cli/src/commands/fs/mod.rs
//!
//! ## Overview
//!
//! Defines and routes the `precheck fs` subcommands, thin CLI fronts for the
//! transcript-logging helpers in `common::fs::io`. They are handy in CI
//! scripts that want the same `File x exists.` style output as the checks.
//!
//! ## Usage
//!
//! ```bash
//! precheck fs isfile setup.cfg      # exit 0 if it is a file, 1 otherwise
//! precheck fs isdir build           # exit 0 if it is a directory, 1 otherwise
//! precheck fs mkdir -p build/reports --exist-ok
//!
//! # Resolve paths from another directory; logs pushd/popd around the operation
//! precheck fs -C build isfile CMakeCache.txt
//! ```
//!
use crate::common::fs::scope::with_directory;
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod exists;
mod mkdir;

/// Top-level arguments for the 'fs' command group.
#[derive(Parser, Debug)]
pub struct FsArgs {
    /// Run the subcommand from this directory, returning afterwards.
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    dir: Option<PathBuf>,
    #[command(subcommand)]
    command: FsCommand,
}

/// Subcommands under `precheck fs`.
#[derive(Subcommand, Debug)]
enum FsCommand {
    /// Report whether a path is an existing file
    Isfile(exists::ExistsArgs),
    /// Report whether a path is an existing directory
    Isdir(exists::ExistsArgs),
    /// Create a directory
    Mkdir(mkdir::MkdirArgs),
}

/// Main handler for the 'fs' command group.
pub async fn handle_fs(args: FsArgs) -> Result<()> {
    let FsArgs { dir, command } = args;
    match dir {
        Some(dir) => with_directory(&dir, true, || dispatch(command)),
        None => dispatch(command),
    }
}

fn dispatch(command: FsCommand) -> Result<()> {
    match command {
        FsCommand::Isfile(args) => exists::handle_isfile(args),
        FsCommand::Isdir(args) => exists::handle_isdir(args),
        FsCommand::Mkdir(args) => mkdir::handle_mkdir(args),
    }
}
