//! # precheck Mkdir Handler
//!
//! File: cli/src/commands/fs/mkdir.rs
//!
//! `precheck fs mkdir PATH [-p] [--exist-ok]`, a front for `common::fs::io::mkdir`.
//!
use crate::common::fs::io::{self, MkdirOptions};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `precheck fs mkdir`.
#[derive(Parser, Debug)]
pub struct MkdirArgs {
    /// Directory to create.
    path: PathBuf,
    /// Create missing parent directories.
    #[arg(short, long)]
    parents: bool,
    /// Do not fail if the directory already exists.
    #[arg(long)]
    exist_ok: bool,
}

pub fn handle_mkdir(args: MkdirArgs) -> Result<()> {
    info!("Handling fs mkdir for {:?}", args.path);
    io::mkdir(
        &args.path,
        MkdirOptions {
            parents: args.parents,
            exist_ok: args.exist_ok,
        },
    )
}
