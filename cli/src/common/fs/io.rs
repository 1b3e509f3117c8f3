//! # precheck Filesystem Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` and `std::env::set_current_dir` that print
//! a shell-transcript line before acting, so a CI log reads like the session a
//! developer would have typed:
//!
//! ```text
//! mkdir build
//! cd build
//! Directory build exists.
//! ```
//!
//! ## Architecture
//!
//! - **`chdir`**: permanent working-directory change (`cd`). For a temporary
//!   change use `scope::DirectoryScope` instead.
//! - **`mkdir`**: directory creation with `parents` (`mkdir -p`) and
//!   `exist_ok` switches.
//! - **`is_file`** / **`is_dir`**: existence checks that report their answer
//!   in the transcript as well as returning it.
//! - **`change_directory`**: the shared checked `set_current_dir`, mapping every
//!   failure to `PrecheckError::DirectoryNotFound`.
//!
use crate::common::ui::flush_println;
use crate::core::error::{PrecheckError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Options for `mkdir`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MkdirOptions {
    /// Create missing parent directories as well.
    pub parents: bool,
    /// Succeed if the directory already exists.
    pub exist_ok: bool,
}

/// Changes the working directory for the rest of the process, logging `cd {path}`.
///
/// # Errors
///
/// Returns `PrecheckError::DirectoryNotFound` if `path` is missing, is not a
/// directory, or cannot be entered.
pub fn chdir(path: &Path) -> Result<()> {
    flush_println(&format!("cd {}", path.display()));
    change_directory(path)
}

/// Creates the directory at `path`, logging `mkdir {path}`.
///
/// # Errors
///
/// Returns an error if:
/// - `path` exists and `exist_ok` is false, or it exists and is not a directory.
/// - A parent is missing and `parents` is false.
/// - Creation fails for another reason (e.g., permissions).
pub fn mkdir(path: &Path, options: MkdirOptions) -> Result<()> {
    flush_println(&format!("mkdir {}", path.display()));

    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!(PrecheckError::FileSystem(format!(
                "Path exists but is not a directory: {}",
                path.display()
            )));
        }
        if !options.exist_ok {
            anyhow::bail!(PrecheckError::FileSystem(format!(
                "Directory already exists: {}",
                path.display()
            )));
        }
        debug!("Directory already exists: {:?}", path);
        return Ok(());
    }

    let created = if options.parents {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };
    created.with_context(|| format!("Failed to create directory {:?}", path))?;
    debug!("Created directory: {:?}", path);
    Ok(())
}

/// Returns whether `path` is an existing regular file, logging the answer.
pub fn is_file(path: &Path) -> bool {
    let exists = path.is_file();
    flush_println(&format!(
        "File {} {}.",
        path.display(),
        existence(exists)
    ));
    exists
}

/// Returns whether `path` is an existing directory, logging the answer.
pub fn is_dir(path: &Path) -> bool {
    let exists = path.is_dir();
    flush_println(&format!(
        "Directory {} {}.",
        path.display(),
        existence(exists)
    ));
    exists
}

fn existence(exists: bool) -> &'static str {
    if exists {
        "exists"
    } else {
        "does not exist"
    }
}

/// Sets the process working directory to `path` without logging.
pub(crate) fn change_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!(PrecheckError::DirectoryNotFound {
            path: path.to_path_buf()
        });
    }
    std::env::set_current_dir(path).map_err(|e| {
        debug!("set_current_dir({:?}) failed: {}", path, e);
        PrecheckError::DirectoryNotFound {
            path: path.to_path_buf(),
        }
    })?;
    Ok(())
}
