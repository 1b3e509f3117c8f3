//! # Scoped Working Directory (`common::fs::scope`)
//!
//! File: cli/src/common/fs/scope.rs
//!
//! ## Overview
//!
//! `DirectoryScope` is a `pushd`/`popd` pair expressed as an RAII guard. Entering
//! the scope records the current directory and changes into the target; dropping
//! the guard changes back. Because the restore lives in `Drop`, it runs on every
//! exit path: normal return, early `?` return, and panic unwinding.
//!
//! The previous directory is a value held by the guard, never a global.
//!
//! ## Caveat
//!
//! The working directory is process-wide. A scope assumes nothing else in the
//! process changes it while the guard is alive; this is not enforced.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::scope::{with_directory, DirectoryScope};
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! {
//!     let _scope = DirectoryScope::enter(Path::new("docs"), true)?;
//!     process::run(["make html"], &RunOptions::default()).await?;
//! } // back in the original directory here, even if `make` failed
//!
//! let listing = with_directory(Path::new("src"), false, || {
//!     Ok(std::fs::read_dir(".")?.count())
//! })?;
//! # Ok(())
//! # }
//! ```
//!
use crate::common::fs::io::change_directory;
use crate::common::ui::flush_println;
use crate::core::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Guard that keeps the process inside `target` until it is dropped or restored.
#[derive(Debug)]
#[must_use = "the previous directory is restored as soon as the scope is dropped"]
pub struct DirectoryScope {
    previous: PathBuf,
    target: PathBuf,
    verbose: bool,
    active: bool,
}

impl DirectoryScope {
    /// Records the current directory and changes into `target`.
    ///
    /// With `verbose`, logs `pushd {target}` on entry and
    /// `popd - returning to {previous}.` on exit.
    ///
    /// # Errors
    ///
    /// Returns `PrecheckError::DirectoryNotFound` if `target` does not exist,
    /// is not a directory or cannot be entered. The working directory is left
    /// untouched in that case.
    pub fn enter(target: impl AsRef<Path>, verbose: bool) -> Result<Self> {
        let target = target.as_ref().to_path_buf();
        if verbose {
            flush_println(&format!("pushd {}", target.display()));
        }
        let previous =
            std::env::current_dir().context("Failed to determine the current directory")?;
        change_directory(&target)?;
        debug!(
            "Entered directory scope {:?} (previous: {:?})",
            target, previous
        );
        Ok(Self {
            previous,
            target,
            verbose,
            active: true,
        })
    }

    /// Leaves the scope now, reporting a failed restore as an error instead of
    /// only logging it as `Drop` does.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        self.pop()
    }

    fn pop(&self) -> Result<()> {
        if self.verbose {
            flush_println(&format!(
                "popd - returning to {}.",
                self.previous.display()
            ));
        }
        std::env::set_current_dir(&self.previous).with_context(|| {
            format!(
                "Failed to return to previous directory {}",
                self.previous.display()
            )
        })?;
        debug!("Left directory scope {:?}", self.target);
        Ok(())
    }
}

impl Drop for DirectoryScope {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(e) = self.pop() {
                error!("{:#}", e);
            }
        }
    }
}

/// Runs `f` inside `target` and returns its result unchanged.
///
/// The previous directory is restored before returning, whether `f` succeeded
/// or not. If both `f` and the restore fail, `f`'s error wins and the restore
/// failure is logged.
pub fn with_directory<T, F>(target: impl AsRef<Path>, verbose: bool, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let scope = DirectoryScope::enter(target, verbose)?;
    let outcome = f();
    match (outcome, scope.restore()) {
        (Err(e), Err(restore_err)) => {
            error!("{:#}", restore_err);
            Err(e)
        }
        (Ok(_), Err(restore_err)) => Err(restore_err),
        (outcome, Ok(())) => outcome,
    }
}
