//! # precheck Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers that narrate what they do in the transcript.
//!
//! ## Architecture
//!
//! - **`io`**: `chdir`, `mkdir`, `is_file`, `is_dir`.
//! - **`scope`**: `DirectoryScope`, a guard that changes the working directory
//!   and changes it back when dropped, plus the closure form `with_directory`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{io, scope::DirectoryScope};
//! use std::path::Path;
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! io::mkdir(Path::new("build"), io::MkdirOptions { parents: true, exist_ok: true })?;
//! let _scope = DirectoryScope::enter("build", true)?;
//! if io::is_file(Path::new("CMakeCache.txt")) {
//!     // ...
//! }
//! # Ok(())
//! # }
//! ```
//!

/// Transcript-logging directory and existence helpers.
pub mod io;
/// Scoped working-directory changes (`pushd`/`popd`).
pub mod scope;
