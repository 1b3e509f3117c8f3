//! # precheck System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Utilities for interacting with the host system rather than the filesystem:
//!
//! - **`env`**: reading and setting process environment variables.
//! - **`platform`**: compile-time OS and pointer-width flags, used by the
//!   runner to choose between `bash`, `sh` and `cmd`.
//!
//! ```rust
//! use crate::common::system::{env, platform};
//!
//! if platform::IS_WINDOWS {
//!     println!("commands run through cmd /C");
//! }
//! let ci = env::get("CI").is_some();
//! ```

/// Process environment lookup and assignment.
pub mod env;
/// Host platform flags.
pub mod platform;
