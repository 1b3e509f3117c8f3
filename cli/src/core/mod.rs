//! # precheck Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by every command:
//! - `config`: loading, merging and validating `.precheck.toml`
//! - `error`: `PrecheckError` and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{PrecheckError, Result};
//! ```
//!
pub mod config;
pub mod error;
