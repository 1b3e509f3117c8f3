//! # Environment Variable Helpers (`common::system::env`)
//!
//! File: cli/src/common/system/env.rs
//!
//! ## Overview
//!
//! Plain lookup and assignment over the process environment. Values set here
//! are inherited by every command the runner spawns afterwards, which is how
//! the `[runner.env]` configuration table reaches the checks.
//!
//! `std::env::set_var` panics on malformed keys; `set` validates first and
//! reports a `PrecheckError::Config` instead.
//!
use crate::core::error::{PrecheckError, Result};
use tracing::debug;

/// Returns the value of `key`, or `None` when it is unset or not valid Unicode.
pub fn get(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Sets `key` to `value` for this process and any child processes spawned later.
///
/// # Errors
///
/// Returns an error if `key` is empty or contains `=` or a NUL byte, or if
/// `value` contains a NUL byte.
pub fn set(key: &str, value: &str) -> Result<()> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        anyhow::bail!(PrecheckError::Config(format!(
            "Invalid environment variable name: {:?}",
            key
        )));
    }
    if value.contains('\0') {
        anyhow::bail!(PrecheckError::Config(format!(
            "Value for environment variable {} contains a NUL byte",
            key
        )));
    }
    debug!("Setting environment variable {}={}", key, value);
    std::env::set_var(key, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_set_then_get() {
        set("PRECHECK_ENV_TEST_VALUE", "abc 123").unwrap();
        assert_eq!(get("PRECHECK_ENV_TEST_VALUE").as_deref(), Some("abc 123"));
    }

    #[test]
    fn test_get_missing_is_none() {
        assert_eq!(get("PRECHECK_ENV_TEST_DEFINITELY_UNSET_9f2c"), None);
    }

    #[test]
    fn test_set_rejects_malformed_keys() {
        assert!(set("", "x").is_err());
        assert!(set("A=B", "x").is_err());
        assert!(set("PRECHECK_ENV_TEST_NUL", "a\0b").is_err());
        assert_eq!(get("PRECHECK_ENV_TEST_NUL"), None);
    }
}
