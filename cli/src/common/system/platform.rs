//! # Platform Detection (`common::system::platform`)
//!
//! File: cli/src/common/system/platform.rs
//!
//! Compile-time flags describing the host, used to pick the command interpreter.

/// True when built for Windows.
pub const IS_WINDOWS: bool = cfg!(windows);
/// True when built for Linux.
pub const IS_LINUX: bool = cfg!(target_os = "linux");
/// True when built for macOS.
pub const IS_MACOS: bool = cfg!(target_os = "macos");
/// True on 64-bit targets.
pub const IS_64BIT: bool = cfg!(target_pointer_width = "64");

/// One-line summary for debug logging.
pub fn describe() -> String {
    let os = if IS_WINDOWS {
        "windows"
    } else if IS_LINUX {
        "linux"
    } else if IS_MACOS {
        "macos"
    } else {
        std::env::consts::OS
    };
    format!("{} ({}-bit)", os, if IS_64BIT { 64 } else { 32 })
}
