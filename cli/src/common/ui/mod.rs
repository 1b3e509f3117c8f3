//! # precheck Transcript Output (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Every line precheck shows the user (`/repo$ flake8`, `pushd src`,
//! `Directory build exists.`) goes through this module. Each write is followed
//! by a flush of **both** stdout and stderr, so that when a CI log aggregator
//! merges the two streams, our transcript lines land next to the output of the
//! child process they describe instead of being held back in a buffer.
//!
//! `tracing` remains the channel for diagnostic logging (stderr, filtered by
//! `-v`/`RUST_LOG`); this module is only for the user-facing transcript.
//!
use std::io::Write;
use tracing::debug;

/// Writes `text` to stdout without a trailing newline, then flushes stdout and stderr.
pub fn flush_print(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()) {
        debug!("Failed to write transcript output: {}", e);
    }
    flush_streams(&mut stdout);
}

/// Writes `line` plus a newline to stdout, then flushes stdout and stderr.
pub fn flush_println(line: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", line) {
        debug!("Failed to write transcript line: {}", e);
    }
    flush_streams(&mut stdout);
}

fn flush_streams(stdout: &mut impl Write) {
    // Flush both, in case either holds pending output.
    if let Err(e) = stdout.flush() {
        debug!("Failed to flush stdout: {}", e);
    }
    if let Err(e) = std::io::stderr().flush() {
        debug!("Failed to flush stderr: {}", e);
    }
}
