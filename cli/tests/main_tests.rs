//! # precheck CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Verifies the top-level behavior of the `precheck` binary: `--help`,
//! `--version`, and rejection of unknown subcommands.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    precheck_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_version_flag() {
    precheck_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_subcommand_fails() {
    precheck_cmd()
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
