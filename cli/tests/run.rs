//! # precheck CLI Run Integration Tests
//!
//! File: cli/tests/run.rs
//!
//! ## Overview
//!
//! Integration tests for `precheck run`: fail-fast batches, `--no-check`,
//! output capture ordering, working-directory options, environment overrides
//! and timeouts. These rely on a POSIX shell and coreutils.
//!
#![cfg(unix)]

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn repo_dir() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

#[test]
fn test_run_single_command() {
    let dir = repo_dir();
    precheck_in(dir.path())
        .args(["run", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ true"));
}

#[test]
fn test_run_stops_at_first_failure() {
    let dir = repo_dir();
    let output = precheck_in(dir.path())
        .args(["run", "true", "false", "true"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("$ true").count(), 1);
    assert_eq!(stdout.matches("$ false").count(), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Command `false` failed with exit code 1"));
}

#[test]
fn test_run_no_check_runs_everything() {
    let dir = repo_dir();
    precheck_in(dir.path())
        .args(["run", "--no-check", "touch a", "exit 5", "touch c"])
        .assert()
        .success();

    assert!(dir.path().join("a").exists());
    assert!(dir.path().join("c").exists());
}

#[test]
fn test_run_capture_prints_stderr_then_stdout_on_failure() {
    let dir = repo_dir();
    precheck_in(dir.path())
        .args(["run", "--capture", "echo out; echo err >&2; exit 4"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("err\nout\n"))
        .stderr(predicate::str::contains("exit code 4"));
}

#[test]
fn test_run_cwd_option() {
    let dir = repo_dir();
    fs::create_dir(dir.path().join("sub")).unwrap();
    precheck_in(dir.path())
        .args(["run", "-C", "sub", "touch made"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sub$ touch made"));

    assert!(dir.path().join("sub").join("made").exists());
}

#[test]
fn test_run_pushd_logs_and_returns() {
    let dir = repo_dir();
    fs::create_dir(dir.path().join("sub")).unwrap();
    precheck_in(dir.path())
        .args(["run", "--pushd", "sub", "touch inside"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pushd sub"))
        .stdout(predicate::str::contains("popd - returning to"));

    assert!(dir.path().join("sub").join("inside").exists());
}

#[test]
fn test_run_pushd_missing_directory() {
    let dir = repo_dir();
    precheck_in(dir.path())
        .args(["run", "--pushd", "nowhere", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn test_run_env_option() {
    let dir = repo_dir();
    precheck_in(dir.path())
        .args([
            "run",
            "--capture",
            "-e",
            "GREETING=hello-from-env",
            "printf %s \"$GREETING\"",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-from-env"));
}

#[test]
fn test_run_timeout() {
    let dir = repo_dir();
    precheck_in(dir.path())
        .args(["run", "--timeout", "1", "sleep 5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timed out after 1s"));
}

#[test]
fn test_run_ignores_empty_check_list() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), "[checks]\ncommands = []\n");

    precheck_in(dir.path())
        .args(["run", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ true"));
}

#[test]
fn test_run_still_validates_runner_section() {
    let dir = tempdir().unwrap();
    write_project(dir.path(), "[runner]\ntimeout_secs = 0\n");

    precheck_in(dir.path())
        .args(["run", "true"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}

#[test]
fn test_run_uses_bash_features_when_available() {
    if which_bash().is_none() {
        return;
    }
    let dir = repo_dir();
    precheck_in(dir.path())
        .args(["run", "[[ 1 -eq 1 ]] && source /dev/null"])
        .assert()
        .success();
}

fn which_bash() -> Option<std::path::PathBuf> {
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths)
            .map(|p| p.join("bash"))
            .find(|p| p.is_file())
    })
}
