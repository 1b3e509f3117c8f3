//! # precheck Process Execution (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! This module runs shell command strings one after another, the way a
//! developer would type them into a terminal, and stops at the first one that
//! fails. It is the engine behind both `precheck check` and `precheck run`.
//!
//! ## Architecture
//!
//! - **`ShellCommand`**: an immutable command string.
//! - **`RunOptions`**: batch-wide switches (`check`, `shell`) plus options passed
//!   straight through to the spawned process (`cwd`, `env`, `capture`,
//!   `timeout`, `shell_path`).
//! - **`ExecutionResult`**: exit code and captured output of one finished command.
//! - **`RunOutput`**: a single result when one command was given, otherwise the
//!   ordered list.
//! - **`run`**: the batch loop.
//!
//! For each command `run`:
//! 1. Prints `{working dir}$ {command}` and flushes stdout and stderr.
//! 2. Spawns the command through the shell chosen by `Shell::detect`
//!    (`bash -c` where bash exists, else `sh -c`; `cmd /C` on Windows), or
//!    directly when `shell` is off.
//! 3. Waits for it, bounded by `timeout` if one was given.
//! 4. With `check` on and a non-zero exit, prints the captured stderr then
//!    stdout and returns `PrecheckError::CommandFailed`. Later commands never run.
//!
//! Commands are awaited strictly one at a time. `tokio::process` is used so the
//! timeout can be enforced with `tokio::time::timeout`; a child that outlives its
//! timeout is killed when its handle is dropped.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{self, RunOptions};
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! // Fail-fast: `pytest` only runs if `flake8` passed.
//! process::run(["flake8", "pytest"], &RunOptions::default()).await?;
//!
//! // Keep going, capture output, run somewhere else.
//! let options = RunOptions::default()
//!     .check(false)
//!     .capture(true)
//!     .cwd("docs");
//! let output = process::run(["make html", "make linkcheck"], &options).await?;
//! for result in output.results() {
//!     println!("{} -> {:?}", result.command, result.code);
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::common::system::platform;
use crate::common::ui::{flush_print, flush_println};
use crate::core::error::{describe_exit, PrecheckError, Result};
use anyhow::Context;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// A shell command string, e.g. `"mypy --install-types --non-interactive"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    text: String,
}

impl ShellCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for ShellCommand {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ShellCommand {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&String> for ShellCommand {
    fn from(text: &String) -> Self {
        Self::new(text.as_str())
    }
}

/// Options applied to every command of a batch.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Fail on the first non-zero exit (default `true`).
    pub check: bool,
    /// Interpret commands with a shell (default `true`). When off, the command
    /// is split on whitespace and the first word is executed directly.
    pub shell: bool,
    /// Working directory for the child instead of the current one.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables for the child.
    pub env: Vec<(String, String)>,
    /// Pipe stdout/stderr into the result instead of inheriting them.
    pub capture: bool,
    /// Kill the child and fail if it runs longer than this.
    pub timeout: Option<Duration>,
    /// Interpreter to use instead of the detected one.
    pub shell_path: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            check: true,
            shell: true,
            cwd: None,
            env: Vec::new(),
            capture: false,
            timeout: None,
            shell_path: None,
        }
    }
}

impl RunOptions {
    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn shell(mut self, shell: bool) -> Self {
        self.shell = shell;
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn capture(mut self, capture: bool) -> Self {
        self.capture = capture;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn shell_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.shell_path = Some(path.into());
        self
    }
}

/// Outcome of one finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub command: String,
    /// `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    /// Empty unless the command ran with `capture`.
    pub stdout: String,
    /// Empty unless the command ran with `capture`.
    pub stderr: String,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Results of a batch: `Single` when exactly one command was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutput {
    Single(ExecutionResult),
    Many(Vec<ExecutionResult>),
}

impl RunOutput {
    pub fn results(&self) -> &[ExecutionResult] {
        match self {
            RunOutput::Single(result) => std::slice::from_ref(result),
            RunOutput::Many(results) => results,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.results().iter().all(ExecutionResult::success)
    }
}

/// Interpreter used to run command strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub program: PathBuf,
    pub flag: &'static str,
}

impl Shell {
    /// `bash` where available so `source`, `[[ ]]` and friends work; `sh`
    /// otherwise; `cmd /C` on Windows.
    pub fn detect() -> Self {
        if platform::IS_WINDOWS {
            return Self::from_path(Path::new("cmd"));
        }
        let bash = which::which("bash").ok().or_else(|| {
            let fallback = Path::new("/bin/bash");
            fallback.exists().then(|| fallback.to_path_buf())
        });
        match bash {
            Some(program) => Self {
                program,
                flag: "-c",
            },
            None => {
                debug!("bash not found, falling back to sh");
                Self {
                    program: PathBuf::from("sh"),
                    flag: "-c",
                }
            }
        }
    }

    /// Wraps an explicit interpreter; `cmd` gets `/C`, anything else `-c`.
    pub fn from_path(program: &Path) -> Self {
        let is_cmd = program
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.eq_ignore_ascii_case("cmd"));
        Self {
            program: program.to_path_buf(),
            flag: if is_cmd { "/C" } else { "-c" },
        }
    }
}

/// Runs `commands` in order, one process each, and stops at the first failure
/// when `options.check` is set.
///
/// # Returns
///
/// `RunOutput::Single` if exactly one command was given, otherwise
/// `RunOutput::Many` in input order.
///
/// # Errors
///
/// - `PrecheckError::Config` if `commands` is empty.
/// - `PrecheckError::DirectoryNotFound` if `options.cwd` is not a directory.
/// - `PrecheckError::CommandFailed` for a non-zero exit while `check` is on.
/// - `PrecheckError::Spawn` if a command could not be started.
/// - `PrecheckError::Timeout` if a command outlived `options.timeout`.
pub async fn run<I, C>(commands: I, options: &RunOptions) -> Result<RunOutput>
where
    I: IntoIterator<Item = C>,
    C: Into<ShellCommand>,
{
    let commands: Vec<ShellCommand> = commands.into_iter().map(Into::into).collect();
    if commands.is_empty() {
        anyhow::bail!(PrecheckError::Config("no commands to run".to_string()));
    }
    if let Some(cwd) = &options.cwd {
        if !cwd.is_dir() {
            anyhow::bail!(PrecheckError::DirectoryNotFound { path: cwd.clone() });
        }
    }

    let shell = options
        .shell
        .then(|| match &options.shell_path {
            Some(path) => Shell::from_path(path),
            None => Shell::detect(),
        });
    if let Some(shell) = &shell {
        debug!("Using interpreter {:?} {}", shell.program, shell.flag);
    }

    info!("Running {} command(s)", commands.len());
    let mut results = Vec::with_capacity(commands.len());
    for command in &commands {
        let result = run_one(command, shell.as_ref(), options).await?;
        if !result.success() {
            warn!(
                "`{}` finished with {}, continuing",
                result.command,
                describe_exit(&result.code)
            );
        }
        results.push(result);
    }

    if commands.len() == 1 {
        if let Some(result) = results.pop() {
            return Ok(RunOutput::Single(result));
        }
    }
    Ok(RunOutput::Many(results))
}

async fn run_one(
    command: &ShellCommand,
    shell: Option<&Shell>,
    options: &RunOptions,
) -> Result<ExecutionResult> {
    let working_dir = match &options.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };
    flush_println(&format!("{}$ {}", working_dir.display(), command));

    let mut process = build_process(command, shell, options)?;
    let child = process.spawn().map_err(|source| PrecheckError::Spawn {
        cmd: command.to_string(),
        source,
    })?;

    let waiting = child.wait_with_output();
    let output = match options.timeout {
        Some(limit) => match tokio::time::timeout(limit, waiting).await {
            Ok(output) => output,
            // Dropping the future drops the child, and kill_on_drop ends it.
            Err(_) => anyhow::bail!(PrecheckError::Timeout {
                cmd: command.to_string(),
                limit,
            }),
        },
        None => waiting.await,
    }
    .with_context(|| format!("Failed to wait for command `{}`", command))?;

    let result = ExecutionResult {
        command: command.to_string(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!("`{}` exited with status {}", command, output.status);

    if options.check && !result.success() {
        let captured = format!("{}{}", result.stderr, result.stdout);
        if !captured.is_empty() {
            flush_print(&captured);
        }
        return Err(PrecheckError::CommandFailed {
            cmd: result.command,
            code: result.code,
            stdout: result.stdout,
            stderr: result.stderr,
        }
        .into());
    }
    Ok(result)
}

fn build_process(
    command: &ShellCommand,
    shell: Option<&Shell>,
    options: &RunOptions,
) -> Result<Command> {
    let mut process = match shell {
        Some(shell) => {
            let mut process = Command::new(&shell.program);
            process.arg(shell.flag).arg(command.as_str());
            process
        }
        None => {
            let mut words = command.as_str().split_whitespace();
            let program = words.next().ok_or_else(|| {
                PrecheckError::ArgumentParsing(format!(
                    "Cannot run a blank command without a shell: {:?}",
                    command.as_str()
                ))
            })?;
            let mut process = Command::new(program);
            process.args(words);
            process
        }
    };

    if let Some(cwd) = &options.cwd {
        process.current_dir(cwd);
    }
    process.envs(options.env.iter().map(|(key, value)| (key, value)));

    let (stdout, stderr) = if options.capture {
        (Stdio::piped(), Stdio::piped())
    } else {
        (Stdio::inherit(), Stdio::inherit())
    };
    process
        .stdin(Stdio::inherit())
        .stdout(stdout)
        .stderr(stderr)
        .kill_on_drop(true);
    Ok(process)
}

// --- Unit Tests ---
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn failure(err: &anyhow::Error) -> (&str, Option<i32>, &str, &str) {
        match err.downcast_ref::<PrecheckError>() {
            Some(PrecheckError::CommandFailed {
                cmd,
                code,
                stdout,
                stderr,
            }) => (cmd.as_str(), *code, stdout.as_str(), stderr.as_str()),
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_single_command_returns_single_result() {
        let output = run(["true"], &RunOptions::default()).await.unwrap();
        match output {
            RunOutput::Single(result) => {
                assert_eq!(result.command, "true");
                assert_eq!(result.code, Some(0));
                assert!(result.success());
            }
            other => panic!("expected a single result, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_fail_fast_stops_at_failing_command() {
        let err = run(["true", "false", "true"], &RunOptions::default())
            .await
            .unwrap_err();
        let (cmd, code, _, _) = failure(&err);
        assert_eq!(cmd, "false");
        assert_eq!(code, Some(1));
    }

    #[tokio::test]
    async fn test_fail_fast_never_runs_later_commands() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default().cwd(temp_dir.path());

        let err = run(["touch first", "exit 3", "touch third"], &options)
            .await
            .unwrap_err();

        let (cmd, code, _, _) = failure(&err);
        assert_eq!(cmd, "exit 3");
        assert_eq!(code, Some(3));
        assert!(temp_dir.path().join("first").exists());
        assert!(!temp_dir.path().join("third").exists());
    }

    #[tokio::test]
    async fn test_unchecked_batch_runs_everything() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default().check(false).cwd(temp_dir.path());

        let output = run(["touch a", "exit 7", "touch c"], &options)
            .await
            .unwrap();

        let codes: Vec<Option<i32>> = output.results().iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![Some(0), Some(7), Some(0)]);
        assert!(!output.all_succeeded());
        assert!(temp_dir.path().join("a").exists());
        assert!(temp_dir.path().join("c").exists());
        assert!(matches!(output, RunOutput::Many(ref results) if results.len() == 3));
    }

    #[tokio::test]
    async fn test_capture_collects_output_and_reports_it_on_failure() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default().capture(true).cwd(temp_dir.path());

        let err = run(["echo out; echo err >&2; exit 2"], &options)
            .await
            .unwrap_err();

        let (_, code, stdout, stderr) = failure(&err);
        assert_eq!(code, Some(2));
        assert_eq!(stdout, "out\n");
        assert_eq!(stderr, "err\n");
    }

    #[tokio::test]
    async fn test_capture_on_success() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default().capture(true).cwd(temp_dir.path());

        let output = run(["echo hello | tr a-z A-Z"], &options).await.unwrap();

        let results = output.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].stdout, "HELLO\n");
        assert!(results[0].stderr.is_empty());
    }

    #[tokio::test]
    async fn test_env_overrides_reach_child() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default()
            .capture(true)
            .cwd(temp_dir.path())
            .env("PRECHECK_PROCESS_TEST", "from-options");

        let output = run(["printf %s \"$PRECHECK_PROCESS_TEST\""], &options)
            .await
            .unwrap();

        assert_eq!(output.results()[0].stdout, "from-options");
    }

    #[tokio::test]
    async fn test_cwd_override_is_used() {
        let temp_dir = tempdir().unwrap();
        let expected = temp_dir.path().canonicalize().unwrap();
        let options = RunOptions::default().capture(true).cwd(&expected);

        let output = run(["pwd -P"], &options).await.unwrap();

        assert_eq!(output.results()[0].stdout.trim_end(), expected.to_str().unwrap());
    }

    #[tokio::test]
    async fn test_missing_cwd_is_directory_not_found() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default().cwd(temp_dir.path().join("missing"));

        let err = run(["true"], &options).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PrecheckError>(),
            Some(PrecheckError::DirectoryNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected() {
        let err = run(Vec::<String>::new(), &RunOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no commands to run"));
    }

    #[tokio::test]
    async fn test_without_shell_execs_program_directly() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default()
            .shell(false)
            .capture(true)
            .cwd(temp_dir.path());

        // No shell: `$HOME` is passed through literally.
        let output = run(["echo alpha $HOME"], &options).await.unwrap();

        assert_eq!(output.results()[0].stdout, "alpha $HOME\n");
    }

    #[tokio::test]
    async fn test_without_shell_missing_program_is_spawn_error() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default()
            .shell(false)
            .check(false)
            .cwd(temp_dir.path());

        let err = run(["precheck-no-such-program-4e1d --flag"], &options)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PrecheckError>(),
            Some(PrecheckError::Spawn { .. })
        ));
    }

    #[tokio::test]
    async fn test_timeout_kills_long_running_command() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default()
            .cwd(temp_dir.path())
            .timeout(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let err = run(["sleep 5", "touch after"], &options).await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(matches!(
            err.downcast_ref::<PrecheckError>(),
            Some(PrecheckError::Timeout { .. })
        ));
        assert!(!temp_dir.path().join("after").exists());
    }

    #[tokio::test]
    async fn test_explicit_shell_path() {
        let temp_dir = tempdir().unwrap();
        let options = RunOptions::default()
            .capture(true)
            .cwd(temp_dir.path())
            .shell_path("/bin/sh");

        let output = run(["echo via-sh"], &options).await.unwrap();

        assert_eq!(output.results()[0].stdout, "via-sh\n");
    }

    #[test]
    fn test_shell_from_path_flags() {
        assert_eq!(Shell::from_path(Path::new("/bin/zsh")).flag, "-c");
        assert_eq!(Shell::from_path(Path::new("cmd")).flag, "/C");
        assert_eq!(Shell::from_path(Path::new("CMD.exe")).flag, "/C");
    }

    #[test]
    fn test_detect_prefers_bash_when_present() {
        let shell = Shell::detect();
        assert_eq!(shell.flag, "-c");
        if which::which("bash").is_ok() {
            assert!(shell.program.ends_with("bash"));
        }
    }
}
