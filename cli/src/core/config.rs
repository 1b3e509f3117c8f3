//! # precheck Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the list of checks and the runner settings. Configuration is layered:
//! built-in defaults, then the user's file, then the project's file.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.precheck.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/precheck/config.toml` on Linux)
//! 3. Default values defined in the code
//!
//! Each file is read into a `ConfigFile` whose keys are all optional, so a key
//! the project leaves out falls through to the user's value and then to the
//! default, while a key the project sets always wins.
//!
//! `PRECHECK_SHELL`, when set, overrides `runner.shell` from any file.
//!
//! ## Example
//!
//! ```toml
//! [checks]
//! commands = ["black --check .", "flake8", "pytest -q"]
//!
//! [runner]
//! shell = "~/bin/bash5"
//! capture = false
//! timeout_secs = 900
//!
//! [runner.env]
//! PYTHONDONTWRITEBYTECODE = "1"
//! ```
//!
use crate::common::system::env;
use crate::core::error::{PrecheckError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The resolved configuration, after all layers are merged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub checks: ChecksConfig,
    pub runner: RunnerConfig,
}

/// The checks run by `precheck check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksConfig {
    /// Shell commands, run in order.
    pub commands: Vec<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            commands: default_check_commands(),
        }
    }
}

/// How commands are executed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Interpreter for command strings (can use ~). Detected when unset.
    pub shell: Option<String>,
    /// Capture output and only show it when a check fails.
    pub capture: bool,
    /// Per-command time limit in seconds.
    pub timeout_secs: Option<u64>,
    /// Variables exported to the process environment before checks run.
    pub env: BTreeMap<String, String>,
}

/// One configuration file as written. `None` means "not set in this file".
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    checks: ChecksFile,
    #[serde(default)]
    runner: RunnerFile,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct ChecksFile {
    commands: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct RunnerFile {
    shell: Option<String>,
    capture: Option<bool>,
    timeout_secs: Option<u64>,
    #[serde(default)]
    env: BTreeMap<String, String>,
}

fn default_check_commands() -> Vec<String> {
    [
        "black --check .",
        "flake8",
        "mypy --install-types --non-interactive",
        "pytest",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

const PROJECT_CONFIG_FILENAME: &str = ".precheck.toml";
const SHELL_ENV_VAR: &str = "PRECHECK_SHELL";

/// Loads and validates the full configuration, as `precheck check` needs it.
pub fn load_config() -> Result<Config> {
    let config = load_layers()?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

/// Loads the configuration but validates only `[runner]`.
///
/// For commands that never read the check list, so an empty or broken
/// `[checks]` table does not stop them.
pub fn load_runner_config() -> Result<RunnerConfig> {
    let config = load_layers()?;
    validate_runner(&config.runner).context("Configuration validation failed")?;
    debug!("Final runner configuration: {:?}", config.runner);
    Ok(config.runner)
}

fn load_layers() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(
        user_config.unwrap_or_default(),
        project_config.unwrap_or_default(),
    );
    apply_env_overrides(&mut merged_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Precheck", "precheck") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file ({}) found in current directory or ancestors.",
            PROJECT_CONFIG_FILENAME
        );
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Resolves each key as project, then user, then default.
fn merge_configs(user: ConfigFile, project: ConfigFile) -> Config {
    // Project values win per key; user-only keys are kept.
    let mut env = user.runner.env;
    env.extend(project.runner.env);
    Config {
        checks: ChecksConfig {
            commands: project
                .checks
                .commands
                .or(user.checks.commands)
                .unwrap_or_else(default_check_commands),
        },
        runner: RunnerConfig {
            shell: project.runner.shell.or(user.runner.shell),
            capture: project.runner.capture.or(user.runner.capture).unwrap_or(false),
            timeout_secs: project.runner.timeout_secs.or(user.runner.timeout_secs),
            env,
        },
    }
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(shell) = env::get(SHELL_ENV_VAR).filter(|s| !s.trim().is_empty()) {
        debug!("{} overrides runner.shell with {}", SHELL_ENV_VAR, shell);
        config.runner.shell = Some(shell);
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(shell) = &mut config.runner.shell {
        *shell = shellexpand::tilde(shell.as_str()).into_owned();
        debug!("Expanded runner shell: {}", shell);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    validate_checks(&config.checks)?;
    validate_runner(&config.runner)?;
    info!("Configuration validation successful.");
    Ok(())
}

fn validate_checks(checks: &ChecksConfig) -> Result<()> {
    if checks.commands.is_empty() {
        return Err(anyhow!(PrecheckError::Config(
            "The check list is empty; add at least one command to [checks].commands.".to_string()
        )));
    }
    if let Some(index) = checks
        .commands
        .iter()
        .position(|c| c.trim().is_empty())
    {
        return Err(anyhow!(PrecheckError::Config(format!(
            "Check #{} is a blank command.",
            index + 1
        ))));
    }
    Ok(())
}

fn validate_runner(runner: &RunnerConfig) -> Result<()> {
    if runner.timeout_secs == Some(0) {
        return Err(anyhow!(PrecheckError::Config(
            "runner.timeout_secs must be greater than zero.".to_string()
        )));
    }
    if let Some(shell) = &runner.shell {
        if !shell_exists(shell) {
            return Err(anyhow!(PrecheckError::Config(format!(
                "Configured shell '{}' was not found.",
                shell
            ))));
        }
    }
    Ok(())
}

/// A bare name is looked up on PATH; anything with a separator must exist as given.
fn shell_exists(shell: &str) -> bool {
    let path = Path::new(shell);
    if path.components().count() > 1 {
        path.is_file()
    } else {
        which::which(shell).is_ok()
    }
}
