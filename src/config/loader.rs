//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::interceptor::operations::is_known_operation;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TLCAP_CONFIG";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV_VAR: &str = "TLCAP_LOG_FILE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A disabled operation name matches no known operation.
    #[error("Unknown operation '{0}' in disabled_operations")]
    UnknownOperation(String),
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to `~/.config/tlcap/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Operation names whose interceptors are not registered.
    #[serde(default)]
    pub disabled_operations: Option<Vec<String>>,

    /// Pretty-print the JSON written to stdout.
    #[serde(default)]
    pub pretty: Option<bool>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Operations not to intercept.
    pub disabled_operations: Vec<String>,
    /// Pretty-print output.
    pub pretty: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            disabled_operations: Vec::new(),
            pretty: true,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tlcap/tlcap.log` on Unix-like systems, falling
/// back to the current directory when no state directory is known.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tlcap").join("tlcap.log")
    } else {
        PathBuf::from("tlcap.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path (`~/.config/tlcap/config.toml` on Unix).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tlcap").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TLCAP_CONFIG` environment variable
/// 3. Default path `~/.config/tlcap/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides (`TLCAP_LOG_FILE`).
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var(LOG_FILE_ENV_VAR) {
        if !path.is_empty() {
            config.log_file_path = PathBuf::from(path);
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        disabled_operations: config
            .disabled_operations
            .unwrap_or(defaults.disabled_operations),
        pretty: config.pretty.unwrap_or(defaults.pretty),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Operations named by `--disable` are added to those the file disabled;
/// `--compact` turns pretty-printing off.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    disable: Vec<String>,
    compact: bool,
) -> ResolvedConfig {
    for name in disable {
        if !config.disabled_operations.contains(&name) {
            config.disabled_operations.push(name);
        }
    }

    if compact {
        config.pretty = false;
    }

    config
}

/// Check every disabled operation name against the operation table.
///
/// # Errors
///
/// Returns `UnknownOperation` for the first name that matches nothing.
pub fn validate(config: &ResolvedConfig) -> Result<(), ConfigError> {
    match config
        .disabled_operations
        .iter()
        .find(|name| !is_known_operation(name))
    {
        Some(name) => Err(ConfigError::UnknownOperation(name.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

#[cfg(test)]
mod log_path_tests {
    use super::*;

    #[test]
    fn default_log_path_ends_with_tlcap_log() {
        let path = default_log_path();
        assert!(
            path.to_string_lossy().ends_with("tlcap.log"),
            "Default log path should end with 'tlcap.log', got: {:?}",
            path
        );
    }

    #[test]
    fn resolved_config_default_includes_log_path() {
        let config = ResolvedConfig::default();
        assert!(!config.log_file_path.as_os_str().is_empty());
    }

    #[test]
    fn config_file_log_path_overrides_default() {
        let custom_path = PathBuf::from("/custom/path/to/app.log");
        let config_file = ConfigFile {
            log_file_path: Some(custom_path.clone()),
            ..ConfigFile::default()
        };

        let resolved = merge_config(Some(config_file));
        assert_eq!(resolved.log_file_path, custom_path);
    }

    #[test]
    fn missing_config_file_log_path_uses_default() {
        let resolved = merge_config(Some(ConfigFile::default()));
        assert_eq!(resolved.log_file_path, default_log_path());
    }
}
