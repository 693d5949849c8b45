//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Write `contents` to a uniquely named file in the temp dir.
fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_tlcap_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("tlcap") && path_str.ends_with("config.toml"),
        "Path should contain 'tlcap' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp_config(
        "tlcap_test_config.toml",
        r#"
log_file_path = "/tmp/tlcap/custom.log"
disabled_operations = ["Followers", "Following"]
pretty = false
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/tlcap/custom.log"))
    );
    assert_eq!(
        config.disabled_operations,
        Some(vec!["Followers".to_string(), "Following".to_string()])
    );
    assert_eq!(config.pretty, Some(false));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp_config("tlcap_test_invalid.toml", "pretty = [unclosed");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should return ParseError, got: {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_read_error_for_directory() {
    let dir = env::temp_dir().join("tlcap_test_config_dir.toml");
    fs::create_dir_all(&dir).expect("Failed to create dir");

    let result = load_config_file(&dir);
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = write_temp_config("tlcap_test_partial.toml", "pretty = true\n");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.pretty, Some(true));
    assert_eq!(config.log_file_path, None);
    assert_eq!(config.disabled_operations, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        log_file_path: Some(PathBuf::from("/var/log/tlcap.log")),
        disabled_operations: Some(vec!["Bookmarks".to_string()]),
        pretty: Some(false),
    };

    let resolved = merge_config(Some(config_file));
    assert_eq!(resolved.log_file_path, PathBuf::from("/var/log/tlcap.log"));
    assert_eq!(resolved.disabled_operations, vec!["Bookmarks".to_string()]);
    assert!(!resolved.pretty);
}

#[test]
fn resolved_config_default_has_expected_values() {
    let defaults = ResolvedConfig::default();
    assert!(defaults.pretty);
    assert!(defaults.disabled_operations.is_empty());
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(tlcap_log_file)]
fn apply_env_overrides_respects_tlcap_log_file() {
    let _guard = EnvGuard::new(LOG_FILE_ENV_VAR);
    env::set_var(LOG_FILE_ENV_VAR, "/tmp/from-env.log");

    let resolved = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(resolved.log_file_path, PathBuf::from("/tmp/from-env.log"));
}

#[test]
#[serial(tlcap_log_file)]
fn apply_env_overrides_leaves_other_fields_unchanged() {
    let _guard = EnvGuard::new(LOG_FILE_ENV_VAR);
    env::set_var(LOG_FILE_ENV_VAR, "/tmp/from-env.log");

    let base = ResolvedConfig {
        disabled_operations: vec!["Likes".to_string()],
        pretty: false,
        ..ResolvedConfig::default()
    };
    let resolved = apply_env_overrides(base.clone());

    assert_eq!(resolved.disabled_operations, base.disabled_operations);
    assert_eq!(resolved.pretty, base.pretty);
}

#[test]
#[serial(tlcap_log_file)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(LOG_FILE_ENV_VAR);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(tlcap_log_file)]
fn apply_env_overrides_ignores_empty_value() {
    let _guard = EnvGuard::new(LOG_FILE_ENV_VAR);
    env::set_var(LOG_FILE_ENV_VAR, "");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(tlcap_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let explicit = write_temp_config("tlcap_test_explicit.toml", "pretty = false\n");
    let from_env = write_temp_config("tlcap_test_env.toml", "pretty = true\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.pretty, Some(false), "Explicit path wins over env var");

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(tlcap_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let from_env = write_temp_config(
        "tlcap_test_env_only.toml",
        "disabled_operations = [\"Likes\"]\n",
    );
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.disabled_operations, Some(vec!["Likes".to_string()]));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(tlcap_config)]
fn load_config_with_precedence_env_var_pointing_nowhere_is_none() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/tlcap/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}

#[test]
fn apply_cli_overrides_adds_disabled_operations() {
    let base = ResolvedConfig {
        disabled_operations: vec!["Likes".to_string()],
        ..ResolvedConfig::default()
    };

    let resolved = apply_cli_overrides(
        base,
        vec!["Bookmarks".to_string(), "Likes".to_string()],
        false,
    );

    assert_eq!(
        resolved.disabled_operations,
        vec!["Likes".to_string(), "Bookmarks".to_string()],
        "CLI names are appended without duplicates"
    );
    assert!(resolved.pretty);
}

#[test]
fn apply_cli_overrides_compact_disables_pretty() {
    let resolved = apply_cli_overrides(ResolvedConfig::default(), Vec::new(), true);
    assert!(!resolved.pretty);
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), Vec::new(), false), base);
}

#[test]
#[serial(tlcap_log_file)]
fn precedence_chain_full_defaults_to_cli() {
    let _guard = EnvGuard::new(LOG_FILE_ENV_VAR);
    let config_file = ConfigFile {
        log_file_path: Some(PathBuf::from("/from/file.log")),
        disabled_operations: Some(vec!["Followers".to_string()]),
        pretty: Some(true),
    };
    env::set_var(LOG_FILE_ENV_VAR, "/from/env.log");

    let resolved = apply_cli_overrides(
        apply_env_overrides(merge_config(Some(config_file))),
        vec!["Following".to_string()],
        true,
    );

    assert_eq!(resolved.log_file_path, PathBuf::from("/from/env.log"));
    assert_eq!(
        resolved.disabled_operations,
        vec!["Followers".to_string(), "Following".to_string()]
    );
    assert!(!resolved.pretty);
}

#[test]
fn validate_accepts_known_operations() {
    let config = ResolvedConfig {
        disabled_operations: vec!["Likes".to_string(), "ListMembers".to_string()],
        ..ResolvedConfig::default()
    };
    assert_eq!(validate(&config), Ok(()));
}

#[test]
fn validate_rejects_unknown_operation() {
    let config = ResolvedConfig {
        disabled_operations: vec!["Likes".to_string(), "HomeTimeline".to_string()],
        ..ResolvedConfig::default()
    };

    let err = validate(&config).unwrap_err();
    assert_eq!(err, ConfigError::UnknownOperation("HomeTimeline".to_string()));
    insta::assert_snapshot!(err.to_string(), @"Unknown operation 'HomeTimeline' in disabled_operations");
}

#[test]
fn validate_is_case_sensitive() {
    let config = ResolvedConfig {
        disabled_operations: vec!["likes".to_string()],
        ..ResolvedConfig::default()
    };
    assert!(validate(&config).is_err());
}
