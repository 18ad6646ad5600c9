//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DeskConfig, StorageBackend};
use crate::domain::errors::DeskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DeskConfig
/// 4. Applies environment variable overrides (DENTALDESK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use dentaldesk::config::loader::load_config;
///
/// let config = load_config("dentaldesk.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DeskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DeskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DeskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads `path` if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply in both cases.
///
/// # Errors
///
/// Returns an error if the file exists but is invalid, or if an override
/// produces an invalid configuration.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<DeskConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = DeskConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        DeskError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Parses configuration text (substitution, overrides and validation included)
///
/// # Errors
///
/// Returns an error on missing variables, TOML syntax errors or invalid values.
pub fn parse_config(contents: &str) -> Result<DeskConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: DeskConfig = toml::from_str(&contents)
        .map_err(|e| DeskError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        DeskError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are passed through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DeskError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(DeskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using DENTALDESK_* prefix
///
/// Environment variables follow the pattern: DENTALDESK_<SECTION>_<KEY>
/// For example: DENTALDESK_STORAGE_PATH, DENTALDESK_AUTH_LOGIN_DELAY_MS
fn apply_env_overrides(config: &mut DeskConfig) -> Result<()> {
    if let Ok(val) = std::env::var("DENTALDESK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("DENTALDESK_STORAGE_BACKEND") {
        config.storage.backend = match val.to_lowercase().as_str() {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(DeskError::Configuration(format!(
                    "Invalid DENTALDESK_STORAGE_BACKEND '{other}'. Must be one of: file, memory"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("DENTALDESK_STORAGE_PATH") {
        config.storage.path = val;
    }

    if let Ok(val) = std::env::var("DENTALDESK_AUTH_LOGIN_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.auth.login_delay_ms = delay;
        }
    }

    if let Ok(val) = std::env::var("DENTALDESK_SCHEDULE_UPCOMING_WINDOW_DAYS") {
        if let Ok(days) = val.parse() {
            config.schedule.upcoming_window_days = days;
        }
    }
    if let Ok(val) = std::env::var("DENTALDESK_SCHEDULE_UPCOMING_LIMIT") {
        if let Ok(limit) = val.parse() {
            config.schedule.upcoming_limit = limit;
        }
    }

    if let Ok(val) = std::env::var("DENTALDESK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DENTALDESK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("DENTALDESK_TEST_SUBST_DIR", "/srv/clinic");
        let input = "path = \"${DENTALDESK_TEST_SUBST_DIR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"/srv/clinic\"");
        std::env::remove_var("DENTALDESK_TEST_SUBST_DIR");
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# path = \"${DENTALDESK_TEST_NEVER_SET}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("DENTALDESK_TEST_MISSING_VAR");
        let input = "path = \"${DENTALDESK_TEST_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-dentaldesk.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[storage]
backend = "memory"

[auth]
login_delay_ms = 0

[schedule]
upcoming_window_days = 14
upcoming_limit = 5
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.auth.login_delay_ms, 0);
        assert_eq!(config.schedule.upcoming_window_days, 14);
        assert_eq!(config.schedule.upcoming_limit, 5);
    }

    #[test]
    fn test_parse_config_rejects_invalid_values() {
        let result = parse_config("[schedule]\nupcoming_limit = 0\n");
        assert!(matches!(result, Err(DeskError::Configuration(_))));
    }
}
