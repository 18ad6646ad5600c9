//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the dentaldesk configuration file.

use crate::cli::exit_code;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Unlike data commands, this requires the file to exist.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code::CONFIGURATION);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Storage Backend: {}", config.storage.backend);
        println!("  Storage Path: {}", config.storage.path);
        println!("  Login Delay: {} ms", config.auth.login_delay_ms);
        println!(
            "  Upcoming Window: {} day(s), at most {}",
            config.schedule.upcoming_window_days, config.schedule.upcoming_limit
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(exit_code::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_missing_file_is_configuration_error() {
        let code = ValidateArgs {}
            .execute("/nonexistent/dentaldesk.toml")
            .await
            .unwrap();
        assert_eq!(code, exit_code::CONFIGURATION);
    }

    #[tokio::test]
    async fn test_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[schedule]\nupcoming_window_days = 14").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let code = ValidateArgs {}.execute(&path).await.unwrap();
        assert_eq!(code, exit_code::SUCCESS);
    }
}
