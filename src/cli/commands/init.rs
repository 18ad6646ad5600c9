//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::exit_code;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "dentaldesk.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing dentaldesk configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_code::CONFIGURATION);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} if the defaults don't suit you", self.output);
                println!("  2. Validate configuration: dentaldesk validate-config");
                println!("  3. Sign in: dentaldesk login admin@entnt.in --password <password>");
                println!("  4. Look around: dentaldesk stats");
                println!();
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(exit_code::FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# dentaldesk configuration

[application]
log_level = "info"

[storage]
backend = "file"
path = ".dentaldesk"

[auth]
login_delay_ms = 1000

[schedule]
upcoming_window_days = 10
upcoming_limit = 10

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
local_max_size_mb = 100
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# dentaldesk configuration
#
# Every setting has a default, so any section (or the whole file) may be
# omitted. Values may reference environment variables with ${VAR}, and
# DENTALDESK_<SECTION>_<KEY> variables override the file, for example
# DENTALDESK_STORAGE_PATH=/srv/dentaldesk.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# ============================================================================
# Storage
# ============================================================================
[storage]
# Backend: "file" keeps one JSON document per key in `path`;
# "memory" keeps nothing once the process exits
backend = "file"

# Directory for the file backend (created on first use)
path = "${HOME}/.dentaldesk"

# ============================================================================
# Sign-in
# ============================================================================
[auth]
# Simulated sign-in latency in milliseconds (0-10000)
login_delay_ms = 1000

# ============================================================================
# Schedule queries
# ============================================================================
[schedule]
# Look-ahead window for upcoming appointments, in days (1-366)
upcoming_window_days = 10

# Maximum number of upcoming appointments shown
upcoming_limit = 10

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Directory for log files
local_path = "logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"

# Maximum log file size in MB
local_max_size_mb = 100
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "dentaldesk.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "dentaldesk.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config_is_valid() {
        let content = InitArgs::generate_minimal_config();
        assert!(content.contains("[storage]"));
        let config = parse_config(&content).unwrap();
        assert_eq!(config.schedule.upcoming_window_days, 10);
    }

    #[test]
    fn test_generate_config_with_examples() {
        let content = InitArgs::generate_config_with_examples();
        assert!(content.contains("# dentaldesk configuration"));
        assert!(content.contains("upcoming_limit"));
        assert!(content.contains("login_delay_ms"));
    }
}
