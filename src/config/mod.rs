//! Configuration management for dentaldesk.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! dentaldesk uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `DENTALDESK_*` environment overrides
//! - Default values for every setting
//! - Per-section validation
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`StorageConfig`] - Key-value backend (file or memory) and its directory
//! - [`AuthConfig`] - Simulated sign-in latency
//! - [`ScheduleConfig`] - Upcoming-appointments window and result cap
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! backend = "file"
//! path = "${HOME}/.dentaldesk"
//!
//! [auth]
//! login_delay_ms = 1000
//!
//! [schedule]
//! upcoming_window_days = 10
//! upcoming_limit = 10
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use dentaldesk::config::load_config;
//!
//! # fn example() {
//! match load_config("dentaldesk.toml") {
//!     Ok(_config) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, AuthConfig, DeskConfig, LoggingConfig, ScheduleConfig, StorageBackend,
    StorageConfig,
};
pub use secret::{secret_matches, secret_string, SecretString, SecretValue};
