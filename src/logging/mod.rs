//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - Console output on stderr
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use dentaldesk::logging::init_logging;
//! use dentaldesk::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a create, update or delete on a stored record
///
/// # Example
///
/// ```no_run
/// use dentaldesk::log_record_mutation;
/// use dentaldesk::domain::PatientId;
///
/// let id = PatientId::new("p1").unwrap();
/// log_record_mutation!("update", "patient", id);
/// ```
#[macro_export]
macro_rules! log_record_mutation {
    ($action:expr, $kind:expr, $id:expr) => {
        tracing::info!(
            action = $action,
            record = $kind,
            id = %$id,
            "Record changed"
        );
    };
}

/// Log the outcome of loading the record collections
///
/// # Example
///
/// ```no_run
/// use dentaldesk::log_store_loaded;
///
/// log_store_loaded!(3, 4, "memory");
/// ```
#[macro_export]
macro_rules! log_store_loaded {
    ($patients:expr, $incidents:expr, $backend:expr) => {
        tracing::info!(
            patients = $patients,
            incidents = $incidents,
            backend = $backend,
            "Records loaded"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use dentaldesk::log_error_with_context;
/// use dentaldesk::domain::DeskError;
///
/// let error = DeskError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
