//! Domain error types
//!
//! This module defines the error hierarchy for dentaldesk.
//! All errors are domain-specific and don't expose third-party types.
//!
//! Note that the record layer treats a missing id as a silent no-op and the
//! identity layer reports bad credentials as `false`, so neither appears here.

use thiserror::Error;

/// Main dentaldesk error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Key-value backend errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Rejected input (unknown patient reference, negative cost, malformed id)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Key-value backend errors
///
/// Errors raised by a [`KeyValueStore`](crate::adapters::storage::KeyValueStore)
/// implementation. Only write paths and backend construction can produce these.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend location could not be created or opened
    #[error("Failed to open storage at {path}: {message}")]
    OpenFailed { path: String, message: String },

    /// A value could not be read
    #[error("Failed to read key '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// A value could not be written
    #[error("Failed to write key '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// A value could not be removed
    #[error("Failed to remove key '{key}': {message}")]
    RemoveFailed { key: String, message: String },

    /// Key contains characters the backend cannot store
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Internal lock was poisoned by a panicking writer
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

// Conversion from std::io::Error
impl From<std::io::Error> for DeskError {
    fn from(err: std::io::Error) -> Self {
        DeskError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for DeskError {
    fn from(err: serde_json::Error) -> Self {
        DeskError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for DeskError {
    fn from(err: toml::de::Error) -> Self {
        DeskError::Configuration(format!("TOML parse error: {err}"))
    }
}
