//! Key-value storage abstraction
//!
//! This module defines the trait that storage backends must implement to hold
//! the session and collection blobs.

use crate::domain::Result;

/// Synchronous, whole-value key-value store
///
/// Every value is read and written as a whole; there are no partial writes.
/// Implementations use interior locking so one backend can be shared by the
/// identity and record stores through an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the removal.
    fn remove(&self, key: &str) -> Result<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
