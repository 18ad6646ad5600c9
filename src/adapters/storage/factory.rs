//! Storage backend factory
//!
//! This module provides the factory function that creates a key-value backend
//! based on configuration.

use super::file::FileStore;
use super::memory::MemoryStore;
use super::traits::KeyValueStore;
use crate::config::schema::{StorageBackend, StorageConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create a key-value backend based on the configuration
///
/// # Errors
///
/// Returns an error if the file backend's directory cannot be created.
pub fn create_key_value_store(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.backend {
        StorageBackend::File => {
            tracing::info!(path = %config.path, "Creating file storage backend");
            Ok(Arc::new(FileStore::open(&config.path)?) as Arc<dyn KeyValueStore>)
        }
        StorageBackend::Memory => {
            tracing::info!("Creating in-memory storage backend");
            Ok(Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>)
        }
    }
}
