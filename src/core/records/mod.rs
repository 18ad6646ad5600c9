//! Patient and incident records
//!
//! This module provides the [`RecordStore`] and the built-in seed dataset it
//! falls back to when the backend holds no collections.

pub mod seed;
pub mod store;

pub use seed::{seed_incidents, seed_patients};
pub use store::{RecordStore, INCIDENTS_KEY, PATIENTS_KEY};
