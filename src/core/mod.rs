//! Core business logic for dentaldesk.
//!
//! # Modules
//!
//! - [`clock`] - Wall-clock seam used for timestamps and calendar periods
//! - [`identity`] - Sign-in, session persistence and view access rules
//! - [`records`] - Patient and incident collections with seed-or-restore loading
//! - [`stats`] - Dashboard statistics derived from the collections
//! - [`query`] - Read-only projections (upcoming window, day, search, history, calendar)
//!
//! # Example
//!
//! ```rust
//! use dentaldesk::adapters::storage::{KeyValueStore, MemoryStore};
//! use dentaldesk::core::clock::SystemClock;
//! use dentaldesk::core::query::{upcoming_appointments, UpcomingWindow};
//! use dentaldesk::core::records::RecordStore;
//! use dentaldesk::domain::TimestampIdGenerator;
//! use std::sync::Arc;
//!
//! # fn example() -> dentaldesk::domain::Result<()> {
//! let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
//! let store = RecordStore::load(
//!     storage,
//!     Arc::new(SystemClock),
//!     Arc::new(TimestampIdGenerator::new()),
//! )?;
//!
//! println!("{} patients", store.dashboard_stats().total_patients);
//! let next = upcoming_appointments(
//!     store.incidents(),
//!     chrono::Utc::now(),
//!     UpcomingWindow::default(),
//!     None,
//! );
//! println!("{} upcoming", next.len());
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod identity;
pub mod query;
pub mod records;
pub mod stats;
