//! External integrations for dentaldesk.
//!
//! - [`storage`] - Key-value persistence backends (in-memory, directory of JSON files)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate persistence from the
//! record and identity stores and to allow testing against an in-memory backend.
//!
//! ```rust,no_run
//! use dentaldesk::adapters::storage::{FileStore, KeyValueStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileStore::open(".dentaldesk")?;
//! store.set("dental_user", "{}")?;
//! # Ok(())
//! # }
//! ```

pub mod storage;
