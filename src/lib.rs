// dentaldesk - Dental practice records
// Copyright (c) 2025 dentaldesk Contributors
// Licensed under the MIT License

//! # dentaldesk - Dental practice records
//!
//! dentaldesk is the data layer of a single-practice dental management
//! application: who is signed in, the patient and appointment records, the
//! figures on the practice dashboard, and the date-driven appointment queries.
//!
//! ## Overview
//!
//! This library provides:
//! - **Identity**: a fixed account roster, a persisted session and view access rules
//! - **Records**: patients and incidents (appointments/treatments) with cascade delete,
//!   seeded on first use and restored from the configured backend afterwards
//! - **Statistics**: totals and monthly/weekly revenue, recomputed on every incident change
//! - **Queries**: upcoming window, day view, search/status filter, history split, calendar grid
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (identity, records, statistics, queries)
//! - [`adapters`] - Key-value storage backends (file, memory)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dentaldesk::adapters::storage::create_key_value_store;
//! use dentaldesk::config::load_config_or_default;
//! use dentaldesk::core::clock::SystemClock;
//! use dentaldesk::core::identity::{IdentityStore, Roster};
//! use dentaldesk::core::records::RecordStore;
//! use dentaldesk::domain::TimestampIdGenerator;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("dentaldesk.toml")?;
//!     let storage = create_key_value_store(&config.storage)?;
//!
//!     let mut identity = IdentityStore::restore(
//!         storage.clone(),
//!         Roster::builtin(),
//!         Duration::from_millis(config.auth.login_delay_ms),
//!     )?;
//!     identity.login("admin@entnt.in", "admin123").await?;
//!
//!     let records = RecordStore::load(
//!         storage,
//!         Arc::new(SystemClock),
//!         Arc::new(TimestampIdGenerator::new()),
//!     )?;
//!     println!("{:?}", records.dashboard_stats());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], whose error is [`domain::DeskError`].
//! A missing record id is not an error: updates return `Ok(None)` and deletes
//! return `Ok(false)`. Rejected credentials are `Ok(false)` from `login`.
//!
//! ## Logging
//!
//! dentaldesk logs with `tracing`; install a subscriber with
//! [`logging::init_logging`] or your own.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
