//! CLI command implementations
//!
//! Each command returns the process exit code; see [`crate::cli::exit_code`].

pub mod appointments;
pub mod calendar;
pub mod context;
pub mod init;
pub mod patients;
pub mod session;
pub mod stats;
pub mod validate;
