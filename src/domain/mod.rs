//! Domain models and types for dentaldesk.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`IncidentId`], [`UserId`], [`FileId`])
//! - **Domain models** ([`User`], [`Patient`], [`Incident`], [`FileAttachment`])
//! - **Typed partial updates** ([`PatientPatch`], [`IncidentPatch`])
//! - **Error types** ([`DeskError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so ids of different records can't be mixed:
//!
//! ```rust
//! use dentaldesk::domain::{IncidentId, PatientId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let patient_id = PatientId::new("p1")?;
//! let incident_id = IncidentId::new("i1")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: PatientId = incident_id;
//! # Ok(())
//! # }
//! ```
//!
//! # Partial Updates
//!
//! Updates are expressed as patches whose `None` fields leave the record untouched:
//!
//! ```rust
//! use dentaldesk::domain::{AppointmentStatus, IncidentPatch};
//!
//! let patch = IncidentPatch {
//!     status: Some(AppointmentStatus::Completed),
//!     cost: Some(Some(150.0)),
//!     ..Default::default()
//! };
//! ```

pub mod errors;
pub mod ids;
pub mod incident;
pub mod patient;
pub mod result;
pub mod user;

// Re-export commonly used types for convenience
pub use errors::{DeskError, StorageError};
pub use ids::{FileId, IdGenerator, IncidentId, PatientId, TimestampIdGenerator, UserId};
pub use incident::{
    format_file_size, AppointmentStatus, FileAttachment, Incident, IncidentPatch, NewIncident,
    Priority,
};
pub use patient::{NewPatient, Patient, PatientPatch, DEFAULT_PATIENT_AVATAR};
pub use result::Result;
pub use user::{User, UserRole};
