//! Domain identifier types and id generation
//!
//! This module provides newtype wrappers for record identifiers so a patient id
//! can never be passed where an incident id is expected, and the [`IdGenerator`]
//! seam used by the record store to mint new ids.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub(crate) String);

        impl $name {
            /// Creates a new identifier, rejecting blank input
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

record_id!(
    /// Identifier of a roster account
    UserId,
    "User ID"
);

record_id!(
    /// Identifier of a patient record
    ///
    /// ```
    /// use dentaldesk::domain::ids::PatientId;
    /// use std::str::FromStr;
    ///
    /// let id = PatientId::from_str("p1").unwrap();
    /// assert_eq!(id.as_str(), "p1");
    /// ```
    PatientId,
    "Patient ID"
);

record_id!(
    /// Identifier of an incident (appointment/treatment) record
    IncidentId,
    "Incident ID"
);

record_id!(
    /// Identifier of a file attached to an incident
    FileId,
    "File ID"
);

/// Source of fresh record identifiers
///
/// Implementations must never hand out the same id twice within a session.
pub trait IdGenerator: Send + Sync {
    /// Returns a new id starting with `prefix`
    fn next_id(&self, prefix: &str) -> String;

    /// Mints a patient id
    fn patient_id(&self) -> PatientId {
        PatientId(self.next_id("p"))
    }

    /// Mints an incident id
    fn incident_id(&self) -> IncidentId {
        IncidentId(self.next_id("i"))
    }

    /// Mints an attachment id
    fn file_id(&self) -> FileId {
        FileId(self.next_id("file_"))
    }
}

/// Default generator: `<prefix><unix millis>-<sequence>-<8 hex random>`
///
/// The per-generator sequence keeps two calls in the same millisecond apart;
/// the random tail keeps ids from separate processes apart.
#[derive(Debug, Default)]
pub struct TimestampIdGenerator {
    sequence: AtomicU64,
}

impl TimestampIdGenerator {
    /// Creates a generator with its sequence at zero
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let entropy = Uuid::new_v4().simple().to_string();
        format!(
            "{}{}-{}-{}",
            prefix,
            Utc::now().timestamp_millis(),
            seq,
            &entropy[..8]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_patient_id_creation() {
        let id = PatientId::new("p1").unwrap();
        assert_eq!(id.as_str(), "p1");
        assert_eq!(id.to_string(), "p1");
    }

    #[test]
    fn test_empty_ids_fail() {
        assert!(PatientId::new("").is_err());
        assert!(IncidentId::new("   ").is_err());
        assert_eq!(UserId::new("").unwrap_err(), "User ID cannot be empty");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = IncidentId::new("i4").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"i4\"");
        let back: IncidentId = serde_json::from_str("\"i4\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_generator_prefixes() {
        let generator = TimestampIdGenerator::new();
        assert!(generator.patient_id().as_str().starts_with('p'));
        assert!(generator.incident_id().as_str().starts_with('i'));
        assert!(generator.file_id().as_str().starts_with("file_"));
    }

    #[test]
    fn test_generator_never_repeats_in_tight_loop() {
        let generator = TimestampIdGenerator::new();
        let ids: HashSet<String> = (0..5_000).map(|_| generator.next_id("p")).collect();
        assert_eq!(ids.len(), 5_000);
    }
}
