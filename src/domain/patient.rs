//! Patient domain model
//!
//! This module defines the persisted [`Patient`] record, the [`NewPatient`]
//! input used to create one, and the [`PatientPatch`] partial update.

use super::ids::PatientId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Avatar assigned to patients created through the store
pub const DEFAULT_PATIENT_AVATAR: &str = "👤";

/// A patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub dob: NaiveDate,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub health_info: String,
    pub emergency_contact: String,
    pub avatar: String,
    pub member_since: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// Case-insensitive match on name or email, case-sensitive match on contact
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.contact.contains(term)
    }

    /// Age in whole years on `today`
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.dob)
    }

    pub(crate) fn apply(&mut self, patch: PatientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(dob) = patch.dob {
            self.dob = dob;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(health_info) = patch.health_info {
            self.health_info = health_info;
        }
        if let Some(emergency_contact) = patch.emergency_contact {
            self.emergency_contact = emergency_contact;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
    }
}

/// Caller-supplied fields for a new patient
///
/// Field validation is a caller concern; the store accepts whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub dob: NaiveDate,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub health_info: String,
    #[serde(default)]
    pub emergency_contact: String,
}

impl NewPatient {
    /// Starts a new patient with the two fields every record needs
    pub fn new(name: impl Into<String>, dob: NaiveDate) -> Self {
        Self {
            name: name.into(),
            dob,
            contact: String::new(),
            email: String::new(),
            address: String::new(),
            health_info: String::new(),
            emergency_contact: String::new(),
        }
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn health_info(mut self, health_info: impl Into<String>) -> Self {
        self.health_info = health_info.into();
        self
    }

    pub fn emergency_contact(mut self, emergency_contact: impl Into<String>) -> Self {
        self.emergency_contact = emergency_contact.into();
        self
    }
}

/// Partial update for a patient; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPatch {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub health_info: Option<String>,
    pub emergency_contact: Option<String>,
    pub avatar: Option<String>,
}

impl PatientPatch {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Patient {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        Patient {
            id: PatientId::new("p1").unwrap(),
            name: "John Doe".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 5, 10).unwrap(),
            contact: "(555) 123-4567".to_string(),
            email: "john@entnt.in".to_string(),
            address: "123 Sunset Boulevard".to_string(),
            health_info: "No known allergies.".to_string(),
            emergency_contact: "Jane Doe - (555) 123-4568".to_string(),
            avatar: "👨".to_string(),
            member_since: at,
            created_at: at,
        }
    }

    #[test]
    fn test_search_matches_name_email_and_contact() {
        let patient = sample();
        assert!(patient.matches_search("JOHN"));
        assert!(patient.matches_search("entnt.IN"));
        assert!(patient.matches_search("123-45"));
        assert!(patient.matches_search(""));
        assert!(!patient.matches_search("smith"));
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut patient = sample();
        let before = patient.clone();
        patient.apply(PatientPatch {
            contact: Some("(555) 000-0000".to_string()),
            ..Default::default()
        });

        assert_eq!(patient.contact, "(555) 000-0000");
        assert_eq!(patient.name, before.name);
        assert_eq!(patient.dob, before.dob);
        assert_eq!(patient.created_at, before.created_at);
    }

    #[test]
    fn test_patient_json_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["healthInfo"], "No known allergies.");
        assert_eq!(json["dob"], "1990-05-10");
        assert!(json.get("memberSince").is_some());
    }

    #[test]
    fn test_age_on() {
        let patient = sample();
        let today = NaiveDate::from_ymd_opt(2025, 5, 9).unwrap();
        assert_eq!(patient.age_on(today), Some(34));
    }

    #[test]
    fn test_empty_patch() {
        assert!(PatientPatch::default().is_empty());
        assert!(!PatientPatch {
            name: Some("x".into()),
            ..Default::default()
        }
        .is_empty());
    }
}
