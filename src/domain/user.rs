//! Signed-in user model

use super::ids::{PatientId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Practice staff, full access
    Admin,
    /// A patient, restricted to their own records
    Patient,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "Admin"),
            UserRole::Patient => write!(f, "Patient"),
        }
    }
}

/// A roster account as held by the session (never carries a password)
///
/// Serialized with camelCase keys; this is the exact shape of the persisted
/// session blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub role: UserRole,
    pub email: String,
    pub name: String,
    pub avatar: String,

    /// Linked patient record, Patient role only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<PatientId>,

    /// Clinical specialty, Admin role only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: UserId::new("2").unwrap(),
            role: UserRole::Patient,
            email: "john@entnt.in".to_string(),
            name: "John Doe".to_string(),
            avatar: "👨".to_string(),
            patient_id: Some(PatientId::new("p1").unwrap()),
            specialty: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "Patient");
        assert_eq!(json["patientId"], "p1");
        assert!(json.get("specialty").is_none());
        assert!(json.get("password").is_none());
        assert!(!user.is_admin());
    }
}
