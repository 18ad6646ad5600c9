//! Built-in dataset written on first load

use crate::domain::{DeskError, Incident, Patient, Result};

const SEED_PATIENTS: &str = r#"[
  {
    "id": "p1",
    "name": "John Doe",
    "dob": "1990-05-10",
    "contact": "(555) 123-4567",
    "email": "john@entnt.in",
    "address": "123 Sunset Boulevard, Los Angeles, CA 90028",
    "healthInfo": "No known allergies. Previous root canal treatment in 2022. Regular coffee drinker.",
    "emergencyContact": "Jane Doe - (555) 123-4568",
    "avatar": "👨",
    "memberSince": "2024-01-15T10:00:00Z",
    "createdAt": "2024-01-15T10:00:00Z"
  },
  {
    "id": "p2",
    "name": "Jane Smith",
    "dob": "1985-08-22",
    "contact": "(555) 987-6543",
    "email": "jane@entnt.in",
    "address": "456 Ocean Drive, Miami Beach, FL 33139",
    "healthInfo": "Allergic to penicillin. Regular cleanings every 6 months. Sensitive teeth.",
    "emergencyContact": "Mike Smith - (555) 987-6544",
    "avatar": "👩",
    "memberSince": "2024-02-01T14:30:00Z",
    "createdAt": "2024-02-01T14:30:00Z"
  },
  {
    "id": "p3",
    "name": "Robert Johnson",
    "dob": "1978-12-03",
    "contact": "(555) 456-7890",
    "email": "robert.johnson@email.com",
    "address": "789 Broadway, New York, NY 10003",
    "healthInfo": "Diabetes type 2. Takes medication for blood pressure. History of gum disease.",
    "emergencyContact": "Mary Johnson - (555) 456-7891",
    "avatar": "👨‍💼",
    "memberSince": "2024-01-20T09:15:00Z",
    "createdAt": "2024-01-20T09:15:00Z"
  }
]"#;

const SEED_INCIDENTS: &str = r#"[
  {
    "id": "i1",
    "patientId": "p1",
    "title": "Routine Cleaning & Checkup",
    "description": "Comprehensive dental cleaning and oral health examination",
    "comments": "Patient reports no pain or sensitivity. Excellent oral hygiene.",
    "appointmentDate": "2024-12-20T10:00:00Z",
    "cost": 150,
    "treatment": "Professional cleaning, fluoride treatment, oral health assessment",
    "status": "Completed",
    "nextAppointmentDate": "2025-06-20T10:00:00Z",
    "files": [],
    "priority": "routine",
    "createdAt": "2024-12-15T08:00:00Z",
    "updatedAt": "2024-12-20T11:00:00Z"
  },
  {
    "id": "i2",
    "patientId": "p1",
    "title": "Composite Filling Replacement",
    "description": "Replace old amalgam filling with modern composite material",
    "comments": "Old filling showing signs of wear and minor decay detected",
    "appointmentDate": "2025-01-15T14:00:00Z",
    "status": "Scheduled",
    "files": [],
    "priority": "medium",
    "createdAt": "2024-12-18T10:00:00Z",
    "updatedAt": "2024-12-18T10:00:00Z"
  },
  {
    "id": "i3",
    "patientId": "p2",
    "title": "Professional Teeth Whitening",
    "description": "In-office professional teeth whitening treatment",
    "comments": "Patient interested in cosmetic improvement for upcoming wedding",
    "appointmentDate": "2025-01-10T11:00:00Z",
    "cost": 350,
    "treatment": "Professional whitening gel application with LED activation",
    "status": "Completed",
    "files": [],
    "priority": "cosmetic",
    "createdAt": "2024-12-10T13:00:00Z",
    "updatedAt": "2025-01-10T12:30:00Z"
  },
  {
    "id": "i4",
    "patientId": "p3",
    "title": "Ceramic Crown Installation",
    "description": "Custom ceramic crown placement for damaged molar",
    "comments": "Temporary crown placed, permanent crown ready for installation",
    "appointmentDate": "2025-01-25T09:00:00Z",
    "status": "Scheduled",
    "files": [],
    "priority": "high",
    "createdAt": "2024-12-20T15:00:00Z",
    "updatedAt": "2024-12-20T15:00:00Z"
  }
]"#;

/// The three seed patients (p1..p3)
pub fn seed_patients() -> Result<Vec<Patient>> {
    serde_json::from_str(SEED_PATIENTS)
        .map_err(|e| DeskError::Serialization(format!("Invalid patient seed data: {e}")))
}

/// The four seed incidents (i1..i4)
pub fn seed_incidents() -> Result<Vec<Incident>> {
    serde_json::from_str(SEED_INCIDENTS)
        .map_err(|e| DeskError::Serialization(format!("Invalid incident seed data: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppointmentStatus, Priority};

    #[test]
    fn test_seed_parses() {
        let patients = seed_patients().unwrap();
        let incidents = seed_incidents().unwrap();
        assert_eq!(patients.len(), 3);
        assert_eq!(incidents.len(), 4);
        assert_eq!(patients[2].name, "Robert Johnson");
        assert_eq!(incidents[0].cost, Some(150.0));
        assert_eq!(incidents[3].priority, Priority::High);
        assert_eq!(incidents[1].status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_seed_incidents_reference_seed_patients() {
        let patients = seed_patients().unwrap();
        for incident in seed_incidents().unwrap() {
            assert!(patients.iter().any(|p| p.id == incident.patient_id));
        }
    }
}
