//! Patient and incident collections
//!
//! [`RecordStore`] owns both collections, mirrors each one to the key-value
//! backend as a whole JSON array after every mutation, and keeps
//! [`DashboardStats`] current.
//!
//! In-memory state only changes after the backend accepted the write, so a
//! failed write leaves the store as it was.

use super::seed::{seed_incidents, seed_patients};
use crate::adapters::storage::KeyValueStore;
use crate::core::clock::Clock;
use crate::core::stats::{DashboardStats, PatientSummary};
use crate::domain::incident::validate_cost;
use crate::domain::{
    DeskError, IdGenerator, Incident, IncidentId, IncidentPatch, NewIncident, NewPatient, Patient,
    PatientId, PatientPatch, Result, DEFAULT_PATIENT_AVATAR,
};
use crate::{log_record_mutation, log_store_loaded};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Backend key holding the patient collection
pub const PATIENTS_KEY: &str = "dental_patients";

/// Backend key holding the incident collection
pub const INCIDENTS_KEY: &str = "dental_incidents";

/// Owner of the patient and incident collections
pub struct RecordStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    patients: Vec<Patient>,
    incidents: Vec<Incident>,
    stats: DashboardStats,
}

impl RecordStore {
    /// Loads both collections from the backend
    ///
    /// A collection that is absent is replaced by the built-in seed and the
    /// seed is persisted right away. A collection that fails to parse is
    /// treated the same way, with a warning. Incidents that reference a
    /// patient that no longer exists are dropped and the incident
    /// collection is re-persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the seed cannot be
    /// written.
    pub fn load(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self> {
        let patients: Vec<Patient> = load_collection(storage.as_ref(), PATIENTS_KEY, seed_patients)?;
        let mut incidents: Vec<Incident> =
            load_collection(storage.as_ref(), INCIDENTS_KEY, seed_incidents)?;

        let known: HashSet<&PatientId> = patients.iter().map(|p| &p.id).collect();
        let before = incidents.len();
        incidents.retain(|i| known.contains(&i.patient_id));
        if incidents.len() != before {
            tracing::warn!(
                dropped = before - incidents.len(),
                "Dropping incidents that reference missing patients"
            );
            write_collection(storage.as_ref(), INCIDENTS_KEY, &incidents)?;
        }

        log_store_loaded!(patients.len(), incidents.len(), storage.backend_name());

        let stats = DashboardStats::compute(&patients, &incidents, clock.local_now());
        Ok(Self {
            storage,
            clock,
            ids,
            patients,
            incidents,
            stats,
        })
    }

    // Patients

    /// Creates a patient with a fresh id, the default avatar and both
    /// timestamps set to now
    ///
    /// # Errors
    ///
    /// Returns an error if the patient collection cannot be persisted.
    pub fn add_patient(&mut self, fields: NewPatient) -> Result<Patient> {
        let now = self.clock.now();
        let patient = Patient {
            id: self.ids.patient_id(),
            name: fields.name,
            dob: fields.dob,
            contact: fields.contact,
            email: fields.email,
            address: fields.address,
            health_info: fields.health_info,
            emergency_contact: fields.emergency_contact,
            avatar: DEFAULT_PATIENT_AVATAR.to_string(),
            member_since: now,
            created_at: now,
        };

        let mut next = self.patients.clone();
        next.push(patient.clone());
        self.commit_patients(next)?;

        log_record_mutation!("add", "patient", patient.id);
        Ok(patient)
    }

    /// Merges `patch` into the patient with `id`
    ///
    /// Returns `Ok(None)` without writing anything when no patient has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the patient collection cannot be persisted.
    pub fn update_patient(&mut self, id: &PatientId, patch: PatientPatch) -> Result<Option<Patient>> {
        let Some(index) = self.patients.iter().position(|p| &p.id == id) else {
            tracing::debug!(patient_id = %id, "Update ignored, no such patient");
            return Ok(None);
        };

        let mut next = self.patients.clone();
        next[index].apply(patch);
        let updated = next[index].clone();
        self.commit_patients(next)?;

        log_record_mutation!("update", "patient", id);
        Ok(Some(updated))
    }

    /// Removes the patient with `id` together with all of their incidents
    ///
    /// The incident collection is written first, so the persisted data never
    /// holds incidents for a patient that is already gone. Returns `Ok(false)`
    /// without writing anything when no patient has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if either collection cannot be persisted. If the
    /// patient write fails after the incident write succeeded, the incidents
    /// stay removed and the patient remains.
    pub fn delete_patient(&mut self, id: &PatientId) -> Result<bool> {
        if !self.patients.iter().any(|p| &p.id == id) {
            tracing::debug!(patient_id = %id, "Delete ignored, no such patient");
            return Ok(false);
        }

        let remaining: Vec<Incident> = self
            .incidents
            .iter()
            .filter(|i| &i.patient_id != id)
            .cloned()
            .collect();
        let removed = self.incidents.len() - remaining.len();
        if removed > 0 {
            self.commit_incidents(remaining)?;
            self.recompute_stats();
        }

        let patients: Vec<Patient> = self
            .patients
            .iter()
            .filter(|p| &p.id != id)
            .cloned()
            .collect();
        self.commit_patients(patients)?;
        self.recompute_stats();

        tracing::info!(
            patient_id = %id,
            incidents_removed = removed,
            "Deleted patient and their incidents"
        );
        Ok(true)
    }

    // Incidents

    /// Creates an incident with a fresh id; priority defaults to routine
    ///
    /// # Errors
    ///
    /// Returns a validation error if the patient does not exist or the cost
    /// is negative, and a storage error if the collection cannot be persisted.
    pub fn add_incident(&mut self, fields: NewIncident) -> Result<Incident> {
        self.ensure_patient(&fields.patient_id)?;
        validate_cost(fields.cost)?;

        let now = self.clock.now();
        let incident = Incident {
            id: self.ids.incident_id(),
            patient_id: fields.patient_id,
            title: fields.title,
            description: fields.description,
            comments: fields.comments,
            appointment_date: fields.appointment_date,
            next_appointment_date: fields.next_appointment_date,
            cost: fields.cost,
            treatment: fields.treatment,
            status: fields.status,
            files: fields.files,
            priority: fields.priority.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let mut next = self.incidents.clone();
        next.push(incident.clone());
        self.commit_incidents(next)?;
        self.recompute_stats();

        log_record_mutation!("add", "incident", incident.id);
        Ok(incident)
    }

    /// Merges `patch` into the incident with `id` and stamps `updated_at`
    ///
    /// `updated_at` is refreshed even when the patch is empty. Returns
    /// `Ok(None)` without writing anything when no incident has that id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the patch moves the incident to an
    /// unknown patient or sets a negative cost, and a storage error if the
    /// collection cannot be persisted.
    pub fn update_incident(
        &mut self,
        id: &IncidentId,
        patch: IncidentPatch,
    ) -> Result<Option<Incident>> {
        let Some(index) = self.incidents.iter().position(|i| &i.id == id) else {
            tracing::debug!(incident_id = %id, "Update ignored, no such incident");
            return Ok(None);
        };
        if let Some(patient_id) = &patch.patient_id {
            self.ensure_patient(patient_id)?;
        }
        if let Some(cost) = patch.cost {
            validate_cost(cost)?;
        }

        let mut next = self.incidents.clone();
        next[index].apply(patch);
        next[index].updated_at = self.clock.now();
        let updated = next[index].clone();
        self.commit_incidents(next)?;
        self.recompute_stats();

        log_record_mutation!("update", "incident", id);
        Ok(Some(updated))
    }

    /// Removes the incident with `id`
    ///
    /// Returns `Ok(false)` without writing anything when no incident has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the incident collection cannot be persisted.
    pub fn delete_incident(&mut self, id: &IncidentId) -> Result<bool> {
        if !self.incidents.iter().any(|i| &i.id == id) {
            tracing::debug!(incident_id = %id, "Delete ignored, no such incident");
            return Ok(false);
        }

        let next: Vec<Incident> = self
            .incidents
            .iter()
            .filter(|i| &i.id != id)
            .cloned()
            .collect();
        self.commit_incidents(next)?;
        self.recompute_stats();

        log_record_mutation!("delete", "incident", id);
        Ok(true)
    }

    /// Incidents belonging to `patient_id`, in store order
    pub fn patient_incidents(&self, patient_id: &PatientId) -> Vec<&Incident> {
        self.incidents
            .iter()
            .filter(|i| &i.patient_id == patient_id)
            .collect()
    }

    /// Treatment summary for one patient
    pub fn patient_summary(&self, patient_id: &PatientId) -> PatientSummary {
        PatientSummary::compute(self.patient_incidents(patient_id))
    }

    /// Patients whose name or email contains `term` ignoring case, or whose
    /// contact contains it exactly
    pub fn search_patients(&self, term: &str) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|p| p.matches_search(term))
            .collect()
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn patient(&self, id: &PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| &p.id == id)
    }

    pub fn incident(&self, id: &IncidentId) -> Option<&Incident> {
        self.incidents.iter().find(|i| &i.id == id)
    }

    /// Figures as of the last incident change
    pub fn dashboard_stats(&self) -> &DashboardStats {
        &self.stats
    }

    /// Recomputes the dashboard figures against the current clock
    pub fn recompute_stats(&mut self) {
        self.stats = DashboardStats::compute(&self.patients, &self.incidents, self.clock.local_now());
    }

    fn ensure_patient(&self, id: &PatientId) -> Result<()> {
        if self.patient(id).is_some() {
            Ok(())
        } else {
            Err(DeskError::Validation(format!("Unknown patient '{id}'")))
        }
    }

    fn commit_patients(&mut self, next: Vec<Patient>) -> Result<()> {
        write_collection(self.storage.as_ref(), PATIENTS_KEY, &next)?;
        self.patients = next;
        Ok(())
    }

    fn commit_incidents(&mut self, next: Vec<Incident>) -> Result<()> {
        write_collection(self.storage.as_ref(), INCIDENTS_KEY, &next)?;
        self.incidents = next;
        Ok(())
    }
}

fn load_collection<T>(
    storage: &dyn KeyValueStore,
    key: &str,
    seed: fn() -> Result<Vec<T>>,
) -> Result<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    match storage.get(key)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored collection is corrupt, restoring seed data");
                let items = seed()?;
                write_collection(storage, key, &items)?;
                Ok(items)
            }
        },
        None => {
            let items = seed()?;
            write_collection(storage, key, &items)?;
            tracing::info!(key, count = items.len(), "Seeded empty collection");
            Ok(items)
        }
    }
}

fn write_collection<T: Serialize>(storage: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    storage.set(key, &raw)
}
