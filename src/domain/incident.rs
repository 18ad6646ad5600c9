//! Incident (appointment/treatment) domain model
//!
//! An incident is one appointment or treatment record tied to a single patient.
//! Status transitions are unconstrained: any status may follow any other.

use super::errors::DeskError;
use super::ids::{FileId, IncidentId, PatientId};
use super::result::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// All statuses in display order
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    /// Scheduled or in progress: still ahead of the patient
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::InProgress
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::InProgress => "In Progress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    /// Accepts the wire value in any case, with `-`, `_` or no separator
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "inprogress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!(
                "Invalid status '{s}'. Must be one of: Scheduled, In Progress, Completed, Cancelled"
            )),
        }
    }
}

/// Clinical priority of an incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Routine,
    Medium,
    High,
    Cosmetic,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Routine => "routine",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Cosmetic => "cosmetic",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "routine" => Ok(Priority::Routine),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "cosmetic" => Ok(Priority::Cosmetic),
            _ => Err(format!(
                "Invalid priority '{s}'. Must be one of: routine, medium, high, cosmetic"
            )),
        }
    }
}

/// A file owned by exactly one incident
///
/// `url` is a `data:` reference carrying the file's bytes, so the attachment
/// is self-contained inside the persisted incident blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: FileId,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

impl FileAttachment {
    /// Encodes `bytes` into a base64 data URL attachment
    pub fn from_bytes(
        id: FileId,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        let mime_type = mime_type.into();
        Self {
            id,
            name: name.into(),
            url: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
            mime_type,
            size: bytes.len() as u64,
        }
    }

    /// Decodes the bytes carried by the data URL
    ///
    /// # Errors
    ///
    /// Returns a validation error if `url` is not a base64 data URL.
    pub fn contents(&self) -> Result<Vec<u8>> {
        let payload = self
            .url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, payload)| payload)
            .ok_or_else(|| {
                DeskError::Validation(format!("Attachment {} is not a base64 data URL", self.id))
            })?;

        STANDARD.decode(payload).map_err(|e| {
            DeskError::Validation(format!("Attachment {} has a corrupt payload: {e}", self.id))
        })
    }

    /// Human-readable size, e.g. `1.5 KB`
    pub fn display_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// Formats a byte count with base-1024 units and at most two decimals
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// An appointment/treatment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: IncidentId,
    pub patient_id: PatientId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub comments: String,
    pub appointment_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_appointment_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub files: Vec<FileAttachment>,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Incident {
    /// Cost contribution to revenue figures (absent cost counts as zero)
    pub fn billed(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Case-insensitive substring match on title or description
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }

    /// Applies a patch; `updated_at` is stamped by the caller
    pub(crate) fn apply(&mut self, patch: IncidentPatch) {
        if let Some(patient_id) = patch.patient_id {
            self.patient_id = patient_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(comments) = patch.comments {
            self.comments = comments;
        }
        if let Some(appointment_date) = patch.appointment_date {
            self.appointment_date = appointment_date;
        }
        if let Some(next) = patch.next_appointment_date {
            self.next_appointment_date = next;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        if let Some(treatment) = patch.treatment {
            self.treatment = treatment;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(files) = patch.files {
            self.files = files;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

/// Caller-supplied fields for a new incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncident {
    pub patient_id: PatientId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
    pub appointment_date: DateTime<Utc>,
    #[serde(default)]
    pub next_appointment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub treatment: Option<String>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub files: Vec<FileAttachment>,
    /// Defaults to [`Priority::Routine`] when absent
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl NewIncident {
    /// Starts a scheduled incident for `patient_id`
    pub fn new(
        patient_id: PatientId,
        title: impl Into<String>,
        appointment_date: DateTime<Utc>,
    ) -> Self {
        Self {
            patient_id,
            title: title.into(),
            description: String::new(),
            comments: String::new(),
            appointment_date,
            next_appointment_date: None,
            cost: None,
            treatment: None,
            status: AppointmentStatus::Scheduled,
            files: Vec::new(),
            priority: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = Some(treatment.into());
        self
    }

    pub fn next_appointment_date(mut self, at: DateTime<Utc>) -> Self {
        self.next_appointment_date = Some(at);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn attach(mut self, file: FileAttachment) -> Self {
        self.files.push(file);
        self
    }
}

/// Partial update for an incident
///
/// Outer `None` leaves a field untouched. For the optional fields the inner
/// `Option` sets (`Some(Some(v))`) or clears (`Some(None)`) the value; in
/// JSON an absent key leaves the field alone and `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentPatch {
    pub patient_id: Option<PatientId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub comments: Option<String>,
    pub appointment_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "set_or_clear", skip_serializing_if = "Option::is_none")]
    pub next_appointment_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "set_or_clear", skip_serializing_if = "Option::is_none")]
    pub cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "set_or_clear", skip_serializing_if = "Option::is_none")]
    pub treatment: Option<Option<String>>,
    pub status: Option<AppointmentStatus>,
    pub files: Option<Vec<FileAttachment>>,
    pub priority: Option<Priority>,
}

impl IncidentPatch {
    /// Patch that only changes the status
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// A present field becomes `Some`, so an explicit `null` clears the value
/// while an absent field falls back to `None` through `#[serde(default)]`
fn set_or_clear<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Rejects a cost that is negative or not a finite number
pub(crate) fn validate_cost(cost: Option<f64>) -> Result<()> {
    match cost {
        Some(value) if !value.is_finite() || value < 0.0 => Err(DeskError::Validation(format!(
            "cost must be a non-negative number, got {value}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    #[test_case("Scheduled", AppointmentStatus::Scheduled)]
    #[test_case("in progress", AppointmentStatus::InProgress)]
    #[test_case("in-progress", AppointmentStatus::InProgress)]
    #[test_case("IN_PROGRESS", AppointmentStatus::InProgress)]
    #[test_case("completed", AppointmentStatus::Completed)]
    #[test_case("canceled", AppointmentStatus::Cancelled)]
    fn test_status_from_str(input: &str, expected: AppointmentStatus) {
        assert_eq!(input.parse::<AppointmentStatus>().unwrap(), expected);
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert!("done".parse::<AppointmentStatus>().is_err());
        assert!(AppointmentStatus::InProgress.is_pending());
        assert!(!AppointmentStatus::Cancelled.is_pending());
    }

    #[test]
    fn test_priority_defaults_to_routine() {
        assert_eq!(Priority::default(), Priority::Routine);
        assert_eq!(serde_json::to_string(&Priority::Cosmetic).unwrap(), "\"cosmetic\"");
    }

    #[test_case(0, "0 Bytes")]
    #[test_case(500, "500 Bytes")]
    #[test_case(1024, "1 KB")]
    #[test_case(1536, "1.5 KB")]
    #[test_case(1_048_576, "1 MB")]
    #[test_case(5 * 1024 * 1024 * 1024 * 1024, "5120 GB")]
    fn test_format_file_size(bytes: u64, expected: &str) {
        assert_eq!(format_file_size(bytes), expected);
    }

    #[test]
    fn test_attachment_data_url() {
        let file = FileAttachment::from_bytes(
            FileId::new("file_1").unwrap(),
            "xray.txt",
            "text/plain",
            b"hello",
        );
        assert_eq!(file.url, "data:text/plain;base64,aGVsbG8=");
        assert_eq!(file.size, 5);
        assert_eq!(file.contents().unwrap(), b"hello");

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "text/plain");
    }

    #[test]
    fn test_attachment_rejects_foreign_url() {
        let mut file = FileAttachment::from_bytes(
            FileId::new("file_2").unwrap(),
            "scan.png",
            "image/png",
            &[1, 2, 3],
        );
        file.url = "https://example.com/scan.png".to_string();
        assert!(matches!(file.contents(), Err(DeskError::Validation(_))));
    }

    fn filling(at: DateTime<Utc>) -> Incident {
        Incident {
            id: IncidentId::new("i2").unwrap(),
            patient_id: PatientId::new("p1").unwrap(),
            title: "Filling".to_string(),
            description: "Replace filling".to_string(),
            comments: String::new(),
            appointment_date: at,
            next_appointment_date: Some(at),
            cost: Some(120.0),
            treatment: None,
            status: AppointmentStatus::Scheduled,
            files: vec![],
            priority: Priority::Medium,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_apply_patch_can_clear_optional_fields() {
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 14, 0, 0).unwrap();
        let mut incident = filling(at);

        incident.apply(IncidentPatch {
            cost: Some(None),
            next_appointment_date: Some(None),
            status: Some(AppointmentStatus::Completed),
            ..Default::default()
        });

        assert_eq!(incident.cost, None);
        assert_eq!(incident.next_appointment_date, None);
        assert_eq!(incident.status, AppointmentStatus::Completed);
        assert_eq!(incident.title, "Filling");
        assert_eq!(incident.priority, Priority::Medium);
    }

    #[test]
    fn test_validate_cost() {
        assert!(validate_cost(None).is_ok());
        assert!(validate_cost(Some(0.0)).is_ok());
        assert!(validate_cost(Some(-1.0)).is_err());
        assert!(validate_cost(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_patch_json_distinguishes_null_from_absent() {
        let patch: IncidentPatch =
            serde_json::from_str(r#"{"cost": null, "treatment": "Root canal"}"#).unwrap();
        assert_eq!(patch.cost, Some(None));
        assert_eq!(patch.treatment, Some(Some("Root canal".to_string())));
        assert_eq!(patch.next_appointment_date, None);

        let mut incident = filling(Utc.with_ymd_and_hms(2025, 1, 15, 14, 0, 0).unwrap());
        incident.apply(patch.clone());
        assert_eq!(incident.cost, None);
        assert_eq!(incident.treatment.as_deref(), Some("Root canal"));

        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(serde_json::from_str::<IncidentPatch>(&json).unwrap(), patch);
    }
}
