//! appointments command: manage incidents and run the appointment queries

use super::context::{display_time, parse_date, parse_datetime, report_failure, CommandContext};
use crate::cli::exit_code;
use crate::core::identity::View;
use crate::core::query::{
    appointments_on, filter_incidents, history_filter, partition_history, upcoming_appointments,
    IncidentFilter, StatusFilter,
};
use crate::core::records::RecordStore;
use crate::domain::{
    AppointmentStatus, FileAttachment, IdGenerator, Incident, IncidentId, IncidentPatch,
    NewIncident, PatientId, Priority, TimestampIdGenerator,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Appointment subcommands
#[derive(Subcommand, Debug)]
pub enum AppointmentsCommand {
    /// List appointments, filtered by text and status (admin)
    List(ListArgs),
    /// Book a new appointment (admin)
    Add(AddArgs),
    /// Change an appointment (admin)
    Update(UpdateArgs),
    /// Delete an appointment (admin)
    Remove(RemoveArgs),
    /// Pending appointments in the look-ahead window
    Upcoming(UpcomingArgs),
    /// Pending appointments on one day (admin)
    Day(DayArgs),
    /// One patient's appointments split into upcoming and past
    History(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Matches title, description or patient name
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// all, Scheduled, "In Progress", Completed or Cancelled
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub patient: String,
    #[arg(long)]
    pub title: String,
    /// Appointment time (RFC 3339 or 'YYYY-MM-DD HH:MM' local)
    #[arg(long, value_parser = parse_datetime)]
    pub date: DateTime<Utc>,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub comments: String,
    #[arg(long)]
    pub cost: Option<f64>,
    #[arg(long)]
    pub treatment: Option<String>,
    #[arg(long, default_value = "Scheduled")]
    pub status: AppointmentStatus,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long, value_parser = parse_datetime)]
    pub next_date: Option<DateTime<Utc>>,
    /// File to attach (repeatable)
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Appointment id
    pub id: String,
    /// Move the appointment to another patient
    #[arg(long)]
    pub patient: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, value_parser = parse_datetime)]
    pub date: Option<DateTime<Utc>>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub comments: Option<String>,
    #[arg(long, conflicts_with = "clear_cost")]
    pub cost: Option<f64>,
    #[arg(long)]
    pub clear_cost: bool,
    #[arg(long, conflicts_with = "clear_treatment")]
    pub treatment: Option<String>,
    #[arg(long)]
    pub clear_treatment: bool,
    #[arg(long)]
    pub status: Option<AppointmentStatus>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long, value_parser = parse_datetime, conflicts_with = "clear_next_date")]
    pub next_date: Option<DateTime<Utc>>,
    #[arg(long)]
    pub clear_next_date: bool,
    /// File to attach in addition to the existing ones (repeatable)
    #[arg(long = "attach")]
    pub attachments: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Appointment id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct UpcomingArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DayArgs {
    /// Calendar date (YYYY-MM-DD)
    #[arg(value_parser = parse_date)]
    pub date: NaiveDate,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Patient id (staff only; patients always see their own)
    #[arg(long)]
    pub patient: Option<String>,

    #[arg(long, default_value = "all")]
    pub status: StatusFilter,
}

impl AppointmentsCommand {
    fn view(&self) -> View {
        match self {
            AppointmentsCommand::Upcoming(_) => View::Dashboard,
            AppointmentsCommand::History(_) => View::MyAppointments,
            AppointmentsCommand::Day(_) => View::Calendar,
            _ => View::Appointments,
        }
    }

    /// Execute the appointments command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::open(config_path) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        let user = match ctx.require(self.view()) {
            Ok(user) => user,
            Err(code) => return Ok(code),
        };
        let mut records = match ctx.records() {
            Ok(records) => records,
            Err(code) => return Ok(code),
        };
        match self {
            AppointmentsCommand::List(args) => {
                let filter = IncidentFilter::new(&args.search, args.status);
                let found = filter_incidents(records.incidents(), records.patients(), &filter);
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&found)?);
                } else {
                    print_table(&records, &found);
                }
                Ok(exit_code::SUCCESS)
            }
            AppointmentsCommand::Add(args) => {
                let patient_id = PatientId::new(&args.patient).map_err(anyhow::Error::msg)?;
                let mut fields = NewIncident::new(patient_id, &args.title, args.date)
                    .description(&args.description)
                    .comments(&args.comments)
                    .status(args.status);
                fields.cost = args.cost;
                fields.treatment = args.treatment.clone();
                fields.priority = args.priority;
                fields.next_appointment_date = args.next_date;
                fields.files = read_attachments(&args.attachments)?;

                match records.add_incident(fields) {
                    Ok(incident) => {
                        println!("✅ Booked {} ({})", incident.title, incident.id);
                        println!("   When: {}", display_time(incident.appointment_date, &Local));
                        Ok(exit_code::SUCCESS)
                    }
                    Err(e) => Ok(report_failure(&e, "Failed to add appointment")),
                }
            }
            AppointmentsCommand::Update(args) => {
                let id = IncidentId::new(&args.id).map_err(anyhow::Error::msg)?;
                let Some(existing) = records.incident(&id) else {
                    println!("No appointment with id {id}; nothing changed.");
                    return Ok(exit_code::SUCCESS);
                };
                let patch = args.patch(existing)?;

                match records.update_incident(&id, patch) {
                    Ok(Some(incident)) => {
                        println!("✅ Updated {} ({})", incident.title, incident.id);
                        println!("   Status: {}", incident.status);
                        Ok(exit_code::SUCCESS)
                    }
                    Ok(None) => {
                        println!("No appointment with id {id}; nothing changed.");
                        Ok(exit_code::SUCCESS)
                    }
                    Err(e) => Ok(report_failure(&e, "Failed to update appointment")),
                }
            }
            AppointmentsCommand::Remove(args) => {
                let id = IncidentId::new(&args.id).map_err(anyhow::Error::msg)?;
                match records.delete_incident(&id) {
                    Ok(true) => {
                        println!("🗑️  Removed appointment {id}");
                        Ok(exit_code::SUCCESS)
                    }
                    Ok(false) => {
                        println!("No appointment with id {id}; nothing changed.");
                        Ok(exit_code::SUCCESS)
                    }
                    Err(e) => Ok(report_failure(&e, "Failed to remove appointment")),
                }
            }
            AppointmentsCommand::Upcoming(args) => {
                let scope = if user.is_admin() {
                    None
                } else {
                    user.patient_id.as_ref()
                };
                let window = ctx.window();
                let found = upcoming_appointments(records.incidents(), ctx.now(), window, scope);
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&found)?);
                } else {
                    println!("📅 Next {} day(s)", window.days);
                    print_table(&records, &found);
                }
                Ok(exit_code::SUCCESS)
            }
            AppointmentsCommand::Day(args) => {
                let found = appointments_on(records.incidents(), args.date, &Local);
                println!("📅 {}", args.date.format("%A, %B %-d, %Y"));
                print_table(&records, &found);
                Ok(exit_code::SUCCESS)
            }
            AppointmentsCommand::History(args) => {
                let patient_id = match (user.is_admin(), &args.patient, &user.patient_id) {
                    (true, Some(id), _) => PatientId::new(id).map_err(anyhow::Error::msg)?,
                    (true, None, _) => {
                        println!("❌ Staff must choose a patient with --patient");
                        return Ok(exit_code::CONFIGURATION);
                    }
                    (false, Some(id), Some(own)) if id != own.as_str() => {
                        println!("🔒 Patients can only view their own appointments.");
                        return Ok(exit_code::ACCESS_DENIED);
                    }
                    (false, _, Some(own)) => own.clone(),
                    (false, _, None) => {
                        println!("🔒 This account has no patient record.");
                        return Ok(exit_code::ACCESS_DENIED);
                    }
                };

                let mine = records.patient_incidents(&patient_id);
                let filtered = history_filter(mine, args.status);
                let history = partition_history(filtered, ctx.now());

                println!("⏭️  Upcoming ({})", history.upcoming.len());
                print_table(&records, &history.upcoming);
                println!();
                println!("⏮️  Past ({})", history.past.len());
                print_table(&records, &history.past);
                Ok(exit_code::SUCCESS)
            }
        }
    }
}

impl UpdateArgs {
    fn patch(&self, existing: &Incident) -> anyhow::Result<IncidentPatch> {
        let patient_id = match &self.patient {
            Some(id) => Some(PatientId::new(id).map_err(anyhow::Error::msg)?),
            None => None,
        };
        let files = if self.attachments.is_empty() {
            None
        } else {
            let mut files = existing.files.clone();
            files.extend(read_attachments(&self.attachments)?);
            Some(files)
        };

        Ok(IncidentPatch {
            patient_id,
            title: self.title.clone(),
            description: self.description.clone(),
            comments: self.comments.clone(),
            appointment_date: self.date,
            next_appointment_date: clearable(self.next_date, self.clear_next_date),
            cost: clearable(self.cost, self.clear_cost),
            treatment: clearable(self.treatment.clone(), self.clear_treatment),
            status: self.status,
            files,
            priority: self.priority,
        })
    }
}

fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

fn read_attachments(paths: &[PathBuf]) -> anyhow::Result<Vec<FileAttachment>> {
    let ids = TimestampIdGenerator::new();
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            Ok(FileAttachment::from_bytes(
                ids.file_id(),
                name,
                mime_type_for(path),
                &bytes,
            ))
        })
        .collect()
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

fn print_table(records: &RecordStore, incidents: &[&Incident]) {
    if incidents.is_empty() {
        println!("  No appointments.");
        return;
    }

    println!(
        "{:<24} {:<17} {:<18} {:<32} {:<12} {:>9} {:>6}",
        "ID", "When", "Patient", "Title", "Status", "Cost", "Files"
    );
    println!("{}", "-".repeat(124));
    for incident in incidents {
        let patient = records
            .patient(&incident.patient_id)
            .map(|p| p.name.as_str())
            .unwrap_or("Unknown Patient");
        let cost = incident
            .cost
            .map(|c| format!("${c:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<17} {:<18} {:<32} {:<12} {:>9} {:>6}",
            incident.id,
            display_time(incident.appointment_date, &Local),
            patient,
            incident.title,
            incident.status,
            cost,
            incident.files.len()
        );
    }
}
