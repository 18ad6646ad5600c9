//! patients command: list, add, update and remove patient records

use super::context::{parse_date, report_failure, CommandContext};
use crate::cli::exit_code;
use crate::core::identity::View;
use crate::domain::{NewPatient, Patient, PatientId, PatientPatch};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Patient subcommands
#[derive(Subcommand, Debug)]
pub enum PatientsCommand {
    /// List patients, optionally filtered by name, email or contact
    List(ListArgs),
    /// Register a new patient
    Add(AddArgs),
    /// Change fields of an existing patient
    Update(UpdateArgs),
    /// Remove a patient and all of their appointments
    Remove(RemoveArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub dob: NaiveDate,
    #[arg(long, default_value = "")]
    pub contact: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub health_info: String,
    #[arg(long, default_value = "")]
    pub emergency_contact: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Patient id
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, value_parser = parse_date)]
    pub dob: Option<NaiveDate>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub health_info: Option<String>,
    #[arg(long)]
    pub emergency_contact: Option<String>,
    #[arg(long)]
    pub avatar: Option<String>,
}

impl UpdateArgs {
    fn patch(&self) -> PatientPatch {
        PatientPatch {
            name: self.name.clone(),
            dob: self.dob,
            contact: self.contact.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            health_info: self.health_info.clone(),
            emergency_contact: self.emergency_contact.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Patient id
    pub id: String,
}

impl PatientsCommand {
    /// Execute the patients command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::open(config_path) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        if let Err(code) = ctx.require(View::Patients) {
            return Ok(code);
        }
        let mut records = match ctx.records() {
            Ok(records) => records,
            Err(code) => return Ok(code),
        };

        match self {
            PatientsCommand::List(args) => {
                let patients: Vec<&Patient> = match &args.search {
                    Some(term) => records.search_patients(term),
                    None => records.patients().iter().collect(),
                };
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&patients)?);
                } else {
                    print_table(&patients, ctx.local_now().date_naive());
                }
                Ok(exit_code::SUCCESS)
            }
            PatientsCommand::Add(args) => {
                let fields = NewPatient::new(&args.name, args.dob)
                    .contact(&args.contact)
                    .email(&args.email)
                    .address(&args.address)
                    .health_info(&args.health_info)
                    .emergency_contact(&args.emergency_contact);
                match records.add_patient(fields) {
                    Ok(patient) => {
                        println!("✅ Added patient {} ({})", patient.name, patient.id);
                        Ok(exit_code::SUCCESS)
                    }
                    Err(e) => Ok(report_failure(&e, "Failed to add patient")),
                }
            }
            PatientsCommand::Update(args) => {
                let patch = args.patch();
                if patch.is_empty() {
                    println!("Nothing to update.");
                    return Ok(exit_code::SUCCESS);
                }
                let id = PatientId::new(&args.id).map_err(anyhow::Error::msg)?;
                match records.update_patient(&id, patch) {
                    Ok(Some(patient)) => {
                        println!("✅ Updated patient {} ({})", patient.name, patient.id);
                        Ok(exit_code::SUCCESS)
                    }
                    Ok(None) => {
                        println!("No patient with id {id}; nothing changed.");
                        Ok(exit_code::SUCCESS)
                    }
                    Err(e) => Ok(report_failure(&e, "Failed to update patient")),
                }
            }
            PatientsCommand::Remove(args) => {
                let id = PatientId::new(&args.id).map_err(anyhow::Error::msg)?;
                let appointments = records.patient_incidents(&id).len();
                match records.delete_patient(&id) {
                    Ok(true) => {
                        println!("🗑️  Removed patient {id} and {appointments} appointment(s)");
                        Ok(exit_code::SUCCESS)
                    }
                    Ok(false) => {
                        println!("No patient with id {id}; nothing changed.");
                        Ok(exit_code::SUCCESS)
                    }
                    Err(e) => Ok(report_failure(&e, "Failed to remove patient")),
                }
            }
        }
    }
}

fn print_table(patients: &[&Patient], today: NaiveDate) {
    if patients.is_empty() {
        println!("No patients found.");
        return;
    }

    println!(
        "{:<24} {:<22} {:<5} {:<18} {:<30}",
        "ID", "Name", "Age", "Contact", "Email"
    );
    println!("{}", "-".repeat(100));
    for patient in patients {
        let age = patient
            .age_on(today)
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<22} {:<5} {:<18} {:<30}",
            patient.id, patient.name, age, patient.contact, patient.email
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_args_patch_only_sets_given_fields() {
        let args = UpdateArgs {
            id: "p1".to_string(),
            name: None,
            dob: None,
            contact: Some("(555) 000-0000".to_string()),
            email: None,
            address: None,
            health_info: None,
            emergency_contact: None,
            avatar: None,
        };
        let patch = args.patch();
        assert_eq!(patch.contact.as_deref(), Some("(555) 000-0000"));
        assert!(patch.name.is_none());
        assert!(!patch.is_empty());
    }
}
