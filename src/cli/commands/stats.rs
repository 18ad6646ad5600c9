//! stats command: practice dashboard for staff, treatment summary for patients

use super::context::{display_time, CommandContext};
use crate::cli::exit_code;
use crate::core::identity::View;
use crate::core::query::upcoming_appointments;
use crate::core::stats::{DashboardStats, PatientSummary};
use chrono::Local;
use clap::Args;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::open(config_path) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        let user = match ctx.require(View::Dashboard) {
            Ok(user) => user,
            Err(code) => return Ok(code),
        };
        let records = match ctx.records() {
            Ok(records) => records,
            Err(code) => return Ok(code),
        };

        if user.is_admin() {
            let stats = records.dashboard_stats();
            if self.json {
                println!("{}", serde_json::to_string_pretty(stats)?);
            } else {
                println!("📊 Welcome back, {} {}", user.name, user.avatar);
                print_dashboard(stats);
            }
            return Ok(exit_code::SUCCESS);
        }

        let Some(patient_id) = user.patient_id.as_ref() else {
            println!("🔒 This account has no patient record.");
            return Ok(exit_code::ACCESS_DENIED);
        };
        let summary = records.patient_summary(patient_id);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(exit_code::SUCCESS);
        }

        println!("👋 Hello, {}", user.name);
        print_summary(&summary, |at| display_time(at, &Local));

        let next = upcoming_appointments(
            records.incidents(),
            ctx.now(),
            ctx.window(),
            Some(patient_id),
        );
        println!();
        println!("Upcoming appointments: {}", next.len());
        for incident in next {
            println!(
                "  {}  {}",
                display_time(incident.appointment_date, &Local),
                incident.title
            );
        }
        Ok(exit_code::SUCCESS)
    }
}

fn print_dashboard(stats: &DashboardStats) {
    println!();
    println!("  Patients:              {}", stats.total_patients);
    println!("  Appointments:          {}", stats.total_appointments);
    println!("  Completed treatments:  {}", stats.completed_treatments);
    println!("  Pending appointments:  {}", stats.pending_appointments);
    println!("  Revenue this month:    ${:.2}", stats.monthly_revenue);
    println!("  Revenue this week:     ${:.2}", stats.weekly_revenue);
}

fn print_summary(
    summary: &PatientSummary,
    when: impl Fn(chrono::DateTime<chrono::Utc>) -> String,
) {
    println!();
    println!("  Appointments:          {}", summary.total_appointments);
    println!("  Completed treatments:  {}", summary.completed_treatments);
    println!("  Total spent:           ${:.2}", summary.total_spent);
    if !summary.recent_treatments.is_empty() {
        println!();
        println!("Recent treatments:");
        for incident in &summary.recent_treatments {
            println!("  {}  {}", when(incident.appointment_date), incident.title);
        }
    }
}
