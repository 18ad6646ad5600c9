//! calendar command: month grid or week list of pending appointments

use super::context::CommandContext;
use crate::cli::exit_code;
use crate::core::identity::View;
use crate::core::query::{appointments_on, month_grid, week_days};
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

/// Arguments for the calendar command
#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM); defaults to the current month
    #[arg(long, value_parser = parse_month, conflicts_with = "week")]
    pub month: Option<NaiveDate>,

    /// Show the week containing this date (YYYY-MM-DD) instead of a month
    #[arg(long, value_parser = super::context::parse_date)]
    pub week: Option<NaiveDate>,
}

fn parse_month(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month '{value}'. Use YYYY-MM"))
}

impl CalendarArgs {
    /// Execute the calendar command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::open(config_path) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };
        if let Err(code) = ctx.require(View::Calendar) {
            return Ok(code);
        }
        let records = match ctx.records() {
            Ok(records) => records,
            Err(code) => return Ok(code),
        };

        let local_now = ctx.local_now();
        let today = local_now.date_naive();

        if let Some(date) = self.week {
            for day in week_days(date) {
                let marker = if day == today { " (today)" } else { "" };
                println!("{}{}", day.format("%a %Y-%m-%d"), marker);
                let appointments = appointments_on(records.incidents(), day, &Local);
                if appointments.is_empty() {
                    println!("    -");
                }
                for incident in appointments {
                    let patient = records
                        .patient(&incident.patient_id)
                        .map(|p| p.name.as_str())
                        .unwrap_or("Unknown Patient");
                    println!(
                        "    {}  {} ({})",
                        incident.appointment_date.with_timezone(&Local).format("%H:%M"),
                        incident.title,
                        patient
                    );
                }
            }
            return Ok(exit_code::SUCCESS);
        }

        let month = self.month.unwrap_or(today);
        let grid = month_grid(month, today, records.incidents(), &Local);

        println!("{:^70}", month.format("%B %Y").to_string());
        println!(
            "{}",
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .map(|d| format!("{d:^10}"))
                .concat()
        );
        for week in grid.chunks(7) {
            let line: String = week
                .iter()
                .map(|cell| {
                    let day = if cell.in_month {
                        cell.date.day().to_string()
                    } else {
                        format!("({})", cell.date.day())
                    };
                    let marker = if cell.is_today { "*" } else { "" };
                    let count = match cell.appointments.len() {
                        0 => String::new(),
                        n => format!(" [{n}]"),
                    };
                    format!("{:^10}", format!("{day}{marker}{count}"))
                })
                .collect();
            println!("{line}");
        }
        println!();
        println!("* today   [n] pending appointments   (d) outside this month");
        Ok(exit_code::SUCCESS)
    }
}
