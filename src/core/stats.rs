//! Dashboard statistics
//!
//! [`DashboardStats`] is derived from the record collections and never
//! mutated directly. The record store recomputes it after loading and after
//! every incident mutation.
//!
//! Revenue periods are local-calendar periods ending at `now`:
//! - month: from local midnight on the 1st
//! - week: from local midnight on the most recent Sunday (today if Sunday)
//!
//! Both boundaries sit at midnight, not at the current time of day shifted
//! back to the 1st or to Sunday, so a treatment completed early on Sunday
//! morning belongs to the week even when the figures are read that
//! afternoon or later in the week.
//!
//! A Completed incident contributes its cost when `start <= updated_at <= now`.

use crate::domain::{AppointmentStatus, Incident, Patient};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate figures shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub total_appointments: usize,
    pub completed_treatments: usize,
    pub pending_appointments: usize,
    pub monthly_revenue: f64,
    pub weekly_revenue: f64,
}

impl DashboardStats {
    /// Computes the figures for the collections as of `now`
    pub fn compute(
        patients: &[Patient],
        incidents: &[Incident],
        now: DateTime<FixedOffset>,
    ) -> Self {
        let now_utc = now.with_timezone(&Utc);
        let month_start = month_start(now);
        let week_start = week_start(now);

        let mut stats = DashboardStats {
            total_patients: patients.len(),
            total_appointments: incidents.len(),
            ..Default::default()
        };

        for incident in incidents {
            if incident.is_pending() {
                stats.pending_appointments += 1;
            }
            if incident.status != AppointmentStatus::Completed {
                continue;
            }
            stats.completed_treatments += 1;

            let at = incident.updated_at;
            if at > now_utc {
                continue;
            }
            if at >= month_start {
                stats.monthly_revenue += incident.billed();
            }
            if at >= week_start {
                stats.weekly_revenue += incident.billed();
            }
        }

        stats
    }
}

/// Treatment summary for one patient's own dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub total_appointments: usize,
    pub completed_treatments: usize,
    /// Sum of cost over completed treatments
    pub total_spent: f64,
    /// Up to five completed treatments, in store order
    pub recent_treatments: Vec<Incident>,
}

impl PatientSummary {
    /// Number of completed treatments listed in the summary
    pub const RECENT_LIMIT: usize = 5;

    /// Summarizes `incidents`, which the caller has already scoped to one patient
    pub fn compute<'a>(incidents: impl IntoIterator<Item = &'a Incident>) -> Self {
        let mut summary = PatientSummary::default();
        for incident in incidents {
            summary.total_appointments += 1;
            if incident.status == AppointmentStatus::Completed {
                summary.completed_treatments += 1;
                summary.total_spent += incident.billed();
                if summary.recent_treatments.len() < Self::RECENT_LIMIT {
                    summary.recent_treatments.push(incident.clone());
                }
            }
        }
        summary
    }
}

/// Local midnight starting the calendar month that contains `now`
pub fn month_start(now: DateTime<FixedOffset>) -> DateTime<Utc> {
    let today = now.date_naive();
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    local_midnight(first, *now.offset())
}

/// Local midnight starting the Sunday-based week that contains `now`
pub fn week_start(now: DateTime<FixedOffset>) -> DateTime<Utc> {
    let today = now.date_naive();
    let sunday = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    local_midnight(sunday, *now.offset())
}

/// The instant at which `date` begins in `offset`
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&(local - Duration::seconds(i64::from(offset.local_minus_utc()))))
}
