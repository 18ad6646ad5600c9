//! Read-only projections over the record collections
//!
//! Nothing here mutates the record store. Every function borrows the
//! collections and returns references into them.

use crate::config::ScheduleConfig;
use crate::domain::{AppointmentStatus, Incident, Patient, PatientId};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Look-ahead window for upcoming appointments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingWindow {
    /// Horizon in days; both ends of the window are inclusive
    pub days: u32,
    /// Maximum number of results
    pub limit: usize,
}

impl Default for UpcomingWindow {
    fn default() -> Self {
        Self { days: 10, limit: 10 }
    }
}

impl From<&ScheduleConfig> for UpcomingWindow {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            days: config.upcoming_window_days,
            limit: config.upcoming_limit,
        }
    }
}

/// Pending incidents with `appointment_date` in `[now, now + window.days]`,
/// earliest first, at most `window.limit` of them
///
/// With `patient` set only that patient's incidents are considered.
pub fn upcoming_appointments<'a>(
    incidents: &'a [Incident],
    now: DateTime<Utc>,
    window: UpcomingWindow,
    patient: Option<&PatientId>,
) -> Vec<&'a Incident> {
    let horizon = now + Duration::days(i64::from(window.days));
    let mut found: Vec<&Incident> = incidents
        .iter()
        .filter(|i| patient.map_or(true, |p| &i.patient_id == p))
        .filter(|i| i.is_pending())
        .filter(|i| i.appointment_date >= now && i.appointment_date <= horizon)
        .collect();
    found.sort_by_key(|i| i.appointment_date);
    found.truncate(window.limit);
    found
}

/// Pending incidents whose appointment falls on `day` in the time zone `tz`
///
/// Each appointment is converted with the offset in force at its own
/// instant, so dates on the other side of a daylight-saving change land on
/// the right local day.
pub fn appointments_on<'a, Tz: TimeZone>(
    incidents: &'a [Incident],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Incident> {
    incidents
        .iter()
        .filter(|i| i.is_pending() && local_day(i, tz) == day)
        .collect()
}

fn local_day<Tz: TimeZone>(incident: &Incident, tz: &Tz) -> NaiveDate {
    incident.appointment_date.with_timezone(tz).date_naive()
}

/// Either every status or exactly one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    pub fn admits(self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl From<AppointmentStatus> for StatusFilter {
    fn from(status: AppointmentStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<AppointmentStatus>().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

/// Search term plus status filter for the appointment list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentFilter {
    /// Case-insensitive substring; empty matches everything
    pub search: String,
    pub status: StatusFilter,
}

impl IncidentFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }
}

/// Incidents whose title, description or owning patient's name contains the
/// search term (ignoring case) and whose status passes the filter
pub fn filter_incidents<'a>(
    incidents: &'a [Incident],
    patients: &[Patient],
    filter: &IncidentFilter,
) -> Vec<&'a Incident> {
    let needle = filter.search.to_lowercase();
    let names: HashMap<&PatientId, String> = patients
        .iter()
        .map(|p| (&p.id, p.name.to_lowercase()))
        .collect();

    incidents
        .iter()
        .filter(|i| filter.status.admits(i.status))
        .filter(|i| {
            i.matches_text(&needle)
                || names
                    .get(&i.patient_id)
                    .is_some_and(|name| name.contains(&needle))
        })
        .collect()
}

/// Status filter over one patient's incidents, order preserved
pub fn history_filter<'a>(
    incidents: impl IntoIterator<Item = &'a Incident>,
    status: StatusFilter,
) -> Vec<&'a Incident> {
    incidents
        .into_iter()
        .filter(|i| status.admits(i.status))
        .collect()
}

/// A patient's incidents split around `now`
#[derive(Debug, Default, PartialEq)]
pub struct History<'a> {
    pub upcoming: Vec<&'a Incident>,
    pub past: Vec<&'a Incident>,
}

/// Upcoming means pending and dated at or after `now`; everything else is past
///
/// A future-dated incident that is already Completed or Cancelled is past.
pub fn partition_history<'a>(
    incidents: impl IntoIterator<Item = &'a Incident>,
    now: DateTime<Utc>,
) -> History<'a> {
    let (upcoming, past) = incidents
        .into_iter()
        .partition(|i| i.is_pending() && i.appointment_date >= now);
    History { upcoming, past }
}

/// One cell of the month calendar
#[derive(Debug, PartialEq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    /// Pending appointments on this date
    pub appointments: Vec<&'a Incident>,
}

/// Cells in a month grid: six Sunday-first weeks
pub const MONTH_GRID_CELLS: usize = 42;

/// Six weeks of calendar cells covering the month that contains `month`,
/// starting on the Sunday on or before the 1st
pub fn month_grid<'a, Tz: TimeZone>(
    month: NaiveDate,
    today: NaiveDate,
    incidents: &'a [Incident],
    tz: &Tz,
) -> Vec<CalendarDay<'a>> {
    let first = NaiveDate::from_ymd_opt(month.year(), month.month(), 1).unwrap_or(month);
    let start = sunday_on_or_before(first);

    (0..MONTH_GRID_CELLS as i64)
        .map(|n| {
            let date = start + Duration::days(n);
            CalendarDay {
                date,
                in_month: date.month() == first.month() && date.year() == first.year(),
                is_today: date == today,
                appointments: appointments_on(incidents, date, tz),
            }
        })
        .collect()
}

/// The Sunday-to-Saturday week containing `date`
pub fn week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let start = sunday_on_or_before(date);
    std::array::from_fn(|n| start + Duration::days(n as i64))
}

fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IncidentId, Priority};
    use chrono::{FixedOffset, LocalResult, NaiveDateTime, Weekday};
    use test_case::test_case;

    /// New York during 2025: EDT from 9 March 07:00 UTC to 2 November 06:00 UTC
    #[derive(Debug, Clone, Copy)]
    struct NewYork2025;

    impl NewYork2025 {
        const EST: i32 = -5 * 3600;
        const EDT: i32 = -4 * 3600;

        fn offset_at(utc: &NaiveDateTime) -> FixedOffset {
            let dst_start = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap().and_hms_opt(7, 0, 0).unwrap();
            let dst_end = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap().and_hms_opt(6, 0, 0).unwrap();
            let secs = if *utc >= dst_start && *utc < dst_end {
                Self::EDT
            } else {
                Self::EST
            };
            FixedOffset::east_opt(secs).unwrap()
        }
    }

    impl TimeZone for NewYork2025 {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            NewYork2025
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
        }

        // Only exact away from the transition hours
        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::offset_at(
                &(*local - Duration::seconds(i64::from(Self::EST))),
            ))
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            Self::offset_at(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            Self::offset_at(utc)
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, h, 0, 0).unwrap()
    }

    fn incident(id: &str, patient: &str, date: DateTime<Utc>, status: AppointmentStatus) -> Incident {
        Incident {
            id: IncidentId::new(id).unwrap(),
            patient_id: PatientId::new(patient).unwrap(),
            title: format!("Visit {id}"),
            description: String::new(),
            comments: String::new(),
            appointment_date: date,
            next_appointment_date: None,
            cost: None,
            treatment: None,
            status,
            files: vec![],
            priority: Priority::Routine,
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let now = at(10, 9);
        let incidents = vec![
            incident("late", "p1", now + Duration::days(10), AppointmentStatus::Scheduled),
            incident("now", "p1", now, AppointmentStatus::InProgress),
            incident("past", "p1", now - Duration::milliseconds(1), AppointmentStatus::Scheduled),
            incident("beyond", "p1", now + Duration::days(10) + Duration::milliseconds(1), AppointmentStatus::Scheduled),
            incident("done", "p1", now + Duration::days(1), AppointmentStatus::Completed),
        ];

        let ids: Vec<&str> = upcoming_appointments(&incidents, now, UpcomingWindow::default(), None)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["now", "late"]);
    }

    #[test]
    fn test_window_caps_and_scopes() {
        let now = at(1, 0);
        let incidents: Vec<Incident> = (0..15)
            .map(|n| {
                let patient = if n % 2 == 0 { "p1" } else { "p2" };
                incident(&format!("i{n}"), patient, now + Duration::hours(n), AppointmentStatus::Scheduled)
            })
            .collect();

        let all = upcoming_appointments(&incidents, now, UpcomingWindow::default(), None);
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].id.as_str(), "i0");

        let p2 = PatientId::new("p2").unwrap();
        let mine = upcoming_appointments(&incidents, now, UpcomingWindow::default(), Some(&p2));
        assert_eq!(mine.len(), 7);
        assert!(mine.iter().all(|i| i.patient_id == p2));
    }

    #[test]
    fn test_day_query_uses_local_calendar() {
        // 23:30 UTC on the 14th is already the 15th at UTC+2
        let incidents = vec![incident("i1", "p1", at(14, 23) + Duration::minutes(30), AppointmentStatus::Scheduled)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        assert_eq!(appointments_on(&incidents, day, &plus_two).len(), 1);
        assert!(appointments_on(&incidents, day, &utc).is_empty());
    }

    #[test]
    fn test_day_query_follows_daylight_saving() {
        // 04:30 UTC on 15 July is 00:30 EDT the same day, but 23:30 on the
        // 14th at the winter offset
        let summer = Utc.with_ymd_and_hms(2025, 7, 15, 4, 30, 0).unwrap();
        let incidents = vec![incident("i1", "p1", summer, AppointmentStatus::Scheduled)];
        let july_15 = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let winter = FixedOffset::east_opt(NewYork2025::EST).unwrap();

        assert_eq!(appointments_on(&incidents, july_15, &NewYork2025).len(), 1);
        assert!(appointments_on(&incidents, july_15, &winter).is_empty());

        let grid = month_grid(july_15, july_15, &incidents, &NewYork2025);
        let busy: Vec<NaiveDate> = grid
            .iter()
            .filter(|cell| !cell.appointments.is_empty())
            .map(|cell| cell.date)
            .collect();
        assert_eq!(busy, vec![july_15]);
    }

    #[test_case("", StatusFilter::All, 3 ; "empty search returns all")]
    #[test_case("JANE", StatusFilter::All, 1 ; "matches patient name")]
    #[test_case("visit i", StatusFilter::Only(AppointmentStatus::Completed), 1 ; "status narrows")]
    #[test_case("nothing", StatusFilter::All, 0 ; "no match")]
    fn test_filter_incidents(search: &str, status: StatusFilter, expected: usize) {
        let patients: Vec<Patient> = serde_json::from_value(serde_json::json!([
            {"id": "p2", "name": "Jane Smith", "dob": "1985-08-22", "contact": "", "email": "",
             "address": "", "healthInfo": "", "emergencyContact": "", "avatar": "",
             "memberSince": "2024-02-01T14:30:00Z", "createdAt": "2024-02-01T14:30:00Z"}
        ]))
        .unwrap();
        let incidents = vec![
            incident("i1", "p1", at(1, 9), AppointmentStatus::Scheduled),
            incident("i2", "p2", at(2, 9), AppointmentStatus::Completed),
            incident("i3", "p9", at(3, 9), AppointmentStatus::Cancelled),
        ];

        let found = filter_incidents(&incidents, &patients, &IncidentFilter::new(search, status));
        assert_eq!(found.len(), expected);
    }

    #[test]
    fn test_partition_treats_closed_future_as_past() {
        let now = at(10, 12);
        let incidents = vec![
            incident("future-open", "p1", at(20, 9), AppointmentStatus::Scheduled),
            incident("future-done", "p1", at(20, 9), AppointmentStatus::Completed),
            incident("past-open", "p1", at(5, 9), AppointmentStatus::InProgress),
            incident("exactly-now", "p1", now, AppointmentStatus::Scheduled),
        ];

        let history = partition_history(&incidents, now);
        let upcoming: Vec<&str> = history.upcoming.iter().map(|i| i.id.as_str()).collect();
        let past: Vec<&str> = history.past.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(upcoming, vec!["future-open", "exactly-now"]);
        assert_eq!(past, vec!["future-done", "past-open"]);
    }

    #[test]
    fn test_history_filter() {
        let incidents = vec![
            incident("a", "p1", at(1, 9), AppointmentStatus::Scheduled),
            incident("b", "p1", at(2, 9), AppointmentStatus::Cancelled),
        ];
        assert_eq!(history_filter(&incidents, StatusFilter::All).len(), 2);
        let cancelled = history_filter(&incidents, "cancelled".parse().unwrap());
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id.as_str(), "b");
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "in progress".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AppointmentStatus::InProgress)
        );
        assert!("later".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_month_grid_layout() {
        let incidents = vec![incident("i1", "p1", at(15, 14), AppointmentStatus::Scheduled)];
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let grid = month_grid(today, today, &incidents, &Utc);

        assert_eq!(grid.len(), MONTH_GRID_CELLS);
        // January 1st 2025 is a Wednesday
        assert_eq!(grid[0].date, NaiveDate::from_ymd_opt(2024, 12, 29).unwrap());
        assert_eq!(grid[0].date.weekday(), Weekday::Sun);
        assert!(!grid[0].in_month);
        assert!(grid[3].in_month);
        assert_eq!(grid.iter().filter(|d| d.in_month).count(), 31);

        let cell = grid.iter().find(|d| d.is_today).unwrap();
        assert_eq!(cell.date, today);
        assert_eq!(cell.appointments.len(), 1);
    }

    #[test]
    fn test_week_days() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let week = week_days(wednesday);
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
        assert_eq!(week[6], NaiveDate::from_ymd_opt(2025, 1, 18).unwrap());
        assert!(week.contains(&wednesday));
    }
}
