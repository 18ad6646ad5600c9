//! Integration tests for the appointment queries over a loaded record store

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use dentaldesk::adapters::storage::MemoryStore;
use dentaldesk::config::ScheduleConfig;
use dentaldesk::core::clock::ManualClock;
use dentaldesk::core::query::{
    appointments_on, filter_incidents, history_filter, month_grid, partition_history,
    upcoming_appointments, IncidentFilter, StatusFilter, UpcomingWindow,
};
use dentaldesk::core::records::RecordStore;
use dentaldesk::domain::{
    AppointmentStatus, IncidentId, IncidentPatch, NewIncident, PatientId, TimestampIdGenerator,
};
use std::sync::Arc;

fn seeded_store() -> RecordStore {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap());
    RecordStore::load(
        Arc::new(MemoryStore::new()),
        Arc::new(clock),
        Arc::new(TimestampIdGenerator::new()),
    )
    .unwrap()
}

fn ids<'a>(incidents: impl IntoIterator<Item = &'a dentaldesk::domain::Incident>) -> Vec<&'a str> {
    incidents.into_iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn test_upcoming_over_seed_data() {
    let store = seeded_store();
    // Morning of January 15th: the filling at 14:00 and the crown on the 25th
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();

    let found = upcoming_appointments(store.incidents(), now, UpcomingWindow::default(), None);
    assert_eq!(ids(found), vec!["i2", "i4"]);

    let john = PatientId::new("p1").unwrap();
    let mine = upcoming_appointments(store.incidents(), now, UpcomingWindow::default(), Some(&john));
    assert_eq!(ids(mine), vec!["i2"]);
}

#[test]
fn test_window_comes_from_schedule_config() {
    let store = seeded_store();
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
    let config = ScheduleConfig {
        upcoming_window_days: 3,
        upcoming_limit: 10,
    };

    let found = upcoming_appointments(store.incidents(), now, UpcomingWindow::from(&config), None);
    assert_eq!(ids(found), vec!["i2"]);
}

#[test]
fn test_window_edge_is_exact_to_the_millisecond() {
    let mut store = seeded_store();
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
    let jane = PatientId::new("p2").unwrap();
    let edge = now + Duration::days(10);

    let on_edge = store
        .add_incident(NewIncident::new(jane.clone(), "Edge", edge))
        .unwrap();
    let past_edge = store
        .add_incident(NewIncident::new(jane.clone(), "Past edge", edge + Duration::milliseconds(1)))
        .unwrap();

    let found = upcoming_appointments(store.incidents(), now, UpcomingWindow::default(), Some(&jane));
    assert_eq!(ids(found), vec![on_edge.id.as_str()]);
    assert!(store.incident(&past_edge.id).is_some());
}

#[test]
fn test_day_query_skips_closed_incidents() {
    let mut store = seeded_store();
    let day = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
    assert_eq!(ids(appointments_on(store.incidents(), day, &Utc)), vec!["i4"]);

    store
        .update_incident(
            &IncidentId::new("i4").unwrap(),
            IncidentPatch::status(AppointmentStatus::Cancelled),
        )
        .unwrap();
    assert!(appointments_on(store.incidents(), day, &Utc).is_empty());
}

#[test]
fn test_search_by_patient_name_and_status() {
    let store = seeded_store();
    let filter = IncidentFilter::new("doe", StatusFilter::All);
    assert_eq!(
        ids(filter_incidents(store.incidents(), store.patients(), &filter)),
        vec!["i1", "i2"]
    );

    let filter = IncidentFilter::new("doe", StatusFilter::Only(AppointmentStatus::Completed));
    assert_eq!(
        ids(filter_incidents(store.incidents(), store.patients(), &filter)),
        vec!["i1"]
    );

    let filter = IncidentFilter::new("WHITENING", StatusFilter::All);
    assert_eq!(
        ids(filter_incidents(store.incidents(), store.patients(), &filter)),
        vec!["i3"]
    );
}

#[test]
fn test_patient_history_split() {
    let store = seeded_store();
    let john = PatientId::new("p1").unwrap();
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();

    let all = history_filter(store.patient_incidents(&john), StatusFilter::All);
    let history = partition_history(all, now);
    assert_eq!(ids(history.upcoming), vec!["i2"]);
    assert_eq!(ids(history.past), vec!["i1"]);

    // After the appointment time passes the filling moves to past
    let later = now + Duration::hours(3);
    let history = partition_history(store.patient_incidents(&john), later);
    assert!(history.upcoming.is_empty());
    assert_eq!(history.past.len(), 2);

    let scheduled = history_filter(
        store.patient_incidents(&john),
        StatusFilter::Only(AppointmentStatus::Scheduled),
    );
    assert_eq!(ids(scheduled), vec!["i2"]);
}

#[test]
fn test_month_grid_over_seed_data() {
    let store = seeded_store();
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    let grid = month_grid(today, today, store.incidents(), &Utc);

    let busy: Vec<NaiveDate> = grid
        .iter()
        .filter(|cell| !cell.appointments.is_empty())
        .map(|cell| cell.date)
        .collect();
    assert_eq!(
        busy,
        vec![
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 25).unwrap(),
        ]
    );
}
