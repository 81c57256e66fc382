//! Tests for schedule-set validation.

use chrono::{DateTime, NaiveDate, Utc};

use seasonal_core::{DayHours, IntegrityViolation, ScheduleRecord, Weekday};

use super::*;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn make(id: &str, start: &str, end: &str) -> ScheduleRecord {
    ScheduleRecord::new(id, "loc-1", id, d(start), d(end))
        .with_priority(10)
        .with_created_at(ts("2025-01-01T00:00:00Z"))
}

#[test]
fn well_formed_set_is_valid() {
    let records = vec![
        make("winter", "2025-01-01", "2025-03-31"),
        make("promo", "2025-02-01", "2025-02-14").with_priority(50),
    ];
    let result = validate_schedule_set("loc-1", &records);
    assert!(result.valid, "unexpected errors: {:?}", result.errors);
    assert!(result.warnings.is_empty());
    assert!(check_schedule_set("loc-1", &records).is_ok());
}

#[test]
fn inverted_range_is_an_error_with_suggestion() {
    let result = validate_record(&make("bad", "2025-03-31", "2025-01-01"));
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path, "schedules[bad].endDate");
    assert!(result.errors[0]
        .suggestion
        .as_deref()
        .unwrap()
        .contains("startDate: 2025-01-01"));
}

#[test]
fn every_missing_weekday_is_reported() {
    let mut record = make("sparse", "2025-01-01", "2025-01-31");
    record.working_hours = record
        .working_hours
        .without(Weekday::Wednesday)
        .without(Weekday::Sunday);
    let result = validate_record(&record);
    let paths: Vec<_> = result.errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "schedules[sparse].workingHours.wednesday",
            "schedules[sparse].workingHours.sunday",
        ]
    );
}

#[test]
fn odd_hours_and_priority_only_warn() {
    let record = make("late", "2025-01-01", "2025-01-31")
        .with_priority(250)
        .with_day(Weekday::Friday, DayHours::open("18:00", "09:00").unwrap());
    let result = validate_record(&record);
    assert!(result.valid);
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings.iter().any(|w| w.path.ends_with(".priority")));
    assert!(result.warnings.iter().any(|w| w.path.ends_with(".friday")));
}

#[test]
fn foreign_location_and_duplicate_ids_block_the_set() {
    let mut foreign = make("elsewhere", "2025-01-01", "2025-01-31");
    foreign.location_id = "loc-2".to_string();
    let records = vec![
        make("dup", "2025-01-01", "2025-01-31"),
        make("dup", "2025-02-01", "2025-02-28"),
        foreign,
    ];

    let result = validate_schedule_set("loc-1", &records);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 2);

    let errors = integrity_errors("loc-1", &records);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.violation == IntegrityViolation::DuplicateId));
    assert!(errors
        .iter()
        .any(|e| matches!(e.violation, IntegrityViolation::ForeignLocation { .. })));
}

#[test]
fn check_returns_first_violation() {
    let records = vec![
        make("ok", "2025-01-01", "2025-01-31"),
        make("bad", "2025-05-01", "2025-04-01"),
    ];
    let err = check_schedule_set("loc-1", &records).unwrap_err();
    assert_eq!(err.schedule_id, "bad");
    assert!(matches!(err.violation, IntegrityViolation::InvertedRange { .. }));
}

#[test]
fn identical_range_and_priority_warns_on_loser() {
    let records = vec![
        make("older", "2025-01-01", "2025-03-31"),
        make("newer", "2025-01-01", "2025-03-31").with_created_at(ts("2025-01-10T00:00:00Z")),
        make("off", "2025-01-01", "2025-03-31").with_active(false),
    ];
    let result = validate_schedule_set("loc-1", &records);
    assert!(result.valid);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].path, "schedules[older]");
    assert!(result.warnings[0].message.contains("'newer'"));
}
