//! Tests for the resolver module.

use chrono::{DateTime, NaiveDate, Utc};

use seasonal_core::{DateRange, ScheduleRecord};

use super::*;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

/// Active record created at a fixed instant.
fn make(id: &str, start: &str, end: &str, priority: i32) -> ScheduleRecord {
    ScheduleRecord::new(id, "loc-1", format!("Schedule {}", id), d(start), d(end))
        .with_priority(priority)
        .with_created_at(ts("2024-12-01T08:00:00Z"))
}

fn ids(records: &[&ScheduleRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

// -- resolve_active ------------------------------------------------------

#[test]
fn empty_set_resolves_to_none() {
    assert!(resolve_active(&[], d("2025-02-08")).is_none());
}

#[test]
fn all_past_or_future_resolves_to_none() {
    let records = vec![
        make("past", "2024-01-01", "2024-12-31", 10),
        make("future", "2025-06-01", "2025-08-31", 10),
    ];
    assert!(resolve_active(&records, d("2025-02-08")).is_none());
}

#[test]
fn inactive_records_never_win() {
    let records = vec![
        make("off", "2025-01-01", "2025-12-31", 100).with_active(false),
        make("on", "2025-01-01", "2025-12-31", 1),
    ];
    assert_eq!(resolve_active(&records, d("2025-02-08")).unwrap().id, "on");

    let only_inactive = vec![make("off", "2025-01-01", "2025-12-31", 100).with_active(false)];
    assert!(resolve_active(&only_inactive, d("2025-02-08")).is_none());
}

#[test]
fn higher_priority_wins_regardless_of_order() {
    let low = make("low", "2025-01-01", "2025-03-31", 10);
    let high = make("high", "2025-02-01", "2025-02-14", 50);

    let forward = vec![low.clone(), high.clone()];
    let backward = vec![high, low];
    assert_eq!(resolve_active(&forward, d("2025-02-08")).unwrap().id, "high");
    assert_eq!(resolve_active(&backward, d("2025-02-08")).unwrap().id, "high");
}

#[test]
fn equal_priority_most_recently_created_wins() {
    let older = make("older", "2025-01-01", "2025-03-31", 20).with_created_at(ts("2024-11-01T00:00:00Z"));
    let newer = make("newer", "2025-01-01", "2025-03-31", 20).with_created_at(ts("2024-12-15T00:00:00Z"));

    let a = vec![older.clone(), newer.clone()];
    let b = vec![newer, older];
    for _ in 0..3 {
        assert_eq!(resolve_active(&a, d("2025-02-08")).unwrap().id, "newer");
        assert_eq!(resolve_active(&b, d("2025-02-08")).unwrap().id, "newer");
    }
}

#[test]
fn identical_creation_stamp_falls_back_to_id() {
    let records = vec![
        make("b", "2025-01-01", "2025-03-31", 20),
        make("c", "2025-01-01", "2025-03-31", 20),
        make("a", "2025-01-01", "2025-03-31", 20),
    ];
    assert_eq!(resolve_active(&records, d("2025-02-08")).unwrap().id, "c");
}

#[test]
fn resolution_is_idempotent() {
    let records = vec![
        make("x", "2025-01-01", "2025-03-31", 5),
        make("y", "2025-02-01", "2025-02-28", 5),
    ];
    let first = resolve_active(&records, d("2025-02-10")).cloned();
    let second = resolve_active(&records, d("2025-02-10")).cloned();
    assert_eq!(first, second);
    assert!(first.is_some());
}

// -- precedence / rank ---------------------------------------------------

#[test]
fn rank_orders_winner_first() {
    let a = make("a", "2025-01-01", "2025-01-31", 10);
    let b = make("b", "2025-01-01", "2025-01-31", 30);
    let c = make("c", "2025-01-01", "2025-01-31", 10).with_created_at(ts("2025-01-02T00:00:00Z"));

    let mut all = vec![&a, &b, &c];
    rank(&mut all);
    assert_eq!(ids(&all), vec!["b", "c", "a"]);
    assert_eq!(precedence(&b, &a), std::cmp::Ordering::Greater);
}

// -- resolve_active_for_period -------------------------------------------

#[test]
fn period_returns_every_overlapping_active_record() {
    let records = vec![
        make("partial", "2025-06-15", "2025-07-15", 10),
        make("after", "2025-07-01", "2025-07-31", 90),
        make("inside", "2025-06-10", "2025-06-12", 50),
        make("inactive", "2025-06-01", "2025-06-30", 99).with_active(false),
        make("touching", "2025-05-01", "2025-06-01", 1),
    ];
    let range = DateRange::new(d("2025-06-01"), d("2025-06-30")).unwrap();
    let hits = resolve_active_for_period(&records, &range);
    assert_eq!(ids(&hits), vec!["inside", "partial", "touching"]);
}

#[test]
fn period_with_no_overlap_is_empty() {
    let records = vec![make("jan", "2025-01-01", "2025-01-31", 10)];
    let range = DateRange::day(d("2025-02-01"));
    assert!(resolve_active_for_period(&records, &range).is_empty());
}

// -- explain_active ------------------------------------------------------

#[test]
fn explain_counts_exclusions_and_agrees_with_resolve() {
    let records = vec![
        make("winter", "2025-01-01", "2025-03-31", 10),
        make("promo", "2025-02-01", "2025-02-14", 50),
        make("summer", "2025-06-01", "2025-08-31", 10),
        make("old", "2025-01-01", "2025-12-31", 70).with_active(false),
    ];
    let date = d("2025-02-08");
    let resolution = explain_active(&records, date);

    assert_eq!(ids(&resolution.ranked), vec!["promo", "winter"]);
    assert_eq!(resolution.inactive, 1);
    assert_eq!(resolution.not_current, 1);
    assert!(!resolution.decided_by_tie_break());
    assert_eq!(
        resolution.winner().map(|r| &r.id),
        resolve_active(&records, date).map(|r| &r.id)
    );
}

#[test]
fn explain_flags_tie_break() {
    let records = vec![
        make("first", "2025-01-01", "2025-03-31", 10),
        make("second", "2025-01-01", "2025-03-31", 10).with_created_at(ts("2025-01-05T00:00:00Z")),
    ];
    let resolution = explain_active(&records, d("2025-01-10"));
    assert!(resolution.decided_by_tie_break());
    assert_eq!(resolution.winner().unwrap().id, "second");
}

// -- next_upcoming -------------------------------------------------------

#[test]
fn next_upcoming_picks_nearest_start() {
    let records = vec![
        make("current", "2025-01-01", "2025-03-31", 10),
        make("later", "2025-09-01", "2025-11-30", 90),
        make("sooner", "2025-06-01", "2025-08-31", 10),
        make("sooner-off", "2025-04-01", "2025-04-30", 10).with_active(false),
    ];
    assert_eq!(next_upcoming(&records, d("2025-02-08")).unwrap().id, "sooner");
    assert!(next_upcoming(&records, d("2025-10-01")).is_none());
}

#[test]
fn next_upcoming_same_start_uses_precedence() {
    let records = vec![
        make("low", "2025-06-01", "2025-06-30", 10),
        make("high", "2025-06-01", "2025-06-10", 40),
    ];
    assert_eq!(next_upcoming(&records, d("2025-05-01")).unwrap().id, "high");
}
