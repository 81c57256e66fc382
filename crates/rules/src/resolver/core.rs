//! Resolution queries over an in-memory schedule set.

use chrono::NaiveDate;
use serde::Serialize;

use seasonal_core::{DateRange, ScheduleRecord};

use crate::classifier::{classify, ScheduleStatus};

use super::precedence::{precedence, rank};

/// Select the effective schedule at `date`, or `None` when no active record
/// covers it (the caller then falls back to the location's base hours).
pub fn resolve_active(records: &[ScheduleRecord], date: NaiveDate) -> Option<&ScheduleRecord> {
    records
        .iter()
        .filter(|r| r.is_active && classify(r, date) == ScheduleStatus::Current)
        .max_by(|a, b| precedence(a, b))
}

/// Every active record whose range shares at least one day with `range`,
/// winner-first.
///
/// Returns all candidates rather than a per-day winner: conflict checks need
/// to see each overlapping record.
pub fn resolve_active_for_period<'a>(
    records: &'a [ScheduleRecord],
    range: &DateRange,
) -> Vec<&'a ScheduleRecord> {
    let mut hits: Vec<&ScheduleRecord> = records
        .iter()
        .filter(|r| r.is_active && r.overlaps(range))
        .collect();
    rank(&mut hits);
    hits
}

/// The active schedule that starts soonest after `date`.
///
/// Records starting on the same day are ordered by precedence.
pub fn next_upcoming(records: &[ScheduleRecord], date: NaiveDate) -> Option<&ScheduleRecord> {
    records
        .iter()
        .filter(|r| r.is_active && classify(r, date) == ScheduleStatus::Upcoming)
        .min_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| precedence(b, a))
        })
}

/// Resolution at one date together with how the winner was chosen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution<'a> {
    pub date: NaiveDate,
    /// Active, current candidates, winner-first.
    pub ranked: Vec<&'a ScheduleRecord>,
    /// Records skipped because `is_active` is false.
    pub inactive: usize,
    /// Active records whose range does not cover `date`.
    pub not_current: usize,
}

impl<'a> Resolution<'a> {
    pub fn winner(&self) -> Option<&'a ScheduleRecord> {
        self.ranked.first().copied()
    }

    /// True when the winner shares its priority with the runner-up, i.e. the
    /// creation-order tie-break decided the outcome.
    pub fn decided_by_tie_break(&self) -> bool {
        match (self.ranked.first(), self.ranked.get(1)) {
            (Some(w), Some(r)) => w.priority == r.priority,
            _ => false,
        }
    }
}

/// Same selection as [`resolve_active`], keeping the ranked candidate list.
pub fn explain_active(records: &[ScheduleRecord], date: NaiveDate) -> Resolution<'_> {
    let mut inactive = 0;
    let mut not_current = 0;
    let mut ranked = Vec::new();

    for record in records {
        if !record.is_active {
            inactive += 1;
        } else if classify(record, date) != ScheduleStatus::Current {
            not_current += 1;
        } else {
            ranked.push(record);
        }
    }
    rank(&mut ranked);

    Resolution {
        date,
        ranked,
        inactive,
        not_current,
    }
}
