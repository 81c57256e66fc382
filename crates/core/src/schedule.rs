use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{IntegrityError, IntegrityViolation};
use crate::hours::{DayHours, Weekday, WorkingHours};

pub type ScheduleId = String;
pub type LocationId = String;

// ── Date range ─────────────────────────────────────────────────

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True if the two ranges share at least one day.
    pub fn intersects(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

// ── Schedule record ────────────────────────────────────────────

fn default_true() -> bool {
    true
}

/// One seasonal schedule: a date-ranged override of a location's weekly hours.
///
/// Records are values. Nothing in this workspace mutates one after it has been
/// fetched; status and resolution results are always derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: ScheduleId,
    pub location_id: LocationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
    /// Creation stamp; the later one wins an equal-priority overlap.
    pub created_at: DateTime<Utc>,
    pub working_hours: WorkingHours,
}

impl ScheduleRecord {
    /// Active, priority 0, closed every day, created now.
    pub fn new(
        id: impl Into<String>,
        location_id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            location_id: location_id.into(),
            name: name.into(),
            description: None,
            start_date,
            end_date,
            is_active: true,
            priority: 0,
            created_at: Utc::now(),
            working_hours: WorkingHours::uniform(DayHours::Closed),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_hours(mut self, working_hours: WorkingHours) -> Self {
        self.working_hours = working_hours;
        self
    }

    pub fn with_day(mut self, day: Weekday, hours: DayHours) -> Self {
        self.working_hours = self.working_hours.with(day, hours);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// The record's date range, or `None` if it is inverted.
    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }

    /// True if any day of the record's range falls inside `range`.
    pub fn overlaps(&self, range: &DateRange) -> bool {
        self.start_date <= range.end && range.start <= self.end_date
    }

    /// Check the record-local invariants: ordered range and a full weekday table.
    ///
    /// Set-level invariants (unique ids, owning location) are checked by the
    /// caller that holds the whole set.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        if self.start_date > self.end_date {
            return Err(IntegrityError::new(
                &self.id,
                IntegrityViolation::InvertedRange {
                    start: self.start_date,
                    end: self.end_date,
                },
            ));
        }
        if let Some(day) = self.working_hours.missing_days().first() {
            return Err(IntegrityError::new(
                &self.id,
                IntegrityViolation::MissingWeekday(*day),
            ));
        }
        Ok(())
    }
}
