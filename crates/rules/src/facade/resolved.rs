//! Owned result types returned by [`ScheduleBook`](super::ScheduleBook).

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use seasonal_core::{DayHours, ScheduleRecord, Weekday};

use crate::classifier::DisplayStatus;

/// Effective hours for one location on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResolvedDay {
    /// A seasonal schedule applies.
    #[serde(rename_all = "camelCase")]
    Override {
        date: NaiveDate,
        weekday: Weekday,
        schedule_id: String,
        schedule_name: String,
        priority: i32,
        hours: DayHours,
    },
    /// No seasonal schedule applies; use the location's base hours.
    #[serde(rename_all = "camelCase")]
    BaseSchedule { date: NaiveDate, weekday: Weekday },
}

impl ResolvedDay {
    pub(crate) fn base(date: NaiveDate) -> Self {
        ResolvedDay::BaseSchedule {
            date,
            weekday: date.weekday().into(),
        }
    }

    pub(crate) fn from_schedule(record: &ScheduleRecord, date: NaiveDate, hours: DayHours) -> Self {
        ResolvedDay::Override {
            date,
            weekday: date.weekday().into(),
            schedule_id: record.id.clone(),
            schedule_name: record.name.clone(),
            priority: record.priority,
            hours,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            ResolvedDay::Override { date, .. } | ResolvedDay::BaseSchedule { date, .. } => *date,
        }
    }

    pub fn weekday(&self) -> Weekday {
        match self {
            ResolvedDay::Override { weekday, .. } | ResolvedDay::BaseSchedule { weekday, .. } => *weekday,
        }
    }

    /// Overriding hours, or `None` when the base schedule applies.
    pub fn hours(&self) -> Option<DayHours> {
        match self {
            ResolvedDay::Override { hours, .. } => Some(*hours),
            ResolvedDay::BaseSchedule { .. } => None,
        }
    }

    pub fn schedule_id(&self) -> Option<&str> {
        match self {
            ResolvedDay::Override { schedule_id, .. } => Some(schedule_id),
            ResolvedDay::BaseSchedule { .. } => None,
        }
    }

    pub fn is_base_schedule(&self) -> bool {
        matches!(self, ResolvedDay::BaseSchedule { .. })
    }
}

/// A schedule paired with its listing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub schedule: ScheduleRecord,
    pub status: DisplayStatus,
}

/// One ranked candidate in an [`Explanation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub schedule_id: String,
    pub name: String,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&ScheduleRecord> for Candidate {
    fn from(record: &ScheduleRecord) -> Self {
        Self {
            schedule_id: record.id.clone(),
            name: record.name.clone(),
            priority: record.priority,
            created_at: record.created_at,
        }
    }
}

/// How a date's effective schedule was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub resolved: ResolvedDay,
    /// Active, current candidates, winner-first.
    pub ranked: Vec<Candidate>,
    pub inactive: usize,
    pub not_current: usize,
    pub decided_by_tie_break: bool,
}
