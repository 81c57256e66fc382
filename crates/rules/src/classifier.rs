//! Lifecycle classification of a schedule relative to a reference date.
//!
//! Status is always derived from `(start_date, end_date)` and the reference
//! date. The `is_active` flag is a separate axis: [`classify`] ignores it,
//! [`display_status`] folds it in for listings.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use seasonal_core::ScheduleRecord;

/// Date-based lifecycle status of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Current,
    Upcoming,
    Past,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Current => write!(f, "current"),
            ScheduleStatus::Upcoming => write!(f, "upcoming"),
            ScheduleStatus::Past => write!(f, "past"),
        }
    }
}

/// Status shown in listings: inactive records are labelled as such
/// regardless of their dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Current,
    Upcoming,
    Past,
    Inactive,
}

impl From<ScheduleStatus> for DisplayStatus {
    fn from(status: ScheduleStatus) -> Self {
        match status {
            ScheduleStatus::Current => DisplayStatus::Current,
            ScheduleStatus::Upcoming => DisplayStatus::Upcoming,
            ScheduleStatus::Past => DisplayStatus::Past,
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStatus::Current => write!(f, "current"),
            DisplayStatus::Upcoming => write!(f, "upcoming"),
            DisplayStatus::Past => write!(f, "past"),
            DisplayStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Classify a schedule at `date`. Both range bounds are inclusive.
pub fn classify(record: &ScheduleRecord, date: NaiveDate) -> ScheduleStatus {
    if record.start_date > date {
        ScheduleStatus::Upcoming
    } else if record.end_date < date {
        ScheduleStatus::Past
    } else {
        ScheduleStatus::Current
    }
}

/// Classify a schedule against [`today`].
pub fn classify_today(record: &ScheduleRecord) -> ScheduleStatus {
    classify(record, today())
}

pub fn display_status(record: &ScheduleRecord, date: NaiveDate) -> DisplayStatus {
    if !record.is_active {
        return DisplayStatus::Inactive;
    }
    classify(record, date).into()
}
