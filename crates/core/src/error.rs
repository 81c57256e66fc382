use chrono::NaiveDate;
use thiserror::Error;

use crate::hours::Weekday;

#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A record violates a model invariant and cannot be resolved.
    #[error("Data integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// The collaborator supplying records failed; passed through untouched.
    #[error("Schedule source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ScheduleError {
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ScheduleError::Source(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// A malformed schedule record, tagged with the offending record's id.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schedule '{schedule_id}': {violation}")]
pub struct IntegrityError {
    pub schedule_id: String,
    pub violation: IntegrityViolation,
}

impl IntegrityError {
    pub fn new(schedule_id: impl Into<String>, violation: IntegrityViolation) -> Self {
        Self {
            schedule_id: schedule_id.into(),
            violation,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("working hours have no entry for {0}")]
    MissingWeekday(Weekday),

    #[error("belongs to location '{found}', expected '{expected}'")]
    ForeignLocation { expected: String, found: String },

    #[error("id is used by more than one schedule of the location")]
    DuplicateId,
}
