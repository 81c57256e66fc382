//! Schedule-set validation with structured errors and warnings.
//!
//! Errors are integrity violations: a set containing one must not reach the
//! resolver. Warnings are advisory and never block resolution.

mod record_checks;
mod set_checks;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use seasonal_core::{IntegrityError, ScheduleRecord};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Path-like location, e.g. `"schedules[winter].endDate"`.
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub(crate) fn schedule_path(id: &str) -> String {
    format!("schedules[{}]", id)
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a single record in isolation.
pub fn validate_record(record: &ScheduleRecord) -> ValidationResult {
    let mut result = ValidationResult::new();
    record_checks::validate_range(record, &mut result);
    record_checks::validate_working_hours(record, &mut result);
    record_checks::validate_priority(record, &mut result);
    result
}

/// Validate one location's full schedule set.
pub fn validate_schedule_set(location_id: &str, records: &[ScheduleRecord]) -> ValidationResult {
    let mut result = ValidationResult::new();
    for record in records {
        record_checks::validate_range(record, &mut result);
        record_checks::validate_working_hours(record, &mut result);
        record_checks::validate_priority(record, &mut result);
    }
    set_checks::validate_ownership(location_id, records, &mut result);
    set_checks::validate_unique_ids(records, &mut result);
    set_checks::warn_ambiguous_ties(records, &mut result);
    result
}

/// Every integrity violation in a location's schedule set, in record order.
pub fn integrity_errors(location_id: &str, records: &[ScheduleRecord]) -> Vec<IntegrityError> {
    let mut errors: Vec<IntegrityError> = records
        .iter()
        .filter_map(|r| r.check_integrity().err())
        .collect();
    errors.extend(set_checks::ownership_errors(location_id, records));
    errors.extend(set_checks::duplicate_id_errors(records));
    errors
}

/// Gate used before resolution: the first integrity violation, if any.
pub fn check_schedule_set(location_id: &str, records: &[ScheduleRecord]) -> Result<(), IntegrityError> {
    match integrity_errors(location_id, records).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
