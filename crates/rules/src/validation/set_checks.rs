//! Set-level checks: ownership, id uniqueness, ambiguous ties.

use std::collections::HashMap;

use seasonal_core::{IntegrityError, IntegrityViolation, ScheduleRecord};

use crate::resolver::precedence;

use super::{schedule_path, ValidationResult};

pub(super) fn ownership_errors(location_id: &str, records: &[ScheduleRecord]) -> Vec<IntegrityError> {
    records
        .iter()
        .filter(|r| r.location_id != location_id)
        .map(|r| {
            IntegrityError::new(
                &r.id,
                IntegrityViolation::ForeignLocation {
                    expected: location_id.to_string(),
                    found: r.location_id.clone(),
                },
            )
        })
        .collect()
}

/// One error per repeated id (the first occurrence is not reported).
pub(super) fn duplicate_id_errors(records: &[ScheduleRecord]) -> Vec<IntegrityError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut errors = Vec::new();
    for record in records {
        let count = seen.entry(record.id.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            errors.push(IntegrityError::new(&record.id, IntegrityViolation::DuplicateId));
        }
    }
    errors
}

pub(super) fn validate_ownership(location_id: &str, records: &[ScheduleRecord], result: &mut ValidationResult) {
    for err in ownership_errors(location_id, records) {
        result.error(
            format!("{}.locationId", schedule_path(&err.schedule_id)),
            err.violation.to_string(),
        );
    }
}

pub(super) fn validate_unique_ids(records: &[ScheduleRecord], result: &mut ValidationResult) {
    for err in duplicate_id_errors(records) {
        result.error(
            format!("{}.id", schedule_path(&err.schedule_id)),
            format!("Schedule id '{}' is used more than once", err.schedule_id),
        );
    }
}

/// Warn about active pairs with identical range and priority: only the
/// creation-order tie-break tells them apart.
pub(super) fn warn_ambiguous_ties(records: &[ScheduleRecord], result: &mut ValidationResult) {
    let active: Vec<&ScheduleRecord> = records.iter().filter(|r| r.is_active).collect();
    for (i, a) in active.iter().enumerate() {
        for b in &active[i + 1..] {
            if a.id == b.id {
                continue;
            }
            if a.start_date == b.start_date && a.end_date == b.end_date && a.priority == b.priority {
                let (winner, loser) = if precedence(a, b).is_gt() { (a, b) } else { (b, a) };
                result.warn(
                    schedule_path(&loser.id),
                    format!(
                        "Same dates and priority as '{}', which wins by creation order",
                        winner.id
                    ),
                );
            }
        }
    }
}
