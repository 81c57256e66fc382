//! Per-record checks: date range, weekday table, priority bounds.

use seasonal_core::{DayHours, ScheduleRecord};

use super::{schedule_path, ValidationResult};

/// Priorities outside this range are accepted but flagged.
pub(super) const PRIORITY_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

pub(super) fn validate_range(record: &ScheduleRecord, result: &mut ValidationResult) {
    if record.start_date > record.end_date {
        result.error_with_suggestion(
            format!("{}.endDate", schedule_path(&record.id)),
            format!(
                "End date {} is before start date {}",
                record.end_date, record.start_date
            ),
            format!(
                "swap the dates: startDate: {}, endDate: {}",
                record.end_date, record.start_date
            ),
        );
    }
}

pub(super) fn validate_working_hours(record: &ScheduleRecord, result: &mut ValidationResult) {
    let path = format!("{}.workingHours", schedule_path(&record.id));

    for day in record.working_hours.missing_days() {
        result.error(
            format!("{}.{}", path, day),
            format!("No entry for {}; every weekday must be listed", day),
        );
    }

    for (day, hours) in record.working_hours.iter() {
        if let DayHours::Open { start, end } = hours {
            if start >= end {
                result.warn(
                    format!("{}.{}", path, day),
                    format!(
                        "Opening time {} is not before closing time {}",
                        start.format("%H:%M"),
                        end.format("%H:%M")
                    ),
                );
            }
        }
    }
}

pub(super) fn validate_priority(record: &ScheduleRecord, result: &mut ValidationResult) {
    if !PRIORITY_RANGE.contains(&record.priority) {
        result.warn(
            format!("{}.priority", schedule_path(&record.id)),
            format!(
                "Priority {} is outside the usual range {}-{}",
                record.priority,
                PRIORITY_RANGE.start(),
                PRIORITY_RANGE.end()
            ),
        );
    }
}
