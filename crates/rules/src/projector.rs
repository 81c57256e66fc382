//! Working-hours projection: the hours a resolved schedule sets for one day.

use chrono::{Datelike, NaiveDate};

use seasonal_core::{DayHours, IntegrityError, IntegrityViolation, ScheduleRecord, Weekday};

/// Look up the hours `record` defines for `day`.
///
/// A missing weekday is reported as an integrity error. It is never treated
/// as "closed" or "use the base schedule".
pub fn project_day(record: &ScheduleRecord, day: Weekday) -> Result<DayHours, IntegrityError> {
    record
        .working_hours
        .get(day)
        .copied()
        .ok_or_else(|| IntegrityError::new(&record.id, IntegrityViolation::MissingWeekday(day)))
}

/// [`project_day`] for the weekday `date` falls on.
pub fn project_date(record: &ScheduleRecord, date: NaiveDate) -> Result<DayHours, IntegrityError> {
    project_day(record, date.weekday().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seasonal_core::WorkingHours;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record() -> ScheduleRecord {
        ScheduleRecord::new("s1", "loc", "Spring", d("2025-03-01"), d("2025-05-31")).with_hours(
            WorkingHours::uniform(DayHours::open("08:00", "20:00").unwrap())
                .with(Weekday::Monday, DayHours::Closed)
                .with(Weekday::Saturday, DayHours::open("10:00", "14:00").unwrap()),
        )
    }

    #[test]
    fn closed_day_projects_as_non_working() {
        let hours = project_day(&record(), Weekday::Monday).unwrap();
        assert!(!hours.is_working_day());
        assert_eq!(hours, DayHours::Closed);
    }

    #[test]
    fn working_day_projects_exact_times() {
        let hours = project_day(&record(), Weekday::Saturday).unwrap();
        assert!(hours.is_working_day());
        assert_eq!(hours.start().unwrap().format("%H:%M").to_string(), "10:00");
        assert_eq!(hours.end().unwrap().format("%H:%M").to_string(), "14:00");
    }

    #[test]
    fn date_uses_its_weekday() {
        // 2025-03-08 is a Saturday, 2025-03-10 a Monday.
        assert_eq!(
            project_date(&record(), d("2025-03-08")).unwrap(),
            DayHours::open("10:00", "14:00").unwrap()
        );
        assert_eq!(project_date(&record(), d("2025-03-10")).unwrap(), DayHours::Closed);
    }

    #[test]
    fn missing_weekday_is_an_integrity_error() {
        let mut sparse = record();
        sparse.working_hours = sparse.working_hours.without(Weekday::Sunday);
        let err = project_day(&sparse, Weekday::Sunday).unwrap_err();
        assert_eq!(err.schedule_id, "s1");
        assert_eq!(err.violation, IntegrityViolation::MissingWeekday(Weekday::Sunday));
    }
}
