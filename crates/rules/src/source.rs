//! Collaborator seam: where schedule records come from.
//!
//! The facade only ever reads through [`ScheduleSource`]. Filters passed to a
//! source are a pre-filter optimisation; the facade re-derives status itself,
//! so a source that ignores them entirely is still correct.

use chrono::NaiveDate;

use seasonal_core::{DateRange, Result, ScheduleRecord};

use crate::classifier::{classify, today, ScheduleStatus};

/// Read access to the schedules of one service location.
pub trait ScheduleSource {
    fn list_schedules(&self, location_id: &str, filter: &ScheduleFilter) -> Result<Vec<ScheduleRecord>>;
}

impl<S: ScheduleSource + ?Sized> ScheduleSource for &S {
    fn list_schedules(&self, location_id: &str, filter: &ScheduleFilter) -> Result<Vec<ScheduleRecord>> {
        (**self).list_schedules(location_id, filter)
    }
}

impl<S: ScheduleSource + ?Sized> ScheduleSource for std::sync::Arc<S> {
    fn list_schedules(&self, location_id: &str, filter: &ScheduleFilter) -> Result<Vec<ScheduleRecord>> {
        (**self).list_schedules(location_id, filter)
    }
}

// ── Filter ──────────────────────────────────────────────────────────

/// Optional narrowing applied by a source before records are returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    /// Drop records with `is_active == false`.
    pub active_only: bool,
    /// Keep only records with this status at `as_of`.
    pub status: Option<ScheduleStatus>,
    /// Reference date for `status`; `None` means today.
    pub as_of: Option<NaiveDate>,
    /// Keep only records sharing at least one day with this range.
    pub overlapping: Option<DateRange>,
}

impl ScheduleFilter {
    /// No narrowing.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: ScheduleStatus, as_of: NaiveDate) -> Self {
        self.status = Some(status);
        self.as_of = Some(as_of);
        self
    }

    pub fn overlapping(mut self, range: DateRange) -> Self {
        self.overlapping = Some(range);
        self
    }

    pub fn matches(&self, record: &ScheduleRecord) -> bool {
        if self.active_only && !record.is_active {
            return false;
        }
        if let Some(range) = &self.overlapping {
            if !record.overlaps(range) {
                return false;
            }
        }
        if let Some(status) = self.status {
            let as_of = self.as_of.unwrap_or_else(today);
            if classify(record, as_of) != status {
                return false;
            }
        }
        true
    }
}

// ── In-memory source ────────────────────────────────────────────────

/// A fixed set of records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<ScheduleRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<ScheduleRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }
}

impl FromIterator<ScheduleRecord> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = ScheduleRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl ScheduleSource for InMemorySource {
    fn list_schedules(&self, location_id: &str, filter: &ScheduleFilter) -> Result<Vec<ScheduleRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.location_id == location_id && filter.matches(r))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn source() -> InMemorySource {
        vec![
            ScheduleRecord::new("w", "loc-1", "Winter", d("2025-01-01"), d("2025-03-31")),
            ScheduleRecord::new("s", "loc-1", "Summer", d("2025-06-01"), d("2025-08-31")),
            ScheduleRecord::new("x", "loc-1", "Old", d("2025-01-01"), d("2025-12-31")).with_active(false),
            ScheduleRecord::new("o", "loc-2", "Other", d("2025-01-01"), d("2025-12-31")),
        ]
        .into_iter()
        .collect()
    }

    fn ids(records: Vec<ScheduleRecord>) -> Vec<String> {
        records.into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn lists_only_the_requested_location() {
        let got = source().list_schedules("loc-1", &ScheduleFilter::all()).unwrap();
        assert_eq!(ids(got), vec!["w", "s", "x"]);
        assert!(source().list_schedules("nowhere", &ScheduleFilter::all()).unwrap().is_empty());
    }

    #[test]
    fn filter_by_activity_status_and_overlap() {
        let src = source();

        let active = src.list_schedules("loc-1", &ScheduleFilter::active()).unwrap();
        assert_eq!(ids(active), vec!["w", "s"]);

        let upcoming = ScheduleFilter::active().with_status(ScheduleStatus::Upcoming, d("2025-02-01"));
        assert_eq!(ids(src.list_schedules("loc-1", &upcoming).unwrap()), vec!["s"]);

        let july = DateRange::new(d("2025-07-01"), d("2025-07-31")).unwrap();
        let overlapping = ScheduleFilter::all().overlapping(july);
        assert_eq!(ids(src.list_schedules("loc-1", &overlapping).unwrap()), vec!["s", "x"]);
    }

    #[test]
    fn borrowed_source_is_a_source() {
        fn count<S: ScheduleSource>(src: S, location_id: &str) -> usize {
            src.list_schedules(location_id, &ScheduleFilter::all()).unwrap().len()
        }
        let src = source();
        assert_eq!(count(&src, "loc-2"), 1);
        assert_eq!(count(std::sync::Arc::new(src), "loc-1"), 3);
    }
}
