//! [`ScheduleBook`]: answers "what is effective when?" for service locations.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use seasonal_core::config::ResolutionConfig;
use seasonal_core::{DateRange, IntegrityError, Result, ScheduleRecord};

use crate::classifier::{display_status, today};
use crate::projector::project_date;
use crate::resolver::{explain_active, next_upcoming, resolve_active, resolve_active_for_period};
use crate::source::{ScheduleFilter, ScheduleSource};
use crate::validation::{check_schedule_set, validate_schedule_set, ValidationResult};

use super::cache::ResolutionCache;
use super::resolved::{Candidate, Explanation, ResolvedDay, StatusEntry};

/// Facade over a [`ScheduleSource`].
///
/// Resolution queries fetch only active records and refuse to resolve a set
/// that violates an integrity invariant; listing and validation queries fetch
/// everything and never refuse.
pub struct ScheduleBook<S> {
    source: S,
    cache: Option<Arc<ResolutionCache>>,
    /// Pinned "today"; `None` uses the local date.
    reference_date: Option<NaiveDate>,
}

impl<S: ScheduleSource> ScheduleBook<S> {
    /// Uncached book using the local date as "today".
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: None,
            reference_date: None,
        }
    }

    /// Build from a [`ResolutionConfig`]: cache capacity 0 disables caching.
    pub fn from_config(source: S, config: &ResolutionConfig) -> Self {
        Self::new(source)
            .with_cache(config.cache_capacity)
            .with_reference_date(config.reference_date)
    }

    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = (capacity > 0).then(|| Arc::new(ResolutionCache::new(capacity)));
        self
    }

    pub fn with_reference_date(mut self, date: Option<NaiveDate>) -> Self {
        self.reference_date = date;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Shared handle to the cache, e.g. for a reload hook to invalidate.
    pub fn cache(&self) -> Option<Arc<ResolutionCache>> {
        self.cache.clone()
    }

    /// The date "today" queries resolve against.
    pub fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(today)
    }

    /// Drop cached resolutions for one location.
    pub fn invalidate(&self, location_id: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate_location(location_id);
        }
    }

    // ── Resolution ──────────────────────────────────────────────────

    /// Effective hours for `location_id` on `date`.
    ///
    /// Returns [`ResolvedDay::BaseSchedule`] when no seasonal schedule applies.
    /// Fails with an integrity error if the location's active records are
    /// malformed, or with the source's error if fetching fails.
    pub fn effective_schedule_for(&self, location_id: &str, date: NaiveDate) -> Result<ResolvedDay> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(location_id, date)) {
            return Ok(hit);
        }

        let generation = self.generation(location_id);
        let records = self.load_checked(location_id)?;
        let resolved = resolve_day(&records, date)?;
        debug!(
            location_id = %location_id,
            date = %date,
            schedule_id = resolved.schedule_id().unwrap_or("(base)"),
            "resolved effective schedule"
        );

        self.store(location_id, generation, &resolved);
        Ok(resolved)
    }

    /// [`effective_schedule_for`](Self::effective_schedule_for) at [`today`](Self::today).
    pub fn effective_today(&self, location_id: &str) -> Result<ResolvedDay> {
        self.effective_schedule_for(location_id, self.today())
    }

    /// Day-by-day effective hours across `range`, from a single fetch.
    pub fn effective_calendar(&self, location_id: &str, range: &DateRange) -> Result<Vec<ResolvedDay>> {
        let generation = self.generation(location_id);
        let records = self.load_checked(location_id)?;
        let mut days = Vec::with_capacity(range.len_days().max(0) as usize);
        for date in range.days() {
            let resolved = resolve_day(&records, date)?;
            self.store(location_id, generation, &resolved);
            days.push(resolved);
        }
        Ok(days)
    }

    /// Resolution at `date` together with the ranked candidates.
    pub fn explain(&self, location_id: &str, date: NaiveDate) -> Result<Explanation> {
        // Inactive records are fetched only to be counted; integrity is
        // enforced on the same subset every other resolution query checks.
        let records = self.source.list_schedules(location_id, &ScheduleFilter::all())?;
        let active: Vec<ScheduleRecord> = records.iter().filter(|r| r.is_active).cloned().collect();
        check_schedule_set(location_id, &active)?;

        let resolution = explain_active(&records, date);
        let resolved = resolve_day(&records, date)?;
        Ok(Explanation {
            resolved,
            ranked: resolution.ranked.iter().map(|r| Candidate::from(*r)).collect(),
            inactive: resolution.inactive,
            not_current: resolution.not_current,
            decided_by_tie_break: resolution.decided_by_tie_break(),
        })
    }

    /// The active schedule that starts soonest after `date`.
    pub fn next_upcoming(&self, location_id: &str, date: NaiveDate) -> Result<Option<ScheduleRecord>> {
        let records = self.load_checked(location_id)?;
        Ok(next_upcoming(&records, date).cloned())
    }

    // ── Conflicts ───────────────────────────────────────────────────

    /// Active schedules overlapping `range`, other than `excluding_id`.
    ///
    /// Priority is ignored: every overlap is reported. This is a read; what
    /// to do about a conflict is the caller's decision.
    pub fn find_conflicts(
        &self,
        location_id: &str,
        range: &DateRange,
        excluding_id: Option<&str>,
    ) -> Result<Vec<ScheduleRecord>> {
        let records = self.load_checked(location_id)?;
        let conflicts: Vec<ScheduleRecord> = resolve_active_for_period(&records, range)
            .into_iter()
            .filter(|r| Some(r.id.as_str()) != excluding_id)
            .cloned()
            .collect();
        debug!(
            location_id = %location_id,
            range = %range,
            conflicts = conflicts.len(),
            "checked schedule conflicts"
        );
        Ok(conflicts)
    }

    // ── Listing & validation ────────────────────────────────────────

    /// Every schedule of the location with its display status at `date`.
    pub fn statuses(&self, location_id: &str, date: NaiveDate) -> Result<Vec<StatusEntry>> {
        let records = self.source.list_schedules(location_id, &ScheduleFilter::all())?;
        Ok(records
            .into_iter()
            .map(|schedule| {
                let status = display_status(&schedule, date);
                StatusEntry { schedule, status }
            })
            .collect())
    }

    /// Full validation report for one location.
    pub fn validate_location(&self, location_id: &str) -> Result<ValidationResult> {
        let records = self.source.list_schedules(location_id, &ScheduleFilter::all())?;
        Ok(validate_schedule_set(location_id, &records))
    }

    /// Cache generation to read before fetching; 0 when uncached.
    fn generation(&self, location_id: &str) -> u64 {
        self.cache.as_ref().map_or(0, |c| c.generation(location_id))
    }

    /// Cache a resolution unless the location was invalidated after `generation`.
    fn store(&self, location_id: &str, generation: u64, resolved: &ResolvedDay) {
        if let Some(cache) = &self.cache {
            cache.put_if_current(location_id, generation, resolved.clone());
        }
    }

    /// Fetch the location's active records and enforce integrity.
    fn load_checked(&self, location_id: &str) -> Result<Vec<ScheduleRecord>> {
        let records = self.source.list_schedules(location_id, &ScheduleFilter::active())?;
        check_schedule_set(location_id, &records)?;
        Ok(records)
    }
}

fn resolve_day(records: &[ScheduleRecord], date: NaiveDate) -> std::result::Result<ResolvedDay, IntegrityError> {
    match resolve_active(records, date) {
        Some(record) => Ok(ResolvedDay::from_schedule(record, date, project_date(record, date)?)),
        None => Ok(ResolvedDay::base(date)),
    }
}
