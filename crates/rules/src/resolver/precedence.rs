//! Precedence order between overlapping schedules.

use std::cmp::Ordering;

use seasonal_core::ScheduleRecord;

/// Compare two schedules by precedence; `Ordering::Greater` means `a` wins.
///
/// 1. Higher `priority` wins.
/// 2. On equal priority, the later `created_at` wins (most recently created).
/// 3. On identical creation stamps, the greater `id` (byte-wise) wins.
///
/// Step 3 only matters for records created in the same instant, but it makes
/// the order total for any set with unique ids.
pub fn precedence(a: &ScheduleRecord, b: &ScheduleRecord) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort winner-first.
pub fn rank(records: &mut [&ScheduleRecord]) {
    records.sort_by(|a, b| precedence(b, a));
}
