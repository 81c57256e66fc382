use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;
use lru::LruCache;
use tracing::debug;

use super::resolved::ResolvedDay;

struct Entries {
    days: LruCache<(String, NaiveDate), ResolvedDay>,
    /// Bumped per location by `invalidate_location`.
    generations: HashMap<String, u64>,
    /// Bumped by `clear`; part of every location's generation.
    epoch: u64,
}

impl Entries {
    fn generation(&self, location_id: &str) -> u64 {
        self.epoch + self.generations.get(location_id).copied().unwrap_or(0)
    }
}

/// LRU cache of resolved days keyed by `(location_id, date)`.
///
/// Entries never expire on their own: whoever changes a location's records
/// must call [`invalidate_location`](ResolutionCache::invalidate_location).
///
/// A resolution computed from records fetched before an invalidation must not
/// be stored after it. Readers take a [`generation`](ResolutionCache::generation)
/// before fetching and store with [`put_if_current`](ResolutionCache::put_if_current).
pub struct ResolutionCache {
    entries: Mutex<Entries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Entries {
                days: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
                generations: HashMap::new(),
                epoch: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a resolved day.
    pub fn get(&self, location_id: &str, date: NaiveDate) -> Option<ResolvedDay> {
        let mut entries = self.entries.lock().expect("resolution cache lock poisoned");
        match entries.days.get(&(location_id.to_string(), date)) {
            Some(day) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(day.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Current generation of a location. Changes on every invalidation.
    pub fn generation(&self, location_id: &str) -> u64 {
        self.entries
            .lock()
            .expect("resolution cache lock poisoned")
            .generation(location_id)
    }

    /// Store a resolved day unconditionally.
    pub fn put(&self, location_id: &str, day: ResolvedDay) {
        let key = (location_id.to_string(), day.date());
        self.entries
            .lock()
            .expect("resolution cache lock poisoned")
            .days
            .put(key, day);
    }

    /// Store a resolved day only if the location has not been invalidated
    /// since `generation` was read. Returns whether it was stored.
    pub fn put_if_current(&self, location_id: &str, generation: u64, day: ResolvedDay) -> bool {
        let mut entries = self.entries.lock().expect("resolution cache lock poisoned");
        if entries.generation(location_id) != generation {
            debug!(location_id = %location_id, date = %day.date(), "discarded resolution from before invalidation");
            return false;
        }
        entries.days.put((location_id.to_string(), day.date()), day);
        true
    }

    /// Drop every entry for one location. Returns how many were removed.
    pub fn invalidate_location(&self, location_id: &str) -> usize {
        let mut entries = self.entries.lock().expect("resolution cache lock poisoned");
        *entries.generations.entry(location_id.to_string()).or_insert(0) += 1;
        let stale: Vec<(String, NaiveDate)> = entries
            .days
            .iter()
            .filter(|((loc, _), _)| loc == location_id)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &stale {
            entries.days.pop(key);
        }
        debug!(location_id = %location_id, removed = stale.len(), "invalidated resolution cache");
        stale.len()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("resolution cache lock poisoned");
        entries.epoch += 1;
        entries.days.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("resolution cache lock poisoned").days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}
