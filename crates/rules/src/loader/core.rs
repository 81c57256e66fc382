//! Core [`DirectorySource`] struct: filesystem-backed schedule loading with optional hot-reload.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use seasonal_core::{ScheduleError, ScheduleRecord};

use crate::source::{ScheduleFilter, ScheduleSource};

use super::error::{LoadError, LoadResult, LoadStatus, Result};
use super::watcher::handle_fs_event;

/// Called with a location id whenever one of its schedule files changes.
pub type ChangeHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Shared record map, keyed by the file each record was loaded from.
pub(super) type RecordMap = Arc<RwLock<HashMap<PathBuf, ScheduleRecord>>>;

/// Filesystem-backed schedule source with optional hot-reload.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` files and keeps the
/// parsed records in memory. Parse failures are reported per file and never
/// abort a scan.
pub struct DirectorySource {
    /// Root directory containing schedule YAML files.
    dir: PathBuf,
    /// In-memory store of all loaded records.
    records: RecordMap,
    /// Active filesystem watcher (held to keep it alive).
    _watcher: Option<RecommendedWatcher>,
}

impl DirectorySource {
    /// Create a source for the given directory. Nothing is read until
    /// [`load_all`](DirectorySource::load_all).
    pub fn new(dir: PathBuf) -> Self {
        // Watcher events carry absolute paths; keys must match them.
        let dir = fs::canonicalize(&dir).unwrap_or(dir);
        Self {
            dir,
            records: Arc::new(RwLock::new(HashMap::new())),
            _watcher: None,
        }
    }

    /// Recursively scan the directory and load all YAML files.
    ///
    /// Dotfiles (filenames starting with `.`) and non-YAML files are skipped.
    pub fn load_all(&self) -> Result<Vec<LoadResult>> {
        let mut results = Vec::new();
        self.scan_dir_recursive(&self.dir, &mut results)?;
        Ok(results)
    }

    /// Recursively scan a directory for YAML schedule files.
    fn scan_dir_recursive(&self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to read directory");
                return Ok(());
            }
        };

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if is_dotfile(&path) {
                if path.is_file() {
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Skipped {
                            reason: "dotfile".to_string(),
                        },
                    });
                }
                continue;
            }

            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            if !is_yaml(&path) {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Skipped {
                        reason: "not a YAML file".to_string(),
                    },
                });
                continue;
            }

            match self.load_file(&path) {
                Ok(record) => {
                    info!(
                        schedule_id = %record.id,
                        location_id = %record.location_id,
                        path = %path.display(),
                        "loaded schedule"
                    );
                    let status = LoadStatus::Loaded {
                        schedule_id: record.id.clone(),
                        location_id: record.location_id.clone(),
                    };
                    self.records
                        .write()
                        .expect("records lock poisoned")
                        .insert(path.clone(), record);
                    results.push(LoadResult { path, status });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load schedule file");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse a single YAML file into a [`ScheduleRecord`].
    pub fn load_file(&self, path: &Path) -> Result<ScheduleRecord> {
        let contents = fs::read_to_string(path)?;
        parse_record(&contents)
    }

    /// Start a filesystem watcher with 500ms debounce.
    ///
    /// On file create/modify the record is re-parsed and upserted; on delete
    /// it is removed. `on_change` receives the location id of every affected
    /// record so dependent caches can be invalidated. Parse errors are logged
    /// and the previous version is kept.
    pub fn watch(&mut self, on_change: Option<ChangeHook>) -> Result<()> {
        let records = Arc::clone(&self.records);

        let mut watcher = notify::recommended_watcher(move |res: std::result::Result<notify::Event, notify::Error>| {
            match res {
                Ok(event) => handle_fs_event(&event, &records, on_change.as_ref()),
                Err(e) => warn!(error = %e, "filesystem watcher error"),
            }
        })?;

        watcher.watch(&self.dir, RecursiveMode::Recursive)?;

        let _ = watcher.configure(notify::Config::default().with_poll_interval(Duration::from_millis(500)));

        info!(path = %self.dir.display(), "watching schedules directory for changes (recursive)");
        self._watcher = Some(watcher);
        Ok(())
    }

    /// Get the schedules directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Distinct location ids across all loaded records, sorted.
    pub fn locations(&self) -> Vec<String> {
        let guard = self.records.read().expect("records lock poisoned");
        guard
            .values()
            .map(|r| r.location_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of loaded records.
    pub fn len(&self) -> usize {
        self.records.read().expect("records lock poisoned").len()
    }

    /// Whether no records are loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(super) fn records(&self) -> RecordMap {
        Arc::clone(&self.records)
    }
}

impl ScheduleSource for DirectorySource {
    fn list_schedules(
        &self,
        location_id: &str,
        filter: &ScheduleFilter,
    ) -> seasonal_core::Result<Vec<ScheduleRecord>> {
        let guard = self.records.read().map_err(|_| {
            ScheduleError::from_source(LoadError::Validation("records lock poisoned".to_string()))
        })?;
        let mut found: Vec<ScheduleRecord> = guard
            .values()
            .filter(|r| r.location_id == location_id && filter.matches(r))
            .cloned()
            .collect();
        // Map iteration order is arbitrary; listings should not be.
        found.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }
}

/// Parse YAML text into a record, rejecting empty identifiers.
pub(super) fn parse_record(contents: &str) -> Result<ScheduleRecord> {
    let record: ScheduleRecord = serde_yaml::from_str(contents)?;
    if record.id.trim().is_empty() {
        return Err(LoadError::Validation("schedule id must not be empty".to_string()));
    }
    if record.location_id.trim().is_empty() {
        return Err(LoadError::Validation(format!(
            "schedule '{}' has an empty locationId",
            record.id
        )));
    }
    Ok(record)
}

pub(super) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "yml" || e == "yaml")
        .unwrap_or(false)
}

pub(super) fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
