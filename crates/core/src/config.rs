use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key).as_deref() {
        Some("true") | Some("1") | Some("yes") => true,
        Some("false") | Some("0") | Some("no") => false,
        _ => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub store: ScheduleStoreConfig,
    pub resolution: ResolutionConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `SEASONAL_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("SEASONAL_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            store: ScheduleStoreConfig::from_env_profiled(p),
            resolution: ResolutionConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  store:       dir={}, watch={}", self.store.dir.display(), self.store.watch);
        tracing::info!(
            "  resolution:  cache_capacity={}, reference_date={}",
            self.resolution.cache_capacity,
            self.resolution
                .reference_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "(today)".to_string()),
        );
    }

    /// Summary view for `--json` output.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "store": { "dir": self.store.dir, "watch": self.store.watch },
            "resolution": {
                "cache_capacity": self.resolution.cache_capacity,
                "reference_date": self.resolution.reference_date,
            },
        })
    }
}

// ── Schedule store ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleStoreConfig {
    /// Directory scanned (recursively) for schedule YAML files.
    pub dir: PathBuf,
    /// Hot-reload the directory while `seasonal watch` runs.
    pub watch: bool,
}

impl ScheduleStoreConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            dir: PathBuf::from(profiled_env_or(p, "SCHEDULES_DIR", "data/schedules")),
            watch: profiled_env_bool(p, "SCHEDULES_WATCH", true),
        }
    }
}

// ── Resolution ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Entries kept by the `(location, date)` resolution cache; 0 disables it.
    pub cache_capacity: usize,
    /// Fixed "today" for reproducible runs. `None` uses the local date.
    pub reference_date: Option<NaiveDate>,
}

impl ResolutionConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            cache_capacity: profiled_env_usize(p, "SCHEDULE_CACHE_CAPACITY", 1024),
            reference_date: profiled_env_opt(p, "SCHEDULE_REFERENCE_DATE")
                .and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own profile prefix so parallel tests never share keys.

    #[test]
    fn profiled_key_wins_over_plain_key() {
        env::set_var("CFGTEST_A_SCHEDULES_DIR", "/srv/schedules");
        env::set_var("CFGTEST_A_SCHEDULE_REFERENCE_DATE", "2025-02-08");
        env::set_var("CFGTEST_A_SCHEDULES_WATCH", "no");

        let cfg = Config::for_profile("cfgtest_a");
        assert_eq!(cfg.profile_label(), "CFGTEST_A");
        assert_eq!(cfg.store.dir, PathBuf::from("/srv/schedules"));
        assert!(!cfg.store.watch);
        assert_eq!(
            cfg.resolution.reference_date,
            NaiveDate::from_ymd_opt(2025, 2, 8)
        );
    }

    #[test]
    fn unparsable_values_fall_back_to_defaults() {
        env::set_var("CFGTEST_B_SCHEDULE_CACHE_CAPACITY", "lots");
        env::set_var("CFGTEST_B_SCHEDULE_REFERENCE_DATE", "08/02/2025");

        let cfg = Config::for_profile("CFGTEST_B");
        assert_eq!(cfg.resolution.cache_capacity, 1024);
        assert_eq!(cfg.resolution.reference_date, None);
        assert!(cfg.store.watch);
    }
}
