//! State for `seasonal watch`: when to re-resolve the followed location.

use std::time::Duration;

use chrono::NaiveDate;

use crate::cli::Command;

/// How often `watch` wakes up to check for a date rollover.
pub const DAY_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Hot-reload only serves the long-running `watch` command; one-shot
/// commands read the directory once and exit.
pub fn hot_reload_enabled(command: &Command, store_watch: bool) -> bool {
    store_watch && matches!(command, Command::Watch { .. })
}

/// Tracks which date was last printed for the followed location.
pub struct Follow {
    location: String,
    shown: Option<NaiveDate>,
}

impl Follow {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            shown: None,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// The followed location's files changed, or the date rolled over.
    pub fn needs_refresh(&self, today: NaiveDate, changed: Option<&str>) -> bool {
        self.shown != Some(today) || changed == Some(self.location.as_str())
    }

    pub fn mark_shown(&mut self, date: NaiveDate) {
        self.shown = Some(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn refreshes_on_first_pass_and_on_rollover() {
        let mut follow = Follow::new("sp-7");
        assert!(follow.needs_refresh(d("2025-02-08"), None));

        follow.mark_shown(d("2025-02-08"));
        assert!(!follow.needs_refresh(d("2025-02-08"), None));
        assert!(follow.needs_refresh(d("2025-02-09"), None));
    }

    #[test]
    fn refreshes_only_for_own_location_changes() {
        let mut follow = Follow::new("sp-7");
        follow.mark_shown(d("2025-02-08"));
        assert!(follow.needs_refresh(d("2025-02-08"), Some("sp-7")));
        assert!(!follow.needs_refresh(d("2025-02-08"), Some("sp-9")));
    }

    #[test]
    fn one_shot_commands_never_hot_reload() {
        let list = Command::List {
            location: "sp-7".into(),
            date: None,
        };
        let watch = Command::Watch {
            location: "sp-7".into(),
        };
        assert!(!hot_reload_enabled(&list, true));
        assert!(hot_reload_enabled(&watch, true));
        assert!(!hot_reload_enabled(&watch, false));
    }
}
