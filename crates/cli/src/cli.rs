use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Seasonal schedule lookup for tire-service locations.
///
/// Reads schedule YAML files from a directory and answers which working
/// hours are in effect for a location on a given date.
#[derive(Parser, Debug)]
#[command(name = "seasonal", version, about = "Seasonal schedule lookup for service locations")]
pub struct CliArgs {
    /// Schedules directory (overrides SCHEDULES_DIR and its profiled variant)
    #[arg(long, global = true)]
    pub schedules_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Effective hours for one date (default: today)
    Effective {
        #[arg(long)]
        location: String,
        /// ISO date, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Show every candidate and how the winner was chosen
        #[arg(long)]
        explain: bool,
    },

    /// Day-by-day effective hours across an inclusive date range
    Calendar {
        #[arg(long)]
        location: String,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// Active schedules overlapping a proposed date range
    Conflicts {
        #[arg(long)]
        location: String,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        /// Schedule being edited; never reported as its own conflict
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Every schedule of a location with its status
    List {
        #[arg(long)]
        location: String,
        /// Reference date for statuses (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Validate one location, or every location found
    Validate {
        #[arg(long)]
        location: Option<String>,
    },

    /// Print today's hours and reprint whenever the location's files change
    Watch {
        #[arg(long)]
        location: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_effective_with_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "seasonal", "effective", "--location", "sp-7", "--date", "2025-02-08", "--json",
        ])
        .unwrap();
        assert!(args.json);
        assert_eq!(
            args.command,
            Command::Effective {
                location: "sp-7".into(),
                date: Some(d("2025-02-08")),
                explain: false,
            }
        );
    }

    #[test]
    fn parses_conflicts_with_exclusion() {
        let args = CliArgs::try_parse_from([
            "seasonal",
            "--schedules-dir",
            "/tmp/schedules",
            "conflicts",
            "--location",
            "sp-7",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
            "--exclude",
            "summer",
        ])
        .unwrap();
        assert_eq!(args.schedules_dir, Some(PathBuf::from("/tmp/schedules")));
        match args.command {
            Command::Conflicts { from, to, exclude, .. } => {
                assert_eq!(from, d("2025-06-01"));
                assert_eq!(to, d("2025-06-30"));
                assert_eq!(exclude.as_deref(), Some("summer"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_iso_dates() {
        assert!(CliArgs::try_parse_from([
            "seasonal", "effective", "--location", "sp-7", "--date", "08/02/2025",
        ])
        .is_err());
    }

    #[test]
    fn calendar_requires_both_bounds() {
        assert!(CliArgs::try_parse_from([
            "seasonal", "calendar", "--location", "sp-7", "--from", "2025-02-01",
        ])
        .is_err());
    }

    #[test]
    fn validate_location_is_optional() {
        let args = CliArgs::try_parse_from(["seasonal", "validate"]).unwrap();
        assert_eq!(args.command, Command::Validate { location: None });
    }
}
