mod cli;
mod follow;
mod terminal;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use tracing::{info, warn};

use seasonal_core::config::{load_dotenv, Config};
use seasonal_core::DateRange;
use seasonal_rules::loader::LoadStatus;
use seasonal_rules::{ChangeHook, DirectorySource, ScheduleBook};

use crate::cli::{CliArgs, Command};
use crate::follow::{hot_reload_enabled, Follow, DAY_CHECK_INTERVAL};
use crate::terminal::Terminal;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let terminal = Terminal::new(args.json);

    load_dotenv();
    let mut config = Config::from_env();
    if let Some(dir) = args.schedules_dir.clone() {
        config.store.dir = dir;
    }
    config.log_summary();

    let mut source = DirectorySource::new(config.store.dir.clone());
    let results = source
        .load_all()
        .with_context(|| format!("failed to scan {}", config.store.dir.display()))?;
    let failed = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Failed { .. }))
        .count();
    if failed > 0 {
        warn!(failed, "some schedule files could not be loaded");
    }
    info!(schedules = source.len(), locations = source.locations().len(), "schedules loaded");

    // Reload notifications are drained into cache invalidation by the owner
    // of the book, which lives on this thread.
    let (changes_tx, changes_rx) = mpsc::channel::<String>();
    if hot_reload_enabled(&args.command, config.store.watch) {
        let hook: ChangeHook = Arc::new(move |location: &str| {
            let _ = changes_tx.send(location.to_string());
        });
        source
            .watch(Some(hook))
            .context("failed to watch schedules directory")?;
    }

    let book = ScheduleBook::from_config(source, &config.resolution);
    run(args.command, &book, &terminal, &changes_rx)
}

fn range(from: chrono::NaiveDate, to: chrono::NaiveDate) -> Result<DateRange> {
    match DateRange::new(from, to) {
        Some(range) => Ok(range),
        None => bail!("--from {} is after --to {}", from, to),
    }
}

fn run(
    command: Command,
    book: &ScheduleBook<DirectorySource>,
    terminal: &Terminal,
    changes: &mpsc::Receiver<String>,
) -> Result<()> {
    match command {
        Command::Effective {
            location,
            date,
            explain,
        } => {
            let date = date.unwrap_or_else(|| book.today());
            if explain {
                let explanation = book
                    .explain(&location, date)
                    .with_context(|| format!("failed to explain {} on {}", location, date))?;
                terminal.print_explanation(&location, &explanation)
            } else {
                let day = book
                    .effective_schedule_for(&location, date)
                    .with_context(|| format!("failed to resolve {} on {}", location, date))?;
                terminal.print_day(&location, &day)
            }
        }

        Command::Calendar { location, from, to } => {
            let range = range(from, to)?;
            let days = book
                .effective_calendar(&location, &range)
                .with_context(|| format!("failed to resolve {} over {}", location, range))?;
            terminal.print_calendar(&location, &range, &days)
        }

        Command::Conflicts {
            location,
            from,
            to,
            exclude,
        } => {
            let range = range(from, to)?;
            let conflicts = book
                .find_conflicts(&location, &range, exclude.as_deref())
                .with_context(|| format!("failed to check conflicts for {}", location))?;
            terminal.print_conflicts(&location, &range, &conflicts)
        }

        Command::List { location, date } => {
            let date = date.unwrap_or_else(|| book.today());
            let entries = book
                .statuses(&location, date)
                .with_context(|| format!("failed to list schedules for {}", location))?;
            terminal.print_statuses(&location, date, &entries)
        }

        Command::Validate { location } => {
            let locations = match location {
                Some(location) => vec![location],
                None => book.source().locations(),
            };
            if locations.is_empty() {
                terminal.print_info("No schedules found")?;
            }
            let mut invalid = 0;
            for location in &locations {
                let report = book.validate_location(location)?;
                if !report.valid {
                    invalid += 1;
                }
                terminal.print_validation(location, &report)?;
            }
            if invalid > 0 {
                bail!("{} location(s) failed validation", invalid);
            }
            Ok(())
        }

        Command::Watch { location } => {
            let mut follow = Follow::new(location);
            refresh(book, terminal, &mut follow)?;
            terminal.print_info("Watching for schedule changes (Ctrl+C to stop)")?;

            loop {
                let changed = match changes.recv_timeout(DAY_CHECK_INTERVAL) {
                    Ok(changed) => {
                        book.invalidate(&changed);
                        Some(changed)
                    }
                    Err(RecvTimeoutError::Timeout) => None,
                    // Hot-reload is off: only the date can change.
                    Err(RecvTimeoutError::Disconnected) => {
                        std::thread::sleep(DAY_CHECK_INTERVAL);
                        None
                    }
                };
                if follow.needs_refresh(book.today(), changed.as_deref()) {
                    refresh(book, terminal, &mut follow)?;
                }
            }
        }
    }
}

/// Resolve and print today's hours for the followed location.
fn refresh(
    book: &ScheduleBook<DirectorySource>,
    terminal: &Terminal,
    follow: &mut Follow,
) -> Result<()> {
    let today = book.today();
    match book.effective_schedule_for(follow.location(), today) {
        Ok(day) => terminal.print_day(follow.location(), &day)?,
        Err(e) => {
            warn!(location_id = %follow.location(), error = %e, "failed to resolve schedule")
        }
    }
    follow.mark_shown(today);
    Ok(())
}
