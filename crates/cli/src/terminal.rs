use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};

use seasonal_core::{DateRange, DayHours, ScheduleRecord};
use seasonal_rules::{DisplayStatus, Explanation, ResolvedDay, StatusEntry, ValidationResult};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const OPEN: Color = Color::Green;
    const CLOSED: Color = Color::Red;
    const WARNING: Color = Color::Yellow;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
    const HEADER: Color = Color::Magenta;
}

fn status_color(status: DisplayStatus) -> Color {
    match status {
        DisplayStatus::Current => Color::Green,
        DisplayStatus::Upcoming => Color::Cyan,
        DisplayStatus::Past => Colors::DIM,
        DisplayStatus::Inactive => Colors::WARNING,
    }
}

fn day_color(day: &ResolvedDay) -> Color {
    match day.hours() {
        Some(DayHours::Open { .. }) => Colors::OPEN,
        Some(DayHours::Closed) => Colors::CLOSED,
        None => Colors::DIM,
    }
}

/// One line describing a resolved day.
pub fn describe_day(day: &ResolvedDay) -> String {
    match day {
        ResolvedDay::Override {
            date,
            weekday,
            schedule_id,
            schedule_name,
            priority,
            hours,
        } => format!(
            "{} {:<9} {:<11} {} ({}, priority {})",
            date,
            weekday.as_str(),
            hours.to_string(),
            schedule_id,
            schedule_name,
            priority
        ),
        ResolvedDay::BaseSchedule { date, weekday } => {
            format!("{} {:<9} base schedule", date, weekday.as_str())
        }
    }
}

/// One line describing a schedule record in a listing.
pub fn describe_record(record: &ScheduleRecord) -> String {
    format!(
        "{:<24} {} .. {}  priority {:<4} {}",
        record.id, record.start_date, record.end_date, record.priority, record.name
    )
}

/// Renders query results as colored text or, with `--json`, as JSON.
pub struct Terminal {
    json: bool,
}

impl Terminal {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", serde_json::to_string_pretty(value)?)?;
        stdout.flush()?;
        Ok(())
    }

    fn print_header(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print(format!("{}\n", text)),
            ResetColor,
        )?;
        Ok(())
    }

    fn print_colored(&self, color: Color, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, SetForegroundColor(color), Print(format!("{}\n", text)), ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    /// Effective hours for a single date.
    pub fn print_day(&self, location_id: &str, day: &ResolvedDay) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "locationId": location_id, "resolved": day }));
        }
        self.print_header(&format!("Location {}", location_id))?;
        self.print_colored(day_color(day), &describe_day(day))
    }

    /// A resolution together with its ranked candidates.
    pub fn print_explanation(&self, location_id: &str, explanation: &Explanation) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "locationId": location_id, "explanation": explanation }));
        }
        self.print_day(location_id, &explanation.resolved)?;

        if explanation.ranked.is_empty() {
            self.print_colored(Colors::DIM, "  no active schedule covers this date")?;
        }
        for (i, candidate) in explanation.ranked.iter().enumerate() {
            let marker = if i == 0 { "*" } else { " " };
            self.print_colored(
                if i == 0 { Colors::OPEN } else { Colors::DIM },
                &format!(
                    "  {} {:<24} priority {:<4} created {}",
                    marker,
                    candidate.schedule_id,
                    candidate.priority,
                    candidate.created_at.format("%Y-%m-%d %H:%M:%S"),
                ),
            )?;
        }
        if explanation.decided_by_tie_break {
            self.print_colored(
                Colors::WARNING,
                "  winner chosen by tie-break (equal priority)",
            )?;
        }
        self.print_colored(
            Colors::DIM,
            &format!(
                "  skipped: {} inactive, {} not covering this date",
                explanation.inactive, explanation.not_current
            ),
        )
    }

    /// Day-by-day calendar.
    pub fn print_calendar(&self, location_id: &str, range: &DateRange, days: &[ResolvedDay]) -> Result<()> {
        if self.json {
            return self.print_json(&json!({
                "locationId": location_id,
                "from": range.start,
                "to": range.end,
                "days": days,
            }));
        }
        self.print_header(&format!("Location {}, {}", location_id, range))?;
        for day in days {
            self.print_colored(day_color(day), &describe_day(day))?;
        }
        Ok(())
    }

    /// Schedules overlapping a proposed range.
    pub fn print_conflicts(
        &self,
        location_id: &str,
        range: &DateRange,
        conflicts: &[ScheduleRecord],
    ) -> Result<()> {
        if self.json {
            return self.print_json(&json!({
                "locationId": location_id,
                "from": range.start,
                "to": range.end,
                "conflicts": conflicts,
            }));
        }
        if conflicts.is_empty() {
            return self.print_colored(Colors::OPEN, &format!("No conflicts for {} in {}", location_id, range));
        }
        self.print_header(&format!(
            "{} schedule(s) overlap {} at {}",
            conflicts.len(),
            range,
            location_id
        ))?;
        for record in conflicts {
            self.print_colored(Colors::WARNING, &describe_record(record))?;
        }
        Ok(())
    }

    /// Every schedule with its status at `date`.
    pub fn print_statuses(&self, location_id: &str, date: NaiveDate, entries: &[StatusEntry]) -> Result<()> {
        if self.json {
            return self.print_json(&json!({
                "locationId": location_id,
                "date": date,
                "schedules": entries,
            }));
        }
        if entries.is_empty() {
            return self.print_info(&format!("No schedules for {}", location_id));
        }
        self.print_header(&format!("Schedules for {} as of {}", location_id, date))?;
        for entry in entries {
            self.print_colored(
                status_color(entry.status),
                &format!("{:<9} {}", entry.status.to_string(), describe_record(&entry.schedule)),
            )?;
        }
        Ok(())
    }

    /// Validation report for one location.
    pub fn print_validation(&self, location_id: &str, report: &ValidationResult) -> Result<()> {
        if self.json {
            return self.print_json(&json!({ "locationId": location_id, "report": report }));
        }
        if report.valid {
            self.print_colored(Colors::OPEN, &format!("{}: valid", location_id))?;
        } else {
            self.print_colored(
                Colors::ERROR,
                &format!("{}: {} error(s)", location_id, report.errors.len()),
            )?;
        }
        for error in &report.errors {
            self.print_colored(Colors::ERROR, &format!("  error   {}: {}", error.path, error.message))?;
            if let Some(suggestion) = &error.suggestion {
                self.print_colored(Colors::DIM, &format!("          hint: {}", suggestion))?;
            }
        }
        for warning in &report.warnings {
            self.print_colored(
                Colors::WARNING,
                &format!("  warning {}: {}", warning.path, warning.message),
            )?;
        }
        Ok(())
    }

    /// Print an info message.
    pub fn print_info(&self, msg: &str) -> Result<()> {
        if self.json {
            return Ok(());
        }
        self.print_colored(Colors::DIM, msg)
    }
}
