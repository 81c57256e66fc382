use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Day of the week as keyed in a schedule's working-hours table.
///
/// Ordering follows the calendar week starting on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Weekday::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| format!("unknown weekday: '{}'", s))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

// ── Day hours ──────────────────────────────────────────────────

/// Hours for one weekday: either closed, or open between two times of day.
///
/// On the wire this is `{ isWorkingDay: false }` or
/// `{ isWorkingDay: true, start: "HH:MM", end: "HH:MM" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDayHours", into = "RawDayHours")]
pub enum DayHours {
    Closed,
    Open { start: NaiveTime, end: NaiveTime },
}

impl DayHours {
    /// Open between two `HH:MM` times. Returns `None` if either fails to parse.
    pub fn open(start: &str, end: &str) -> Option<Self> {
        Some(DayHours::Open {
            start: parse_time_of_day(start)?,
            end: parse_time_of_day(end)?,
        })
    }

    pub fn is_working_day(&self) -> bool {
        matches!(self, DayHours::Open { .. })
    }

    pub fn start(&self) -> Option<NaiveTime> {
        match self {
            DayHours::Open { start, .. } => Some(*start),
            DayHours::Closed => None,
        }
    }

    pub fn end(&self) -> Option<NaiveTime> {
        match self {
            DayHours::Open { end, .. } => Some(*end),
            DayHours::Closed => None,
        }
    }
}

impl fmt::Display for DayHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayHours::Closed => write!(f, "closed"),
            DayHours::Open { start, end } => {
                write!(f, "{}-{}", start.format("%H:%M"), end.format("%H:%M"))
            }
        }
    }
}

/// Wire shape of [`DayHours`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDayHours {
    is_working_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<String>,
}

impl TryFrom<RawDayHours> for DayHours {
    type Error = String;

    fn try_from(raw: RawDayHours) -> std::result::Result<Self, Self::Error> {
        if !raw.is_working_day {
            return Ok(DayHours::Closed);
        }
        let start = raw
            .start
            .ok_or_else(|| "working day is missing 'start'".to_string())?;
        let end = raw
            .end
            .ok_or_else(|| "working day is missing 'end'".to_string())?;
        let start = parse_time_of_day(&start)
            .ok_or_else(|| format!("invalid start time '{}', expected HH:MM", start))?;
        let end = parse_time_of_day(&end)
            .ok_or_else(|| format!("invalid end time '{}', expected HH:MM", end))?;
        Ok(DayHours::Open { start, end })
    }
}

impl From<DayHours> for RawDayHours {
    fn from(hours: DayHours) -> Self {
        match hours {
            DayHours::Closed => RawDayHours {
                is_working_day: false,
                start: None,
                end: None,
            },
            DayHours::Open { start, end } => RawDayHours {
                is_working_day: true,
                start: Some(start.format("%H:%M").to_string()),
                end: Some(end.format("%H:%M").to_string()),
            },
        }
    }
}

/// Parse `HH:MM` (or `HH:MM:SS`) into a time of day.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

// ── Working hours table ────────────────────────────────────────

/// Weekday → hours table contributed by a seasonal schedule.
///
/// A well-formed table has all seven keys. Deserialization accepts sparse
/// tables so that the gap can be reported as a data-integrity error rather
/// than a parse failure; see [`WorkingHours::missing_days`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingHours(BTreeMap<Weekday, DayHours>);

impl WorkingHours {
    /// Same hours on every weekday.
    pub fn uniform(hours: DayHours) -> Self {
        Self(Weekday::ALL.iter().map(|d| (*d, hours)).collect())
    }

    /// Replace the hours for one weekday.
    pub fn with(mut self, day: Weekday, hours: DayHours) -> Self {
        self.0.insert(day, hours);
        self
    }

    /// Drop a weekday from the table.
    pub fn without(mut self, day: Weekday) -> Self {
        self.0.remove(&day);
        self
    }

    pub fn get(&self, day: Weekday) -> Option<&DayHours> {
        self.0.get(&day)
    }

    /// Weekdays with no entry, in calendar order.
    pub fn missing_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .iter()
            .copied()
            .filter(|d| !self.0.contains_key(d))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == Weekday::ALL.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayHours)> {
        self.0.iter().map(|(d, h)| (*d, h))
    }
}

impl FromIterator<(Weekday, DayHours)> for WorkingHours {
    fn from_iter<I: IntoIterator<Item = (Weekday, DayHours)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_from_chrono_and_str() {
        assert_eq!(Weekday::from(chrono::Weekday::Sat), Weekday::Saturday);
        assert_eq!("Sunday".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn day_hours_wire_shape() {
        let closed: DayHours = serde_json::from_str(r#"{"isWorkingDay": false}"#).unwrap();
        assert_eq!(closed, DayHours::Closed);

        let open: DayHours =
            serde_json::from_str(r#"{"isWorkingDay": true, "start": "10:00", "end": "14:00"}"#)
                .unwrap();
        assert_eq!(open, DayHours::open("10:00", "14:00").unwrap());
        assert_eq!(open.to_string(), "10:00-14:00");

        let json = serde_json::to_value(open).unwrap();
        assert_eq!(json["isWorkingDay"], true);
        assert_eq!(json["start"], "10:00");
    }

    #[test]
    fn working_day_without_times_is_rejected() {
        let err = serde_json::from_str::<DayHours>(r#"{"isWorkingDay": true, "start": "09:00"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("missing 'end'"));

        let err = serde_json::from_str::<DayHours>(
            r#"{"isWorkingDay": true, "start": "9am", "end": "18:00"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid start time"));
    }

    #[test]
    fn missing_days_reported_in_calendar_order() {
        let hours = WorkingHours::uniform(DayHours::Closed)
            .without(Weekday::Sunday)
            .without(Weekday::Tuesday);
        assert!(!hours.is_complete());
        assert_eq!(hours.missing_days(), vec![Weekday::Tuesday, Weekday::Sunday]);
    }
}
