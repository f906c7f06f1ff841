//! Recurring weekly availability windows ("humane windows").
//!
//! A window is a wall-clock range (`startLocal`..`endLocal`) attached to a
//! [`DayClass`]. Windows are interpreted in the owning participant's timezone
//! on the date under evaluation, so DST is resolved per occurrence.
//!
//! Raw window records arrive as [`WindowSpec`] (every field optional, day class
//! as free text) and are validated into [`AvailabilityWindow`] at ingestion.
//! A record that fails validation is reported as malformed and never matches.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Weekday grouping rule attached to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DayClass {
    /// Monday through Friday.
    Weekday,
    /// Saturday and Sunday.
    Weekend,
    /// Sunday through Thursday.
    MidEastWorkday,
    /// Friday and Saturday.
    MidEastWeekend,
    Everyday,
}

impl DayClass {
    /// Whether a window of this class applies on the given local weekday.
    pub fn admits(self, weekday: Weekday) -> bool {
        match self {
            DayClass::Weekday => !matches!(weekday, Weekday::Sat | Weekday::Sun),
            DayClass::Weekend => matches!(weekday, Weekday::Sat | Weekday::Sun),
            DayClass::MidEastWorkday => !matches!(weekday, Weekday::Fri | Weekday::Sat),
            DayClass::MidEastWeekend => matches!(weekday, Weekday::Fri | Weekday::Sat),
            DayClass::Everyday => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayClass::Weekday => "weekday",
            DayClass::Weekend => "weekend",
            DayClass::MidEastWorkday => "midEastWorkday",
            DayClass::MidEastWeekend => "midEastWeekend",
            DayClass::Everyday => "everyday",
        }
    }
}

impl fmt::Display for DayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayClass {
    type Err = SlotError;

    /// Case-insensitive; `-`, `_` and spaces are ignored, so `"mid_east_workday"`,
    /// `"MidEastWorkday"` and `"sun-thu"` all parse.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "weekday" | "weekdays" | "monfri" => Ok(DayClass::Weekday),
            "weekend" | "weekends" | "satsun" => Ok(DayClass::Weekend),
            "mideastworkday" | "middleeastworkday" | "sunthu" => Ok(DayClass::MidEastWorkday),
            "mideastweekend" | "middleeastweekend" | "frisat" => Ok(DayClass::MidEastWeekend),
            "everyday" | "daily" | "all" => Ok(DayClass::Everyday),
            _ => Err(SlotError::MalformedAvailability(format!(
                "unrecognized day class '{}'",
                s
            ))),
        }
    }
}

/// A validated recurring availability rule.
///
/// Invariant: `start_minute < end_minute`, both within one local day.
/// `end_minute` may be 1440 (`"24:00"`) to mean "until midnight".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowSpec", into = "WindowSpec")]
pub struct AvailabilityWindow {
    start_minute: u16,
    end_minute: u16,
    day_class: DayClass,
}

impl AvailabilityWindow {
    /// Build a window from minutes past local midnight.
    ///
    /// # Errors
    /// Returns `SlotError::MalformedAvailability` if `start >= end` or `end > 1440`.
    pub fn new(start_minute: u16, end_minute: u16, day_class: DayClass) -> Result<Self> {
        if end_minute > MINUTES_PER_DAY {
            return Err(SlotError::MalformedAvailability(format!(
                "window end {} is past midnight",
                format_local_time(end_minute)
            )));
        }
        if start_minute >= end_minute {
            return Err(SlotError::MalformedAvailability(format!(
                "window start {} is not before end {} (overnight windows must be split in two)",
                format_local_time(start_minute),
                format_local_time(end_minute)
            )));
        }
        Ok(Self {
            start_minute,
            end_minute,
            day_class,
        })
    }

    /// Parse a window from `"HH:MM"` strings.
    pub fn parse(start_local: &str, end_local: &str, day_class: DayClass) -> Result<Self> {
        Self::new(
            parse_local_time(start_local)?,
            parse_local_time(end_local)?,
            day_class,
        )
    }

    /// The legacy single-window default: 09:00–17:00 on weekdays.
    pub const fn legacy_default() -> Self {
        Self {
            start_minute: 9 * 60,
            end_minute: 17 * 60,
            day_class: DayClass::Weekday,
        }
    }

    pub fn start_minute(&self) -> u16 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u16 {
        self.end_minute
    }

    pub fn day_class(&self) -> DayClass {
        self.day_class
    }

    /// Whether a local span fits this window on the given weekday.
    ///
    /// `start_second` and `end_second` are seconds past local midnight of the
    /// span's start date; a span that crosses into the next local day has an
    /// `end_second` above 86 400 and never fits.
    pub fn fits(&self, weekday: Weekday, start_second: i64, end_second: i64) -> bool {
        self.day_class.admits(weekday)
            && start_second >= i64::from(self.start_minute) * 60
            && end_second <= i64::from(self.end_minute) * 60
    }
}

impl fmt::Display for AvailabilityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {}",
            format_local_time(self.start_minute),
            format_local_time(self.end_minute),
            self.day_class
        )
    }
}

/// A window record as it arrives from storage. Every field is optional so
/// that incomplete records reach validation instead of failing deserialization
/// of the whole roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_class: Option<String>,
}

impl WindowSpec {
    pub fn new(start_local: &str, end_local: &str, day_class: &str) -> Self {
        Self {
            start_local: Some(start_local.to_string()),
            end_local: Some(end_local.to_string()),
            day_class: Some(day_class.to_string()),
        }
    }

    /// Validate this record into an [`AvailabilityWindow`].
    ///
    /// # Errors
    /// Returns `SlotError::MalformedAvailability` for a missing field, an
    /// unparseable time, an unrecognized day class, or `start >= end`.
    pub fn validate(&self) -> Result<AvailabilityWindow> {
        let start = required(&self.start_local, "startLocal")?;
        let end = required(&self.end_local, "endLocal")?;
        let day_class: DayClass = required(&self.day_class, "dayClass")?.parse()?;
        AvailabilityWindow::parse(start, end, day_class)
    }
}

impl TryFrom<WindowSpec> for AvailabilityWindow {
    type Error = SlotError;

    fn try_from(spec: WindowSpec) -> Result<Self> {
        spec.validate()
    }
}

impl From<AvailabilityWindow> for WindowSpec {
    fn from(window: AvailabilityWindow) -> Self {
        Self {
            start_local: Some(format_local_time(window.start_minute)),
            end_local: Some(format_local_time(window.end_minute)),
            day_class: Some(window.day_class.as_str().to_string()),
        }
    }
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SlotError::MalformedAvailability(format!("missing {}", name)))
}

/// Parse `"HH:MM"` into minutes past midnight. `"24:00"` is accepted.
pub fn parse_local_time(s: &str) -> Result<u16> {
    let malformed = || SlotError::MalformedAvailability(format!("invalid local time '{}'", s));

    let (hours, minutes) = s.trim().split_once(':').ok_or_else(malformed)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(malformed());
    }
    let hours: u16 = hours.parse().map_err(|_| malformed())?;
    let minutes: u16 = minutes.parse().map_err(|_| malformed())?;

    if minutes > 59 || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(malformed());
    }
    Ok(hours * 60 + minutes)
}

/// Format minutes past midnight as `"HH:MM"`.
pub fn format_local_time(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}
