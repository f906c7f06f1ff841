//! Timezone rule resolution.
//!
//! The engine never does offset arithmetic itself; it asks a [`TimezoneResolver`]
//! for the local wall-clock time of a UTC instant. [`ChronoTzResolver`] is the
//! default resolver, backed by the IANA database compiled into `chrono-tz`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::dst;
use crate::error::{Result, SlotError};

/// Converts between UTC instants and local wall-clock time in an IANA timezone.
///
/// Implementations must resolve DST at the instant being converted, never by a
/// fixed offset, and must return an error for unknown timezone ids rather than
/// falling back to UTC.
pub trait TimezoneResolver {
    /// Local wall-clock date/time of `instant` in `timezone`.
    fn to_local(&self, timezone: &str, instant: DateTime<Utc>) -> Result<NaiveDateTime>;

    /// The UTC instant at which local `date` begins in `timezone`.
    fn start_of_day(&self, timezone: &str, date: NaiveDate) -> Result<DateTime<Utc>>;

    /// Whether `timezone` is known to this resolver.
    fn supports(&self, timezone: &str) -> bool;
}

/// [`TimezoneResolver`] over the `chrono-tz` IANA database.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzResolver;

impl ChronoTzResolver {
    fn parse(timezone: &str) -> Result<Tz> {
        timezone
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))
    }
}

impl TimezoneResolver for ChronoTzResolver {
    fn to_local(&self, timezone: &str, instant: DateTime<Utc>) -> Result<NaiveDateTime> {
        let tz = Self::parse(timezone)?;
        Ok(instant.with_timezone(&tz).naive_local())
    }

    fn start_of_day(&self, timezone: &str, date: NaiveDate) -> Result<DateTime<Utc>> {
        let tz = Self::parse(timezone)?;
        // Some zones skip local midnight on DST days; take the first valid time.
        dst::earliest_instant(&tz, date.and_time(NaiveTime::MIN))
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                SlotError::InvalidDatetime(format!("no local midnight for {} in {}", date, timezone))
            })
    }

    fn supports(&self, timezone: &str) -> bool {
        Self::parse(timezone).is_ok()
    }
}
