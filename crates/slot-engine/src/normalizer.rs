//! Decide whether a UTC span fits a participant's declared weekly pattern.
//!
//! The span is converted to the participant's local wall-clock time at both
//! endpoints (DST resolved at each instant), and the whole span, not just its
//! start, must fall inside one window that applies on the local weekday of
//! the start. Windows are OR-combined: availability is their union.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use serde::Serialize;

use crate::config::SchedulingPolicy;
use crate::participant::{ingest_participant, DataIssue, Participant, ParticipantSpec};
use crate::timezone::TimezoneResolver;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whether `[start, end)` is compatible with the participant's declared windows.
///
/// Returns `true` iff **any** window fits. Fails closed (returns `false`) when
/// the participant's timezone cannot be resolved or they have no valid windows.
pub fn is_compatible(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    participant: &Participant,
    resolver: &dyn TimezoneResolver,
) -> bool {
    if end <= start || participant.windows().is_empty() {
        return false;
    }

    let tz = participant.timezone();
    let (Ok(local_start), Ok(local_end)) = (resolver.to_local(tz, start), resolver.to_local(tz, end))
    else {
        return false;
    };

    let weekday = local_start.weekday();
    let (start_second, end_second) = local_seconds(local_start, local_end);

    participant
        .windows()
        .iter()
        .any(|window| window.fits(weekday, start_second, end_second))
}

/// The answer for one raw participant record, with whatever was wrong with it.
///
/// `compatible` is `false` whenever a degrading issue leaves the participant
/// unmatchable, so callers must look at `issues` to tell "outside their hours"
/// from "their record is broken".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub compatible: bool,
    pub issues: Vec<DataIssue>,
}

impl CompatibilityReport {
    pub fn is_degraded(&self) -> bool {
        self.issues.iter().any(DataIssue::is_degrading)
    }
}

/// Ingest `spec` and check `[start, end)` against it in one step.
pub fn check_compatibility(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    spec: &ParticipantSpec,
    policy: &SchedulingPolicy,
    resolver: &dyn TimezoneResolver,
) -> CompatibilityReport {
    let mut issues = Vec::new();
    let participant = ingest_participant(spec, policy, resolver, &mut issues);
    CompatibilityReport {
        compatible: is_compatible(start, end, &participant, resolver),
        issues,
    }
}

/// Seconds past local midnight of the start date for both endpoints.
///
/// An end on a later local date counts whole days on top, so a span that
/// crosses local midnight can never fit a same-day window.
fn local_seconds(local_start: NaiveDateTime, local_end: NaiveDateTime) -> (i64, i64) {
    let start_second = i64::from(local_start.num_seconds_from_midnight());
    let day_offset = (local_end.date() - local_start.date()).num_days();
    let end_second =
        day_offset * SECONDS_PER_DAY + i64::from(local_end.num_seconds_from_midnight());
    (start_second, end_second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn end_at_local_midnight_counts_as_end_of_day() {
        assert_eq!(local_seconds(naive(17, 23, 0), naive(18, 0, 0)), (82_800, 86_400));
    }
}
