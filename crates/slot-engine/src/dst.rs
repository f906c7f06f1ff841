//! Resolving local wall-clock times that fall into DST transitions.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};

/// Longest DST gap searched when shifting forward out of a non-existent local time.
const MAX_GAP_MINUTES: i64 = 3 * 60;
const GAP_STEP_MINUTES: i64 = 15;

/// Map a local wall-clock time to its earliest real instant.
///
/// - Unambiguous times map directly.
/// - Ambiguous times (fall-back overlap) take the earlier of the two instants.
/// - Non-existent times (spring-forward gap) shift forward to the first valid
///   local time, probing in 15-minute steps.
///
/// Returns `None` only if no valid time exists within three hours.
pub fn earliest_instant<Z: TimeZone>(tz: &Z, local: NaiveDateTime) -> Option<DateTime<Z>> {
    let mut probe = local;
    let limit = local
        .checked_add_signed(Duration::minutes(MAX_GAP_MINUTES))
        .unwrap_or(NaiveDateTime::MAX);
    while probe <= limit {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return Some(dt),
            LocalResult::Ambiguous(earliest, _) => return Some(earliest),
            LocalResult::None => {
                probe = probe.checked_add_signed(Duration::minutes(GAP_STEP_MINUTES))?
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike, Utc};
    use chrono_tz::Tz;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn spring_forward_gap_shifts_to_first_valid_time() {
        // 2026-03-08 02:30 does not exist in New York.
        let tz: Tz = "America/New_York".parse().unwrap();
        let dt = earliest_instant(&tz, local(2026, 3, 8, 2, 30)).unwrap();
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.with_timezone(&Utc).hour(), 7);
    }

    #[test]
    fn fall_back_overlap_takes_earlier_instant() {
        // 2026-11-01 01:30 happens twice in New York; EDT (UTC-4) comes first.
        let tz: Tz = "America/New_York".parse().unwrap();
        let dt = earliest_instant(&tz, local(2026, 11, 1, 1, 30)).unwrap();
        assert_eq!(dt.with_timezone(&Utc).hour(), 5);
    }
}
