//! Tests for the declared-window compatibility predicate.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::{
    check_compatibility, is_compatible, AvailabilityWindow, ChronoTzResolver, DataIssue, DayClass,
    Participant, ParticipantSpec, SchedulingPolicy, WindowSpec,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn utc(month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, min, 0).unwrap()
}

fn window(start: &str, end: &str, day_class: DayClass) -> AvailabilityWindow {
    AvailabilityWindow::parse(start, end, day_class).unwrap()
}

fn person(timezone: &str, windows: Vec<AvailabilityWindow>) -> Participant {
    Participant::new("p@example.com", timezone, windows)
}

fn fits(p: &Participant, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    is_compatible(start, end, p, &ChronoTzResolver)
}

// ── Whole-span containment ──────────────────────────────────────────────────

#[test]
fn span_inside_window_is_compatible() {
    let p = person("UTC", vec![window("09:00", "17:00", DayClass::Weekday)]);
    // Tuesday 2026-03-17
    assert!(fits(&p, utc(3, 17, 9, 0), utc(3, 17, 10, 0)));
    assert!(fits(&p, utc(3, 17, 16, 0), utc(3, 17, 17, 0)));
}

#[test]
fn span_ending_after_window_is_rejected() {
    let p = person("UTC", vec![window("09:00", "17:00", DayClass::Weekday)]);
    // Starts in-window, ends 30 minutes after it closes.
    assert!(!fits(&p, utc(3, 17, 16, 30), utc(3, 17, 17, 30)));
}

#[test]
fn span_starting_before_window_is_rejected() {
    let p = person("UTC", vec![window("09:00", "17:00", DayClass::Weekday)]);
    assert!(!fits(&p, utc(3, 17, 8, 30), utc(3, 17, 9, 30)));
}

#[test]
fn span_crossing_local_midnight_is_rejected() {
    let p = person("UTC", vec![window("22:00", "24:00", DayClass::Everyday)]);
    assert!(fits(&p, utc(3, 17, 23, 0), utc(3, 18, 0, 0)));
    assert!(!fits(&p, utc(3, 17, 23, 30), utc(3, 18, 0, 30)));
}

// ── Day classes ─────────────────────────────────────────────────────────────

#[test]
fn weekday_window_excluded_on_saturday() {
    let p = person("UTC", vec![window("09:00", "17:00", DayClass::Weekday)]);
    // Saturday 2026-03-21
    assert!(!fits(&p, utc(3, 21, 10, 0), utc(3, 21, 11, 0)));
}

#[test]
fn weekend_window_only_on_weekend() {
    let p = person("UTC", vec![window("10:00", "12:00", DayClass::Weekend)]);
    assert!(fits(&p, utc(3, 22, 10, 0), utc(3, 22, 11, 0))); // Sunday
    assert!(!fits(&p, utc(3, 20, 10, 0), utc(3, 20, 11, 0))); // Friday
}

#[test]
fn mid_east_workday_runs_sunday_to_thursday() {
    let p = person("Asia/Dubai", vec![window("09:00", "17:00", DayClass::MidEastWorkday)]);
    // 10:00 Dubai (UTC+4) is 06:00 UTC.
    assert!(fits(&p, utc(3, 22, 6, 0), utc(3, 22, 7, 0))); // Sunday
    assert!(fits(&p, utc(3, 19, 6, 0), utc(3, 19, 7, 0))); // Thursday
    assert!(!fits(&p, utc(3, 20, 6, 0), utc(3, 20, 7, 0))); // Friday
}

#[test]
fn mid_east_weekend_runs_friday_to_saturday() {
    let p = person("Asia/Riyadh", vec![window("09:00", "12:00", DayClass::MidEastWeekend)]);
    // 09:00 Riyadh (UTC+3) is 06:00 UTC.
    assert!(fits(&p, utc(3, 20, 6, 0), utc(3, 20, 7, 0))); // Friday
    assert!(!fits(&p, utc(3, 22, 6, 0), utc(3, 22, 7, 0))); // Sunday
}

#[test]
fn weekday_is_taken_from_local_date_not_utc() {
    // 01:00 UTC Saturday is still Friday 21:00 in New York (EDT, UTC-4).
    let p = person("America/New_York", vec![window("20:00", "23:00", DayClass::Weekday)]);
    assert!(fits(&p, utc(3, 21, 1, 0), utc(3, 21, 2, 0)));
}

// ── Union semantics ─────────────────────────────────────────────────────────

#[test]
fn any_window_matching_is_enough() {
    let p = person(
        "UTC",
        vec![
            window("08:00", "10:00", DayClass::Weekday),
            window("14:00", "16:00", DayClass::Weekday),
        ],
    );
    assert!(fits(&p, utc(3, 17, 8, 0), utc(3, 17, 9, 0)));
    assert!(fits(&p, utc(3, 17, 14, 30), utc(3, 17, 15, 30)));
    // Between the two windows.
    assert!(!fits(&p, utc(3, 17, 11, 0), utc(3, 17, 12, 0)));
}

#[test]
fn span_bridging_two_windows_is_rejected() {
    // Union is per window; adjacent windows are not fused.
    let p = person(
        "UTC",
        vec![
            window("09:00", "10:00", DayClass::Everyday),
            window("10:00", "11:00", DayClass::Everyday),
        ],
    );
    assert!(!fits(&p, utc(3, 17, 9, 30), utc(3, 17, 10, 30)));
}

// ── DST ─────────────────────────────────────────────────────────────────────

#[test]
fn local_window_follows_dst_shift() {
    let p = person("America/New_York", vec![window("09:00", "10:00", DayClass::Weekday)]);
    // Friday 2026-03-06 is EST (UTC-5); Monday 2026-03-09 is EDT (UTC-4).
    assert!(fits(&p, utc(3, 6, 14, 0), utc(3, 6, 15, 0)));
    assert!(!fits(&p, utc(3, 6, 13, 0), utc(3, 6, 14, 0)));
    assert!(fits(&p, utc(3, 9, 13, 0), utc(3, 9, 14, 0)));
    assert!(!fits(&p, utc(3, 9, 14, 0), utc(3, 9, 15, 0)));
}

// ── Fail-closed cases ───────────────────────────────────────────────────────

#[test]
fn unknown_timezone_never_matches() {
    let p = person("Mars/Olympus_Mons", vec![window("00:00", "24:00", DayClass::Everyday)]);
    assert!(!fits(&p, utc(3, 17, 10, 0), utc(3, 17, 11, 0)));
}

#[test]
fn empty_window_list_falls_back_to_legacy_weekday_hours() {
    let p = person("UTC", vec![]);
    assert_eq!(p.windows(), &[AvailabilityWindow::legacy_default()]);
    assert!(fits(&p, utc(3, 17, 9, 0), utc(3, 17, 10, 0)));
    assert!(!fits(&p, utc(3, 17, 17, 0), utc(3, 17, 18, 0)));
    assert!(!fits(&p, utc(3, 21, 10, 0), utc(3, 21, 11, 0)));
}

#[test]
fn empty_or_inverted_span_never_matches() {
    let p = person("UTC", vec![window("00:00", "24:00", DayClass::Everyday)]);
    assert!(!fits(&p, utc(3, 17, 10, 0), utc(3, 17, 10, 0)));
    assert!(!fits(&p, utc(3, 17, 11, 0), utc(3, 17, 10, 0)));
}

// ── Checking raw records ────────────────────────────────────────────────────

fn record(timezone: &str, windows: Vec<WindowSpec>) -> ParticipantSpec {
    ParticipantSpec {
        id: "p@example.com".to_string(),
        timezone: timezone.to_string(),
        windows,
    }
}

fn check(spec: &ParticipantSpec) -> slot_engine::CompatibilityReport {
    check_compatibility(
        utc(3, 17, 10, 0),
        utc(3, 17, 11, 0),
        spec,
        &SchedulingPolicy::default(),
        &ChronoTzResolver,
    )
}

#[test]
fn clean_record_reports_no_issues() {
    let report = check(&record("UTC", vec![WindowSpec::new("09:00", "17:00", "weekday")]));
    assert!(report.compatible);
    assert!(report.issues.is_empty());

    let outside = check(&record("UTC", vec![WindowSpec::new("13:00", "17:00", "weekday")]));
    assert!(!outside.compatible);
    assert!(!outside.is_degraded());
}

#[test]
fn unknown_timezone_is_reported_not_just_false() {
    let report = check(&record(
        "Not/AZone",
        vec![WindowSpec::new("09:00", "17:00", "weekday")],
    ));
    assert!(!report.compatible);
    assert!(report.is_degraded());
    assert!(matches!(
        report.issues.as_slice(),
        [DataIssue::UnknownTimezone { timezone, .. }] if timezone == "Not/AZone"
    ));
}

#[test]
fn all_windows_malformed_is_reported() {
    let report = check(&record("UTC", vec![WindowSpec::new("17:00", "09:00", "weekday")]));
    assert!(!report.compatible);
    assert!(report.is_degraded());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["compatible"], false);
    assert_eq!(json["issues"][0]["kind"], "malformedWindow");
}

#[test]
fn fallback_is_noted_but_not_degrading() {
    let report = check(&record("UTC", vec![]));
    assert!(report.compatible);
    assert!(!report.is_degraded());
    assert!(matches!(report.issues.as_slice(), [DataIssue::FallbackApplied { .. }]));
}
