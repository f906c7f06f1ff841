//! Tests for the busy-interval index and match classification.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::{classify, BusyIndex, BusyInterval, Participant, TimeSpan, UnavailableReason};

/// Helper to create a busy interval from hour/minute pairs on 2026-03-17.
fn busy(
    owner: &str,
    start_hour: u32,
    start_min: u32,
    end_hour: u32,
    end_min: u32,
) -> BusyInterval {
    BusyInterval::new(owner, at(start_hour, start_min), at(end_hour, end_min))
}

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 17, hour, min, 0).unwrap()
}

fn span(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> TimeSpan {
    TimeSpan {
        start: at(start_hour, start_min),
        end: at(end_hour, end_min),
    }
}

// ── Overlap queries ─────────────────────────────────────────────────────────

#[test]
fn overlapping_interval_is_busy() {
    let index = BusyIndex::build(&[busy("a", 9, 0, 10, 0)]);
    assert!(index.is_busy(at(9, 30), at(10, 30), "a"));
    assert!(index.is_busy(at(8, 30), at(9, 30), "a"));
}

#[test]
fn touching_endpoints_do_not_conflict() {
    let index = BusyIndex::build(&[busy("a", 9, 0, 10, 0)]);
    assert!(!index.is_busy(at(10, 0), at(11, 0), "a"));
    assert!(!index.is_busy(at(8, 0), at(9, 0), "a"));
}

#[test]
fn fully_contained_candidate_is_busy() {
    let index = BusyIndex::build(&[busy("a", 9, 0, 12, 0)]);
    assert!(index.is_busy(at(10, 0), at(11, 0), "a"));
}

#[test]
fn candidate_containing_interval_is_busy() {
    let index = BusyIndex::build(&[busy("a", 10, 15, 10, 45)]);
    assert!(index.is_busy(at(10, 0), at(11, 0), "a"));
}

#[test]
fn busy_time_is_per_owner() {
    let index = BusyIndex::build(&[busy("a", 9, 0, 10, 0)]);
    assert!(!index.is_busy(at(9, 0), at(10, 0), "b"));
    assert!(index.has_intervals("a"));
    assert!(!index.has_intervals("b"));
}

#[test]
fn overlapping_intervals_are_treated_as_union() {
    let index = BusyIndex::build(&[
        busy("a", 14, 0, 15, 0),
        busy("a", 9, 0, 10, 30),
        busy("a", 10, 0, 11, 0),
        busy("a", 11, 0, 11, 30),
    ]);
    assert_eq!(
        index.periods("a"),
        &[(at(9, 0), at(11, 30)), (at(14, 0), at(15, 0))]
    );
    assert!(index.is_busy(at(11, 0), at(12, 0), "a"));
    assert!(!index.is_busy(at(11, 30), at(14, 0), "a"));
    assert!(index.is_busy(at(13, 30), at(14, 30), "a"));
}

#[test]
fn gap_between_unsorted_intervals_is_free() {
    let index = BusyIndex::build(&[busy("a", 15, 0, 16, 0), busy("a", 8, 0, 9, 0)]);
    assert!(!index.is_busy(at(9, 0), at(15, 0), "a"));
}

#[test]
fn empty_intervals_cover_no_time() {
    let index = BusyIndex::build(&[busy("a", 9, 0, 9, 0), busy("a", 11, 0, 10, 0)]);
    assert!(index.periods("a").is_empty());
    assert!(!index.is_busy(at(8, 0), at(12, 0), "a"));
}

#[test]
fn owner_with_only_empty_intervals_still_has_data() {
    let index = BusyIndex::build(&[busy("a", 9, 0, 9, 0), busy("b", 11, 0, 10, 0)]);
    assert!(index.has_intervals("a"));
    assert!(index.has_intervals("b"));
    assert!(!index.has_intervals("c"));
}

// ── Classification ──────────────────────────────────────────────────────────

fn roster() -> Vec<Participant> {
    ["a", "b", "c"]
        .into_iter()
        .map(|id| Participant::new(id, "UTC", vec![]))
        .collect()
}

#[test]
fn nobody_busy_is_full_match() {
    let slot = classify(span(9, 0, 10, 0), &roster(), &BusyIndex::default());
    assert!(slot.is_full_match);
    assert_eq!(slot.available_participant_ids, vec!["a", "b", "c"]);
    assert!(slot.unavailable_participants.is_empty());
}

#[test]
fn busy_participants_are_listed_unavailable() {
    let index = BusyIndex::build(&[busy("b", 9, 30, 10, 30)]);
    let slot = classify(span(9, 0, 10, 0), &roster(), &index);

    assert!(!slot.is_full_match);
    assert_eq!(slot.available_participant_ids, vec!["a", "c"]);
    assert_eq!(slot.unavailable_participants.len(), 1);
    assert_eq!(slot.unavailable_participants[0].id, "b");
    assert_eq!(slot.unavailable_participants[0].reason, UnavailableReason::Busy);
}

#[test]
fn busy_data_for_strangers_is_ignored() {
    let index = BusyIndex::build(&[busy("zed", 9, 0, 17, 0)]);
    let slot = classify(span(9, 0, 10, 0), &roster(), &index);
    assert!(slot.is_full_match);
}

#[test]
fn classified_slot_serializes_with_utc_field_names() {
    let index = BusyIndex::build(&[busy("c", 9, 0, 10, 0)]);
    let slot = classify(span(9, 0, 10, 0), &roster(), &index);
    let json = serde_json::to_value(&slot).unwrap();

    assert_eq!(json["startUtc"], "2026-03-17T09:00:00Z");
    assert_eq!(json["isFullMatch"], false);
    assert_eq!(json["unavailableParticipants"][0]["reason"], "busy");
}
