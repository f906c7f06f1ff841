//! WASM bindings for slot-engine.
//!
//! Exposes the meeting slot search, blocker analysis and the per-participant
//! window check to JavaScript via `wasm-bindgen`. All complex types are passed
//! as JSON strings using the same camelCase shapes the engine serializes.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/slot-engine-js/wasm/slot_engine_wasm.js \
//!    packages/slot-engine-js/wasm/slot_engine_wasm.cjs
//! ```
//!
//! A UI re-running searches as the user edits should discard results from
//! superseded calls; each call is independent and holds no state.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use slot_engine::{
    check_compatibility, CandidateSlot, ChronoTzResolver, ParticipantSpec, SchedulingPolicy,
    SearchRequest,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with offset, e.g. "2026-03-17T09:00:00+00:00") and
/// naive time (e.g. "2026-03-17T09:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Run a meeting slot search.
///
/// `request_json` is a search request (`participants`, `busyIntervals`,
/// `rangeStart`, `rangeEnd`, `durationMinutes`, optional `stepMinutes` and
/// `scanTimezone`). Returns the outcome JSON: `slots`, optional `blockers`,
/// and `issues`. Throws on an invalid request.
#[wasm_bindgen(js_name = "findMeetingSlots")]
pub fn find_meeting_slots(request_json: &str) -> Result<String, JsValue> {
    let request = SearchRequest::from_json(request_json).map_err(js_error)?;
    let outcome = slot_engine::find_meeting_slots(&request).map_err(js_error)?;
    to_json(&outcome)
}

/// Rank participants by how often they block a full match.
///
/// `slots_json` is an array of candidate slots as returned in
/// `findMeetingSlots(...).slots`; `participant_ids_json` is the roster as a
/// JSON array of ids, in roster order.
#[wasm_bindgen(js_name = "summarizeBlockers")]
pub fn summarize_blockers(slots_json: &str, participant_ids_json: &str) -> Result<String, JsValue> {
    let slots: Vec<CandidateSlot> = serde_json::from_str(slots_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid slots JSON: {}", e)))?;
    let ids: Vec<String> = serde_json::from_str(participant_ids_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid participant ids JSON: {}", e)))?;

    to_json(&slot_engine::summarize(&slots, &ids))
}

/// Whether `[start, end)` fits one participant's declared windows.
///
/// `participant_json` is a participant record (`id`, `timezone`, `windows`).
/// Returns `{ "compatible": bool, "issues": [...] }`. An unknown timezone or a
/// record whose windows are all malformed yields `compatible: false` together
/// with the issue explaining why, so callers can tell it apart from a span
/// that is simply outside the participant's hours.
#[wasm_bindgen(js_name = "isCompatible")]
pub fn is_compatible(start: &str, end: &str, participant_json: &str) -> Result<String, JsValue> {
    let spec: ParticipantSpec = serde_json::from_str(participant_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid participant JSON: {}", e)))?;
    let start = parse_datetime(start)?;
    let end = parse_datetime(end)?;

    let report = check_compatibility(
        start,
        end,
        &spec,
        &SchedulingPolicy::default(),
        &ChronoTzResolver,
    );
    to_json(&report)
}
