//! Walk the search range and keep the spans that fit everyone's declared pattern.
//!
//! Every `step` from local midnight of the first day (in the scan timezone)
//! until a span of `duration` would run past the end of the last day, every
//! participant is checked: `O(range/step × participants)`.

use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SchedulingPolicy;
use crate::error::{Result, SlotError};
use crate::normalizer::is_compatible;
use crate::participant::Participant;
use crate::request::SearchRequest;
use crate::timezone::TimezoneResolver;

/// A half-open UTC span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The concrete instants a request scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPlan {
    /// Local midnight of the first day.
    pub start: DateTime<Utc>,
    /// Local midnight after the last day; no span may end later.
    pub end: DateTime<Utc>,
    pub duration: Duration,
    pub step: Duration,
}

impl ScanPlan {
    /// Resolve a (validated) request's calendar range into UTC instants.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRequest` if the range cannot be resolved in the
    /// scan timezone or the duration or step does not fit a `Duration`.
    pub fn for_request(
        request: &SearchRequest,
        policy: &SchedulingPolicy,
        resolver: &dyn TimezoneResolver,
    ) -> Result<Self> {
        let after_last = request.range_end.succ_opt().ok_or_else(|| {
            SlotError::InvalidRequest(format!("rangeEnd {} is out of range", request.range_end))
        })?;
        let start = resolver
            .start_of_day(&request.scan_timezone, request.range_start)
            .map_err(|e| SlotError::InvalidRequest(e.to_string()))?;
        let end = resolver
            .start_of_day(&request.scan_timezone, after_last)
            .map_err(|e| SlotError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            start,
            end,
            duration: request.duration()?,
            step: request.step_duration(policy)?,
        })
    }

    /// Every span the scan considers, ascending by start.
    pub fn spans(&self) -> impl Iterator<Item = TimeSpan> + '_ {
        let mut cursor = Some(self.start);
        std::iter::from_fn(move || {
            let start = cursor?;
            let end = start.checked_add_signed(self.duration)?;
            if end > self.end || self.step <= Duration::zero() {
                return None;
            }
            cursor = start.checked_add_signed(self.step);
            Some(TimeSpan { start, end })
        })
    }
}

/// Spans compatible with **every** participant's declared windows.
///
/// A span rejected by even one participant's pattern is dropped entirely; busy
/// time is not considered here. Output order is ascending by start.
pub fn scan(
    plan: &ScanPlan,
    participants: &[Participant],
    resolver: &dyn TimezoneResolver,
) -> Vec<TimeSpan> {
    let mut considered = 0usize;
    let candidates: Vec<TimeSpan> = plan
        .spans()
        .inspect(|_| considered += 1)
        .filter(|span| {
            participants
                .iter()
                .all(|p| is_compatible(span.start, span.end, p, resolver))
        })
        .collect();

    debug!(
        "scanned {} spans from {} to {}: {} fit every pattern",
        considered,
        plan.start,
        plan.end,
        candidates.len()
    );
    candidates
}
