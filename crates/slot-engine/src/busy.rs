//! Per-participant busy intervals and overlap queries.
//!
//! Intervals are half-open `[start, end)`. Overlapping or touching intervals of
//! the same owner are merged at build time, so each owner's list is sorted and
//! disjoint and a query needs one binary search.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A machine-sourced busy period for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyInterval {
    pub owner_id: String,
    #[serde(rename = "startUtc")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endUtc")]
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(owner_id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            owner_id: owner_id.into(),
            start,
            end,
        }
    }
}

/// Busy intervals grouped by owner, each group sorted and merged.
#[derive(Debug, Clone, Default)]
pub struct BusyIndex {
    by_owner: HashMap<String, Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl BusyIndex {
    /// Group `intervals` by owner and merge each owner's periods.
    ///
    /// Empty or inverted intervals (`end <= start`) cover no time and are dropped,
    /// but their owner still counts as having supplied busy data.
    pub fn build(intervals: &[BusyInterval]) -> Self {
        let mut by_owner: HashMap<String, Vec<(DateTime<Utc>, DateTime<Utc>)>> = HashMap::new();
        for interval in intervals {
            let periods = by_owner.entry(interval.owner_id.clone()).or_default();
            if interval.start < interval.end {
                periods.push((interval.start, interval.end));
            }
        }
        for periods in by_owner.values_mut() {
            merge_periods(periods);
        }
        Self { by_owner }
    }

    /// Whether `owner_id` has any busy time overlapping `[start, end)`.
    ///
    /// Touching endpoints do not conflict. An owner with no intervals is free.
    pub fn is_busy(&self, start: DateTime<Utc>, end: DateTime<Utc>, owner_id: &str) -> bool {
        let Some(periods) = self.by_owner.get(owner_id) else {
            return false;
        };
        // First merged period that ends after `start`; it is the only candidate,
        // since periods are disjoint and sorted.
        let idx = periods.partition_point(|&(_, busy_end)| busy_end <= start);
        periods
            .get(idx)
            .is_some_and(|&(busy_start, busy_end)| start < busy_end && end > busy_start)
    }

    /// Whether any busy data was supplied for `owner_id`, even if none of it
    /// covers any time.
    pub fn has_intervals(&self, owner_id: &str) -> bool {
        self.by_owner.contains_key(owner_id)
    }

    /// Merged busy periods for `owner_id`, sorted by start.
    pub fn periods(&self, owner_id: &str) -> &[(DateTime<Utc>, DateTime<Utc>)] {
        self.by_owner.get(owner_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Sort and merge overlapping or adjacent periods in place.
fn merge_periods(periods: &mut Vec<(DateTime<Utc>, DateTime<Utc>)>) {
    periods.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::with_capacity(periods.len());
    for &(start, end) in periods.iter() {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }
    *periods = merged;
}
