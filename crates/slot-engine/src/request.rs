//! Search requests and their validation.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::busy::BusyInterval;
use crate::config::SchedulingPolicy;
use crate::error::{Result, SlotError};
use crate::participant::ParticipantSpec;
use crate::timezone::TimezoneResolver;

/// Timezone whose calendar days delimit the search range when none is given.
pub const DEFAULT_SCAN_TIMEZONE: &str = "UTC";

const MINUTES_PER_DAY: i64 = 24 * 60;

/// One scheduling question: who, over which days, for how long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub participants: Vec<ParticipantSpec>,
    #[serde(default)]
    pub busy_intervals: Vec<BusyInterval>,
    /// First calendar day searched (inclusive).
    pub range_start: NaiveDate,
    /// Last calendar day searched (inclusive).
    pub range_end: NaiveDate,
    pub duration_minutes: i64,
    /// Scan granularity; the policy default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_minutes: Option<i64>,
    /// Timezone whose local midnights bound `range_start`..`range_end`.
    #[serde(default = "default_scan_timezone")]
    pub scan_timezone: String,
}

fn default_scan_timezone() -> String {
    DEFAULT_SCAN_TIMEZONE.to_string()
}

impl SearchRequest {
    pub fn new(
        participants: Vec<ParticipantSpec>,
        range_start: NaiveDate,
        range_end: NaiveDate,
        duration_minutes: i64,
    ) -> Self {
        Self {
            participants,
            busy_intervals: Vec::new(),
            range_start,
            range_end,
            duration_minutes,
            step_minutes: None,
            scan_timezone: default_scan_timezone(),
        }
    }

    /// Parse a request from its JSON form.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRequest` if the JSON does not describe a request.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SlotError::InvalidRequest(e.to_string()))
    }

    pub fn with_busy(mut self, busy_intervals: Vec<BusyInterval>) -> Self {
        self.busy_intervals = busy_intervals;
        self
    }

    pub fn with_step(mut self, step_minutes: i64) -> Self {
        self.step_minutes = Some(step_minutes);
        self
    }

    pub fn with_scan_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.scan_timezone = timezone.into();
        self
    }

    /// The effective step: the request's own, or the policy default.
    pub fn step(&self, policy: &SchedulingPolicy) -> i64 {
        self.step_minutes.unwrap_or(policy.default_step_minutes)
    }

    /// The meeting length.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRequest` if `duration_minutes` does not fit a
    /// `Duration`.
    pub fn duration(&self) -> Result<Duration> {
        minutes(self.duration_minutes, "durationMinutes")
    }

    /// The effective step as a `Duration`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRequest` if the step does not fit a `Duration`.
    pub fn step_duration(&self, policy: &SchedulingPolicy) -> Result<Duration> {
        minutes(self.step(policy), "stepMinutes")
    }

    /// Reject requests that cannot be scanned.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRequest` for a non-positive duration or step,
    /// `range_end < range_start`, a range longer than the policy allows, a
    /// duration longer than the range, a step longer than the policy's longest
    /// range, an empty or duplicated participant list, or an unknown scan
    /// timezone.
    pub fn validate(
        &self,
        policy: &SchedulingPolicy,
        resolver: &dyn TimezoneResolver,
    ) -> Result<()> {
        if self.duration_minutes <= 0 {
            return Err(invalid(format!(
                "durationMinutes must be positive, got {}",
                self.duration_minutes
            )));
        }
        let step = self.step(policy);
        if step <= 0 {
            return Err(invalid(format!("stepMinutes must be positive, got {}", step)));
        }
        if self.range_end < self.range_start {
            return Err(invalid(format!(
                "rangeEnd {} is before rangeStart {}",
                self.range_end, self.range_start
            )));
        }
        let days = (self.range_end - self.range_start).num_days() + 1;
        if days > policy.max_range_days {
            return Err(invalid(format!(
                "range spans {} days, more than the {} allowed",
                days, policy.max_range_days
            )));
        }
        let range_minutes = days.saturating_mul(MINUTES_PER_DAY);
        if self.duration_minutes > range_minutes {
            return Err(invalid(format!(
                "durationMinutes {} is longer than the {}-day range",
                self.duration_minutes, days
            )));
        }
        let max_step = policy.max_range_days.saturating_mul(MINUTES_PER_DAY);
        if step > max_step {
            return Err(invalid(format!(
                "stepMinutes {} exceeds the longest allowed range ({} minutes)",
                step, max_step
            )));
        }
        if self.participants.is_empty() {
            return Err(invalid("at least one participant is required".to_string()));
        }
        let mut seen = HashSet::with_capacity(self.participants.len());
        for p in &self.participants {
            if !seen.insert(p.id.as_str()) {
                return Err(invalid(format!("duplicate participant id '{}'", p.id)));
            }
        }
        if !resolver.supports(&self.scan_timezone) {
            return Err(invalid(format!("unknown scanTimezone '{}'", self.scan_timezone)));
        }
        Ok(())
    }
}

fn invalid(message: String) -> SlotError {
    SlotError::InvalidRequest(message)
}

fn minutes(value: i64, field: &str) -> Result<Duration> {
    Duration::try_minutes(value)
        .ok_or_else(|| invalid(format!("{} {} is out of range", field, value)))
}
