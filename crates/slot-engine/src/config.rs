//! Scheduling policy: the configurable defaults the engine applies.

use serde::{Deserialize, Serialize};

use crate::window::AvailabilityWindow;

pub const DEFAULT_STEP_MINUTES: i64 = 30;
pub const DEFAULT_MAX_RANGE_DAYS: i64 = 92;

/// Defaults applied while ingesting a roster and validating a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulingPolicy {
    /// Substituted for a participant who declares no windows at all.
    pub fallback_window: AvailabilityWindow,
    /// Scan granularity when the request does not set `stepMinutes`.
    pub default_step_minutes: i64,
    /// Longest accepted search range, in calendar days (inclusive of both ends).
    pub max_range_days: i64,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            fallback_window: AvailabilityWindow::legacy_default(),
            default_step_minutes: DEFAULT_STEP_MINUTES,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }
}
