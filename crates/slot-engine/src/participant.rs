//! Participants and roster ingestion.
//!
//! Raw [`ParticipantSpec`] records are validated into [`Participant`]s. Ingestion
//! never fails as a whole: a malformed window is dropped (it would never match
//! anyway) and an unknown timezone is kept (the participant then never matches),
//! and both are reported as [`DataIssue`]s so the caller can surface them.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::SchedulingPolicy;
use crate::timezone::TimezoneResolver;
use crate::window::{AvailabilityWindow, WindowSpec};

/// A participant as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSpec {
    /// Stable key, e.g. an email address.
    pub id: String,
    /// IANA timezone id.
    pub timezone: String,
    #[serde(default)]
    pub windows: Vec<WindowSpec>,
}

/// A validated participant, immutable for the duration of one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    id: String,
    timezone: String,
    windows: Vec<AvailabilityWindow>,
}

impl Participant {
    /// Build a participant, substituting the legacy 09:00–17:00 weekday window
    /// when `windows` is empty.
    pub fn new(
        id: impl Into<String>,
        timezone: impl Into<String>,
        windows: Vec<AvailabilityWindow>,
    ) -> Self {
        Self::with_fallback(id, timezone, windows, AvailabilityWindow::legacy_default())
    }

    /// Build a participant, substituting `fallback` when `windows` is empty.
    pub fn with_fallback(
        id: impl Into<String>,
        timezone: impl Into<String>,
        windows: Vec<AvailabilityWindow>,
        fallback: AvailabilityWindow,
    ) -> Self {
        let windows = if windows.is_empty() {
            vec![fallback]
        } else {
            windows
        };
        Self {
            id: id.into(),
            timezone: timezone.into(),
            windows,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Declared windows, OR-combined: the participant is available when any one fits.
    ///
    /// Empty only when every declared window was malformed, in which case the
    /// participant never matches.
    pub fn windows(&self) -> &[AvailabilityWindow] {
        &self.windows
    }
}

/// A data-quality problem found while ingesting a roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataIssue {
    /// A window record failed validation and is treated as never matching.
    #[serde(rename_all = "camelCase")]
    MalformedWindow {
        participant_id: String,
        index: usize,
        reason: String,
    },
    /// The participant's timezone is unknown; they never satisfy any window.
    #[serde(rename_all = "camelCase")]
    UnknownTimezone {
        participant_id: String,
        timezone: String,
    },
    /// The participant declared no windows and the policy fallback was applied.
    #[serde(rename_all = "camelCase")]
    FallbackApplied {
        participant_id: String,
        window: AvailabilityWindow,
    },
}

impl DataIssue {
    pub fn participant_id(&self) -> &str {
        match self {
            DataIssue::MalformedWindow { participant_id, .. }
            | DataIssue::UnknownTimezone { participant_id, .. }
            | DataIssue::FallbackApplied { participant_id, .. } => participant_id,
        }
    }

    /// Whether this issue degrades scheduling (as opposed to an informational note).
    pub fn is_degrading(&self) -> bool {
        !matches!(self, DataIssue::FallbackApplied { .. })
    }
}

/// The validated participants of one search plus everything found wrong with them.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub participants: Vec<Participant>,
    pub issues: Vec<DataIssue>,
}

impl Roster {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(Participant::id)
    }
}

/// Validate one participant record.
pub fn ingest_participant(
    spec: &ParticipantSpec,
    policy: &SchedulingPolicy,
    resolver: &dyn TimezoneResolver,
    issues: &mut Vec<DataIssue>,
) -> Participant {
    if !resolver.supports(&spec.timezone) {
        warn!(
            "participant {} has unknown timezone '{}'; excluding from all windows",
            spec.id, spec.timezone
        );
        issues.push(DataIssue::UnknownTimezone {
            participant_id: spec.id.clone(),
            timezone: spec.timezone.clone(),
        });
    }

    if spec.windows.is_empty() {
        issues.push(DataIssue::FallbackApplied {
            participant_id: spec.id.clone(),
            window: policy.fallback_window,
        });
        return Participant::with_fallback(
            &spec.id,
            &spec.timezone,
            Vec::new(),
            policy.fallback_window,
        );
    }

    let mut windows = Vec::with_capacity(spec.windows.len());
    for (index, raw) in spec.windows.iter().enumerate() {
        match raw.validate() {
            Ok(window) => windows.push(window),
            Err(e) => {
                warn!("participant {} window #{} dropped: {}", spec.id, index, e);
                issues.push(DataIssue::MalformedWindow {
                    participant_id: spec.id.clone(),
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    // Declared-but-all-malformed must not fall back; it fails closed.
    Participant {
        id: spec.id.clone(),
        timezone: spec.timezone.clone(),
        windows,
    }
}

/// Validate a whole roster, preserving input order.
pub fn ingest_roster(
    specs: &[ParticipantSpec],
    policy: &SchedulingPolicy,
    resolver: &dyn TimezoneResolver,
) -> Roster {
    let mut issues = Vec::new();
    let participants = specs
        .iter()
        .map(|spec| ingest_participant(spec, policy, resolver, &mut issues))
        .collect();
    Roster {
        participants,
        issues,
    }
}
