//! Split pattern-valid spans into full and partial matches by busy time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::busy::BusyIndex;
use crate::participant::Participant;
use crate::scanner::TimeSpan;

/// Why a participant cannot attend a candidate.
///
/// Only busy time disqualifies a pattern-valid slot; a participant with no
/// synced busy data is assumed free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnavailableReason {
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableParticipant {
    pub id: String,
    pub reason: UnavailableReason,
}

/// A pattern-valid slot with per-participant availability.
///
/// Every participant appears exactly once, in either `available_participant_ids`
/// or `unavailable_participants`, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSlot {
    #[serde(rename = "startUtc")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endUtc")]
    pub end: DateTime<Utc>,
    /// True iff nobody is unavailable.
    pub is_full_match: bool,
    pub available_participant_ids: Vec<String>,
    pub unavailable_participants: Vec<UnavailableParticipant>,
}

impl CandidateSlot {
    pub fn span(&self) -> TimeSpan {
        TimeSpan {
            start: self.start,
            end: self.end,
        }
    }

    pub fn available_count(&self) -> usize {
        self.available_participant_ids.len()
    }

    pub fn is_unavailable(&self, participant_id: &str) -> bool {
        self.unavailable_participants
            .iter()
            .any(|u| u.id == participant_id)
    }
}

/// Classify one pattern-valid span against everyone's busy time.
pub fn classify(span: TimeSpan, participants: &[Participant], busy: &BusyIndex) -> CandidateSlot {
    let mut available_participant_ids = Vec::with_capacity(participants.len());
    let mut unavailable_participants = Vec::new();

    for participant in participants {
        if busy.is_busy(span.start, span.end, participant.id()) {
            unavailable_participants.push(UnavailableParticipant {
                id: participant.id().to_string(),
                reason: UnavailableReason::Busy,
            });
        } else {
            available_participant_ids.push(participant.id().to_string());
        }
    }

    CandidateSlot {
        start: span.start,
        end: span.end,
        is_full_match: unavailable_participants.is_empty(),
        available_participant_ids,
        unavailable_participants,
    }
}

/// Classify every span, preserving input order.
pub fn classify_all(
    spans: &[TimeSpan],
    participants: &[Participant],
    busy: &BusyIndex,
) -> Vec<CandidateSlot> {
    spans
        .iter()
        .map(|&span| classify(span, participants, busy))
        .collect()
}
