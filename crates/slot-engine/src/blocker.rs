//! Explain why no full match exists: who blocks most often, and the best
//! partial slot to offer instead.
//!
//! Advisory only. The candidate list is read, never filtered or reordered.

use serde::Serialize;

use crate::classifier::CandidateSlot;

/// How often one participant's busy time sank a candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantBlockRate {
    pub id: String,
    /// Candidates in which this participant was unavailable.
    pub blocked_count: usize,
    /// `blocked_count / candidate count`; 0.0 when there are no candidates.
    pub blocked_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockerSummary {
    /// Ranked by `blocked_fraction`, highest first; ties keep roster order.
    pub per_participant: Vec<ParticipantBlockRate>,
    /// Candidate with the most attendees, earliest on ties. `None` when there
    /// are no candidates or nobody can attend any of them.
    pub best_partial_slot: Option<CandidateSlot>,
}

impl BlockerSummary {
    /// The principal blocker, if anyone was ever unavailable.
    pub fn top_blocker(&self) -> Option<&ParticipantBlockRate> {
        self.per_participant.first().filter(|r| r.blocked_count > 0)
    }
}

/// Aggregate partial-match data over one search's candidates.
///
/// `participant_ids` is the roster, in roster order.
pub fn summarize<S: AsRef<str>>(slots: &[CandidateSlot], participant_ids: &[S]) -> BlockerSummary {
    let total = slots.len();

    let mut per_participant: Vec<ParticipantBlockRate> = participant_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            let blocked_count = slots.iter().filter(|s| s.is_unavailable(id)).count();
            let blocked_fraction = if total == 0 {
                0.0
            } else {
                blocked_count as f64 / total as f64
            };
            ParticipantBlockRate {
                id: id.to_string(),
                blocked_count,
                blocked_fraction,
            }
        })
        .collect();
    // Same denominator for everyone, so ranking by count ranks by fraction.
    per_participant.sort_by(|a, b| b.blocked_count.cmp(&a.blocked_count));

    BlockerSummary {
        per_participant,
        best_partial_slot: best_partial(slots).cloned(),
    }
}

fn best_partial(slots: &[CandidateSlot]) -> Option<&CandidateSlot> {
    let mut best: Option<&CandidateSlot> = None;
    for slot in slots.iter().filter(|s| s.available_count() > 0) {
        let better = match best {
            None => true,
            Some(current) => {
                slot.available_count() > current.available_count()
                    || (slot.available_count() == current.available_count()
                        && slot.start < current.start)
            }
        };
        if better {
            best = Some(slot);
        }
    }
    best
}
