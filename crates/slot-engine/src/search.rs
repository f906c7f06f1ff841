//! One search, start to finish: validate, ingest, scan, classify, summarize.
//!
//! Nothing is retained between calls, so a search can be re-run whenever the
//! roster, declared windows or busy data change.

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::blocker::{summarize, BlockerSummary};
use crate::busy::BusyIndex;
use crate::classifier::{classify_all, CandidateSlot};
use crate::config::SchedulingPolicy;
use crate::error::Result;
use crate::participant::{ingest_roster, DataIssue, Roster};
use crate::request::SearchRequest;
use crate::scanner::{scan, ScanPlan};
use crate::timezone::{ChronoTzResolver, TimezoneResolver};

/// Everything one search produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    /// Pattern-valid candidates, ascending by start.
    pub slots: Vec<CandidateSlot>,
    /// Present only when candidates exist but none is a full match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockers: Option<BlockerSummary>,
    /// Data-quality problems found in the roster.
    pub issues: Vec<DataIssue>,
    /// Participants for whom no busy intervals were supplied, in roster order.
    /// They are treated as free; callers may want to flag them as not synced.
    pub participants_without_busy_data: Vec<String>,
}

impl SearchOutcome {
    pub fn full_matches(&self) -> impl Iterator<Item = &CandidateSlot> {
        self.slots.iter().filter(|s| s.is_full_match)
    }

    pub fn partial_matches(&self) -> impl Iterator<Item = &CandidateSlot> {
        self.slots.iter().filter(|s| !s.is_full_match)
    }

    pub fn has_full_match(&self) -> bool {
        self.slots.iter().any(|s| s.is_full_match)
    }

    /// Whether busy intervals were supplied for `participant_id`.
    pub fn has_busy_data(&self, participant_id: &str) -> bool {
        !self
            .participants_without_busy_data
            .iter()
            .any(|id| id == participant_id)
    }

    /// Group candidates by the local date of their start in `timezone`.
    ///
    /// Groups come out in ascending date order, each in ascending start order.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimezone` if `timezone` cannot be resolved.
    pub fn group_by_local_day(
        &self,
        timezone: &str,
        resolver: &dyn TimezoneResolver,
    ) -> Result<Vec<(NaiveDate, Vec<&CandidateSlot>)>> {
        let mut groups: Vec<(NaiveDate, Vec<&CandidateSlot>)> = Vec::new();
        for slot in &self.slots {
            let day = resolver.to_local(timezone, slot.start)?.date();
            if let Some((current, members)) = groups.last_mut() {
                if *current == day {
                    members.push(slot);
                    continue;
                }
            }
            groups.push((day, vec![slot]));
        }
        Ok(groups)
    }
}

/// Run a search with the default policy and the `chrono-tz` resolver.
///
/// # Errors
/// Returns `SlotError::InvalidRequest` if the request cannot be scanned. Bad
/// windows and unknown participant timezones are reported in
/// [`SearchOutcome::issues`] instead.
pub fn find_meeting_slots(request: &SearchRequest) -> Result<SearchOutcome> {
    find_meeting_slots_with(request, &SchedulingPolicy::default(), &ChronoTzResolver)
}

/// Run a search with an explicit policy and timezone resolver.
pub fn find_meeting_slots_with(
    request: &SearchRequest,
    policy: &SchedulingPolicy,
    resolver: &dyn TimezoneResolver,
) -> Result<SearchOutcome> {
    request.validate(policy, resolver)?;
    let plan = ScanPlan::for_request(request, policy, resolver)?;
    let Roster {
        participants,
        issues,
    } = ingest_roster(&request.participants, policy, resolver);

    let spans = scan(&plan, &participants, resolver);
    let busy = BusyIndex::build(&request.busy_intervals);
    let slots = classify_all(&spans, &participants, &busy);
    let participants_without_busy_data: Vec<String> = participants
        .iter()
        .map(|p| p.id())
        .filter(|id| !busy.has_intervals(id))
        .map(str::to_string)
        .collect();

    let full = slots.iter().filter(|s| s.is_full_match).count();
    debug!(
        "{} candidates for {} participants: {} full, {} partial",
        slots.len(),
        participants.len(),
        full,
        slots.len() - full
    );

    let blockers = if !slots.is_empty() && full == 0 {
        let ids: Vec<&str> = participants.iter().map(|p| p.id()).collect();
        Some(summarize(&slots, &ids))
    } else {
        None
    };

    Ok(SearchOutcome {
        slots,
        blockers,
        issues,
        participants_without_busy_data,
    })
}
