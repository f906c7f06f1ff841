//! # slot-engine
//!
//! Availability intersection and match classification for scheduling meetings
//! across timezones.
//!
//! Each participant declares recurring weekly "humane" windows in their own
//! timezone and may have machine-sourced busy intervals. Given a roster and a
//! calendar range, the engine finds every slot that fits all declared windows,
//! marks which of those nobody is busy for (full matches), and for the rest
//! reports who can and cannot attend. When nothing is a full match it also
//! names the participants who block most often.
//!
//! The engine is pure and synchronous: no I/O, no retained state. Timezone
//! rules come from a [`TimezoneResolver`].
//!
//! ## Modules
//!
//! - [`window`] — Day classes and validated availability windows
//! - [`timezone`] — UTC ↔ local wall-clock resolution (`chrono-tz` by default)
//! - [`dst`] — Local times inside DST gaps and overlaps
//! - [`participant`] — Roster ingestion and data-quality issues
//! - [`normalizer`] — Does a UTC span fit a participant's declared windows?
//! - [`busy`] — Per-participant busy interval index
//! - [`scanner`] — Pattern-valid candidate spans over the search range
//! - [`classifier`] — Full / partial match classification
//! - [`blocker`] — Blocker ranking and best partial slot
//! - [`request`] — Search requests and validation
//! - [`search`] — The end-to-end search
//! - [`config`] — Scheduling policy defaults
//! - [`error`] — Error types

pub mod blocker;
pub mod busy;
pub mod classifier;
pub mod config;
pub mod dst;
pub mod error;
pub mod normalizer;
pub mod participant;
pub mod request;
pub mod scanner;
pub mod search;
pub mod timezone;
pub mod window;

pub use blocker::{summarize, BlockerSummary, ParticipantBlockRate};
pub use busy::{BusyIndex, BusyInterval};
pub use classifier::{classify, CandidateSlot, UnavailableParticipant, UnavailableReason};
pub use config::SchedulingPolicy;
pub use error::SlotError;
pub use normalizer::{check_compatibility, is_compatible, CompatibilityReport};
pub use participant::{DataIssue, Participant, ParticipantSpec};
pub use request::SearchRequest;
pub use scanner::{scan, ScanPlan, TimeSpan};
pub use search::{find_meeting_slots, find_meeting_slots_with, SearchOutcome};
pub use timezone::{ChronoTzResolver, TimezoneResolver};
pub use window::{AvailabilityWindow, DayClass, WindowSpec};
