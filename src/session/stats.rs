use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::agenda::{Category, Phase};
use crate::timer::CompletedPhase;

/// Point-in-time view of a meeting, everything a front-end needs to render
#[derive(Debug, Clone, Serialize)]
pub struct MeetingSnapshot {
    pub meeting_id: String,

    /// Active phase
    pub phase_name: String,
    pub phase_index: usize,
    pub phase_count: usize,
    pub category: Category,

    /// Theme key (`theme-overtime` while over time)
    pub theme: String,

    pub running: bool,
    pub overtime: bool,
    pub ended: bool,

    /// Remaining time in seconds; negative while in overtime
    pub remaining_secs: f64,

    /// Countdown label, e.g. "2:56" or "-0:12"
    pub countdown: String,

    /// Progress ring fill in percent, 0 to 100
    pub progress_percent: f64,

    /// Meeting stopwatch in seconds
    pub elapsed_secs: f64,

    /// Stopwatch label, e.g. "14:07"
    pub elapsed: String,

    /// When the meeting was first started
    pub started_at: Option<DateTime<Utc>>,

    /// Start time in the configured zone, e.g. "09:30"
    pub started_at_local: Option<String>,

    /// Finished phases, in order
    pub completed: Vec<CompletedPhase>,
}

/// Speaker roster view for the individuals screen
#[derive(Debug, Clone, Serialize)]
pub struct RosterSnapshot {
    /// Regular speakers, removable by index
    pub speakers: Vec<Phase>,

    /// Blocker round and closing slot
    pub pinned: Vec<Phase>,

    pub per_speaker_secs: u32,
    pub total_secs: u32,
    pub buffer_secs: u32,

    /// Whether edits are still accepted
    pub editable: bool,
}
