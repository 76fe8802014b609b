use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agenda::Category;

/// Countdown state for the active phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Index into the lineup (0 = initial phase)
    pub current_index: usize,

    /// Remaining time in tenths of a second; negative while in overtime
    pub remaining_tenths: i64,

    /// Set once a tick starts at or below zero
    pub overtime: bool,

    pub running: bool,

    /// Terminal: no transitions are accepted afterwards
    pub meeting_ended: bool,
}

impl TimerState {
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_tenths as f64 / 10.0
    }
}

/// Meeting-wide elapsed time counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchState {
    pub elapsed_tenths: u64,

    /// Wall-clock time of the first start
    pub started_at: Option<DateTime<Utc>>,

    pub running: bool,
}

impl StopwatchState {
    /// Start the stopwatch; only the first call has any effect
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.started_at.is_some() {
            return false;
        }

        self.started_at = Some(now);
        self.running = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self, step_tenths: u64) {
        if self.running {
            self.elapsed_tenths += step_tenths;
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_tenths as f64 / 10.0
    }
}

/// A finished phase in the meeting log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedPhase {
    pub name: String,

    /// Actual time spent, one-decimal precision
    pub actual_duration_secs: f64,

    pub category: Category,
}

/// Outcome of a start/stop toggle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    /// Countdown running for the phase at `index`
    Started {
        index: usize,
        /// True only for the very first start of the meeting
        stopwatch_started: bool,
    },
    /// Phase committed to the log, next phase loaded and paused
    Stopped {
        record: Option<CompletedPhase>,
        next_index: usize,
    },
    /// Last phase committed, meeting over
    Ended { record: Option<CompletedPhase> },
    /// Toggle after the meeting ended
    Ignored,
}
