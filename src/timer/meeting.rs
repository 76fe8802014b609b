use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::state::{CompletedPhase, StopwatchState, TimerState, Transition};
use crate::agenda::{Phase, PhaseSequence};
use crate::allocator::SpeakerRoster;

/// One countdown/stopwatch step: 0.1 seconds
pub const TICK_TENTHS: i64 = 1;

/// The phases a meeting walks through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Lineup {
    /// Fixed team phases (teams view)
    Fixed(PhaseSequence),
    /// Editable speaker roster with derived durations (individuals view)
    Speakers(SpeakerRoster),
}

impl Lineup {
    pub fn phases(&self) -> &[Phase] {
        match self {
            Lineup::Fixed(sequence) => sequence.phases(),
            Lineup::Speakers(roster) => roster.entries(),
        }
    }
}

/// Meeting state machine
///
/// Idle(initial) -> Running(i) <-> Paused(i) -> Running(i + 1) -> .. -> Ended.
/// All transitions are plain method calls; the interval timers that feed
/// [`Meeting::tick_countdown`] and [`Meeting::tick_stopwatch`] live in the
/// session layer.
#[derive(Debug, Clone)]
pub struct Meeting {
    lineup: Lineup,
    timer: TimerState,
    stopwatch: StopwatchState,
    completed: Vec<CompletedPhase>,
}

impl Meeting {
    pub fn new(lineup: Lineup) -> Self {
        let mut meeting = Self {
            lineup,
            timer: TimerState::default(),
            stopwatch: StopwatchState::default(),
            completed: Vec::new(),
        };
        meeting.preload_first_phase();
        meeting
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn stopwatch(&self) -> &StopwatchState {
        &self.stopwatch
    }

    pub fn completed_phases(&self) -> &[CompletedPhase] {
        &self.completed
    }

    pub fn current_phase(&self) -> &Phase {
        &self.lineup.phases()[self.timer.current_index]
    }

    pub fn is_running(&self) -> bool {
        self.timer.running
    }

    pub fn is_ended(&self) -> bool {
        self.timer.meeting_ended
    }

    pub fn is_overtime(&self) -> bool {
        self.timer.overtime
    }

    /// Still in the lobby: nothing has been started yet
    pub fn is_idle(&self) -> bool {
        self.timer.current_index == 0 && !self.timer.running && !self.timer.meeting_ended
    }

    /// Start or stop the countdown for the current phase
    pub fn toggle(&mut self, now: DateTime<Utc>) -> Transition {
        if self.timer.meeting_ended {
            debug!("Meeting already ended, ignoring toggle");
            return Transition::Ignored;
        }

        if !self.timer.running {
            self.start(now)
        } else {
            self.stop()
        }
    }

    fn start(&mut self, now: DateTime<Utc>) -> Transition {
        self.timer.running = true;
        self.timer.overtime = false;

        if self.timer.current_index == 0 {
            self.load_phase(1);
        }

        let stopwatch_started = self.stopwatch.start(now);

        info!(
            "Started phase {} '{}' ({:.1}s left)",
            self.timer.current_index,
            self.current_phase().name,
            self.timer.remaining_secs()
        );

        Transition::Started {
            index: self.timer.current_index,
            stopwatch_started,
        }
    }

    fn stop(&mut self) -> Transition {
        self.timer.running = false;

        let record = if self.current_phase().is_initial {
            None
        } else {
            let phase = self.current_phase();
            let spent_tenths = phase.duration_tenths() - self.timer.remaining_tenths;
            let record = CompletedPhase {
                name: phase.name.clone(),
                actual_duration_secs: spent_tenths as f64 / 10.0,
                category: phase.category,
            };

            info!(
                "Completed phase '{}' in {:.1}s (allotted {}s)",
                record.name, record.actual_duration_secs, phase.duration_secs
            );

            self.completed.push(record.clone());
            Some(record)
        };

        let next_index = self.timer.current_index + 1;
        if next_index < self.lineup.phases().len() {
            self.load_phase(next_index);
            Transition::Stopped { record, next_index }
        } else {
            self.timer.meeting_ended = true;
            self.stopwatch.stop();

            info!(
                "Meeting ended after {:.1}s ({} phases)",
                self.stopwatch.elapsed_secs(),
                self.completed.len()
            );

            Transition::Ended { record }
        }
    }

    /// Advance the countdown by one step; no-op unless running
    ///
    /// The countdown keeps going below zero. The overtime flag is raised by
    /// the first tick that begins at or below zero.
    pub fn tick_countdown(&mut self, step_tenths: i64) {
        if !self.timer.running || self.timer.meeting_ended {
            return;
        }

        if self.timer.remaining_tenths <= 0 && !self.timer.overtime {
            self.timer.overtime = true;
            info!("Phase '{}' is in overtime", self.current_phase().name);
        }

        self.timer.remaining_tenths -= step_tenths;
    }

    /// Advance the meeting stopwatch by one step; no-op unless running
    pub fn tick_stopwatch(&mut self, step_tenths: u64) {
        self.stopwatch.tick(step_tenths);
    }

    /// Share of the current phase's time still left, in `[0, 100]`
    pub fn progress_percent(&self) -> f64 {
        let phase = self.current_phase();
        if phase.is_initial {
            return 100.0;
        }

        let total = phase.duration_tenths();
        if total <= 0 {
            return 0.0;
        }

        (self.timer.remaining_tenths as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Theme key for the active phase, overridden while in overtime
    pub fn theme(&self) -> &'static str {
        if self.timer.overtime {
            "theme-overtime"
        } else {
            self.current_phase().category.theme()
        }
    }

    /// Mutable access to the speaker roster while still in the lobby
    ///
    /// Call [`Meeting::roster_edited`] after changing the roster so the
    /// lobby countdown reflects the new allocation.
    pub fn roster_mut(&mut self) -> Option<&mut SpeakerRoster> {
        if !self.is_idle() {
            return None;
        }

        match &mut self.lineup {
            Lineup::Speakers(roster) => Some(roster),
            Lineup::Fixed(_) => None,
        }
    }

    pub fn roster(&self) -> Option<&SpeakerRoster> {
        match &self.lineup {
            Lineup::Speakers(roster) => Some(roster),
            Lineup::Fixed(_) => None,
        }
    }

    pub fn roster_edited(&mut self) {
        if self.is_idle() {
            self.preload_first_phase();
        }
    }

    fn load_phase(&mut self, index: usize) {
        self.timer.current_index = index;
        self.timer.remaining_tenths = self.lineup.phases()[index].duration_tenths();
        self.timer.overtime = false;
    }

    /// The lobby shows the first real phase's allotted time
    fn preload_first_phase(&mut self) {
        self.timer.remaining_tenths = self
            .lineup
            .phases()
            .get(1)
            .map(Phase::duration_tenths)
            .unwrap_or_default();
    }
}
