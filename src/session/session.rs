use super::config::SessionConfig;
use super::stats::{MeetingSnapshot, RosterSnapshot};
use crate::allocator::SpeakerRoster;
use crate::timer::{
    format_clock, format_countdown, format_start_time, Clock, CompletedPhase, Lineup, Meeting,
    Transition,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

/// Outcome of a speaker roster edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterEdit {
    Applied,
    /// Blank input, nothing changed
    Ignored,
    /// Meeting already started, or the view has no roster
    Locked,
    /// No speaker at the given index
    NotFound,
}

/// State shared with the tick tasks
struct Shared {
    meeting: Meeting,
    rng: StdRng,
}

/// A live meeting: the state machine plus the interval timers driving it
pub struct MeetingSession {
    /// Session configuration
    config: SessionConfig,

    /// Meeting state and shuffle source
    shared: Arc<Mutex<Shared>>,

    /// Source of the meeting start time
    clock: Arc<dyn Clock>,

    /// Countdown ticker, alive only while a phase is running
    countdown_task: StdMutex<Option<JoinHandle<()>>>,

    /// Stopwatch ticker, alive from the first start until the meeting ends
    stopwatch_task: StdMutex<Option<JoinHandle<()>>>,
}

impl MeetingSession {
    pub fn new(config: SessionConfig, lineup: Lineup, clock: Arc<dyn Clock>) -> Self {
        info!(
            "Creating meeting session: {} ({} phases)",
            config.meeting_id,
            lineup.phases().len()
        );

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            shared: Arc::new(Mutex::new(Shared {
                meeting: Meeting::new(lineup),
                rng,
            })),
            clock,
            countdown_task: StdMutex::new(None),
            stopwatch_task: StdMutex::new(None),
        }
    }

    pub fn meeting_id(&self) -> &str {
        &self.config.meeting_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start or stop the current phase
    pub async fn toggle(&self) -> Transition {
        self.toggle_with_snapshot().await.0
    }

    /// Toggle and capture the resulting view state under the same lock
    pub async fn toggle_with_snapshot(&self) -> (Transition, MeetingSnapshot) {
        let mut shared = self.shared.lock().await;
        let transition = shared.meeting.toggle(self.clock.now());

        // Tickers are (re)armed under the state lock so a concurrent toggle
        // cannot observe a running meeting without its countdown
        match &transition {
            Transition::Started {
                stopwatch_started, ..
            } => {
                self.spawn_countdown();
                if *stopwatch_started {
                    self.spawn_stopwatch();
                }
            }
            Transition::Stopped { .. } => {
                replace_task(&self.countdown_task, None);
            }
            Transition::Ended { .. } => {
                replace_task(&self.countdown_task, None);
                replace_task(&self.stopwatch_task, None);
                info!("Meeting {} ended", self.config.meeting_id);
            }
            Transition::Ignored => {
                warn!("Meeting {} already ended", self.config.meeting_id);
            }
        }

        let snapshot = self.snapshot_of(&shared.meeting);
        (transition, snapshot)
    }

    /// Current view state
    pub async fn snapshot(&self) -> MeetingSnapshot {
        let shared = self.shared.lock().await;
        self.snapshot_of(&shared.meeting)
    }

    fn snapshot_of(&self, meeting: &Meeting) -> MeetingSnapshot {
        let phase = meeting.current_phase();
        let timer = meeting.timer();
        let stopwatch = meeting.stopwatch();

        MeetingSnapshot {
            meeting_id: self.config.meeting_id.clone(),
            phase_name: phase.name.clone(),
            phase_index: timer.current_index,
            phase_count: meeting.lineup().phases().len(),
            category: phase.category,
            theme: meeting.theme().to_string(),
            running: timer.running,
            overtime: timer.overtime,
            ended: timer.meeting_ended,
            remaining_secs: timer.remaining_secs(),
            countdown: format_countdown(timer.remaining_secs(), timer.overtime),
            progress_percent: meeting.progress_percent(),
            elapsed_secs: stopwatch.elapsed_secs(),
            elapsed: format_clock(stopwatch.elapsed_secs()),
            started_at: stopwatch.started_at,
            started_at_local: stopwatch
                .started_at
                .map(|t| format_start_time(t, self.config.timezone)),
            completed: meeting.completed_phases().to_vec(),
        }
    }

    /// Accumulated completed-phase log
    pub async fn completed_phases(&self) -> Vec<CompletedPhase> {
        let shared = self.shared.lock().await;
        shared.meeting.completed_phases().to_vec()
    }

    /// Speaker roster, if this meeting has one
    pub async fn roster(&self) -> Option<RosterSnapshot> {
        let shared = self.shared.lock().await;
        let editable = shared.meeting.is_idle();

        shared.meeting.roster().map(|roster| {
            let policy = roster.policy();
            RosterSnapshot {
                speakers: roster.speakers().to_vec(),
                pinned: roster.pinned().to_vec(),
                per_speaker_secs: roster.per_speaker_secs(),
                total_secs: policy.total_secs,
                buffer_secs: policy.buffer_secs,
                editable,
            }
        })
    }

    pub async fn add_speaker(&self, name: &str) -> RosterEdit {
        self.edit_roster(|roster, _| {
            if roster.add_speaker(name) {
                RosterEdit::Applied
            } else {
                RosterEdit::Ignored
            }
        })
        .await
    }

    pub async fn remove_speaker(&self, index: usize) -> RosterEdit {
        self.edit_roster(|roster, _| match roster.remove_speaker(index) {
            Some(_) => RosterEdit::Applied,
            None => RosterEdit::NotFound,
        })
        .await
    }

    pub async fn clear_speakers(&self) -> RosterEdit {
        self.edit_roster(|roster, _| {
            roster.clear();
            RosterEdit::Applied
        })
        .await
    }

    pub async fn shuffle_speakers(&self) -> RosterEdit {
        self.edit_roster(|roster, rng| {
            roster.shuffle(rng);
            RosterEdit::Applied
        })
        .await
    }

    /// Cancel both tickers (view teardown)
    pub fn shutdown(&self) {
        replace_task(&self.countdown_task, None);
        replace_task(&self.stopwatch_task, None);
    }

    async fn edit_roster<F>(&self, edit: F) -> RosterEdit
    where
        F: FnOnce(&mut SpeakerRoster, &mut StdRng) -> RosterEdit,
    {
        let mut shared = self.shared.lock().await;
        let Shared { meeting, rng } = &mut *shared;

        let outcome = match meeting.roster_mut() {
            Some(roster) => edit(roster, rng),
            None => {
                warn!(
                    "Roster of meeting {} is not editable",
                    self.config.meeting_id
                );
                return RosterEdit::Locked;
            }
        };

        if outcome == RosterEdit::Applied {
            meeting.roster_edited();
        }

        outcome
    }

    fn spawn_countdown(&self) {
        let step = i64::from(self.config.step_tenths);
        let task = self.spawn_ticker("countdown", move |meeting| meeting.tick_countdown(step));
        replace_task(&self.countdown_task, Some(task));
    }

    fn spawn_stopwatch(&self) {
        let step = u64::from(self.config.step_tenths);
        let task = self.spawn_ticker("stopwatch", move |meeting| meeting.tick_stopwatch(step));
        replace_task(&self.stopwatch_task, Some(task));
    }

    /// Fixed-period ticker; the first tick fires one period after spawning
    fn spawn_ticker<F>(&self, name: &'static str, on_tick: F) -> JoinHandle<()>
    where
        F: Fn(&mut Meeting) + Send + 'static,
    {
        let shared = Arc::clone(&self.shared);
        let period = self.config.tick_interval;
        let meeting_id = self.config.meeting_id.clone();

        tokio::spawn(async move {
            debug!("{} ticker started for {}", name, meeting_id);

            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let mut shared = shared.lock().await;
                on_tick(&mut shared.meeting);
            }
        })
    }
}

impl Drop for MeetingSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Swap the task in `slot`, aborting whatever ran there before
fn replace_task(slot: &StdMutex<Option<JoinHandle<()>>>, task: Option<JoinHandle<()>>) {
    let mut guard = match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let Some(old) = std::mem::replace(&mut *guard, task) {
        old.abort();
    }
}
