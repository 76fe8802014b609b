//! Phase/timer state machine
//!
//! Pure, clock-free meeting state: toggles, countdown and stopwatch ticks,
//! the completed-phase log, plus display helpers for the countdown.

mod clock;
mod display;
mod meeting;
mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use display::{format_clock, format_countdown, format_start_time};
pub use meeting::{Lineup, Meeting, TICK_TENTHS};
pub use state::{CompletedPhase, StopwatchState, TimerState, Transition};
