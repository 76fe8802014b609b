//! Meeting session management
//!
//! This module provides the `MeetingSession` abstraction that manages:
//! - The meeting state machine behind an async lock
//! - Countdown and stopwatch interval tasks
//! - Speaker roster edits for the individuals view
//! - Snapshots of the view state

mod config;
mod session;
mod stats;

pub use config::SessionConfig;
pub use session::{MeetingSession, RosterEdit};
pub use stats::{MeetingSnapshot, RosterSnapshot};
