use chrono_tz::Tz;
use std::time::Duration;

/// Configuration for a meeting session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Unique meeting identifier (e.g., "meeting-3f6c...")
    pub meeting_id: String,

    /// Real-time period of the countdown and stopwatch ticks
    /// Default: 100 milliseconds
    pub tick_interval: Duration,

    /// Simulated time per tick in tenths of a second
    /// Default: 1 (each tick counts 0.1s)
    pub step_tenths: u32,

    /// Time zone for the displayed meeting start
    pub timezone: Tz,

    /// Seed for speaker shuffling (random when unset)
    pub shuffle_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            meeting_id: format!("meeting-{}", uuid::Uuid::new_v4()),
            tick_interval: Duration::from_millis(100),
            step_tenths: 1,
            timezone: chrono_tz::Europe::Berlin,
            shuffle_seed: None,
        }
    }
}

impl SessionConfig {
    /// Same settings under a fresh meeting ID
    pub fn renewed(&self) -> Self {
        Self {
            meeting_id: format!("meeting-{}", uuid::Uuid::new_v4()),
            ..self.clone()
        }
    }
}
