use anyhow::{anyhow, bail, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::time::Duration;

use crate::allocator::AllocationPolicy;
use crate::session::SessionConfig;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub allocation: AllocationPolicy,
    #[serde(default)]
    pub agenda: AgendaConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "standup-timer".to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8090,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TimerConfig {
    /// Real-time tick period in milliseconds
    pub tick_ms: u64,
    /// Counted time per tick in tenths of a second
    pub step_tenths: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            step_tenths: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AgendaConfig {
    /// Phase list for the teams view
    pub phases_path: String,
    /// Default speaker list for the individuals view
    pub speakers_path: String,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            phases_path: "data/phases.json".to_string(),
            speakers_path: "data/speakers.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    /// IANA zone for the meeting start clock
    pub timezone: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: "Europe/Berlin".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.display
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid time zone '{}': {}", self.display.timezone, e))
    }

    /// Session settings derived from the timer and display sections
    ///
    /// The tick step must divide a whole second so displayed seconds stay exact.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let step = self.timer.step_tenths;
        if step == 0 || 10 % step != 0 {
            bail!(
                "Invalid timer step_tenths {}: must be 1, 2, 5 or 10",
                step
            );
        }

        Ok(SessionConfig {
            tick_interval: Duration::from_millis(self.timer.tick_ms),
            step_tenths: self.timer.step_tenths,
            timezone: self.timezone()?,
            ..SessionConfig::default()
        })
    }
}
