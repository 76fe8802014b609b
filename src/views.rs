use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::agenda::{Agenda, PhaseSequence};
use crate::allocator::SpeakerRoster;
use crate::config::Config;
use crate::timer::Lineup;

/// The two facilitation screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Fixed team phases
    Teams,
    /// Per-speaker slots with allocated time
    Individuals,
}

impl ViewKind {
    pub const ALL: [ViewKind; 2] = [ViewKind::Teams, ViewKind::Individuals];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Teams => "teams",
            ViewKind::Individuals => "individuals",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "teams" => Ok(ViewKind::Teams),
            "individuals" => Ok(ViewKind::Individuals),
            other => anyhow::bail!("Unknown view '{}'", other),
        }
    }
}

/// Lineup templates for both views, loaded once at startup
#[derive(Debug, Clone)]
pub struct Lineups {
    pub teams: Lineup,
    pub individuals: Lineup,
}

impl Lineups {
    pub fn load(cfg: &Config) -> Result<Self> {
        let phases = Agenda::open(&cfg.agenda.phases_path)?;
        let teams = PhaseSequence::new(phases).context("Invalid team phase list")?;

        let speakers = Agenda::open(&cfg.agenda.speakers_path)?;
        let roster = SpeakerRoster::new(speakers, cfg.allocation).context("Invalid speaker list")?;

        Ok(Self {
            teams: Lineup::Fixed(teams),
            individuals: Lineup::Speakers(roster),
        })
    }

    pub fn get(&self, view: ViewKind) -> &Lineup {
        match view {
            ViewKind::Teams => &self.teams,
            ViewKind::Individuals => &self.individuals,
        }
    }
}
