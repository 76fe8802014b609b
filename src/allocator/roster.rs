use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::policy::AllocationPolicy;
use crate::agenda::{validate_lineup, Category, Phase};

/// Entries pinned to the end of the roster (blockers round, closing reflection)
const TRAILING_FIXED: usize = 2;

/// Speaker lineup for the individuals view
///
/// Layout: `[initial, speaker.., blocker, reflection]`. Every entry except
/// the leading one receives an equal share of the policy's budget, and the
/// share is recomputed on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerRoster {
    entries: Vec<Phase>,
    policy: AllocationPolicy,
}

impl SpeakerRoster {
    pub fn new(entries: Vec<Phase>, policy: AllocationPolicy) -> Result<Self> {
        validate_lineup(&entries, 1 + TRAILING_FIXED)
            .context("Speaker roster needs an initial entry and two trailing entries")?;

        let mut roster = Self { entries, policy };
        roster.allocate();

        Ok(roster)
    }

    pub fn entries(&self) -> &[Phase] {
        &self.entries
    }

    /// Regular speakers only, without the pinned entries
    pub fn speakers(&self) -> &[Phase] {
        &self.entries[1..self.trailing_start()]
    }

    /// Blocker round and closing slot, always last
    pub fn pinned(&self) -> &[Phase] {
        &self.entries[self.trailing_start()..]
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    /// Entries sharing the budget: everything after the leading entry
    pub fn allocable_count(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn per_speaker_secs(&self) -> u32 {
        self.policy.per_speaker_secs(self.allocable_count())
    }

    /// Insert a speaker ahead of the pinned entries
    ///
    /// Blank names are ignored and reported as `false`.
    pub fn add_speaker(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring blank speaker name");
            return false;
        }

        let at = self.trailing_start();
        self.entries
            .insert(at, Phase::new(name, 0, Category::Individual));
        self.allocate();

        info!(
            "Added speaker '{}' ({} speakers, {}s each)",
            name,
            self.speakers().len(),
            self.per_speaker_secs()
        );

        true
    }

    /// Remove the regular speaker at `index` (0 = first regular speaker)
    pub fn remove_speaker(&mut self, index: usize) -> Option<Phase> {
        if index >= self.speakers().len() {
            return None;
        }

        let removed = self.entries.remove(index + 1);
        self.allocate();

        info!(
            "Removed speaker '{}' ({} speakers, {}s each)",
            removed.name,
            self.speakers().len(),
            self.per_speaker_secs()
        );

        Some(removed)
    }

    /// Drop all regular speakers, keeping the leading and pinned entries
    pub fn clear(&mut self) {
        let end = self.trailing_start();
        self.entries.drain(1..end);
        self.allocate();

        info!("Cleared speakers ({}s per remaining entry)", self.per_speaker_secs());
    }

    /// Randomize the order of the regular speakers; pinned entries stay put
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        let end = self.trailing_start();
        self.entries[1..end].shuffle(rng);
        self.allocate();

        debug!(
            "Shuffled speakers: {:?}",
            self.speakers().iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
        );
    }

    fn trailing_start(&self) -> usize {
        self.entries.len() - TRAILING_FIXED
    }

    fn allocate(&mut self) {
        let share = self.per_speaker_secs();
        for entry in self.entries.iter_mut().skip(1) {
            entry.duration_secs = share;
        }
    }
}
