use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::phase::Phase;

/// Agenda file loader
///
/// Agenda files are JSON arrays of phases, e.g.
/// `[{"name": "Welcome", "duration": 0, "theme": "theme-welcome", "isInitial": true}, ...]`
pub struct Agenda;

impl Agenda {
    pub fn open(path: impl AsRef<Path>) -> Result<Vec<Phase>> {
        let path = path.as_ref();
        info!("Opening agenda file: {}", path.display());

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read agenda file {}", path.display()))?;

        let phases = Self::parse(&raw)
            .with_context(|| format!("Failed to parse agenda file {}", path.display()))?;

        info!(
            "Agenda loaded: {} phases, {}s allotted",
            phases.len(),
            phases.iter().map(|p| u64::from(p.duration_secs)).sum::<u64>()
        );

        Ok(phases)
    }

    pub fn parse(raw: &str) -> Result<Vec<Phase>> {
        let phases: Vec<Phase> = serde_json::from_str(raw)?;
        Ok(phases)
    }
}
