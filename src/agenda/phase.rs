use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Presentation category of a phase
///
/// Agenda files written for the browser front-end carry the CSS theme name
/// (`theme-team`), so both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Lobby shown before the meeting starts
    #[serde(alias = "theme-welcome")]
    Welcome,
    /// A team's segment of the meeting
    #[serde(alias = "theme-team")]
    Team,
    /// A single speaker's slot
    #[serde(alias = "theme-individual")]
    Individual,
    /// Blockers and impediments round
    #[serde(alias = "theme-blocker")]
    Blocker,
    /// Closing reflection slot
    #[serde(alias = "theme-reflection")]
    Reflection,
    #[serde(other)]
    Other,
}

impl Category {
    /// Theme key used by front-ends to style the active phase
    pub fn theme(&self) -> &'static str {
        match self {
            Category::Welcome => "theme-welcome",
            Category::Team => "theme-team",
            Category::Individual => "theme-individual",
            Category::Blocker => "theme-blocker",
            Category::Reflection => "theme-reflection",
            Category::Other => "theme-other",
        }
    }
}

/// A named, timed segment of the meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,

    /// Allotted time in whole seconds
    #[serde(alias = "duration", default)]
    pub duration_secs: u32,

    #[serde(alias = "theme")]
    pub category: Category,

    /// Lobby phase with no countdown of its own
    #[serde(alias = "isInitial", default)]
    pub is_initial: bool,
}

impl Phase {
    pub fn new(name: impl Into<String>, duration_secs: u32, category: Category) -> Self {
        Self {
            name: name.into(),
            duration_secs,
            category,
            is_initial: false,
        }
    }

    /// Create the leading lobby phase
    pub fn initial(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_secs: 0,
            category: Category::Welcome,
            is_initial: true,
        }
    }

    /// Allotted time in tenths of a second
    pub fn duration_tenths(&self) -> i64 {
        i64::from(self.duration_secs) * 10
    }
}

/// Ordered list of phases, led by exactly one initial phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSequence {
    phases: Vec<Phase>,
}

impl PhaseSequence {
    pub fn new(phases: Vec<Phase>) -> Result<Self> {
        validate_lineup(&phases, 2)?;
        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

/// Shared shape check for phase lists and speaker rosters
pub(crate) fn validate_lineup(phases: &[Phase], min_len: usize) -> Result<()> {
    if phases.len() < min_len {
        bail!(
            "Expected at least {} phases, got {}",
            min_len,
            phases.len()
        );
    }

    if !phases[0].is_initial {
        bail!("First phase '{}' must be marked as initial", phases[0].name);
    }

    if let Some(extra) = phases.iter().skip(1).find(|p| p.is_initial) {
        bail!("Only the first phase may be initial, found '{}'", extra.name);
    }

    Ok(())
}
