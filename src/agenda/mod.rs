//! Meeting agendas
//!
//! Phase templates and the loader for the JSON agenda files that feed
//! both views (team phases and the default speaker list).

mod file;
mod phase;

pub use file::Agenda;
pub use phase::{Category, Phase, PhaseSequence};

pub(crate) use phase::validate_lineup;
