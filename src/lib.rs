pub mod agenda;
pub mod allocator;
pub mod config;
pub mod console;
pub mod http;
pub mod session;
pub mod timer;
pub mod views;

pub use agenda::{Agenda, Category, Phase, PhaseSequence};
pub use allocator::{AllocationPolicy, SpeakerRoster};
pub use config::Config;
pub use http::{create_router, AppState};
pub use session::{MeetingSession, MeetingSnapshot, RosterEdit, RosterSnapshot, SessionConfig};
pub use timer::{
    Clock, CompletedPhase, FixedClock, Lineup, Meeting, SystemClock, Transition, TICK_TENTHS,
};
pub use views::{Lineups, ViewKind};
