//! Speaker time allocation
//!
//! Splits a fixed time budget evenly across a variable speaker lineup,
//! leaving a hand-over buffer between adjacent speakers.

mod policy;
mod roster;

pub use policy::AllocationPolicy;
pub use roster::SpeakerRoster;
