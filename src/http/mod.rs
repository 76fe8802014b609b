//! HTTP API server for front-ends (browser or wall display)
//!
//! This module provides a REST API for driving the meeting timers:
//! - GET /views/:view - Current meeting state (teams or individuals)
//! - POST /views/:view/toggle - Start/stop the current phase
//! - POST /views/:view/reset - Start over from the agenda templates
//! - GET|POST|DELETE /speakers - Read, extend or trim the speaker roster
//! - POST /speakers/shuffle - Randomize speaker order
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
