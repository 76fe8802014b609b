use crate::session::{MeetingSession, SessionConfig};
use crate::timer::Clock;
use crate::views::{Lineups, ViewKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Live meeting per view (view → session)
    pub sessions: Arc<RwLock<HashMap<ViewKind, Arc<MeetingSession>>>>,

    /// Templates a reset starts from
    pub lineups: Arc<Lineups>,

    /// Settings applied to every new session
    pub session_config: SessionConfig,

    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(lineups: Lineups, session_config: SessionConfig, clock: Arc<dyn Clock>) -> Self {
        let mut sessions = HashMap::new();
        for view in ViewKind::ALL {
            let session = MeetingSession::new(
                session_config.renewed(),
                lineups.get(view).clone(),
                Arc::clone(&clock),
            );
            sessions.insert(view, Arc::new(session));
        }

        Self {
            sessions: Arc::new(RwLock::new(sessions)),
            lineups: Arc::new(lineups),
            session_config,
            clock,
        }
    }

    pub async fn session(&self, view: ViewKind) -> Option<Arc<MeetingSession>> {
        let sessions = self.sessions.read().await;
        sessions.get(&view).cloned()
    }

    /// Replace the view's meeting with a fresh one from the templates
    pub async fn reset(&self, view: ViewKind) -> Arc<MeetingSession> {
        let session = Arc::new(MeetingSession::new(
            self.session_config.renewed(),
            self.lineups.get(view).clone(),
            Arc::clone(&self.clock),
        ));

        let previous = {
            let mut sessions = self.sessions.write().await;
            sessions.insert(view, Arc::clone(&session))
        };

        if let Some(previous) = previous {
            info!("Discarding meeting {} ({})", previous.meeting_id(), view);
            previous.shutdown();
        }

        session
    }
}
