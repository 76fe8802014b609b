use super::state::AppState;
use crate::session::{MeetingSession, MeetingSnapshot, RosterEdit, RosterSnapshot};
use crate::timer::Transition;
use crate::views::ViewKind;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    #[serde(flatten)]
    pub transition: Transition,
    pub meeting: MeetingSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct AddSpeakerRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveSpeakersQuery {
    /// Regular speaker to remove; all regular speakers when absent
    pub index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub outcome: RosterEdit,
    pub roster: RosterSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

async fn find_session(state: &AppState, view: ViewKind) -> Result<Arc<MeetingSession>, Response> {
    state.session(view).await.ok_or_else(|| {
        error!("No meeting for view {}", view);
        error_response(StatusCode::NOT_FOUND, format!("No meeting for view {}", view))
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /views/:view
/// Current state of a view's meeting
pub async fn get_view(State(state): State<AppState>, Path(view): Path<ViewKind>) -> Response {
    match find_session(&state, view).await {
        Ok(session) => (StatusCode::OK, Json(session.snapshot().await)).into_response(),
        Err(response) => response,
    }
}

/// POST /views/:view/toggle
/// Start or stop the current phase
pub async fn toggle_view(State(state): State<AppState>, Path(view): Path<ViewKind>) -> Response {
    let session = match find_session(&state, view).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let (transition, meeting) = session.toggle_with_snapshot().await;
    if transition == Transition::Ignored {
        return error_response(
            StatusCode::CONFLICT,
            format!("Meeting {} has already ended", session.meeting_id()),
        );
    }

    (
        StatusCode::OK,
        Json(ToggleResponse {
            transition,
            meeting,
        }),
    )
        .into_response()
}

/// POST /views/:view/reset
/// Discard the view's meeting and start over from the templates
pub async fn reset_view(State(state): State<AppState>, Path(view): Path<ViewKind>) -> Response {
    info!("Resetting {} view", view);

    let session = state.reset(view).await;
    (StatusCode::OK, Json(session.snapshot().await)).into_response()
}

/// GET /speakers
/// Speaker roster of the individuals view
pub async fn get_speakers(State(state): State<AppState>) -> Response {
    let session = match find_session(&state, ViewKind::Individuals).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match session.roster().await {
        Some(roster) => (StatusCode::OK, Json(roster)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No speaker roster".to_string()),
    }
}

/// POST /speakers
/// Add a speaker ahead of the pinned entries
pub async fn add_speaker(
    State(state): State<AppState>,
    Json(req): Json<AddSpeakerRequest>,
) -> Response {
    edit_speakers(&state, |session| async move { session.add_speaker(&req.name).await }).await
}

/// DELETE /speakers?index=N
/// Remove one speaker, or all regular speakers without an index
pub async fn remove_speakers(
    State(state): State<AppState>,
    Query(query): Query<RemoveSpeakersQuery>,
) -> Response {
    edit_speakers(&state, |session| async move {
        match query.index {
            Some(index) => session.remove_speaker(index).await,
            None => session.clear_speakers().await,
        }
    })
    .await
}

/// POST /speakers/shuffle
/// Randomize the order of the regular speakers
pub async fn shuffle_speakers(State(state): State<AppState>) -> Response {
    edit_speakers(&state, |session| async move { session.shuffle_speakers().await }).await
}

async fn edit_speakers<F, Fut>(state: &AppState, edit: F) -> Response
where
    F: FnOnce(Arc<MeetingSession>) -> Fut,
    Fut: std::future::Future<Output = RosterEdit>,
{
    let session = match find_session(state, ViewKind::Individuals).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    let outcome = edit(Arc::clone(&session)).await;
    match outcome {
        RosterEdit::Locked => {
            return error_response(
                StatusCode::CONFLICT,
                format!("Meeting {} has already started", session.meeting_id()),
            )
        }
        RosterEdit::NotFound => {
            return error_response(StatusCode::NOT_FOUND, "Speaker not found".to_string())
        }
        RosterEdit::Applied | RosterEdit::Ignored => {}
    }

    match session.roster().await {
        Some(roster) => (StatusCode::OK, Json(RosterResponse { outcome, roster })).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No speaker roster".to_string()),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
