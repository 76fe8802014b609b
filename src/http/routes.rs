use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Meeting control
        .route("/views/:view", get(handlers::get_view))
        .route("/views/:view/toggle", post(handlers::toggle_view))
        .route("/views/:view/reset", post(handlers::reset_view))
        // Speaker roster (individuals view)
        .route(
            "/speakers",
            get(handlers::get_speakers)
                .post(handlers::add_speaker)
                .delete(handlers::remove_speakers),
        )
        .route("/speakers/shuffle", post(handlers::shuffle_speakers))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        // Browser front-ends are served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
