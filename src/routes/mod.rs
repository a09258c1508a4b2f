pub mod analyze;
pub mod coach;
pub mod health;
pub mod review;
pub mod transcribe;

use axum::Router;

use crate::state::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new().nest("/api", api_routes(state))
}

/// API routes under /api prefix
fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .route("/analyze", axum::routing::post(analyze::analyze))
        .route("/transcribe", axum::routing::post(transcribe::transcribe))
        .route(
            "/analyze-structured",
            axum::routing::post(coach::analyze_structured),
        )
        .route(
            "/interviews/:id/scorecard",
            axum::routing::get(review::get_scorecard),
        )
        .route(
            "/interviews/:id/transcription",
            axum::routing::get(review::get_transcription),
        )
        .with_state(state)
}
