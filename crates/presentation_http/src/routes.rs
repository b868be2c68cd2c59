//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{error::ApiError, handlers, state::AppState};

/// Create the main router with all routes
///
/// The speech routes answer POST only; every other method on them gets
/// the flat 405 body instead of the framework default.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Speech API
        .route(
            "/transcribe/",
            post(handlers::transcribe::transcribe).fallback(method_not_allowed),
        )
        .route(
            "/generate-audio/",
            post(handlers::synthesize::generate_audio).fallback(method_not_allowed),
        )
        .route(
            "/record-transcribe/",
            post(handlers::transcribe::record_transcribe).fallback(method_not_allowed),
        )
        // Stored media
        .route("/uploads/{filename}/", get(handlers::media::download))
        // Attach state
        .with_state(state)
}

/// Shared fallback for wrong-method requests on the speech routes
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
