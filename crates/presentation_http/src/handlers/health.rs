//! Health check handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub transcoder_available: bool,
}

/// Readiness check - is the server ready to accept requests?
///
/// A missing ffmpeg binary only degrades the recording flow, so it is
/// reported but never flips readiness.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let transcoder_available = state.transcoder.is_available().await;

    Json(ReadinessResponse {
        ready: true,
        transcoder_available,
    })
}
