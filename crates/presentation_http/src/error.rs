//! API error handling
//!
//! Every failure surfaces as a flat `{"error": message}` body so
//! browser clients can read one field regardless of status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use infrastructure::StorageError;
use serde::Serialize;
use speech::SpeechError;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request is syntactically or semantically unusable
    #[error("{0}")]
    InvalidInput(String),

    /// Upload carries an extension no speech encoding maps to
    #[error("Unsupported audio format")]
    UnsupportedFormat,

    /// HTTP method does not match the route
    #[error("Invalid request method")]
    MethodNotAllowed,

    /// No stored file under the requested name
    #[error("File not found")]
    NotFound,

    /// FFmpeg could not produce a wav from the upload
    #[error("Failed to convert webm to wav")]
    ConversionFailed,

    /// Remote speech service failure
    #[error(transparent)]
    Speech(#[from] SpeechError),

    /// Media store failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_) | Self::UnsupportedFormat => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::ConversionFailed | Self::Speech(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
