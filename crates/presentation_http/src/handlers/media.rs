//! Stored media download handler

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use speech::AudioFormat;
use tracing::{instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Serve a stored media file by name
///
/// The content type is derived from the file extension; unknown
/// extensions fall back to a generic byte stream.
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    if !state.store.exists(&filename).await {
        warn!(file = %filename, "Requested media file does not exist");
        return Err(ApiError::NotFound);
    }

    let bytes = state.store.read(&filename).await?;

    let content_type =
        AudioFormat::from_path(&filename).map_or("application/octet-stream", |f| f.mime_type());

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
