//! Transcription handlers
//!
//! Two flows share the upload plumbing: `/transcribe/` recognizes the
//! file as uploaded, `/record-transcribe/` first normalizes browser
//! recordings to wav with ffmpeg.

use axum::{
    Json,
    extract::{Multipart, State},
};
use bytes::Bytes;
use serde::Serialize;
use speech::{AudioEncoding, AudioFormat, TranscriptionRequest};
use tracing::{debug, error, instrument};

use crate::{error::ApiError, state::AppState};

/// Transcription response body
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    /// Recognized text, segments joined in upload order
    pub transcription: String,
}

/// Pull the part named `audio` out of a multipart body
///
/// Returns the client-supplied file name and the raw bytes, or `None`
/// when no such part exists.
async fn read_audio_field(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?
    {
        if field.name() != Some("audio") {
            continue;
        }

        let name = field.file_name().unwrap_or("audio").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
        return Ok(Some((name, bytes)));
    }

    Ok(None)
}

/// Handle a transcription request for an uploaded audio file
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let Some((name, bytes)) = read_audio_field(&mut multipart).await? else {
        return Err(ApiError::InvalidInput("No audio file uploaded".to_string()));
    };

    let key = state.store.save(&name, &bytes).await?;

    let format = AudioFormat::from_path(&key);
    debug!(
        file = %key,
        mime = format.map_or("unknown", |f| f.mime_type()),
        "Sniffed upload format"
    );

    // The format check runs before any remote call is made
    let Some(encoding) = format.and_then(|f| f.transcription_encoding()) else {
        error!(file = %key, "Rejected upload with unsupported audio format");
        return Err(ApiError::UnsupportedFormat);
    };

    let content = state.store.read(&key).await?;
    let request = TranscriptionRequest::new(content, encoding)
        .with_sample_rate(state.config.speech.sample_rate_hertz)
        .with_language(&state.config.speech.language_code);

    let transcription = state.recognizer.transcribe(request).await?;

    Ok(Json(TranscribeResponse { transcription }))
}

/// Handle a transcription request for a browser recording
///
/// webm uploads are transcoded to 16kHz mono wav before recognition;
/// everything else is submitted as stored. This route always declares
/// LINEAR16 to the recognizer.
#[instrument(skip(state, multipart))]
pub async fn record_transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let Some((name, bytes)) = read_audio_field(&mut multipart).await? else {
        return Err(ApiError::InvalidInput("No audio file uploaded".to_string()));
    };

    let mut key = state.store.save(&name, &bytes).await?;
    debug!(file = %key, "Stored browser recording");

    if AudioFormat::from_path(&key) == Some(AudioFormat::Webm) {
        let wav_key = wav_key_for(&key);
        let input = state.store.path(&key)?;
        let output = state.store.path(&wav_key)?;

        if !state.transcoder.to_normalized_wav(&input, &output).await {
            return Err(ApiError::ConversionFailed);
        }
        key = wav_key;
    }

    let content = state.store.read(&key).await?;
    let request = TranscriptionRequest::new(content, AudioEncoding::Linear16)
        .with_sample_rate(state.config.speech.sample_rate_hertz)
        .with_language(&state.config.speech.language_code);

    let transcription = state.recognizer.transcribe(request).await?;

    Ok(Json(TranscribeResponse { transcription }))
}

/// Replace the extension of `key` with `.wav`
fn wav_key_for(key: &str) -> String {
    key.rsplit_once('.')
        .map_or_else(|| format!("{key}.wav"), |(stem, _)| format!("{stem}.wav"))
}
