//! Speech synthesis handlers

use axum::{Json, extract::State};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use speech::SynthesisRequest;
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Number of characters of input text used for the stored file name
const FILENAME_PREFIX_CHARS: usize = 10;

/// Synthesis request body
#[derive(Debug, Deserialize)]
pub struct GenerateAudioRequest {
    /// Text to speak
    #[serde(default)]
    pub text: Option<String>,
}

/// Synthesis response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAudioResponse {
    /// Relative URL of the generated mp3
    pub audio_file: String,
}

/// Handle a synthesis request
///
/// Takes the raw body rather than a typed JSON extractor so malformed
/// JSON maps to the flat 400 body instead of the framework rejection.
#[instrument(skip(state, body))]
pub async fn generate_audio(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateAudioResponse>, ApiError> {
    let request: GenerateAudioRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::InvalidInput("Invalid JSON".to_string()))?;

    // Missing and empty text are rejected alike, before any remote call
    let text = match request.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ApiError::InvalidInput("Text input is required".to_string())),
    };

    let synthesis = SynthesisRequest::new(&text)
        .with_language(&state.config.speech.language_code)
        .with_voice_gender(state.config.speech.voice_gender);

    let audio = state.synthesizer.synthesize(synthesis).await?;

    let key = state.store.save(&audio_filename(&text), &audio).await?;
    debug!(file = %key, "Stored synthesized audio");

    Ok(Json(GenerateAudioResponse {
        audio_file: format!("/uploads/{key}/"),
    }))
}

/// Derive the stored file name from the input text
///
/// The first `FILENAME_PREFIX_CHARS` characters are kept as-is, spaces
/// included, with an mp3 extension appended.
fn audio_filename(text: &str) -> String {
    let prefix: String = text.chars().take(FILENAME_PREFIX_CHARS).collect();
    format!("{prefix}.mp3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_audio_request_deserialize() {
        let json = r#"{"text": "read this aloud"}"#;
        let request: GenerateAudioRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text.as_deref(), Some("read this aloud"));
    }

    #[test]
    fn generate_audio_request_tolerates_missing_text() {
        let request: GenerateAudioRequest = serde_json::from_str("{}").unwrap();
        assert!(request.text.is_none());
    }

    #[test]
    fn generate_audio_response_uses_camel_case() {
        let response = GenerateAudioResponse {
            audio_file: "/uploads/hi.mp3/".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"audioFile":"/uploads/hi.mp3/"}"#);
    }

    #[test]
    fn audio_filename_truncates_to_prefix() {
        assert_eq!(
            audio_filename("hello world this is long"),
            "hello worl.mp3"
        );
    }

    #[test]
    fn audio_filename_keeps_short_text_whole() {
        assert_eq!(audio_filename("hi"), "hi.mp3");
    }

    #[test]
    fn audio_filename_counts_characters_not_bytes() {
        assert_eq!(audio_filename("grüß dich welt"), "grüß dich .mp3");
    }

    #[test]
    fn audio_filename_preserves_spaces() {
        assert_eq!(audio_filename("a b c d e f g"), "a b c d e .mp3");
    }
}
