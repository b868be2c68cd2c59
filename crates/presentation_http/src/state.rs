//! Application state shared across handlers

use std::sync::Arc;

use infrastructure::{AppConfig, MediaStore};
use speech::{SpeechToText, TextToSpeech, Transcoder};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Speech-to-Text client
    pub recognizer: Arc<dyn SpeechToText>,
    /// Text-to-Speech client
    pub synthesizer: Arc<dyn TextToSpeech>,
    /// FFmpeg wrapper for webm to wav conversion
    pub transcoder: Arc<Transcoder>,
    /// Key-addressed store for uploaded and generated media
    pub store: Arc<MediaStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
