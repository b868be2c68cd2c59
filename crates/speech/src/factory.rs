//! Construction of the remote speech service handles

use std::sync::Arc;

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::providers::GoogleSpeechProvider;

/// Factory for the two remote speech clients
///
/// Both constructors hand out the Google provider behind the matching
/// port, so callers depend on the traits only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeechClientFactory;

impl SpeechClientFactory {
    /// Build the speech-to-text client
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is
    /// invalid.
    pub fn recognizer(config: &SpeechConfig) -> Result<Arc<dyn SpeechToText>, SpeechError> {
        Ok(Arc::new(GoogleSpeechProvider::new(config.clone())?))
    }

    /// Build the text-to-speech client
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is
    /// invalid.
    pub fn synthesizer(config: &SpeechConfig) -> Result<Arc<dyn TextToSpeech>, SpeechError> {
        Ok(Arc::new(GoogleSpeechProvider::new(config.clone())?))
    }
}
