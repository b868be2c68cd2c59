//! Configuration for speech processing

use serde::{Deserialize, Serialize};

use crate::types::VoiceGender;

/// Configuration for the remote speech services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// API key sent with every request
    ///
    /// The server boots without one; requests are then rejected by the
    /// remote service instead of at startup.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the recognition API
    #[serde(default = "default_recognize_base_url")]
    pub recognize_base_url: String,

    /// Base URL of the synthesis API
    #[serde(default = "default_synthesize_base_url")]
    pub synthesize_base_url: String,

    /// BCP-47 language tag for both directions
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Sample rate reported to the recognizer in hertz
    #[serde(default = "default_sample_rate_hertz")]
    pub sample_rate_hertz: u32,

    /// Voice gender requested from the synthesizer
    #[serde(default)]
    pub voice_gender: VoiceGender,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_recognize_base_url() -> String {
    "https://speech.googleapis.com".to_string()
}

fn default_synthesize_base_url() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_language_code() -> String {
    "en-US".to_string()
}

const fn default_sample_rate_hertz() -> u32 {
    16_000
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            recognize_base_url: default_recognize_base_url(),
            synthesize_base_url: default_synthesize_base_url(),
            language_code: default_language_code(),
            sample_rate_hertz: default_sample_rate_hertz(),
            voice_gender: VoiceGender::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SpeechConfig {
    /// Create a minimal config for testing
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.recognize_base_url.is_empty() {
            return Err("Recognize base URL must not be empty".to_string());
        }

        if self.synthesize_base_url.is_empty() {
            return Err("Synthesize base URL must not be empty".to_string());
        }

        if self.language_code.is_empty() {
            return Err("Language code must not be empty".to_string());
        }

        if self.sample_rate_hertz == 0 {
            return Err("Sample rate must be greater than 0".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
