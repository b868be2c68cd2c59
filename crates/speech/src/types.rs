//! Core types for speech processing

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Audio container formats the service recognizes
///
/// Detection is a pure extension lookup; file contents are never
/// inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG audio layer III
    Mp3,
    /// Waveform audio (PCM)
    Wav,
    /// WebM container, the usual browser recording format
    Webm,
    /// Ogg container
    Ogg,
    /// Free Lossless Audio Codec
    Flac,
}

impl AudioFormat {
    /// Returns the MIME type for this format
    ///
    /// `.webm` maps to `video/webm`: platform MIME tables file the
    /// container under video, and browser recordings are matched
    /// against exactly that string.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Webm => "video/webm",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
        }
    }

    /// Returns the canonical file extension for this format
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }

    /// Looks up a format from a bare file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" | "wave" => Some(Self::Wav),
            "webm" => Some(Self::Webm),
            "ogg" => Some(Self::Ogg),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// Sniffs a format from a path or storage key by its extension
    ///
    /// Returns `None` when the extension is missing or unknown.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Creates a format from a MIME type string
    ///
    /// Handles common aliases and strips parameters like
    /// `;codecs=opus`.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let base = mime.split(';').next().unwrap_or(mime).trim();
        match base {
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "video/webm" | "audio/webm" => Some(Self::Webm),
            "audio/ogg" | "application/ogg" => Some(Self::Ogg),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// Returns the recognition encoding for a direct upload of this
    /// format
    ///
    /// Only mp3 and wav bytes go to the recognizer as-is; every other
    /// container needs transcoding first.
    pub const fn transcription_encoding(&self) -> Option<AudioEncoding> {
        match self {
            Self::Mp3 => Some(AudioEncoding::Mp3),
            Self::Wav => Some(AudioEncoding::Linear16),
            _ => None,
        }
    }
}

/// Audio encodings understood by the remote recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AudioEncoding {
    /// MPEG audio layer III
    Mp3,
    /// Uncompressed 16-bit signed little-endian PCM
    Linear16,
}

impl AudioEncoding {
    /// Returns the wire name for this encoding
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Linear16 => "LINEAR16",
        }
    }
}

/// A request to transcribe a chunk of audio
///
/// Defaults to 16 kHz and `en-US`, the values recordings are
/// normalized to.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Encoding of the audio bytes
    pub encoding: AudioEncoding,
    /// Sample rate in hertz
    pub sample_rate_hertz: u32,
    /// BCP-47 language tag
    pub language_code: String,
}

impl TranscriptionRequest {
    /// Default sample rate for recognition
    pub const DEFAULT_SAMPLE_RATE_HERTZ: u32 = 16_000;

    /// Default language tag for recognition
    pub const DEFAULT_LANGUAGE_CODE: &'static str = "en-US";

    /// Creates a request with the default sample rate and language
    pub fn new(audio: Vec<u8>, encoding: AudioEncoding) -> Self {
        Self {
            audio,
            encoding,
            sample_rate_hertz: Self::DEFAULT_SAMPLE_RATE_HERTZ,
            language_code: Self::DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }

    /// Sets the sample rate in hertz
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate_hertz: u32) -> Self {
        self.sample_rate_hertz = sample_rate_hertz;
        self
    }

    /// Sets the language tag
    #[must_use]
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }
}

/// A request to synthesize speech from text
///
/// Output is always MP3; language and voice default to `en-US` and a
/// neutral voice.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to synthesize
    pub text: String,
    /// BCP-47 language tag
    pub language_code: String,
    /// Preferred voice gender
    pub voice_gender: VoiceGender,
}

impl SynthesisRequest {
    /// Default language tag for synthesis
    pub const DEFAULT_LANGUAGE_CODE: &'static str = "en-US";

    /// Creates a request with the default language and voice
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_code: Self::DEFAULT_LANGUAGE_CODE.to_string(),
            voice_gender: VoiceGender::Neutral,
        }
    }

    /// Sets the language tag
    #[must_use]
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    /// Sets the voice gender
    #[must_use]
    pub fn with_voice_gender(mut self, voice_gender: VoiceGender) -> Self {
        self.voice_gender = voice_gender;
        self
    }
}

/// Voice gender preference for synthesis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    /// Male voice
    Male,
    /// Female voice
    Female,
    /// Gender-neutral voice
    #[default]
    Neutral,
}

impl VoiceGender {
    /// Returns the wire name used by the synthesis API
    pub const fn as_ssml_gender(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Neutral => "NEUTRAL",
        }
    }
}
