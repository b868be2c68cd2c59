//! Port definitions for speech processing
//!
//! Defines the traits (ports) that remote speech adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{SynthesisRequest, TranscriptionRequest};

/// Port for Speech-to-Text (STT) implementations
///
/// Implementations of this trait convert audio bytes to a transcript.
///
/// # Example
///
/// ```ignore
/// use speech::{SpeechToText, TranscriptionRequest, AudioEncoding};
///
/// async fn transcribe_upload(
///     stt: &impl SpeechToText,
///     audio: Vec<u8>,
/// ) -> Result<String, SpeechError> {
///     let request = TranscriptionRequest::new(audio, AudioEncoding::Linear16);
///     stt.transcribe(request).await
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text
    ///
    /// # Arguments
    ///
    /// * `request` - Audio bytes plus encoding, sample rate and language
    ///
    /// # Returns
    ///
    /// Returns the transcript: the first alternative of every recognized
    /// segment, concatenated without a separator. An utterance with no
    /// recognized speech yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the remote recognizer fails.
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String, SpeechError>;
}

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations of this trait convert text to MP3 audio bytes.
///
/// # Example
///
/// ```ignore
/// use speech::{TextToSpeech, SynthesisRequest};
///
/// async fn voice_for(
///     tts: &impl TextToSpeech,
///     text: &str,
/// ) -> Result<Vec<u8>, SpeechError> {
///     tts.synthesize(SynthesisRequest::new(text)).await
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// # Arguments
    ///
    /// * `request` - Text plus language and voice preferences
    ///
    /// # Returns
    ///
    /// Returns the synthesized audio as MP3 bytes.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the remote synthesizer fails.
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SpeechError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioEncoding;

    /// Mock implementation for testing
    struct MockSpeechToText {
        transcript: String,
    }

    #[async_trait]
    impl SpeechToText for MockSpeechToText {
        async fn transcribe(&self, _request: TranscriptionRequest) -> Result<String, SpeechError> {
            Ok(self.transcript.clone())
        }
    }

    struct MockTextToSpeech {
        audio: Vec<u8>,
    }

    #[async_trait]
    impl TextToSpeech for MockTextToSpeech {
        async fn synthesize(&self, _request: SynthesisRequest) -> Result<Vec<u8>, SpeechError> {
            Ok(self.audio.clone())
        }
    }

    #[tokio::test]
    async fn mock_stt_transcribes() {
        let stt = MockSpeechToText {
            transcript: "Mock transcription".to_string(),
        };

        let request = TranscriptionRequest::new(vec![0, 1, 2], AudioEncoding::Mp3);
        let result = stt.transcribe(request).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Mock transcription");
    }

    #[tokio::test]
    async fn mock_tts_synthesizes() {
        let tts = MockTextToSpeech {
            audio: vec![0, 1, 2, 3],
        };

        let result = tts.synthesize(SynthesisRequest::new("Hello")).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn ports_are_object_safe() {
        let stt: Box<dyn SpeechToText> = Box::new(MockSpeechToText {
            transcript: String::new(),
        });
        let tts: Box<dyn TextToSpeech> = Box::new(MockTextToSpeech { audio: Vec::new() });

        let transcript = stt
            .transcribe(TranscriptionRequest::new(Vec::new(), AudioEncoding::Linear16))
            .await
            .unwrap();
        let audio = tts.synthesize(SynthesisRequest::new("")).await.unwrap();

        assert!(transcript.is_empty());
        assert!(audio.is_empty());
    }
}
