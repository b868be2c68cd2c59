//! Google Cloud Speech Provider
//!
//! Implements `SpeechToText` using the Cloud Speech-to-Text REST API and
//! `TextToSpeech` using the Cloud Text-to-Speech REST API.
//!
//! # Wire format
//!
//! Both APIs are addressed with a `?key=` query parameter and carry audio
//! as standard base64 inside JSON bodies. Synthesis output is fixed to
//! MP3.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioEncoding, SynthesisRequest, TranscriptionRequest};

/// Google Cloud speech provider implementing both STT and TTS
#[derive(Debug, Clone)]
pub struct GoogleSpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl GoogleSpeechProvider {
    /// Create a new Google Cloud speech provider
    ///
    /// # Arguments
    ///
    /// * `config` - Speech configuration
    ///
    /// # Returns
    ///
    /// Returns the provider instance.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is
    /// invalid. A missing API key is not a construction error; the
    /// remote service rejects unauthenticated requests per call.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        if config.api_key.is_none() {
            warn!("No speech API key configured; remote requests will be rejected");
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Get the API key
    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Build the recognition endpoint URL
    fn recognize_url(&self) -> String {
        format!("{}/v1/speech:recognize", self.config.recognize_base_url)
    }

    /// Build the synthesis endpoint URL
    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.config.synthesize_base_url)
    }

    /// Log a failure at error level before handing it to the caller
    fn log_failure(operation: &str, err: SpeechError) -> SpeechError {
        error!("{operation} failed: {err}");
        err
    }

    /// Map a non-success response body to a service error
    fn api_error(status: StatusCode, body: String) -> SpeechError {
        match serde_json::from_str::<GoogleApiError>(&body) {
            Ok(api_error) => SpeechError::RemoteService {
                status: status.as_u16(),
                message: api_error.error.message,
            },
            Err(_) => SpeechError::RemoteService {
                status: status.as_u16(),
                message: body,
            },
        }
    }
}

/// Recognition request body
#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: AudioEncoding,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

/// Recognition response body
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    /// Absent entirely when no speech was recognized
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternatives: Vec<RecognizeAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    #[allow(dead_code)] // Part of the recognize contract
    confidence: Option<f32>,
}

/// Synthesis request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams<'a> {
    language_code: &'a str,
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: AudioEncoding,
}

/// Synthesis response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Error envelope returned by both speech APIs
#[derive(Debug, Deserialize)]
struct GoogleApiError {
    error: GoogleApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleApiErrorDetail {
    message: String,
    #[serde(default)]
    #[allow(dead_code)] // Part of the error contract
    code: Option<i32>,
    #[serde(default)]
    #[allow(dead_code)] // Part of the error contract
    status: Option<String>,
}

#[async_trait]
impl SpeechToText for GoogleSpeechProvider {
    #[instrument(skip(self, request), fields(
        audio_size = request.audio.len(),
        encoding = request.encoding.as_str()
    ))]
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String, SpeechError> {
        debug!("Transcribing audio with remote recognizer");

        let body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: request.encoding,
                sample_rate_hertz: request.sample_rate_hertz,
                language_code: &request.language_code,
            },
            audio: RecognitionAudio {
                content: STANDARD.encode(&request.audio),
            },
        };

        let response = self
            .client
            .post(self.recognize_url())
            .query(&[("key", self.api_key())])
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::log_failure("Transcription", e.into()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::log_failure(
                "Transcription",
                Self::api_error(status, error_body),
            ));
        }

        let payload: RecognizeResponse = response.json().await.map_err(|e| {
            Self::log_failure(
                "Transcription",
                SpeechError::InvalidResponse(format!("Failed to parse response: {e}")),
            )
        })?;

        // First alternative of every segment, concatenated without a
        // separator
        let transcript: String = payload
            .results
            .iter()
            .filter_map(|result| result.alternatives.first())
            .map(|alternative| alternative.transcript.as_str())
            .collect();

        debug!(text_len = transcript.len(), "Transcription complete");

        Ok(transcript)
    }
}

#[async_trait]
impl TextToSpeech for GoogleSpeechProvider {
    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<u8>, SpeechError> {
        debug!("Synthesizing speech with remote synthesizer");

        let body = SynthesizeRequest {
            input: SynthesisInput {
                text: &request.text,
            },
            voice: VoiceSelectionParams {
                language_code: &request.language_code,
                ssml_gender: request.voice_gender.as_ssml_gender(),
            },
            // Output container is fixed to MP3
            audio_config: AudioConfig {
                audio_encoding: AudioEncoding::Mp3,
            },
        };

        let response = self
            .client
            .post(self.synthesize_url())
            .query(&[("key", self.api_key())])
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::log_failure("Synthesis", e.into()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::log_failure(
                "Synthesis",
                Self::api_error(status, error_body),
            ));
        }

        let payload: SynthesizeResponse = response.json().await.map_err(|e| {
            Self::log_failure(
                "Synthesis",
                SpeechError::InvalidResponse(format!("Failed to parse response: {e}")),
            )
        })?;

        let audio = STANDARD.decode(payload.audio_content).map_err(|e| {
            Self::log_failure(
                "Synthesis",
                SpeechError::InvalidResponse(format!("Failed to decode audio content: {e}")),
            )
        })?;

        debug!(audio_size = audio.len(), "Speech synthesis complete");

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_provider(mock_server: &MockServer) -> GoogleSpeechProvider {
        let config = SpeechConfig {
            api_key: Some("test-api-key".to_string()),
            recognize_base_url: mock_server.uri(),
            synthesize_base_url: mock_server.uri(),
            ..Default::default()
        };
        GoogleSpeechProvider::new(config).unwrap()
    }

    mod stt_tests {
        use super::*;

        #[tokio::test]
        async fn transcribe_joins_segments_without_separator() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/speech:recognize"))
                .and(query_param("key", "test-api-key"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "results": [
                        {"alternatives": [{"transcript": "hello ", "confidence": 0.98}]},
                        {"alternatives": [{"transcript": "world", "confidence": 0.95}]}
                    ]
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = TranscriptionRequest::new(vec![0, 1, 2, 3], AudioEncoding::Mp3);

            let result = provider.transcribe(request).await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap(), "hello world");
        }

        #[tokio::test]
        async fn transcribe_uses_only_the_first_alternative() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/speech:recognize"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "results": [
                        {"alternatives": [
                            {"transcript": "best guess"},
                            {"transcript": "worse guess"}
                        ]}
                    ]
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = TranscriptionRequest::new(vec![1, 2], AudioEncoding::Linear16);

            assert_eq!(provider.transcribe(request).await.unwrap(), "best guess");
        }

        #[tokio::test]
        async fn transcribe_sends_encoding_and_defaults() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/speech:recognize"))
                .and(body_partial_json(serde_json::json!({
                    "config": {
                        "encoding": "LINEAR16",
                        "sampleRateHertz": 16000,
                        "languageCode": "en-US"
                    }
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "results": []
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = TranscriptionRequest::new(vec![1, 2, 3], AudioEncoding::Linear16);

            assert!(provider.transcribe(request).await.is_ok());
        }

        #[tokio::test]
        async fn transcribe_encodes_audio_as_base64() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/speech:recognize"))
                .and(body_partial_json(serde_json::json!({
                    "audio": {"content": "AQIDBA=="}
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "results": []
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = TranscriptionRequest::new(vec![1, 2, 3, 4], AudioEncoding::Mp3);

            assert!(provider.transcribe(request).await.is_ok());
        }

        #[tokio::test]
        async fn transcribe_without_results_yields_empty_transcript() {
            let mock_server = MockServer::start().await;

            // No speech recognized: the results key is absent entirely
            Mock::given(method("POST"))
                .and(path("/v1/speech:recognize"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = TranscriptionRequest::new(vec![1], AudioEncoding::Mp3);

            assert_eq!(provider.transcribe(request).await.unwrap(), "");
        }

        #[tokio::test]
        async fn transcribe_api_error_maps_to_remote_service() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/speech:recognize"))
                .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                    "error": {
                        "code": 400,
                        "message": "Invalid audio content",
                        "status": "INVALID_ARGUMENT"
                    }
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = TranscriptionRequest::new(vec![1], AudioEncoding::Mp3);

            let result = provider.transcribe(request).await;

            assert!(matches!(
                result,
                Err(SpeechError::RemoteService { status: 400, .. })
            ));
            assert!(
                result
                    .unwrap_err()
                    .to_string()
                    .contains("Invalid audio content")
            );
        }

        #[tokio::test]
        async fn transcribe_unparseable_error_body_falls_back_to_raw() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/speech:recognize"))
                .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = TranscriptionRequest::new(vec![1], AudioEncoding::Mp3);

            let err = provider.transcribe(request).await.unwrap_err();

            assert!(matches!(err, SpeechError::RemoteService { status: 500, .. }));
            assert!(err.to_string().contains("upstream exploded"));
        }

        #[tokio::test]
        async fn transcribe_unparseable_success_body_fails() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/speech:recognize"))
                .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = TranscriptionRequest::new(vec![1], AudioEncoding::Mp3);

            let result = provider.transcribe(request).await;

            assert!(matches!(result, Err(SpeechError::InvalidResponse(_))));
        }
    }

    mod tts_tests {
        use super::*;

        #[tokio::test]
        async fn synthesize_decodes_audio_content() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text:synthesize"))
                .and(query_param("key", "test-api-key"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "audioContent": STANDARD.encode(b"fake mp3 bytes")
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize(SynthesisRequest::new("Hello")).await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap(), b"fake mp3 bytes");
        }

        #[tokio::test]
        async fn synthesize_requests_mp3_with_neutral_voice() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text:synthesize"))
                .and(body_partial_json(serde_json::json!({
                    "input": {"text": "Good morning"},
                    "voice": {"languageCode": "en-US", "ssmlGender": "NEUTRAL"},
                    "audioConfig": {"audioEncoding": "MP3"}
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "audioContent": ""
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            assert!(
                provider
                    .synthesize(SynthesisRequest::new("Good morning"))
                    .await
                    .is_ok()
            );
        }

        #[tokio::test]
        async fn synthesize_honors_language_and_gender() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text:synthesize"))
                .and(body_partial_json(serde_json::json!({
                    "voice": {"languageCode": "de-DE", "ssmlGender": "FEMALE"}
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "audioContent": ""
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let request = SynthesisRequest::new("Hallo")
                .with_language("de-DE")
                .with_voice_gender(crate::types::VoiceGender::Female);

            assert!(provider.synthesize(request).await.is_ok());
        }

        #[tokio::test]
        async fn synthesize_invalid_base64_fails() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text:synthesize"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "audioContent": "!!!not base64!!!"
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize(SynthesisRequest::new("Hello")).await;

            assert!(matches!(result, Err(SpeechError::InvalidResponse(_))));
        }

        #[tokio::test]
        async fn synthesize_api_error_maps_to_remote_service() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/v1/text:synthesize"))
                .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                    "error": {
                        "code": 403,
                        "message": "The request is missing a valid API key.",
                        "status": "PERMISSION_DENIED"
                    }
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize(SynthesisRequest::new("Hello")).await;

            assert!(matches!(
                result,
                Err(SpeechError::RemoteService { status: 403, .. })
            ));
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn new_succeeds_without_api_key() {
            // Booting without credentials is allowed; requests fail later
            let result = GoogleSpeechProvider::new(SpeechConfig::default());

            assert!(result.is_ok());
        }

        #[test]
        fn new_fails_with_invalid_config() {
            let config = SpeechConfig {
                recognize_base_url: String::new(),
                ..Default::default()
            };

            let result = GoogleSpeechProvider::new(config);

            assert!(matches!(result, Err(SpeechError::Configuration(_))));
        }

        #[test]
        fn url_builders_append_api_paths() {
            let provider = GoogleSpeechProvider::new(SpeechConfig::test()).unwrap();

            assert_eq!(
                provider.recognize_url(),
                "https://speech.googleapis.com/v1/speech:recognize"
            );
            assert_eq!(
                provider.synthesize_url(),
                "https://texttospeech.googleapis.com/v1/text:synthesize"
            );
        }
    }
}
