//! Speech - Speech-to-Text and Text-to-Speech abstractions
//!
//! Provides traits and implementations for remote speech processing:
//! - `SpeechToText` - Transcribe audio to text (STT)
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//! - `transcode` module normalizes browser recordings via FFmpeg
//! - `factory` module constructs the wired-up clients
//!
//! # Example
//!
//! ```ignore
//! use speech::{SpeechClientFactory, TranscriptionRequest, AudioEncoding};
//!
//! let recognizer = SpeechClientFactory::recognizer(&config)?;
//!
//! // Transcribe audio
//! let request = TranscriptionRequest::new(bytes, AudioEncoding::Linear16);
//! let transcript = recognizer.transcribe(request).await?;
//!
//! // Synthesize speech
//! let synthesizer = SpeechClientFactory::synthesizer(&config)?;
//! let mp3 = synthesizer.synthesize(SynthesisRequest::new("Hello, world!")).await?;
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod ports;
pub mod providers;
pub mod transcode;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use factory::SpeechClientFactory;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::google::GoogleSpeechProvider;
pub use transcode::Transcoder;
pub use types::{
    AudioEncoding, AudioFormat, SynthesisRequest, TranscriptionRequest, VoiceGender,
};
