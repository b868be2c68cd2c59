//! Speech provider implementations

pub mod google;

pub use google::GoogleSpeechProvider;
