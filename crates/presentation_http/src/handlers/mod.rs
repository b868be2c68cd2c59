//! HTTP request handlers

pub mod health;
pub mod media;
pub mod synthesize;
pub mod transcribe;
