//! Infrastructure layer - Adapters for external systems
//!
//! Holds the typed application configuration and the local media store
//! backing the HTTP upload and download endpoints.

pub mod config;
pub mod storage;

pub use config::{AppConfig, ServerConfig, StorageConfig};
pub use storage::{MediaStore, StorageError};
