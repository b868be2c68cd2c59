//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `storage`: Media store location

mod server;
mod storage;

use serde::{Deserialize, Serialize};
use speech::SpeechConfig;

pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote speech service configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Media storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Sources are merged lowest to highest: built-in defaults, a
    /// `config.*` file in the working directory, then environment
    /// variables prefixed with `VOXBRIDGE__` (double underscore
    /// separates nesting levels, so `VOXBRIDGE__SPEECH__API_KEY`
    /// sets `speech.api_key`).
    ///
    /// # Errors
    ///
    /// Returns an error when a source cannot be read or a value fails
    /// to deserialize into the typed config.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("storage.root", "uploads")?
            // Load from file if it exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., VOXBRIDGE__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("VOXBRIDGE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
