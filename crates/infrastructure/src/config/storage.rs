//! Media storage configuration.

use serde::{Deserialize, Serialize};

/// Media storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded and generated media files
    #[serde(default = "default_root")]
    pub root: String,
}

fn default_root() -> String {
    "uploads".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}
