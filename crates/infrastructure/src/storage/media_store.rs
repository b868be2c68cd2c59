//! Key-addressed file store for uploaded and generated media.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised by the media store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key is empty or would escape the store root
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// No file stored under the key
    #[error("File not found: {0}")]
    NotFound(String),

    /// Underlying filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Flat byte store rooted at a single directory
///
/// Keys are bare file names. Names that carry path structure are
/// reduced to their final component on save; browser uploads regularly
/// arrive with full client-side paths. Saving twice under the same key
/// overwrites the earlier bytes.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Open a store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or
    /// resolved to an absolute path.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        // Absolute root so stored paths can be handed to external
        // processes regardless of the server's working directory
        let root = tokio::fs::canonicalize(&root).await?;
        Ok(Self { root })
    }

    /// The absolute directory backing this store
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `bytes` under a key derived from `name`, returning the key
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` when nothing usable remains of `name` after
    /// reduction, or an IO error when the write fails.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn save(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let key = Self::to_key(name)?;
        let path = self.root.join(&key);
        tokio::fs::write(&path, bytes).await?;
        debug!(key = %key, "Stored media file");
        Ok(key)
    }

    /// Read the bytes stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no file exists under the key, or
    /// `InvalidKey` when the key carries path structure.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a file is stored under `key`
    ///
    /// Invalid keys and IO failures both read as absent.
    pub async fn exists(&self, key: &str) -> bool {
        match self.path(key) {
            Ok(path) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Absolute path of the file stored under `key`
    ///
    /// The file need not exist; the transcoder writes its output
    /// through this path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for keys that are empty or contain path
    /// structure.
    pub fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        Self::validate_key(key)?;
        Ok(self.root.join(key))
    }

    /// Reduce an upload name to a storable key
    fn to_key(name: &str) -> Result<String, StorageError> {
        let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
        Self::validate_key(base)?;
        Ok(base.to_string())
    }

    /// Reject keys that are empty or carry path structure
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key == "." || key == ".." {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        if key.contains('/') || key.contains('\\') || key.contains('\0') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(())
    }
}
