//! Media storage port - where uploaded files end up.

use async_trait::async_trait;

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store `bytes` at the storage-relative `path`, replacing any existing file.
    async fn save(&self, path: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Check whether a file exists at `path`.
    async fn exists(&self, path: &str) -> bool;
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<StorageError> for crate::error::DomainError {
    fn from(err: StorageError) -> Self {
        crate::error::DomainError::Internal(err.to_string())
    }
}
