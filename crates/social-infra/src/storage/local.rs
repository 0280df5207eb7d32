//! Filesystem storage rooted at the configured media directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use social_core::ports::{MediaStorage, StorageError};

use super::validate_path;

pub struct LocalMediaStorage {
    /// Root directory for all uploads (e.g., "./media")
    root: PathBuf,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(validate_path(path)?))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(&self, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }
        fs::write(&target, &bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(path = %target.display(), size = bytes.len(), "Media file written");
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        match self.resolve(path) {
            Ok(target) => fs::try_exists(target).await.unwrap_or(false),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        storage
            .save("uploads/posts/alice_photo.jpg", b"jpeg".to_vec())
            .await
            .unwrap();

        assert!(storage.exists("uploads/posts/alice_photo.jpg").await);
        let written = std::fs::read(dir.path().join("uploads/posts/alice_photo.jpg")).unwrap();
        assert_eq!(written, b"jpeg");
    }

    #[tokio::test]
    async fn test_save_rejects_escaping_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        let result = storage.save("../outside.jpg", b"x".to_vec()).await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
        assert!(!storage.exists("../outside.jpg").await);
    }
}
