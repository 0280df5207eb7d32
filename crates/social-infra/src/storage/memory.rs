//! In-memory storage - used when no media directory is writable, and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use social_core::ports::{MediaStorage, StorageError};

use super::validate_path;

#[derive(Default)]
pub struct InMemoryMediaStorage {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryMediaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents stored at `path`, if any.
    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(path).cloned()
    }
}

#[async_trait]
impl MediaStorage for InMemoryMediaStorage {
    async fn save(&self, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        validate_path(path)?;
        self.files.write().await.insert(path.to_string(), bytes);
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        self.files.read().await.contains_key(path)
    }
}
