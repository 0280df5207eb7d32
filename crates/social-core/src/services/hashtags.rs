use std::sync::Arc;

use uuid::Uuid;

use crate::domain::HashTag;
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, HashTagRepository};

#[derive(Clone)]
pub struct HashTagService {
    hashtags: Arc<dyn HashTagRepository>,
}

impl HashTagService {
    pub fn new(hashtags: Arc<dyn HashTagRepository>) -> Self {
        Self { hashtags }
    }

    pub async fn create(&self, name: &str) -> Result<HashTag, DomainError> {
        let hashtag = HashTag::new(name)?;

        if self.hashtags.find_by_name(&hashtag.name).await?.is_some() {
            return Err(already_exists());
        }

        let hashtag = self.hashtags.save(hashtag).await.map_err(|e| match e {
            RepoError::Constraint(_) => already_exists(),
            other => other.into(),
        })?;

        tracing::info!(hashtag = %hashtag.name, "Hashtag created");
        Ok(hashtag)
    }

    /// All hashtags ordered by name.
    pub async fn list(&self) -> Result<Vec<HashTag>, DomainError> {
        Ok(self.hashtags.list().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<HashTag, DomainError> {
        self.hashtags
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("HashTag", id))
    }
}

fn already_exists() -> DomainError {
    DomainError::Duplicate("hash tag with this name already exists.".into())
}
