use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Comment left by a user under a post. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        author_id: Uuid,
        post_id: Uuid,
        text: String,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("Comment text may not be blank."));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            author_id,
            post_id,
            text,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_comment_rejected() {
        let result = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "   ".into(), Utc::now());
        assert!(result.is_err());
    }
}
