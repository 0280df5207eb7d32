use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Publication state of a post. The only transition is
/// `Unpublished -> Published`, via [`Post::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostState {
    Unpublished,
    Published,
}

/// Post entity - a piece of content owned by exactly one author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
}

impl Post {
    /// Create a new post, published immediately at `now`.
    pub fn new(author_id: Uuid, text: String, now: DateTime<Utc>) -> Result<Self, DomainError> {
        Self::validate_text(&text)?;

        Ok(Self {
            id: Uuid::new_v4(),
            author_id,
            text,
            created_at: now,
            published_at: now,
            is_published: true,
        })
    }

    /// Schedule the post for a later publish timestamp.
    pub fn scheduled_for(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn with_published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    pub fn validate_text(text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("Post text may not be blank."));
        }
        Ok(())
    }

    /// Write-time validation: the publish timestamp may not lie before `now`.
    pub fn clean(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.published_at < now {
            return Err(DomainError::validation("Start time must be later than now."));
        }
        Ok(())
    }

    /// Move an unpublished post to published, stamping it with `now`.
    /// The post is left untouched when it is already published.
    pub fn publish(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_published {
            return Err(DomainError::validation("Post is already published."));
        }

        self.is_published = true;
        self.published_at = now;
        Ok(())
    }

    pub fn state(&self) -> PostState {
        if self.is_published {
            PostState::Published
        } else {
            PostState::Unpublished
        }
    }

    /// Published and already past its publish timestamp.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_published && self.published_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn now() -> DateTime<Utc> {
        "2024-01-01T10:00:00Z".parse().unwrap()
    }

    fn post() -> Post {
        Post::new(Uuid::new_v4(), "hello world".into(), now()).unwrap()
    }

    #[test]
    fn test_new_post_defaults_to_published_now() {
        let post = post();
        assert!(post.is_published);
        assert_eq!(post.state(), PostState::Published);
        assert_eq!(post.published_at, post.created_at);
    }

    #[test]
    fn test_blank_text_rejected() {
        assert!(Post::new(Uuid::new_v4(), " \n".into(), now()).is_err());
    }

    #[test]
    fn test_publish_already_published_fails_and_keeps_state() {
        let mut post = post();
        let before = post.published_at;

        let err = post.publish(now() + TimeDelta::hours(1)).unwrap_err();

        assert!(matches!(err, DomainError::Validation(msg) if msg == "Post is already published."));
        assert!(post.is_published);
        assert_eq!(post.published_at, before);
    }

    #[test]
    fn test_publish_unpublished_sets_flag_and_timestamp() {
        let mut post = post().with_published(false);
        let later = now() + TimeDelta::minutes(5);

        post.publish(later).unwrap();

        assert_eq!(post.state(), PostState::Published);
        assert_eq!(post.published_at, later);
    }

    #[test]
    fn test_publish_moves_scheduled_post_to_now() {
        let mut post = post()
            .scheduled_for(now() + TimeDelta::days(2))
            .with_published(false);

        post.publish(now()).unwrap();

        assert_eq!(post.published_at, now());
    }

    #[test]
    fn test_clean_rejects_past_timestamp() {
        let post = post().scheduled_for(now() - TimeDelta::seconds(1));
        let err = post.clean(now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "Start time must be later than now."));
    }

    #[test]
    fn test_clean_accepts_now_and_future() {
        assert!(post().clean(now()).is_ok());
        assert!(post().scheduled_for(now() + TimeDelta::hours(3)).clean(now()).is_ok());
    }

    #[test]
    fn test_visibility() {
        let scheduled = post().scheduled_for(now() + TimeDelta::hours(1));
        assert!(!scheduled.is_visible_at(now()));
        assert!(scheduled.is_visible_at(now() + TimeDelta::hours(1)));
        assert!(!post().with_published(false).is_visible_at(now()));
    }
}
