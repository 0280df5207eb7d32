use std::sync::Arc;

use uuid::Uuid;

use super::{Repositories, visible_post};
use crate::domain::{Comment, Like};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, Clock};

/// Comments and likes on posts.
#[derive(Clone)]
pub struct EngagementService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
}

impl EngagementService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    pub async fn comment(&self, author_id: Uuid, post_id: Uuid, text: String) -> Result<Comment, DomainError> {
        let now = self.clock.now();
        let post = visible_post(self.repos.posts.as_ref(), author_id, post_id, now).await?;

        let comment = Comment::new(author_id, post.id, text, now)?;
        let comment = self.repos.comments.save(comment).await?;

        tracing::info!(comment_id = %comment.id, post_id = %post.id, "Comment added");
        Ok(comment)
    }

    /// Comments on a post, oldest first.
    pub async fn comments(&self, viewer: Uuid, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let post = visible_post(self.repos.posts.as_ref(), viewer, post_id, self.clock.now()).await?;
        Ok(self.repos.comments.find_by_post(post.id).await?)
    }

    pub async fn delete_comment(&self, actor: Uuid, comment_id: Uuid) -> Result<(), DomainError> {
        let comment = self
            .repos
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))?;

        if comment.author_id != actor {
            return Err(DomainError::Forbidden(
                "You can only delete your own comments.".into(),
            ));
        }

        self.repos.comments.delete(comment.id).await?;
        Ok(())
    }

    /// Like a post. A user may like a given post at most once.
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> Result<Like, DomainError> {
        let post = visible_post(self.repos.posts.as_ref(), user_id, post_id, self.clock.now()).await?;

        if self.repos.likes.find_pair(user_id, post.id).await?.is_some() {
            return Err(already_liked());
        }

        let like = self
            .repos
            .likes
            .save(Like::new(user_id, post.id))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => already_liked(),
                other => other.into(),
            })?;

        tracing::info!(user_id = %user_id, post_id = %post.id, "Post liked");
        Ok(like)
    }

    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        let like = self
            .repos
            .likes
            .find_pair(user_id, post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Like", post_id))?;

        self.repos.likes.delete(like.id).await?;
        tracing::info!(user_id = %user_id, post_id = %post_id, "Post unliked");
        Ok(())
    }

    /// Likes on a post, ordered by the liking user's name.
    pub async fn likes(&self, viewer: Uuid, post_id: Uuid) -> Result<Vec<Like>, DomainError> {
        let post = visible_post(self.repos.posts.as_ref(), viewer, post_id, self.clock.now()).await?;
        Ok(self.repos.likes.find_by_post(post.id).await?)
    }
}

fn already_liked() -> DomainError {
    DomainError::Duplicate("You have already liked this post.".into())
}
