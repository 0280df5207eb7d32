use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Comment, Follow, HashTag, Like, Post, PostImage, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Dependent rows are removed by cascade.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// All users ordered by username, optionally filtered by a username fragment.
    async fn list(&self, username_contains: Option<&str>) -> Result<Vec<User>, RepoError>;
}

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Store a follow. Fails with `RepoError::Constraint` for a repeated pair.
    async fn follow(&self, follow: Follow) -> Result<Follow, RepoError>;

    /// Remove a follow. Fails with `RepoError::NotFound` when absent.
    async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<(), RepoError>;

    /// Ids of the users `follower_id` follows.
    async fn followees(&self, follower_id: Uuid) -> Result<Vec<Uuid>, RepoError>;
}

/// Hashtags are ordered by name.
#[async_trait]
pub trait HashTagRepository: BaseRepository<HashTag, Uuid> {
    async fn find_by_name(&self, name: &str) -> Result<Option<HashTag>, RepoError>;

    async fn list(&self) -> Result<Vec<HashTag>, RepoError>;
}

/// Post repository. Every list is ordered by `published_at`, newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts that are published with `published_at <= now`.
    async fn list_visible(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;

    /// Visible posts written by any of `author_ids`.
    async fn list_visible_by_authors(
        &self,
        author_ids: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError>;

    /// Visible posts tagged with the given hashtag.
    async fn list_visible_by_hashtag(
        &self,
        hashtag_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError>;

    /// The author's posts that are unpublished or scheduled after `now`.
    async fn list_postponed(
        &self,
        author_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError>;

    /// Posts liked by the user.
    async fn list_liked_by(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Replace the post's hashtag links.
    async fn set_hashtags(&self, post_id: Uuid, hashtag_ids: &[Uuid]) -> Result<(), RepoError>;

    /// Hashtags linked to the post, ordered by name.
    async fn hashtags_of(&self, post_id: Uuid) -> Result<Vec<HashTag>, RepoError>;
}

#[async_trait]
pub trait PostImageRepository: BaseRepository<PostImage, Uuid> {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<PostImage>, RepoError>;
}

/// Comments are ordered by `created_at`, oldest first.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Likes are ordered by the liking user's first name, then last name.
#[async_trait]
pub trait LikeRepository: BaseRepository<Like, Uuid> {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Like>, RepoError>;

    async fn find_pair(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Like>, RepoError>;

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}
