//! Application services - the write and read use-cases of the API.
//!
//! Services own no state beyond the ports they were built with. Every rule
//! that depends on "now" reads it from the injected [`Clock`], and file names
//! draw their random suffix from the injected [`IdGenerator`].
//!
//! [`Clock`]: crate::ports::Clock
//! [`IdGenerator`]: crate::ports::IdGenerator

mod engagement;
mod hashtags;
mod posts;
mod users;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{
    BaseRepository, CommentRepository, FollowRepository, HashTagRepository, LikeRepository,
    PostImageRepository, PostRepository, UserRepository,
};

pub use engagement::EngagementService;
pub use hashtags::HashTagService;
pub use posts::{CreatePost, FeedFilter, PostDetail, PostService, UpdatePost};
pub use users::{PASSWORD_MIN_LENGTH, RegisterUser, UpdateProfile, UserService};

/// Every repository the services need, bundled for wiring.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub hashtags: Arc<dyn HashTagRepository>,
    pub images: Arc<dyn PostImageRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub likes: Arc<dyn LikeRepository>,
}

/// Load a post the viewer is allowed to see: any visible post, or one of
/// their own. Hidden posts look exactly like missing ones.
async fn visible_post(
    posts: &dyn PostRepository,
    viewer: Uuid,
    post_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Post, DomainError> {
    match posts.find_by_id(post_id).await? {
        Some(post) if post.author_id == viewer || post.is_visible_at(now) => Ok(post),
        _ => Err(DomainError::not_found("Post", post_id)),
    }
}

/// Load a post for modification by its author.
async fn owned_post(
    posts: &dyn PostRepository,
    actor: Uuid,
    post_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Post, DomainError> {
    let post = visible_post(posts, actor, post_id, now).await?;
    if post.author_id != actor {
        return Err(DomainError::Forbidden(
            "You can only modify your own posts.".into(),
        ));
    }
    Ok(post)
}
