use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Repositories, owned_post, visible_post};
use crate::domain::{HashTag, Post, PostImage, post_image_file_path};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, Clock, IdGenerator, MediaStorage};

/// Input for creating a post. Missing fields take the model defaults:
/// published now, published flag set, no hashtags.
#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub text: String,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
    pub hashtags: Vec<String>,
}

/// Partial update of a post. `hashtags: Some(..)` replaces the full set.
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub text: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub hashtags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    pub hashtag: Option<String>,
    pub author: Option<Uuid>,
}

/// A post together with everything hanging off it.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub hashtags: Vec<HashTag>,
    pub images: Vec<PostImage>,
    pub likes_count: u64,
    pub comments_count: u64,
}

#[derive(Clone)]
pub struct PostService {
    repos: Repositories,
    storage: Arc<dyn MediaStorage>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl PostService {
    pub fn new(
        repos: Repositories,
        storage: Arc<dyn MediaStorage>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repos,
            storage,
            clock,
            ids,
        }
    }

    pub async fn create(&self, author_id: Uuid, input: CreatePost) -> Result<PostDetail, DomainError> {
        let now = self.clock.now();

        let mut post = Post::new(author_id, input.text, now)?;
        if let Some(published_at) = input.published_at {
            post = post.scheduled_for(published_at);
        }
        if let Some(is_published) = input.is_published {
            post = post.with_published(is_published);
        }
        post.clean(now)?;
        let names = normalize_hashtag_names(input.hashtags)?;

        if self.repos.users.find_by_id(author_id).await?.is_none() {
            return Err(DomainError::not_found("User", author_id));
        }

        let hashtags = self.resolve_hashtags(&names).await?;
        let post = self.repos.posts.save(post).await?;
        if !hashtags.is_empty() {
            let ids: Vec<Uuid> = hashtags.iter().map(|t| t.id).collect();
            self.repos.posts.set_hashtags(post.id, &ids).await?;
        }

        tracing::info!(
            post_id = %post.id,
            author_id = %author_id,
            published = post.is_published,
            published_at = %post.published_at,
            "Post created"
        );

        Ok(PostDetail {
            post,
            hashtags,
            images: Vec::new(),
            likes_count: 0,
            comments_count: 0,
        })
    }

    pub async fn update(
        &self,
        actor: Uuid,
        post_id: Uuid,
        input: UpdatePost,
    ) -> Result<PostDetail, DomainError> {
        let now = self.clock.now();
        let mut post = owned_post(self.repos.posts.as_ref(), actor, post_id, now).await?;

        if let Some(text) = input.text {
            Post::validate_text(&text)?;
            post.text = text;
        }
        if let Some(published_at) = input.published_at {
            post.published_at = published_at;
            post.clean(now)?;
        }
        let names = input.hashtags.map(normalize_hashtag_names).transpose()?;
        let hashtags = match names {
            Some(names) => Some(self.resolve_hashtags(&names).await?),
            None => None,
        };

        let post = self.repos.posts.save(post).await?;
        if let Some(hashtags) = hashtags {
            let ids: Vec<Uuid> = hashtags.iter().map(|t| t.id).collect();
            self.repos.posts.set_hashtags(post.id, &ids).await?;
        }

        tracing::info!(post_id = %post.id, "Post updated");
        self.detail(post).await
    }

    /// Publish one of the actor's unpublished posts.
    pub async fn publish(&self, actor: Uuid, post_id: Uuid) -> Result<Post, DomainError> {
        let now = self.clock.now();
        let mut post = owned_post(self.repos.posts.as_ref(), actor, post_id, now).await?;

        post.publish(now)?;
        let post = self.repos.posts.save(post).await?;

        tracing::info!(post_id = %post.id, published_at = %post.published_at, "Post published");
        Ok(post)
    }

    /// Delete a post along with its images, comments, likes and hashtag links.
    pub async fn delete(&self, actor: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        let now = self.clock.now();
        let post = owned_post(self.repos.posts.as_ref(), actor, post_id, now).await?;

        self.repos.posts.delete(post.id).await?;
        tracing::info!(post_id = %post.id, "Post deleted");
        Ok(())
    }

    pub async fn get(&self, viewer: Uuid, post_id: Uuid) -> Result<PostDetail, DomainError> {
        let post = visible_post(self.repos.posts.as_ref(), viewer, post_id, self.clock.now()).await?;
        self.detail(post).await
    }

    /// The public feed, newest first, optionally narrowed by hashtag and author.
    pub async fn feed(&self, filter: FeedFilter) -> Result<Vec<Post>, DomainError> {
        let now = self.clock.now();

        let mut posts = match filter.hashtag.as_deref() {
            Some(name) => match self.repos.hashtags.find_by_name(name).await? {
                Some(tag) => self.repos.posts.list_visible_by_hashtag(tag.id, now).await?,
                None => return Ok(Vec::new()),
            },
            None => match filter.author {
                Some(author) => {
                    self.repos
                        .posts
                        .list_visible_by_authors(&[author], now)
                        .await?
                }
                None => self.repos.posts.list_visible(now).await?,
            },
        };

        if let Some(author) = filter.author {
            posts.retain(|p| p.author_id == author);
        }
        Ok(posts)
    }

    /// Posts shown on a profile. Authors see all of their own posts.
    pub async fn by_author(&self, viewer: Uuid, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        if viewer == author_id {
            return Ok(self.repos.posts.find_by_author(author_id).await?);
        }
        Ok(self
            .repos
            .posts
            .list_visible_by_authors(&[author_id], self.clock.now())
            .await?)
    }

    pub async fn followed_authors(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let followees = self.repos.follows.followees(user_id).await?;
        if followees.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .repos
            .posts
            .list_visible_by_authors(&followees, self.clock.now())
            .await?)
    }

    pub async fn liked_by(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let now = self.clock.now();
        let mut posts = self.repos.posts.list_liked_by(user_id).await?;
        posts.retain(|p| p.author_id == user_id || p.is_visible_at(now));
        Ok(posts)
    }

    /// The author's unpublished and scheduled posts.
    pub async fn postponed(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self
            .repos
            .posts
            .list_postponed(author_id, self.clock.now())
            .await?)
    }

    /// Store an uploaded image under a derived path and attach it to the post.
    pub async fn attach_image(
        &self,
        actor: Uuid,
        post_id: Uuid,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<PostImage, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::validation("The submitted file is empty."));
        }

        let now = self.clock.now();
        let post = owned_post(self.repos.posts.as_ref(), actor, post_id, now).await?;
        let author = self
            .repos
            .users
            .find_by_id(post.author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", post.author_id))?;

        let path = post_image_file_path(
            &author.username,
            post.published_at,
            self.ids.new_id(),
            filename,
        )?;
        self.storage.save(&path, bytes).await?;

        let image = self.repos.images.save(PostImage::new(post.id, path)).await?;
        tracing::info!(post_id = %post.id, image = %image.image, "Post image stored");
        Ok(image)
    }

    async fn detail(&self, post: Post) -> Result<PostDetail, DomainError> {
        let hashtags = self.repos.posts.hashtags_of(post.id).await?;
        let images = self.repos.images.find_by_post(post.id).await?;
        let likes_count = self.repos.likes.count_by_post(post.id).await?;
        let comments_count = self.repos.comments.count_by_post(post.id).await?;

        Ok(PostDetail {
            post,
            hashtags,
            images,
            likes_count,
            comments_count,
        })
    }

    /// Existing hashtags are reused; unknown names are created. A name created
    /// concurrently by another writer is re-read instead of failing.
    async fn resolve_hashtags(&self, names: &[String]) -> Result<Vec<HashTag>, DomainError> {
        let mut hashtags = Vec::with_capacity(names.len());
        for name in names {
            if let Some(existing) = self.repos.hashtags.find_by_name(name).await? {
                hashtags.push(existing);
                continue;
            }
            let hashtag = match self.repos.hashtags.save(HashTag::new(name.as_str())?).await {
                Ok(created) => created,
                Err(RepoError::Constraint(_)) => {
                    tracing::debug!(hashtag = %name, "Hashtag created concurrently, reusing it");
                    self.repos
                        .hashtags
                        .find_by_name(name)
                        .await?
                        .ok_or_else(|| DomainError::Internal(format!("Hashtag '{name}' vanished")))?
                }
                Err(err) => return Err(err.into()),
            };
            hashtags.push(hashtag);
        }
        Ok(hashtags)
    }
}

/// Validate every name up front and drop repeats, sorted by name.
fn normalize_hashtag_names(mut names: Vec<String>) -> Result<Vec<String>, DomainError> {
    for name in &names {
        HashTag::validate_name(name)?;
    }
    names.sort();
    names.dedup();
    Ok(names)
}
