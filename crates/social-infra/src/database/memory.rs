//! In-memory repositories - used when no database is configured, and by tests.
//!
//! Mirrors the relational schema: unique columns are enforced, references
//! must point at existing rows and deletes cascade the same way the
//! foreign keys do.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use social_core::domain::{Comment, Follow, HashTag, Like, Post, PostImage, User};
use social_core::error::RepoError;
use social_core::ports::{
    BaseRepository, CommentRepository, FollowRepository, HashTagRepository, LikeRepository,
    PostImageRepository, PostRepository, UserRepository,
};
use social_core::services::Repositories;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    follows: HashMap<Uuid, Follow>,
    hashtags: HashMap<Uuid, HashTag>,
    posts: HashMap<Uuid, Post>,
    /// `(post_id, hashtag_id)` links.
    post_hashtags: BTreeSet<(Uuid, Uuid)>,
    images: HashMap<Uuid, PostImage>,
    comments: HashMap<Uuid, Comment>,
    likes: HashMap<Uuid, Like>,
}

impl Tables {
    fn require_user(&self, id: Uuid) -> Result<(), RepoError> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(RepoError::Query(format!("foreign key violation: user {id}")))
        }
    }

    fn require_post(&self, id: Uuid) -> Result<(), RepoError> {
        if self.posts.contains_key(&id) {
            Ok(())
        } else {
            Err(RepoError::Query(format!("foreign key violation: post {id}")))
        }
    }

    fn remove_post(&mut self, post_id: Uuid) -> bool {
        if self.posts.remove(&post_id).is_none() {
            return false;
        }
        self.post_hashtags.retain(|(post, _)| *post != post_id);
        self.images.retain(|_, i| i.post_id != post_id);
        self.comments.retain(|_, c| c.post_id != post_id);
        self.likes.retain(|_, l| l.post_id != post_id);
        true
    }

    fn remove_user(&mut self, user_id: Uuid) -> bool {
        if self.users.remove(&user_id).is_none() {
            return false;
        }
        let owned: Vec<Uuid> = self
            .posts
            .values()
            .filter(|p| p.author_id == user_id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            self.remove_post(post_id);
        }
        self.follows
            .retain(|_, f| f.follower_id != user_id && f.followee_id != user_id);
        self.comments.retain(|_, c| c.author_id != user_id);
        self.likes.retain(|_, l| l.user_id != user_id);
        true
    }

    /// Posts matching `keep`, newest first.
    fn posts_where(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().filter(|p| keep(p)).cloned().collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(a.id.cmp(&b.id)));
        posts
    }
}

fn visible(post: &Post, now: DateTime<Utc>) -> bool {
    post.is_published && post.published_at <= now
}

/// Thread-safe in-process store implementing every repository port.
///
/// Note: Data is lost on process restart.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Hand out the store behind every repository port.
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            users: self.clone(),
            follows: self.clone(),
            posts: self.clone(),
            hashtags: self.clone(),
            images: self.clone(),
            comments: self.clone(),
            likes: self.clone(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;

        let clash = tables.users.values().find(|u| {
            u.id != user.id && (u.username == user.username || u.email == user.email)
        });
        if let Some(existing) = clash {
            let column = if existing.username == user.username {
                "username"
            } else {
                "email"
            };
            return Err(RepoError::Constraint(format!("users.{column} must be unique")));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.tables.write().await.remove_user(id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn list(&self, username_contains: Option<&str>) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| username_contains.is_none_or(|f| u.username.contains(f)))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn follow(&self, follow: Follow) -> Result<Follow, RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_user(follow.follower_id)?;
        tables.require_user(follow.followee_id)?;

        let duplicate = tables.follows.values().any(|f| {
            f.follower_id == follow.follower_id && f.followee_id == follow.followee_id
        });
        if duplicate {
            return Err(RepoError::Constraint(
                "follows.(follower_id, followee_id) must be unique".into(),
            ));
        }

        tables.follows.insert(follow.id, follow.clone());
        Ok(follow)
    }

    async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.follows.len();
        tables
            .follows
            .retain(|_, f| !(f.follower_id == follower_id && f.followee_id == followee_id));

        if tables.follows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn followees(&self, follower_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .values()
            .filter(|f| f.follower_id == follower_id)
            .map(|f| f.followee_id)
            .collect())
    }
}

#[async_trait]
impl BaseRepository<HashTag, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<HashTag>, RepoError> {
        Ok(self.tables.read().await.hashtags.get(&id).cloned())
    }

    async fn save(&self, hashtag: HashTag) -> Result<HashTag, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .hashtags
            .values()
            .any(|t| t.id != hashtag.id && t.name == hashtag.name)
        {
            return Err(RepoError::Constraint("hashtags.name must be unique".into()));
        }

        tables.hashtags.insert(hashtag.id, hashtag.clone());
        Ok(hashtag)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.hashtags.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        tables.post_hashtags.retain(|(_, tag)| *tag != id);
        Ok(())
    }
}

#[async_trait]
impl HashTagRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<HashTag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.hashtags.values().find(|t| t.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<HashTag>, RepoError> {
        let tables = self.tables.read().await;
        let mut hashtags: Vec<HashTag> = tables.hashtags.values().cloned().collect();
        hashtags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hashtags)
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_user(post.author_id)?;

        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.tables.write().await.remove_post(id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts_where(|p| p.author_id == author_id))
    }

    async fn list_visible(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts_where(|p| visible(p, now)))
    }

    async fn list_visible_by_authors(
        &self,
        author_ids: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts_where(|p| visible(p, now) && author_ids.contains(&p.author_id)))
    }

    async fn list_visible_by_hashtag(
        &self,
        hashtag_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts_where(|p| {
            visible(p, now) && tables.post_hashtags.contains(&(p.id, hashtag_id))
        }))
    }

    async fn list_postponed(
        &self,
        author_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts_where(|p| p.author_id == author_id && !visible(p, now)))
    }

    async fn list_liked_by(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let liked: Vec<Uuid> = tables
            .likes
            .values()
            .filter(|l| l.user_id == user_id)
            .map(|l| l.post_id)
            .collect();
        Ok(tables.posts_where(|p| liked.contains(&p.id)))
    }

    async fn set_hashtags(&self, post_id: Uuid, hashtag_ids: &[Uuid]) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_post(post_id)?;
        if let Some(missing) = hashtag_ids.iter().find(|id| !tables.hashtags.contains_key(id)) {
            return Err(RepoError::Query(format!(
                "foreign key violation: hashtag {missing}"
            )));
        }

        tables.post_hashtags.retain(|(post, _)| *post != post_id);
        for hashtag_id in hashtag_ids {
            tables.post_hashtags.insert((post_id, *hashtag_id));
        }
        Ok(())
    }

    async fn hashtags_of(&self, post_id: Uuid) -> Result<Vec<HashTag>, RepoError> {
        let tables = self.tables.read().await;
        let mut hashtags: Vec<HashTag> = tables
            .post_hashtags
            .iter()
            .filter(|(post, _)| *post == post_id)
            .filter_map(|(_, tag)| tables.hashtags.get(tag).cloned())
            .collect();
        hashtags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hashtags)
    }
}

#[async_trait]
impl BaseRepository<PostImage, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostImage>, RepoError> {
        Ok(self.tables.read().await.images.get(&id).cloned())
    }

    async fn save(&self, image: PostImage) -> Result<PostImage, RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_post(image.post_id)?;

        tables.images.insert(image.id, image.clone());
        Ok(image)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.tables.write().await.images.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostImageRepository for InMemoryStore {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<PostImage>, RepoError> {
        let tables = self.tables.read().await;
        let mut images: Vec<PostImage> = tables
            .images
            .values()
            .filter(|i| i.post_id == post_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| a.image.cmp(&b.image));
        Ok(images)
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_user(comment.author_id)?;
        tables.require_post(comment.post_id)?;

        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.tables.write().await.comments.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.values().filter(|c| c.post_id == post_id).count() as u64)
    }
}

#[async_trait]
impl BaseRepository<Like, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Like>, RepoError> {
        Ok(self.tables.read().await.likes.get(&id).cloned())
    }

    async fn save(&self, like: Like) -> Result<Like, RepoError> {
        let mut tables = self.tables.write().await;
        tables.require_user(like.user_id)?;
        tables.require_post(like.post_id)?;

        let duplicate = tables.likes.values().any(|l| {
            l.id != like.id && l.user_id == like.user_id && l.post_id == like.post_id
        });
        if duplicate {
            return Err(RepoError::Constraint(
                "likes.(user_id, post_id) must be unique".into(),
            ));
        }

        tables.likes.insert(like.id, like.clone());
        Ok(like)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.tables.write().await.likes.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl LikeRepository for InMemoryStore {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Like>, RepoError> {
        let tables = self.tables.read().await;
        let name_of = |like: &Like| {
            tables
                .users
                .get(&like.user_id)
                .map(|u| (u.first_name.clone(), u.last_name.clone()))
                .unwrap_or_default()
        };

        let mut likes: Vec<Like> = tables
            .likes
            .values()
            .filter(|l| l.post_id == post_id)
            .cloned()
            .collect();
        likes.sort_by(|a, b| name_of(a).cmp(&name_of(b)).then(a.id.cmp(&b.id)));
        Ok(likes)
    }

    async fn find_pair(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Like>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .likes
            .values()
            .find(|l| l.user_id == user_id && l.post_id == post_id)
            .cloned())
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.values().filter(|l| l.post_id == post_id).count() as u64)
    }
}
