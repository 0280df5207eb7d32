//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use social_core::domain::{Comment, Follow, HashTag, Like, Post, PostImage, User};
use social_core::error::RepoError;
use social_core::ports::{
    CommentRepository, FollowRepository, HashTagRepository, LikeRepository, PostImageRepository,
    PostRepository, UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::follow::{self, Entity as FollowEntity};
use super::entity::hashtag::{self, Entity as HashTagEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_hashtag::{self, Entity as PostHashtagEntity};
use super::entity::post_image::{self, Entity as PostImageEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL follow repository.
pub type PostgresFollowRepository = PostgresBaseRepository<FollowEntity>;

/// PostgreSQL hashtag repository.
pub type PostgresHashTagRepository = PostgresBaseRepository<HashTagEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL post image repository.
pub type PostgresPostImageRepository = PostgresBaseRepository<PostImageEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL like repository.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.len() > 1 => format!("{}***{}", first, domain),
                _ => format!("***{}", domain),
            }
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, username_contains: Option<&str>) -> Result<Vec<User>, RepoError> {
        let mut query = UserEntity::find();
        if let Some(fragment) = username_contains {
            query = query.filter(user::Column::Username.contains(fragment));
        }

        let result = query
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn follow(&self, follow: Follow) -> Result<Follow, RepoError> {
        let model = follow::ActiveModel::from(follow)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<(), RepoError> {
        let result = FollowEntity::delete_many()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FolloweeId.eq(followee_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn followees(&self, follower_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let result = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(|f| f.followee_id).collect())
    }
}

#[async_trait]
impl HashTagRepository for PostgresHashTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<HashTag>, RepoError> {
        let result = HashTagEntity::find()
            .filter(hashtag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<HashTag>, RepoError> {
        let result = HashTagEntity::find()
            .order_by_asc(hashtag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

impl PostgresPostRepository {
    /// Published posts whose publish timestamp has passed.
    fn visible(now: DateTime<Utc>) -> Condition {
        Condition::all()
            .add(post::Column::IsPublished.eq(true))
            .add(post::Column::PublishedAt.lte(now))
    }

    async fn fetch(&self, condition: Condition) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(condition)
            .order_by_desc(post::Column::PublishedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        self.fetch(Condition::all().add(post::Column::AuthorId.eq(author_id)))
            .await
    }

    async fn list_visible(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        self.fetch(Self::visible(now)).await
    }

    async fn list_visible_by_authors(
        &self,
        author_ids: &[Uuid],
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError> {
        self.fetch(
            Self::visible(now).add(post::Column::AuthorId.is_in(author_ids.iter().copied())),
        )
        .await
    }

    async fn list_visible_by_hashtag(
        &self,
        hashtag_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError> {
        let tagged = Query::select()
            .column(post_hashtag::Column::PostId)
            .from(PostHashtagEntity)
            .and_where(post_hashtag::Column::HashtagId.eq(hashtag_id))
            .to_owned();

        self.fetch(Self::visible(now).add(post::Column::Id.in_subquery(tagged)))
            .await
    }

    async fn list_postponed(
        &self,
        author_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError> {
        self.fetch(
            Condition::all()
                .add(post::Column::AuthorId.eq(author_id))
                .add(
                    Condition::any()
                        .add(post::Column::IsPublished.eq(false))
                        .add(post::Column::PublishedAt.gt(now)),
                ),
        )
        .await
    }

    async fn list_liked_by(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let liked = Query::select()
            .column(like::Column::PostId)
            .from(LikeEntity)
            .and_where(like::Column::UserId.eq(user_id))
            .to_owned();

        self.fetch(Condition::all().add(post::Column::Id.in_subquery(liked)))
            .await
    }

    async fn set_hashtags(&self, post_id: Uuid, hashtag_ids: &[Uuid]) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        PostHashtagEntity::delete_many()
            .filter(post_hashtag::Column::PostId.eq(post_id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if !hashtag_ids.is_empty() {
            let links = hashtag_ids.iter().map(|hashtag_id| post_hashtag::ActiveModel {
                post_id: Set(post_id),
                hashtag_id: Set(*hashtag_id),
            });
            PostHashtagEntity::insert_many(links)
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)
    }

    async fn hashtags_of(&self, post_id: Uuid) -> Result<Vec<HashTag>, RepoError> {
        let linked = Query::select()
            .column(post_hashtag::Column::HashtagId)
            .from(PostHashtagEntity)
            .and_where(post_hashtag::Column::PostId.eq(post_id))
            .to_owned();

        let result = HashTagEntity::find()
            .filter(hashtag::Column::Id.in_subquery(linked))
            .order_by_asc(hashtag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostImageRepository for PostgresPostImageRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<PostImage>, RepoError> {
        let result = PostImageEntity::find()
            .filter(post_image::Column::PostId.eq(post_id))
            .order_by_asc(post_image::Column::Image)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .join(JoinType::InnerJoin, like::Relation::User.def())
            .order_by_asc(user::Column::FirstName)
            .order_by_asc(user::Column::LastName)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_pair(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn count_by_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
