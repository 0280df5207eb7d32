#[cfg(test)]
mod tests {
    use crate::database::entity::{like, post, user};
    use crate::database::postgres_base::map_db_err;
    use crate::database::postgres_repo::{
        PostgresLikeRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use chrono::{Duration, Utc};
    use sea_orm::{ConnAcquireErr, DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use social_core::domain::{Post, User};
    use social_core::error::RepoError;
    use social_core::ports::{BaseRepository, LikeRepository, UserRepository};

    fn post_model(id: uuid::Uuid, author_id: uuid::Uuid) -> post::Model {
        let now = Utc::now();
        post::Model {
            id,
            author_id,
            text: "Test Post".to_owned(),
            created_at: now.into(),
            published_at: (now + Duration::hours(1)).into(),
            is_published: false,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model(post_id, author_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.text, "Test Post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, author_id);
        assert!(!post.is_published);
    }

    #[tokio::test]
    async fn test_save_post_uses_upsert() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let model = post_model(post_id, author_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let repo = PostgresPostRepository::new(db.clone());
        let saved: Post = repo.save(Post::from(model)).await.unwrap();
        assert_eq!(saved.id, post_id);

        let log = db.into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        assert!(sql.starts_with(r#"INSERT INTO "posts""#));
        assert!(sql.contains("ON CONFLICT"));
        assert!(sql.contains("RETURNING"));
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, uuid::Uuid>::delete(&repo, uuid::Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let now = Utc::now();
        let model = user::Model {
            id: uuid::Uuid::new_v4(),
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            first_name: "Alice".to_owned(),
            last_name: "Liddell".to_owned(),
            bio: String::new(),
            image: None,
            password_hash: "hash".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let found: Option<User> = repo.find_by_email("alice@example.com").await.unwrap();

        assert_eq!(found.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_likes_are_ordered_by_user_name() {
        let post_id = uuid::Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![like::Model {
                id: uuid::Uuid::new_v4(),
                user_id: uuid::Uuid::new_v4(),
                post_id,
            }]])
            .into_connection();

        let repo = PostgresLikeRepository::new(db.clone());
        let likes = LikeRepository::find_by_post(&repo, post_id).await.unwrap();
        assert_eq!(likes.len(), 1);

        let log = db.into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        assert!(sql.contains(r#"INNER JOIN "users""#));
        assert!(sql.contains(r#"ORDER BY "users"."first_name" ASC, "users"."last_name" ASC"#));
    }

    #[test]
    fn test_map_db_err() {
        assert!(matches!(
            map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)),
            RepoError::Connection(_)
        ));
        assert!(matches!(
            map_db_err(DbErr::RecordNotFound("posts".into())),
            RepoError::NotFound
        ));
        assert!(matches!(
            map_db_err(DbErr::Custom("boom".into())),
            RepoError::Query(_)
        ));
    }
}
