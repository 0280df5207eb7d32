//! Application state - shared across all handlers.

use std::sync::Arc;

use social_core::ports::{
    Clock, IdGenerator, MediaStorage, PasswordService, RandomIdGenerator, SystemClock,
};
use social_core::services::{
    EngagementService, HashTagService, PostService, Repositories, UserService,
};
use social_infra::{Argon2PasswordService, InMemoryStore, LocalMediaStorage};

#[cfg(feature = "postgres")]
use social_infra::database::{
    PostgresCommentRepository, PostgresFollowRepository, PostgresHashTagRepository,
    PostgresLikeRepository, PostgresPostImageRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub posts: PostService,
    pub engagement: EngagementService,
    pub hashtags: HashTagService,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repos = Self::repositories(config).await;
        let storage = Arc::new(LocalMediaStorage::new(config.media_root.clone()));
        tracing::info!(media_root = %config.media_root.display(), "Media storage ready");

        let state = Self::build(
            repos,
            Arc::new(Argon2PasswordService::new()),
            storage,
            Arc::new(SystemClock),
            Arc::new(RandomIdGenerator),
        );

        tracing::info!("Application state initialized");
        state
    }

    /// Wire the services over the given ports.
    pub fn build(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        storage: Arc<dyn MediaStorage>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            users: UserService::new(&repos, passwords, storage.clone(), clock.clone(), ids.clone()),
            posts: PostService::new(repos.clone(), storage, clock.clone(), ids),
            engagement: EngagementService::new(repos.clone(), clock),
            hashtags: HashTagService::new(repos.hashtags),
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> Repositories {
        use migration::{Migrator, MigratorTrait};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryStore::new()).repositories();
        };

        let conn = match connect(db_config).await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Arc::new(InMemoryStore::new()).repositories();
            }
        };

        if let Err(e) = Migrator::up(&conn, None).await {
            tracing::error!("Failed to run migrations: {}. Using in-memory fallback.", e);
            return Arc::new(InMemoryStore::new()).repositories();
        }

        Repositories {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            follows: Arc::new(PostgresFollowRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            hashtags: Arc::new(PostgresHashTagRepository::new(conn.clone())),
            images: Arc::new(PostgresPostImageRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
            likes: Arc::new(PostgresLikeRepository::new(conn)),
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_config: &AppConfig) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Arc::new(InMemoryStore::new()).repositories()
    }
}
