//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod id;
mod repository;
mod storage;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use clock::{Clock, FixedClock, SystemClock};
pub use id::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use repository::{
    BaseRepository, CommentRepository, FollowRepository, HashTagRepository, LikeRepository,
    PostImageRepository, PostRepository, UserRepository,
};
pub use storage::{MediaStorage, StorageError};
