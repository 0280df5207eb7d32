use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user liking a post. At most one per (user, post) pair; the storage
/// layer enforces the uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
}

impl Like {
    pub fn new(user_id: Uuid, post_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            post_id,
        }
    }
}
