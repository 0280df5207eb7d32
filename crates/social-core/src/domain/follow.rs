use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// One user following another. The pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(follower_id: Uuid, followee_id: Uuid, now: DateTime<Utc>) -> Result<Self, DomainError> {
        if follower_id == followee_id {
            return Err(DomainError::validation("You cannot follow yourself."));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            follower_id,
            followee_id,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_follow_rejected() {
        let id = Uuid::new_v4();
        assert!(matches!(
            Follow::new(id, id, Utc::now()),
            Err(DomainError::Validation(_))
        ));
    }
}
