//! Follow entity for SeaORM. `(follower_id, followee_id)` is unique.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "follows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followee_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Follower,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FolloweeId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Followee,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for social_core::domain::Follow {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            follower_id: model.follower_id,
            followee_id: model.followee_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<social_core::domain::Follow> for ActiveModel {
    fn from(follow: social_core::domain::Follow) -> Self {
        Self {
            id: Set(follow.id),
            follower_id: Set(follow.follower_id),
            followee_id: Set(follow.followee_id),
            created_at: Set(follow.created_at.into()),
        }
    }
}
