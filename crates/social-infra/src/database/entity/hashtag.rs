//! HashTag entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "hashtags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_hashtag::Entity")]
    PostHashtag,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_hashtag::Relation::Post.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_hashtag::Relation::Hashtag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for social_core::domain::HashTag {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<social_core::domain::HashTag> for ActiveModel {
    fn from(hashtag: social_core::domain::HashTag) -> Self {
        Self {
            id: Set(hashtag.id),
            name: Set(hashtag.name),
        }
    }
}
