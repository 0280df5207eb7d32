//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub created_at: DateTimeWithTimeZone,
    pub published_at: DateTimeWithTimeZone,
    pub is_published: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::post_image::Entity")]
    PostImage,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::like::Entity")]
    Like,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::hashtag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_hashtag::Relation::Hashtag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_hashtag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for social_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            text: model.text,
            created_at: model.created_at.into(),
            published_at: model.published_at.into(),
            is_published: model.is_published,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<social_core::domain::Post> for ActiveModel {
    fn from(post: social_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            text: Set(post.text),
            created_at: Set(post.created_at.into()),
            published_at: Set(post.published_at.into()),
            is_published: Set(post.is_published),
        }
    }
}
