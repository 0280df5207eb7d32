use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hashtags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Hashtags::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Hashtags::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Text).text().not_null())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::PublishedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::IsPublished)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_author")
                            .from(Posts::Table, Posts::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_published_at")
                    .table(Posts::Table)
                    .col(Posts::PublishedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostHashtags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostHashtags::PostId).uuid().not_null())
                    .col(ColumnDef::new(PostHashtags::HashtagId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(PostHashtags::PostId)
                            .col(PostHashtags::HashtagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_hashtags_post")
                            .from(PostHashtags::Table, PostHashtags::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_hashtags_hashtag")
                            .from(PostHashtags::Table, PostHashtags::HashtagId)
                            .to(Hashtags::Table, Hashtags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostImages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostImages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PostImages::PostId).uuid().not_null())
                    .col(ColumnDef::new(PostImages::Image).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_images_post")
                            .from(PostImages::Table, PostImages::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostHashtags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hashtags::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Hashtags {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum Posts {
    Table,
    Id,
    AuthorId,
    Text,
    CreatedAt,
    PublishedAt,
    IsPublished,
}

#[derive(DeriveIden)]
enum PostHashtags {
    Table,
    PostId,
    HashtagId,
}

#[derive(DeriveIden)]
enum PostImages {
    Table,
    Id,
    PostId,
    Image,
}
