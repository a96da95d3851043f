//! Create `liked_songs` table.
//!
//! One row per user; `liked_song_ids` holds the JSON-array text of song ids.
//! `user_id` is indexed but deliberately not unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LikedSongs::Table)
                    .if_not_exists()
                    .col(pk_auto(LikedSongs::Id))
                    .col(string_len(LikedSongs::UserId, 255).not_null())
                    .col(text(LikedSongs::LikedSongIds).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_liked_songs_user_id")
                    .table(LikedSongs::Table)
                    .col(LikedSongs::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LikedSongs::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LikedSongs {
    Table,
    Id,
    UserId,
    LikedSongIds,
}
