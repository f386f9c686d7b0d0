//! Create `favorite` and `hidden` tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorite::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favorite::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Favorite::FriendId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Favorite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_user")
                            .from(Favorite::Table, Favorite::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorite_friend")
                            .from(Favorite::Table, Favorite::FriendId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, friend_id) - one marker per pair
        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_pair")
                    .table(Favorite::Table)
                    .col(Favorite::UserId)
                    .col(Favorite::FriendId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Hidden::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hidden::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hidden::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Hidden::FriendId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Hidden::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hidden_user")
                            .from(Hidden::Table, Hidden::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hidden_friend")
                            .from(Hidden::Table, Hidden::FriendId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, friend_id) - one marker per pair
        manager
            .create_index(
                Index::create()
                    .name("idx_hidden_pair")
                    .table(Hidden::Table)
                    .col(Hidden::UserId)
                    .col(Hidden::FriendId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hidden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Favorite::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Favorite {
    Table,
    Id,
    UserId,
    FriendId,
    CreatedAt,
}

#[derive(Iden)]
enum Hidden {
    Table,
    Id,
    UserId,
    FriendId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
