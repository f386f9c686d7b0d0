//! Create `friendship` and `friend_request` tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Friendship::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Friendship::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Friendship::UserAId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Friendship::UserBId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Friendship::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendship_user_a")
                            .from(Friendship::Table, Friendship::UserAId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendship_user_b")
                            .from(Friendship::Table, Friendship::UserBId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_a_id, user_b_id) - one edge per pair
        manager
            .create_index(
                Index::create()
                    .name("idx_friendship_pair")
                    .table(Friendship::Table)
                    .col(Friendship::UserAId)
                    .col(Friendship::UserBId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: user_b_id (pair lookups filter on either column)
        manager
            .create_index(
                Index::create()
                    .name("idx_friendship_user_b")
                    .table(Friendship::Table)
                    .col(Friendship::UserBId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FriendRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FriendRequest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FriendRequest::RequesterId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FriendRequest::RequesteeId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FriendRequest::Accepted).boolean())
                    .col(ColumnDef::new(FriendRequest::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(FriendRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(FriendRequest::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friend_request_requester")
                            .from(FriendRequest::Table, FriendRequest::RequesterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friend_request_requestee")
                            .from(FriendRequest::Table, FriendRequest::RequesteeId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Partial unique index: at most one live request per ordered pair.
        // Concurrent duplicate inserts fail one caller with a constraint
        // violation, which the graph service treats as "already exists".
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_friend_request_live_pair \
                 ON friend_request (requester_id, requestee_id) \
                 WHERE deleted_at IS NULL;",
            )
            .await?;

        // Index: requestee_id (for listing pending requests)
        manager
            .create_index(
                Index::create()
                    .name("idx_friend_request_requestee")
                    .table(FriendRequest::Table)
                    .col(FriendRequest::RequesteeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FriendRequest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Friendship::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Friendship {
    Table,
    Id,
    UserAId,
    UserBId,
    CreatedAt,
}

#[derive(Iden)]
enum FriendRequest {
    Table,
    Id,
    RequesterId,
    RequesteeId,
    Accepted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
