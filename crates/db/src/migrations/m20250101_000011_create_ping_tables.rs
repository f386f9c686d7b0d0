//! Create `ping_room` and `ping` tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PingRoom::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PingRoom::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PingRoom::User1Id).string_len(32).not_null())
                    .col(ColumnDef::new(PingRoom::User2Id).string_len(32).not_null())
                    .col(ColumnDef::new(PingRoom::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(PingRoom::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ping_room_user1")
                            .from(PingRoom::Table, PingRoom::User1Id)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ping_room_user2")
                            .from(PingRoom::Table, PingRoom::User2Id)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Partial unique index: one live room per pair; rows are stored
        // canonicalized so no reverse-pair check is needed.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_ping_room_live_pair \
                 ON ping_room (user1_id, user2_id) \
                 WHERE deleted_at IS NULL;",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ping::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ping::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ping::PingRoomId).string_len(32).not_null())
                    .col(ColumnDef::new(Ping::SenderId).string_len(32).not_null())
                    .col(ColumnDef::new(Ping::ReceiverId).string_len(32).not_null())
                    .col(ColumnDef::new(Ping::Emoji).string_len(16))
                    .col(ColumnDef::new(Ping::Content).text())
                    .col(
                        ColumnDef::new(Ping::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Ping::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ping_room")
                            .from(Ping::Table, Ping::PingRoomId)
                            .to(PingRoom::Table, PingRoom::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ping_sender")
                            .from(Ping::Table, Ping::SenderId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ping_receiver")
                            .from(Ping::Table, Ping::ReceiverId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (ping_room_id, created_at) for room listings
        manager
            .create_index(
                Index::create()
                    .name("idx_ping_room_created")
                    .table(Ping::Table)
                    .col(Ping::PingRoomId)
                    .col(Ping::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: (receiver_id, is_read) for unread counts
        manager
            .create_index(
                Index::create()
                    .name("idx_ping_receiver_read")
                    .table(Ping::Table)
                    .col(Ping::ReceiverId)
                    .col(Ping::IsRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ping::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PingRoom::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PingRoom {
    Table,
    Id,
    User1Id,
    User2Id,
    DeletedAt,
    CreatedAt,
}

#[derive(Iden)]
enum Ping {
    Table,
    Id,
    PingRoomId,
    SenderId,
    ReceiverId,
    Emoji,
    Content,
    IsRead,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
