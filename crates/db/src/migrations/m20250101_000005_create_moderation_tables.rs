//! Create `block_rec`, `user_report` and `content_report` tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlockRec::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlockRec::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlockRec::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(BlockRec::BlockedUserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BlockRec::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(BlockRec::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_block_rec_user")
                            .from(BlockRec::Table, BlockRec::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_block_rec_blocked_user")
                            .from(BlockRec::Table, BlockRec::BlockedUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Partial unique index: at most one live block rec per ordered pair.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_block_rec_live_pair \
                 ON block_rec (user_id, blocked_user_id) \
                 WHERE deleted_at IS NULL;",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserReport::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserReport::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserReport::ReporterId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserReport::ReportedUserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserReport::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_report_reporter")
                            .from(UserReport::Table, UserReport::ReporterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_report_reported_user")
                            .from(UserReport::Table, UserReport::ReportedUserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (reporter_id, reported_user_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_report_pair")
                    .table(UserReport::Table)
                    .col(UserReport::ReporterId)
                    .col(UserReport::ReportedUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: reported_user_id (block filter checks both directions)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_report_reported_user")
                    .table(UserReport::Table)
                    .col(UserReport::ReportedUserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ContentReport::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentReport::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContentReport::ReporterId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentReport::TargetKind)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentReport::TargetId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContentReport::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_report_reporter")
                            .from(ContentReport::Table, ContentReport::ReporterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (reporter_id, target_kind) for visibility filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_content_report_reporter_kind")
                    .table(ContentReport::Table)
                    .col(ContentReport::ReporterId)
                    .col(ContentReport::TargetKind)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentReport::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserReport::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlockRec::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BlockRec {
    Table,
    Id,
    UserId,
    BlockedUserId,
    DeletedAt,
    CreatedAt,
}

#[derive(Iden)]
enum UserReport {
    Table,
    Id,
    ReporterId,
    ReportedUserId,
    CreatedAt,
}

#[derive(Iden)]
enum ContentReport {
    Table,
    Id,
    ReporterId,
    TargetKind,
    TargetId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
