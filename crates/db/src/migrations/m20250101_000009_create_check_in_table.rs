//! Create `check_in` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CheckIn::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CheckIn::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CheckIn::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(CheckIn::Mood).string_len(20))
                    .col(ColumnDef::new(CheckIn::Description).text())
                    .col(
                        ColumnDef::new(CheckIn::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(CheckIn::Visibility).string_len(16).not_null())
                    .col(
                        ColumnDef::new(CheckIn::ShareFriendIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckIn::ShareGroupIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CheckIn::ReaderIds).json_binary().not_null())
                    .col(ColumnDef::new(CheckIn::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(CheckIn::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_check_in_author")
                            .from(CheckIn::Table, CheckIn::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (author_id, is_active) for active check-in lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_check_in_author_active")
                    .table(CheckIn::Table)
                    .col(CheckIn::AuthorId)
                    .col(CheckIn::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CheckIn::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CheckIn {
    Table,
    Id,
    AuthorId,
    Mood,
    Description,
    IsActive,
    Visibility,
    ShareFriendIds,
    ShareGroupIds,
    ReaderIds,
    DeletedAt,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
