//! Create `moment` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Moment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Moment::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Moment::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(Moment::Date).date().not_null())
                    .col(ColumnDef::new(Moment::Mood).string_len(20))
                    .col(ColumnDef::new(Moment::Description).text())
                    .col(ColumnDef::new(Moment::ReaderIds).json_binary().not_null())
                    .col(ColumnDef::new(Moment::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Moment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Moment::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moment_author")
                            .from(Moment::Table, Moment::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Partial unique index: one live moment per author per day.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_moment_author_date \
                 ON moment (author_id, date) \
                 WHERE deleted_at IS NULL;",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Moment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Moment {
    Table,
    Id,
    AuthorId,
    Date,
    Mood,
    Description,
    ReaderIds,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
