//! Create `note` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Note::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Note::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Note::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(Note::Content).text().not_null())
                    .col(ColumnDef::new(Note::CategoryId).string_len(32))
                    .col(ColumnDef::new(Note::Visibility).string_len(16).not_null())
                    .col(ColumnDef::new(Note::ShareFriendIds).json_binary().not_null())
                    .col(ColumnDef::new(Note::ShareGroupIds).json_binary().not_null())
                    .col(ColumnDef::new(Note::ReaderIds).json_binary().not_null())
                    .col(ColumnDef::new(Note::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Note::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Note::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_note_author")
                            .from(Note::Table, Note::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_note_category")
                            .from(Note::Table, Note::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: author_id (profile listings, feeds)
        manager
            .create_index(
                Index::create()
                    .name("idx_note_author")
                    .table(Note::Table)
                    .col(Note::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Index: (visibility, created_at) for feed queries
        manager
            .create_index(
                Index::create()
                    .name("idx_note_visibility_created")
                    .table(Note::Table)
                    .col(Note::Visibility)
                    .col(Note::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Note::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Note {
    Table,
    Id,
    AuthorId,
    Content,
    CategoryId,
    Visibility,
    ShareFriendIds,
    ShareGroupIds,
    ReaderIds,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
