//! Create `response` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Response::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Response::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Response::AuthorId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Response::QuestionId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Response::Content).text().not_null())
                    .col(
                        ColumnDef::new(Response::Visibility)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Response::ShareFriendIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Response::ShareGroupIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Response::ReaderIds).json_binary().not_null())
                    .col(ColumnDef::new(Response::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Response::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Response::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_response_author")
                            .from(Response::Table, Response::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_response_question")
                            .from(Response::Table, Response::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: author_id (profile listings, feeds)
        manager
            .create_index(
                Index::create()
                    .name("idx_response_author")
                    .table(Response::Table)
                    .col(Response::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Index: question_id (answers per question)
        manager
            .create_index(
                Index::create()
                    .name("idx_response_question")
                    .table(Response::Table)
                    .col(Response::QuestionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Response::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Response {
    Table,
    Id,
    AuthorId,
    QuestionId,
    Content,
    Visibility,
    ShareFriendIds,
    ShareGroupIds,
    ReaderIds,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Question {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
