//! Create `category`, `question` and `response_request` tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Category::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Category::Name)
                            .string_len(30)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Category::SharingScope)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Category::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Question::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Question::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Question::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(Question::Content).text().not_null())
                    .col(
                        ColumnDef::new(Question::IsAdminQuestion)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Question::SelectedDate).date())
                    .col(ColumnDef::new(Question::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Question::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_question_author")
                            .from(Question::Table, Question::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: selected_date (daily question lookup)
        manager
            .create_index(
                Index::create()
                    .name("idx_question_selected_date")
                    .table(Question::Table)
                    .col(Question::SelectedDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ResponseRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResponseRequest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ResponseRequest::RequesterId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResponseRequest::RequesteeId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResponseRequest::QuestionId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResponseRequest::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ResponseRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_response_request_requester")
                            .from(ResponseRequest::Table, ResponseRequest::RequesterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_response_request_requestee")
                            .from(ResponseRequest::Table, ResponseRequest::RequesteeId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_response_request_question")
                            .from(ResponseRequest::Table, ResponseRequest::QuestionId)
                            .to(Question::Table, Question::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: requestee_id (for listing received requests)
        manager
            .create_index(
                Index::create()
                    .name("idx_response_request_requestee")
                    .table(ResponseRequest::Table)
                    .col(ResponseRequest::RequesteeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResponseRequest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Question::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
    Name,
    SharingScope,
    CreatedAt,
}

#[derive(Iden)]
enum Question {
    Table,
    Id,
    AuthorId,
    Content,
    IsAdminQuestion,
    SelectedDate,
    DeletedAt,
    CreatedAt,
}

#[derive(Iden)]
enum ResponseRequest {
    Table,
    Id,
    RequesterId,
    RequesteeId,
    QuestionId,
    DeletedAt,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
