//! Create `friend_group` and `friend_group_member` tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FriendGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FriendGroup::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FriendGroup::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FriendGroup::Name).string_len(30).not_null())
                    .col(
                        ColumnDef::new(FriendGroup::OrderIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(FriendGroup::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(FriendGroup::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friend_group_user")
                            .from(FriendGroup::Table, FriendGroup::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's groups)
        manager
            .create_index(
                Index::create()
                    .name("idx_friend_group_user")
                    .table(FriendGroup::Table)
                    .col(FriendGroup::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FriendGroupMember::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FriendGroupMember::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FriendGroupMember::GroupId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FriendGroupMember::MemberId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FriendGroupMember::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friend_group_member_group")
                            .from(FriendGroupMember::Table, FriendGroupMember::GroupId)
                            .to(FriendGroup::Table, FriendGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friend_group_member_member")
                            .from(FriendGroupMember::Table, FriendGroupMember::MemberId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (group_id, member_id) - one membership per pair
        manager
            .create_index(
                Index::create()
                    .name("idx_friend_group_member_pair")
                    .table(FriendGroupMember::Table)
                    .col(FriendGroupMember::GroupId)
                    .col(FriendGroupMember::MemberId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FriendGroupMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FriendGroup::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FriendGroup {
    Table,
    Id,
    UserId,
    Name,
    OrderIndex,
    DeletedAt,
    CreatedAt,
}

#[derive(Iden)]
enum FriendGroupMember {
    Table,
    Id,
    GroupId,
    MemberId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
