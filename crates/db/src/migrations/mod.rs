//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_friendship_tables;
mod m20250101_000003_create_friend_group_tables;
mod m20250101_000004_create_favorite_hidden_tables;
mod m20250101_000005_create_moderation_tables;
mod m20250101_000006_create_question_tables;
mod m20250101_000007_create_response_table;
mod m20250101_000008_create_note_table;
mod m20250101_000009_create_check_in_table;
mod m20250101_000010_create_moment_table;
mod m20250101_000011_create_ping_tables;
mod m20250101_000012_create_notification_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_friendship_tables::Migration),
            Box::new(m20250101_000003_create_friend_group_tables::Migration),
            Box::new(m20250101_000004_create_favorite_hidden_tables::Migration),
            Box::new(m20250101_000005_create_moderation_tables::Migration),
            Box::new(m20250101_000006_create_question_tables::Migration),
            Box::new(m20250101_000007_create_response_table::Migration),
            Box::new(m20250101_000008_create_note_table::Migration),
            Box::new(m20250101_000009_create_check_in_table::Migration),
            Box::new(m20250101_000010_create_moment_table::Migration),
            Box::new(m20250101_000011_create_ping_tables::Migration),
            Box::new(m20250101_000012_create_notification_table::Migration),
        ]
    }
}
