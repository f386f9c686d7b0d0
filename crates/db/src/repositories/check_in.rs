//! Check-in repository.

use std::sync::Arc;

use crate::entities::{check_in, CheckIn};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

fn json_ids(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|a| {
            a.iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Check-in repository for database operations.
#[derive(Clone)]
pub struct CheckInRepository {
    db: Arc<DatabaseConnection>,
}

impl CheckInRepository {
    /// Create a new check-in repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a check-in by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<check_in::Model>> {
        CheckIn::find_by_id(id)
            .filter(check_in::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the author's active check-in, if any.
    pub async fn find_active_by_author(
        &self,
        author_id: &str,
    ) -> AppResult<Option<check_in::Model>> {
        CheckIn::find()
            .filter(check_in::Column::AuthorId.eq(author_id))
            .filter(check_in::Column::IsActive.eq(true))
            .filter(check_in::Column::DeletedAt.is_null())
            .order_by_desc(check_in::Column::CreatedAt)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Deactivate all of an author's check-ins.
    ///
    /// Called before creating a new one so a single check-in stays active.
    pub async fn deactivate_all(&self, author_id: &str) -> AppResult<u64> {
        let result = CheckIn::update_many()
            .col_expr(
                check_in::Column::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .filter(check_in::Column::AuthorId.eq(author_id))
            .filter(check_in::Column::IsActive.eq(true))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Create a check-in.
    pub async fn create(&self, model: check_in::ActiveModel) -> AppResult<check_in::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record that a user has read a check-in; no-op if already recorded.
    pub async fn add_reader(
        &self,
        check_in: check_in::Model,
        reader_id: &str,
    ) -> AppResult<check_in::Model> {
        let mut readers = json_ids(&check_in.reader_ids);
        if readers.iter().any(|r| r == reader_id) {
            return Ok(check_in);
        }
        readers.push(reader_id.to_string());
        let mut model: check_in::ActiveModel = check_in.into();
        model.reader_ids = Set(serde_json::json!(readers));
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a friend from the share lists of the author's active
    /// check-ins.
    ///
    /// Part of the unfriend cascade.
    pub async fn scrub_share_friend(&self, author_id: &str, friend_id: &str) -> AppResult<()> {
        let Some(check_in) = self.find_active_by_author(author_id).await? else {
            return Ok(());
        };
        let shares = json_ids(&check_in.share_friend_ids);
        if shares.iter().any(|s| s == friend_id) {
            let remaining: Vec<String> = shares.into_iter().filter(|s| s != friend_id).collect();
            let mut model: check_in::ActiveModel = check_in.into();
            model.share_friend_ids = Set(serde_json::json!(remaining));
            model
                .update(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Soft-delete all of a user's check-ins (account deletion cascade).
    pub async fn soft_delete_by_author(&self, author_id: &str) -> AppResult<u64> {
        let result = CheckIn::update_many()
            .col_expr(
                check_in::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(check_in::Column::AuthorId.eq(author_id))
            .filter(check_in::Column::DeletedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
