//! Moment repository.

use std::sync::Arc;

use crate::entities::{moment, Moment};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Moment repository for database operations.
#[derive(Clone)]
pub struct MomentRepository {
    db: Arc<DatabaseConnection>,
}

impl MomentRepository {
    /// Create a new moment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a moment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<moment::Model>> {
        Moment::find_by_id(id)
            .filter(moment::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the author's moment for a calendar date, if any.
    pub async fn find_by_author_date(
        &self,
        author_id: &str,
        date: chrono::NaiveDate,
    ) -> AppResult<Option<moment::Model>> {
        Moment::find()
            .filter(moment::Column::AuthorId.eq(author_id))
            .filter(moment::Column::Date.eq(date))
            .filter(moment::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's moments, newest first.
    pub async fn find_by_author(&self, author_id: &str) -> AppResult<Vec<moment::Model>> {
        Moment::find()
            .filter(moment::Column::AuthorId.eq(author_id))
            .filter(moment::Column::DeletedAt.is_null())
            .order_by_desc(moment::Column::Date)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a moment.
    pub async fn create(&self, model: moment::ActiveModel) -> AppResult<moment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a moment.
    pub async fn update(&self, model: moment::ActiveModel) -> AppResult<moment::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Soft-delete all of a user's moments (account deletion cascade).
    pub async fn soft_delete_by_author(&self, author_id: &str) -> AppResult<u64> {
        let result = Moment::update_many()
            .col_expr(
                moment::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(moment::Column::AuthorId.eq(author_id))
            .filter(moment::Column::DeletedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
