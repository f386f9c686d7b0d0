//! Response repository.

use std::sync::Arc;

use crate::entities::{response, Response};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
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

/// Response repository for database operations.
///
/// Finders exclude soft-deleted responses.
#[derive(Clone)]
pub struct ResponseRepository {
    db: Arc<DatabaseConnection>,
}

impl ResponseRepository {
    /// Create a new response repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a response by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<response::Model>> {
        Response::find_by_id(id)
            .filter(response::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's responses, newest first.
    pub async fn find_by_author(&self, author_id: &str) -> AppResult<Vec<response::Model>> {
        Response::find()
            .filter(response::Column::AuthorId.eq(author_id))
            .filter(response::Column::DeletedAt.is_null())
            .order_by_desc(response::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether the author answered the question after the given time.
    ///
    /// Used to drop answered response-request notifications from listings.
    pub async fn exists_answer_after(
        &self,
        author_id: &str,
        question_id: &str,
        after: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<bool> {
        let found = Response::find()
            .filter(response::Column::AuthorId.eq(author_id))
            .filter(response::Column::QuestionId.eq(question_id))
            .filter(response::Column::CreatedAt.gt(after))
            .filter(response::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// List friends-scoped responses authored by any of the given users,
    /// newest first.
    pub async fn find_friend_feed(
        &self,
        author_ids: &[String],
        limit: u64,
    ) -> AppResult<Vec<response::Model>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        Response::find()
            .filter(response::Column::AuthorId.is_in(author_ids.iter().cloned()))
            .filter(response::Column::Visibility.eq(crate::entities::note::Visibility::Friends))
            .filter(response::Column::DeletedAt.is_null())
            .order_by_desc(response::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List anonymous-scoped responses, newest first.
    pub async fn find_anonymous_feed(&self, limit: u64) -> AppResult<Vec<response::Model>> {
        Response::find()
            .filter(response::Column::Visibility.eq(crate::entities::note::Visibility::Anonymous))
            .filter(response::Column::DeletedAt.is_null())
            .order_by_desc(response::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a response.
    pub async fn create(&self, model: response::ActiveModel) -> AppResult<response::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a response.
    pub async fn update(&self, model: response::ActiveModel) -> AppResult<response::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record that a user has read a response; no-op if already recorded.
    pub async fn add_reader(
        &self,
        response: response::Model,
        reader_id: &str,
    ) -> AppResult<response::Model> {
        let mut readers = json_ids(&response.reader_ids);
        if readers.iter().any(|r| r == reader_id) {
            return Ok(response);
        }
        readers.push(reader_id.to_string());
        let mut model: response::ActiveModel = response.into();
        model.reader_ids = Set(serde_json::json!(readers));
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a friend from the share lists of all the author's responses.
    ///
    /// Part of the unfriend cascade.
    pub async fn scrub_share_friend(&self, author_id: &str, friend_id: &str) -> AppResult<()> {
        let responses = self.find_by_author(author_id).await?;
        for response in responses {
            let shares = json_ids(&response.share_friend_ids);
            if shares.iter().any(|s| s == friend_id) {
                let remaining: Vec<String> =
                    shares.into_iter().filter(|s| s != friend_id).collect();
                let mut model: response::ActiveModel = response.into();
                model.share_friend_ids = Set(serde_json::json!(remaining));
                model
                    .update(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Soft-delete all of a user's responses (account deletion cascade).
    pub async fn soft_delete_by_author(&self, author_id: &str) -> AppResult<u64> {
        let result = Response::update_many()
            .col_expr(
                response::Column::DeletedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(response::Column::AuthorId.eq(author_id))
            .filter(response::Column::DeletedAt.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
