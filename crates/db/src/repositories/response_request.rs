//! Response request repository.

use std::sync::Arc;

use crate::entities::{response_request, ResponseRequest};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Response request repository for database operations.
#[derive(Clone)]
pub struct ResponseRequestRepository {
    db: Arc<DatabaseConnection>,
}

impl ResponseRequestRepository {
    /// Create a new response request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a response request by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<response_request::Model>> {
        ResponseRequest::find_by_id(id)
            .filter(response_request::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether the same request already exists.
    pub async fn exists(
        &self,
        requester_id: &str,
        requestee_id: &str,
        question_id: &str,
    ) -> AppResult<bool> {
        let found = ResponseRequest::find()
            .filter(response_request::Column::RequesterId.eq(requester_id))
            .filter(response_request::Column::RequesteeId.eq(requestee_id))
            .filter(response_request::Column::QuestionId.eq(question_id))
            .filter(response_request::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Create a response request.
    pub async fn create(
        &self,
        model: response_request::ActiveModel,
    ) -> AppResult<response_request::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List requests received by a user since the given time, newest first.
    pub async fn find_received_since(
        &self,
        requestee_id: &str,
        since: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Vec<response_request::Model>> {
        ResponseRequest::find()
            .filter(response_request::Column::RequesteeId.eq(requestee_id))
            .filter(response_request::Column::CreatedAt.gte(since))
            .filter(response_request::Column::DeletedAt.is_null())
            .order_by_desc(response_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
