//! Friend request repository.

use std::sync::Arc;

use crate::entities::{friend_request, FriendRequest};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Friend request repository for database operations.
///
/// "Live" means not soft-deleted; the storage layer enforces at most one
/// live request per ordered pair.
#[derive(Clone)]
pub struct FriendRequestRepository {
    db: Arc<DatabaseConnection>,
}

impl FriendRequestRepository {
    /// Create a new friend request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a live request by ordered pair.
    pub async fn find_live_by_pair(
        &self,
        requester_id: &str,
        requestee_id: &str,
    ) -> AppResult<Option<friend_request::Model>> {
        FriendRequest::find()
            .filter(friend_request::Column::RequesterId.eq(requester_id))
            .filter(friend_request::Column::RequesteeId.eq(requestee_id))
            .filter(friend_request::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a live *pending* request by ordered pair.
    pub async fn find_pending_by_pair(
        &self,
        requester_id: &str,
        requestee_id: &str,
    ) -> AppResult<Option<friend_request::Model>> {
        FriendRequest::find()
            .filter(friend_request::Column::RequesterId.eq(requester_id))
            .filter(friend_request::Column::RequesteeId.eq(requestee_id))
            .filter(friend_request::Column::Accepted.is_null())
            .filter(friend_request::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a live request exists in either direction.
    pub async fn exists_live_between(&self, user_a: &str, user_b: &str) -> AppResult<bool> {
        let found = FriendRequest::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(friend_request::Column::RequesterId.eq(user_a))
                            .add(friend_request::Column::RequesteeId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(friend_request::Column::RequesterId.eq(user_b))
                            .add(friend_request::Column::RequesteeId.eq(user_a)),
                    ),
            )
            .filter(friend_request::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Create a new friend request.
    pub async fn create(
        &self,
        model: friend_request::ActiveModel,
    ) -> AppResult<friend_request::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record the requestee's answer on a request.
    pub async fn mark_responded(
        &self,
        request: friend_request::Model,
        accepted: bool,
    ) -> AppResult<friend_request::Model> {
        let mut model: friend_request::ActiveModel = request.into();
        model.accepted = Set(Some(accepted));
        model.updated_at = Set(Some(chrono::Utc::now().into()));
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Soft-delete a request (withdrawal by the requester).
    pub async fn soft_delete(&self, request: friend_request::Model) -> AppResult<()> {
        let mut model: friend_request::ActiveModel = request.into();
        model.deleted_at = Set(Some(chrono::Utc::now().into()));
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Hard-delete every request between a pair, in both directions.
    ///
    /// Used by the unfriend cascade.
    pub async fn hard_delete_between(&self, user_a: &str, user_b: &str) -> AppResult<u64> {
        let result = FriendRequest::delete_many()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(friend_request::Column::RequesterId.eq(user_a))
                            .add(friend_request::Column::RequesteeId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(friend_request::Column::RequesterId.eq(user_b))
                            .add(friend_request::Column::RequesteeId.eq(user_a)),
                    ),
            )
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// List pending requests received by a user, newest first.
    pub async fn find_received_pending(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<friend_request::Model>> {
        FriendRequest::find()
            .filter(friend_request::Column::RequesteeId.eq(user_id))
            .filter(friend_request::Column::Accepted.is_null())
            .filter(friend_request::Column::DeletedAt.is_null())
            .order_by_desc(friend_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List requests sent by a user that were not accepted (pending or
    /// rejected), newest first.
    pub async fn find_sent_unaccepted(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<friend_request::Model>> {
        FriendRequest::find()
            .filter(friend_request::Column::RequesterId.eq(user_id))
            .filter(
                Condition::any()
                    .add(friend_request::Column::Accepted.is_null())
                    .add(friend_request::Column::Accepted.eq(false)),
            )
            .filter(friend_request::Column::DeletedAt.is_null())
            .order_by_desc(friend_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// IDs of users a requester has a live request out to.
    pub async fn find_requested_ids(&self, requester_id: &str) -> AppResult<Vec<String>> {
        let rows = FriendRequest::find()
            .filter(friend_request::Column::RequesterId.eq(requester_id))
            .filter(friend_request::Column::DeletedAt.is_null())
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.requestee_id).collect())
    }
}
