//! Hidden repository.

use std::sync::Arc;

use crate::entities::{hidden, Hidden};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};

/// Hidden repository for database operations.
#[derive(Clone)]
pub struct HiddenRepository {
    db: Arc<DatabaseConnection>,
}

impl HiddenRepository {
    /// Create a new hidden repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Check whether a hidden marker exists.
    pub async fn exists(&self, user_id: &str, friend_id: &str) -> AppResult<bool> {
        let found = Hidden::find()
            .filter(hidden::Column::UserId.eq(user_id))
            .filter(hidden::Column::FriendId.eq(friend_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Create a hidden marker.
    pub async fn create(&self, model: hidden::ActiveModel) -> AppResult<hidden::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a hidden marker; no-op if absent.
    pub async fn delete_by_pair(&self, user_id: &str, friend_id: &str) -> AppResult<()> {
        Hidden::delete_many()
            .filter(hidden::Column::UserId.eq(user_id))
            .filter(hidden::Column::FriendId.eq(friend_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Remove hidden markers between two users in both directions.
    pub async fn delete_between(&self, user_a: &str, user_b: &str) -> AppResult<()> {
        Hidden::delete_many()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(hidden::Column::UserId.eq(user_a))
                            .add(hidden::Column::FriendId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(hidden::Column::UserId.eq(user_b))
                            .add(hidden::Column::FriendId.eq(user_a)),
                    ),
            )
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get the IDs of friends a user has hidden.
    pub async fn find_friend_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let rows = Hidden::find()
            .filter(hidden::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.friend_id).collect())
    }
}
