//! Favorite repository.

use std::sync::Arc;

use crate::entities::{favorite, Favorite};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};

/// Favorite repository for database operations.
#[derive(Clone)]
pub struct FavoriteRepository {
    db: Arc<DatabaseConnection>,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Check whether a favorite marker exists.
    pub async fn exists(&self, user_id: &str, friend_id: &str) -> AppResult<bool> {
        let found = Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::FriendId.eq(friend_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Create a favorite marker.
    pub async fn create(&self, model: favorite::ActiveModel) -> AppResult<favorite::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove a favorite marker; no-op if absent.
    pub async fn delete_by_pair(&self, user_id: &str, friend_id: &str) -> AppResult<()> {
        Favorite::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::FriendId.eq(friend_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Remove favorite markers between two users in both directions.
    pub async fn delete_between(&self, user_a: &str, user_b: &str) -> AppResult<()> {
        Favorite::delete_many()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(favorite::Column::UserId.eq(user_a))
                            .add(favorite::Column::FriendId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(favorite::Column::UserId.eq(user_b))
                            .add(favorite::Column::FriendId.eq(user_a)),
                    ),
            )
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get the IDs of a user's favorited friends.
    pub async fn find_friend_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let rows = Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.friend_id).collect())
    }
}
