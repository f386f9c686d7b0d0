//! Friendship repository.

use std::sync::Arc;

use crate::entities::{friendship, Friendship};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
};

/// Order a pair of user IDs canonically (smaller first).
///
/// Friendship and ping-room rows always store the pair in this order.
#[must_use]
pub fn canonical_pair<'a>(user_a: &'a str, user_b: &'a str) -> (&'a str, &'a str) {
    if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    }
}

/// Friendship repository for database operations.
#[derive(Clone)]
pub struct FriendshipRepository {
    db: Arc<DatabaseConnection>,
}

impl FriendshipRepository {
    /// Create a new friendship repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the friendship row for a pair, if any.
    pub async fn find_by_pair(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> AppResult<Option<friendship::Model>> {
        let (a, b) = canonical_pair(user_a, user_b);
        Friendship::find()
            .filter(friendship::Column::UserAId.eq(a))
            .filter(friendship::Column::UserBId.eq(b))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether two users are friends.
    pub async fn are_friends(&self, user_a: &str, user_b: &str) -> AppResult<bool> {
        Ok(self.find_by_pair(user_a, user_b).await?.is_some())
    }

    /// Create a friendship edge.
    ///
    /// The model must already carry a canonicalized pair.
    pub async fn create(&self, model: friendship::ActiveModel) -> AppResult<friendship::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Remove the friendship edge between a pair.
    pub async fn delete_by_pair(&self, user_a: &str, user_b: &str) -> AppResult<()> {
        let friendship = self.find_by_pair(user_a, user_b).await?;
        if let Some(f) = friendship {
            f.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Get the friend IDs of a user.
    pub async fn find_friend_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let rows = Friendship::find()
            .filter(
                sea_orm::Condition::any()
                    .add(friendship::Column::UserAId.eq(user_id))
                    .add(friendship::Column::UserBId.eq(user_id)),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                if row.user_a_id == user_id {
                    row.user_b_id
                } else {
                    row.user_a_id
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_pair_orders_lexicographically() {
        assert_eq!(canonical_pair("b", "a"), ("a", "b"));
        assert_eq!(canonical_pair("a", "b"), ("a", "b"));
        assert_eq!(canonical_pair("x", "x"), ("x", "x"));
    }
}
