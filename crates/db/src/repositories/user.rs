//! User repository.

use std::sync::Arc;

use crate::entities::{user, User};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// User repository for database operations.
///
/// All finders exclude soft-deleted accounts.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by ID, failing if absent.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find a user by handle.
    pub async fn find_by_handle(&self, handle: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Handle.eq(handle))
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by handle or email (login lookup).
    pub async fn find_by_handle_or_email(&self, name: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(
                sea_orm::Condition::any()
                    .add(user::Column::Handle.eq(name))
                    .add(user::Column::Email.eq(name)),
            )
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by access token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Token.eq(token))
            .filter(user::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the system actor (first admin user).
    pub async fn find_admin(&self) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::IsAdmin.eq(true))
            .filter(user::Column::DeletedAt.is_null())
            .order_by_asc(user::Column::Id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find users by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<user::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        User::find()
            .filter(user::Column::Id.is_in(ids.iter().cloned()))
            .filter(user::Column::DeletedAt.is_null())
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Search users whose handle starts with or contains the query.
    ///
    /// Prefix matches sort before contains matches, each group by handle.
    pub async fn search_by_handle(
        &self,
        query: &str,
        exclude_id: &str,
        limit: u64,
    ) -> AppResult<Vec<user::Model>> {
        let query = query.to_lowercase();
        let starts = User::find()
            .filter(user::Column::HandleLower.like(format!("{query}%")))
            .filter(user::Column::Id.ne(exclude_id))
            .filter(user::Column::DeletedAt.is_null())
            .order_by_asc(user::Column::Handle)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut results = starts;
        if (results.len() as u64) < limit {
            let contains = User::find()
                .filter(user::Column::HandleLower.like(format!("%{query}%")))
                .filter(user::Column::Id.ne(exclude_id))
                .filter(user::Column::DeletedAt.is_null())
                .order_by_asc(user::Column::Handle)
                .limit(limit)
                .all(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            for user in contains {
                if (results.len() as u64) >= limit {
                    break;
                }
                if !results.iter().any(|u| u.id == user.id) {
                    results.push(user);
                }
            }
        }
        Ok(results)
    }

    /// Create a new user.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Soft-delete a user account.
    pub async fn soft_delete(&self, id: &str) -> AppResult<()> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(());
        };
        let mut model: user::ActiveModel = user.into();
        model.deleted_at = Set(Some(chrono::Utc::now().into()));
        model.token = Set(None);
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
