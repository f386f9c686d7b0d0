//! Notification repository.

use std::sync::Arc;

use crate::entities::{notification, notification::NotificationTarget, Notification};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

/// Notification repository for database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepository {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a notification by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<notification::Model>> {
        Notification::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new notification.
    pub async fn create(&self, model: notification::ActiveModel) -> AppResult<notification::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List visible notifications for a user updated since the given time,
    /// newest first.
    pub async fn find_visible_by_user(
        &self,
        user_id: &str,
        since: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Vec<notification::Model>> {
        Notification::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsVisible.eq(true))
            .filter(
                Condition::any()
                    .add(notification::Column::UpdatedAt.gte(since))
                    .add(
                        Condition::all()
                            .add(notification::Column::UpdatedAt.is_null())
                            .add(notification::Column::CreatedAt.gte(since)),
                    ),
            )
            .order_by_desc(notification::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List visible notifications for a user filtered by target kind,
    /// newest first.
    pub async fn find_visible_by_user_and_kind(
        &self,
        user_id: &str,
        target_kind: NotificationTarget,
    ) -> AppResult<Vec<notification::Model>> {
        Notification::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::TargetKind.eq(target_kind))
            .filter(notification::Column::IsVisible.eq(true))
            .order_by_desc(notification::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark the given notifications as read, scoped to their owner.
    pub async fn mark_ids_read(&self, user_id: &str, ids: &[String]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = Notification::update_many()
            .col_expr(
                notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::Id.is_in(ids.iter().cloned()))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Mark all of a user's notifications as read.
    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<u64> {
        let result = Notification::update_many()
            .col_expr(
                notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Mark the notifications for a target read and invisible.
    ///
    /// Used once a friend request has been answered; the record is kept as
    /// an audit trail.
    pub async fn mark_target_answered(
        &self,
        user_id: &str,
        target_kind: NotificationTarget,
        target_id: &str,
    ) -> AppResult<u64> {
        let result = Notification::update_many()
            .col_expr(
                notification::Column::IsRead,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                notification::Column::IsVisible,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                notification::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::TargetKind.eq(target_kind))
            .filter(notification::Column::TargetId.eq(target_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Hard-delete friendship-related notifications between two users, in
    /// both directions.
    ///
    /// Part of the unfriend cascade; only friend-request and
    /// became-friends records are touched.
    pub async fn delete_friendship_between(&self, user_a: &str, user_b: &str) -> AppResult<u64> {
        let kinds = [NotificationTarget::FriendRequest, NotificationTarget::User];
        let result = Notification::delete_many()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(notification::Column::UserId.eq(user_a))
                            .add(notification::Column::ActorId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(notification::Column::UserId.eq(user_b))
                            .add(notification::Column::ActorId.eq(user_a)),
                    ),
            )
            .filter(notification::Column::TargetKind.is_in(kinds))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Hard-delete every notification pointing at a target entity.
    ///
    /// Called when the backing entity is hard-deleted so no notification is
    /// left orphaned.
    pub async fn delete_by_target(
        &self,
        target_kind: NotificationTarget,
        target_id: &str,
    ) -> AppResult<u64> {
        let result = Notification::delete_many()
            .filter(notification::Column::TargetKind.eq(target_kind))
            .filter(notification::Column::TargetId.eq(target_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Count unread visible notifications for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        Notification::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .filter(notification::Column::IsVisible.eq(true))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
