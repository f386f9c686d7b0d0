//! Moderation repository (user reports, content reports, block recs).

use std::sync::Arc;

use crate::entities::{
    block_rec, content_report, content_report::ContentKind, user_report, BlockRec, ContentReport,
    UserReport,
};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};

/// Moderation repository for database operations.
///
/// The report tables are written by the moderation boundary and read by the
/// block filter; block recs belong to the recommendation feature.
#[derive(Clone)]
pub struct ModerationRepository {
    db: Arc<DatabaseConnection>,
}

impl ModerationRepository {
    /// Create a new moderation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Check whether a user report exists in either direction.
    pub async fn is_reported_between(&self, user_a: &str, user_b: &str) -> AppResult<bool> {
        let found = UserReport::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(user_report::Column::ReporterId.eq(user_a))
                            .add(user_report::Column::ReportedUserId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(user_report::Column::ReporterId.eq(user_b))
                            .add(user_report::Column::ReportedUserId.eq(user_a)),
                    ),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// IDs of users involved in a report with the given user, either
    /// direction.
    pub async fn find_report_blocked_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let rows = UserReport::find()
            .filter(
                Condition::any()
                    .add(user_report::Column::ReporterId.eq(user_id))
                    .add(user_report::Column::ReportedUserId.eq(user_id)),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| {
                if r.reporter_id == user_id {
                    r.reported_user_id
                } else {
                    r.reporter_id
                }
            })
            .collect())
    }

    /// Create a user report.
    pub async fn create_user_report(
        &self,
        model: user_report::ActiveModel,
    ) -> AppResult<user_report::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether the viewer reported a specific content item.
    pub async fn has_reported_content(
        &self,
        reporter_id: &str,
        target_kind: ContentKind,
        target_id: &str,
    ) -> AppResult<bool> {
        let found = ContentReport::find()
            .filter(content_report::Column::ReporterId.eq(reporter_id))
            .filter(content_report::Column::TargetKind.eq(target_kind))
            .filter(content_report::Column::TargetId.eq(target_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// IDs of content items the viewer has reported, per kind.
    pub async fn find_reported_content_ids(
        &self,
        reporter_id: &str,
        target_kind: ContentKind,
    ) -> AppResult<Vec<String>> {
        let rows = ContentReport::find()
            .filter(content_report::Column::ReporterId.eq(reporter_id))
            .filter(content_report::Column::TargetKind.eq(target_kind))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.target_id).collect())
    }

    /// Create a content report.
    pub async fn create_content_report(
        &self,
        model: content_report::ActiveModel,
    ) -> AppResult<content_report::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a live block rec exists for the ordered pair.
    pub async fn block_rec_exists(&self, user_id: &str, blocked_user_id: &str) -> AppResult<bool> {
        let found = BlockRec::find()
            .filter(block_rec::Column::UserId.eq(user_id))
            .filter(block_rec::Column::BlockedUserId.eq(blocked_user_id))
            .filter(block_rec::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Create a block rec.
    pub async fn create_block_rec(
        &self,
        model: block_rec::ActiveModel,
    ) -> AppResult<block_rec::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// IDs of users the given user excluded from recommendations.
    pub async fn find_block_rec_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let rows = BlockRec::find()
            .filter(block_rec::Column::UserId.eq(user_id))
            .filter(block_rec::Column::DeletedAt.is_null())
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|r| r.blocked_user_id).collect())
    }
}
