//! Block/report filter.
//!
//! Pure lookups over the moderation edges, consulted by the visibility
//! resolver and the notification fanout. The only mutation owned here is
//! creating the caller's own report/block-rec records.

use daybook_common::{AppError, AppResult, IdGenerator};
use daybook_db::{
    entities::{block_rec, content_report, content_report::ContentKind, user_report},
    repositories::ModerationRepository,
};
use sea_orm::Set;

/// Block/report filter service.
#[derive(Clone)]
pub struct BlockService {
    moderation_repo: ModerationRepository,
    id_gen: IdGenerator,
}

impl BlockService {
    /// Create a new block service.
    #[must_use]
    pub const fn new(moderation_repo: ModerationRepository) -> Self {
        Self {
            moderation_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Check whether either user has reported the other.
    ///
    /// Symmetric: a report in either direction blocks the pair.
    pub async fn is_blocked(&self, user_a: &str, user_b: &str) -> AppResult<bool> {
        self.moderation_repo
            .is_reported_between(user_a, user_b)
            .await
    }

    /// Check whether the viewer is blocked from a content item: either the
    /// viewer reported the item itself, or a user block exists between
    /// viewer and author.
    pub async fn is_content_blocked(
        &self,
        viewer_id: &str,
        author_id: &str,
        target_kind: ContentKind,
        target_id: &str,
    ) -> AppResult<bool> {
        if self
            .moderation_repo
            .has_reported_content(viewer_id, target_kind, target_id)
            .await?
        {
            return Ok(true);
        }
        self.is_blocked(viewer_id, author_id).await
    }

    /// File a user report.
    pub async fn report_user(&self, reporter_id: &str, reported_user_id: &str) -> AppResult<()> {
        if reporter_id == reported_user_id {
            return Err(AppError::BadRequest("Cannot report yourself".to_string()));
        }
        let model = user_report::ActiveModel {
            id: Set(self.id_gen.generate()),
            reporter_id: Set(reporter_id.to_string()),
            reported_user_id: Set(reported_user_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.moderation_repo.create_user_report(model).await?;
        Ok(())
    }

    /// File a content report.
    pub async fn report_content(
        &self,
        reporter_id: &str,
        target_kind: ContentKind,
        target_id: &str,
    ) -> AppResult<()> {
        if self
            .moderation_repo
            .has_reported_content(reporter_id, target_kind, target_id)
            .await?
        {
            return Ok(());
        }
        let model = content_report::ActiveModel {
            id: Set(self.id_gen.generate()),
            reporter_id: Set(reporter_id.to_string()),
            target_kind: Set(target_kind),
            target_id: Set(target_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.moderation_repo.create_content_report(model).await?;
        Ok(())
    }

    /// Exclude a user from the caller's friend recommendations.
    ///
    /// Duplicate inserts are a no-op, including the constraint-violation
    /// race between the existence check and the insert.
    pub async fn block_recommendation(
        &self,
        user_id: &str,
        blocked_user_id: &str,
    ) -> AppResult<()> {
        if user_id == blocked_user_id {
            return Err(AppError::BadRequest("Cannot block yourself".to_string()));
        }
        if self
            .moderation_repo
            .block_rec_exists(user_id, blocked_user_id)
            .await?
        {
            return Ok(());
        }

        let model = block_rec::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            blocked_user_id: Set(blocked_user_id.to_string()),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        match self.moderation_repo.create_block_rec(model).await {
            Ok(_) => Ok(()),
            Err(err) => {
                // A concurrent insert hitting the unique index is benign
                if self
                    .moderation_repo
                    .block_rec_exists(user_id, blocked_user_id)
                    .await?
                {
                    Ok(())
                } else {
                    Err(err)
                }
            }
        }
    }

    /// IDs of users excluded from the given user's recommendations.
    pub async fn blocked_recommendation_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        self.moderation_repo.find_block_rec_ids(user_id).await
    }

    /// IDs of users involved in a report with the given user.
    pub async fn blocked_user_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        self.moderation_repo.find_report_blocked_ids(user_id).await
    }

    /// IDs of content items of a kind the viewer has reported.
    pub async fn reported_content_ids(
        &self,
        viewer_id: &str,
        target_kind: ContentKind,
    ) -> AppResult<Vec<String>> {
        self.moderation_repo
            .find_reported_content_ids(viewer_id, target_kind)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn report(id: &str, reporter: &str, reported: &str) -> user_report::Model {
        user_report::Model {
            id: id.to_string(),
            reporter_id: reporter.to_string(),
            reported_user_id: reported.to_string(),
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_is_blocked_is_symmetric() {
        // A single directed report blocks the pair regardless of argument
        // order: both lookups consult the same either-direction query.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![report("r1", "alice", "bob")]])
                .append_query_results([vec![report("r1", "alice", "bob")]])
                .into_connection(),
        );
        let service = BlockService::new(ModerationRepository::new(db));

        assert!(service.is_blocked("alice", "bob").await.unwrap());
        assert!(service.is_blocked("bob", "alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_not_blocked_without_reports() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user_report::Model>::new()])
                .into_connection(),
        );
        let service = BlockService::new(ModerationRepository::new(db));

        assert!(!service.is_blocked("alice", "bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_report_yourself_rejected() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = BlockService::new(ModerationRepository::new(db));

        let result = service.report_user("alice", "alice").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_duplicate_block_rec_is_noop() {
        let existing = block_rec::Model {
            id: "b1".to_string(),
            user_id: "alice".to_string(),
            blocked_user_id: "bob".to_string(),
            deleted_at: None,
            created_at: chrono::Utc::now().into(),
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![existing]])
                .into_connection(),
        );
        let service = BlockService::new(ModerationRepository::new(db));

        service.block_recommendation("alice", "bob").await.unwrap();
    }
}
