//! Daily question service.

use daybook_common::{AppError, AppResult, IdGenerator};
use daybook_db::{
    entities::{question, response_request},
    repositories::{
        FriendshipRepository, QuestionRepository, ResponseRequestRepository, UserRepository,
    },
};
use sea_orm::Set;

use crate::services::notification::NotificationService;

/// How far back received response requests are listed.
const RECEIVED_WINDOW_DAYS: i64 = 30;

/// Daily question service.
#[derive(Clone)]
pub struct QuestionService {
    question_repo: QuestionRepository,
    response_request_repo: ResponseRequestRepository,
    friendship_repo: FriendshipRepository,
    user_repo: UserRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl QuestionService {
    /// Create a new question service.
    #[must_use]
    pub const fn new(
        question_repo: QuestionRepository,
        response_request_repo: ResponseRequestRepository,
        friendship_repo: FriendshipRepository,
        user_repo: UserRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            question_repo,
            response_request_repo,
            friendship_repo,
            user_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// The questions selected for a calendar date.
    pub async fn daily_questions(
        &self,
        date: chrono::NaiveDate,
    ) -> AppResult<Vec<question::Model>> {
        self.question_repo.find_daily(date).await
    }

    /// Get a question by ID.
    pub async fn get_question(&self, id: &str) -> AppResult<question::Model> {
        self.question_repo.get_by_id(id).await
    }

    /// Ask a friend to answer a question.
    ///
    /// Only friends may be asked; a duplicate ask is a no-op.
    pub async fn send_response_request(
        &self,
        requester_id: &str,
        requestee_id: &str,
        question_id: &str,
    ) -> AppResult<Option<response_request::Model>> {
        if requester_id == requestee_id {
            return Err(AppError::BadRequest(
                "Cannot send a response request to yourself".to_string(),
            ));
        }

        let requester = self.user_repo.get_by_id(requester_id).await?;
        self.user_repo.get_by_id(requestee_id).await?;
        let question = self.question_repo.get_by_id(question_id).await?;

        if !self
            .friendship_repo
            .are_friends(requester_id, requestee_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "Response requests can only be sent to friends".to_string(),
            ));
        }

        if self
            .response_request_repo
            .exists(requester_id, requestee_id, question_id)
            .await?
        {
            return Ok(None);
        }

        let model = response_request::ActiveModel {
            id: Set(self.id_gen.generate()),
            requester_id: Set(requester_id.to_string()),
            requestee_id: Set(requestee_id.to_string()),
            question_id: Set(question_id.to_string()),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        let request = self.response_request_repo.create(model).await?;

        self.notifications
            .notify_response_request(&request, &requester, &question)
            .await?;

        Ok(Some(request))
    }

    /// List response requests the user received in the last 30 days.
    pub async fn received_response_requests(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<response_request::Model>> {
        let since = chrono::Utc::now() - chrono::Duration::days(RECEIVED_WINDOW_DAYS);
        self.response_request_repo
            .find_received_since(user_id, since)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use daybook_db::repositories::{ModerationRepository, NotificationRepository, ResponseRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[tokio::test]
    async fn test_response_request_to_yourself_rejected() {
        let other = empty_db();
        let notifications = NotificationService::new(
            NotificationRepository::new(Arc::clone(&other)),
            ModerationRepository::new(Arc::clone(&other)),
            UserRepository::new(Arc::clone(&other)),
            ResponseRequestRepository::new(Arc::clone(&other)),
            ResponseRepository::new(Arc::clone(&other)),
        );
        let service = QuestionService::new(
            QuestionRepository::new(Arc::clone(&other)),
            ResponseRequestRepository::new(Arc::clone(&other)),
            FriendshipRepository::new(Arc::clone(&other)),
            UserRepository::new(other),
            notifications,
        );

        let result = service.send_response_request("alice", "alice", "q1").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
