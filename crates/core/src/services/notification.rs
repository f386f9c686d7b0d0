//! Notification fanout engine.
//!
//! Translates graph/content mutations into notification records. Every
//! fanout is an explicit call from the owning service; there are no
//! implicit hooks. Fanout between a reported pair is suppressed.
//!
//! Message text is rendered by clients; this engine only emits message
//! keys and template arguments.

use daybook_common::{AppResult, IdGenerator};
use daybook_db::{
    entities::{
        friend_request, notification, notification::NotificationTarget, ping, question,
        response_request, user,
    },
    repositories::{
        ModerationRepository, NotificationRepository, ResponseRepository,
        ResponseRequestRepository, UserRepository,
    },
};
use sea_orm::Set;
use serde_json::json;

/// How long notifications stay in the default listing.
const LISTING_WINDOW_DAYS: i64 = 30;

/// Notification fanout service.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    moderation_repo: ModerationRepository,
    user_repo: UserRepository,
    response_request_repo: ResponseRequestRepository,
    response_repo: ResponseRepository,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(
        notification_repo: NotificationRepository,
        moderation_repo: ModerationRepository,
        user_repo: UserRepository,
        response_request_repo: ResponseRequestRepository,
        response_repo: ResponseRepository,
    ) -> Self {
        Self {
            notification_repo,
            moderation_repo,
            user_repo,
            response_request_repo,
            response_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Internal helper to create a notification record.
    async fn create_internal(
        &self,
        user_id: &str,
        actor_id: Option<&str>,
        target_kind: NotificationTarget,
        target_id: &str,
        message_key: &str,
        message_args: serde_json::Value,
        redirect_url: &str,
    ) -> AppResult<notification::Model> {
        let model = notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            actor_id: Set(actor_id.map(ToString::to_string)),
            target_kind: Set(target_kind),
            target_id: Set(target_id.to_string()),
            message_key: Set(message_key.to_string()),
            message_args: Set(message_args),
            redirect_url: Set(redirect_url.to_string()),
            is_read: Set(false),
            is_visible: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };
        self.notification_repo.create(model).await
    }

    /// Notify the requestee that a friend request arrived.
    ///
    /// Suppressed when a report exists between the pair; the request itself
    /// is still created by the graph store.
    pub async fn notify_friend_request(
        &self,
        request: &friend_request::Model,
        requester: &user::Model,
    ) -> AppResult<Option<notification::Model>> {
        if self
            .moderation_repo
            .is_reported_between(&request.requester_id, &request.requestee_id)
            .await?
        {
            tracing::debug!(
                requester_id = %request.requester_id,
                requestee_id = %request.requestee_id,
                "Suppressed friend request notification between reported pair"
            );
            return Ok(None);
        }

        let notification = self
            .create_internal(
                &request.requestee_id,
                Some(&request.requester_id),
                NotificationTarget::FriendRequest,
                &request.id,
                "friend_request_received",
                json!({ "handle": requester.handle }),
                &format!("/users/{}", requester.handle),
            )
            .await?;
        Ok(Some(notification))
    }

    /// Notify both parties that they are now friends (one record each).
    pub async fn notify_became_friends(
        &self,
        requester: &user::Model,
        requestee: &user::Model,
    ) -> AppResult<()> {
        if self
            .moderation_repo
            .is_reported_between(&requester.id, &requestee.id)
            .await?
        {
            return Ok(());
        }

        self.create_internal(
            &requestee.id,
            Some(&requester.id),
            NotificationTarget::User,
            &requester.id,
            "became_friends",
            json!({ "handle": requester.handle }),
            &format!("/users/{}", requester.handle),
        )
        .await?;

        self.create_internal(
            &requester.id,
            Some(&requestee.id),
            NotificationTarget::User,
            &requestee.id,
            "became_friends",
            json!({ "handle": requestee.handle }),
            &format!("/users/{}", requestee.handle),
        )
        .await?;

        Ok(())
    }

    /// Mark the "request received" notification read and invisible once the
    /// requestee has answered. The record is retained as an audit trail.
    pub async fn mark_friend_request_answered(
        &self,
        requestee_id: &str,
        request_id: &str,
    ) -> AppResult<()> {
        self.notification_repo
            .mark_target_answered(requestee_id, NotificationTarget::FriendRequest, request_id)
            .await?;
        Ok(())
    }

    /// Hard-delete the notifications created for a friend request.
    ///
    /// Called when the request itself is destroyed (withdrawal), so no
    /// notification is left pointing at a dead record.
    pub async fn delete_for_friend_request(&self, request_id: &str) -> AppResult<()> {
        self.notification_repo
            .delete_by_target(NotificationTarget::FriendRequest, request_id)
            .await?;
        Ok(())
    }

    /// Hard-delete friendship-related notifications between two users.
    pub async fn delete_friendship_between(&self, user_a: &str, user_b: &str) -> AppResult<()> {
        self.notification_repo
            .delete_friendship_between(user_a, user_b)
            .await?;
        Ok(())
    }

    /// Send the onboarding notification to a freshly created account.
    ///
    /// The message comes from the system actor; skipped quietly when no
    /// admin account exists (e.g. in a fresh development database).
    pub async fn notify_welcome(&self, new_user: &user::Model) -> AppResult<()> {
        let Some(admin) = self.user_repo.find_admin().await? else {
            tracing::warn!("No system actor; skipping welcome notification");
            return Ok(());
        };

        self.create_internal(
            &new_user.id,
            Some(&admin.id),
            NotificationTarget::User,
            &admin.id,
            "welcome",
            json!({ "handle": new_user.handle }),
            "/",
        )
        .await?;
        Ok(())
    }

    /// Nudge a user who just made their first friend to enable reminders.
    pub async fn notify_first_friend(&self, user: &user::Model) -> AppResult<()> {
        let Some(admin) = self.user_repo.find_admin().await? else {
            return Ok(());
        };

        self.create_internal(
            &user.id,
            Some(&admin.id),
            NotificationTarget::User,
            &admin.id,
            "enable_reminders",
            json!({ "handle": user.handle }),
            "/settings",
        )
        .await?;
        Ok(())
    }

    /// Notify the receiver of a new ping.
    pub async fn notify_ping(
        &self,
        ping: &ping::Model,
        sender: &user::Model,
    ) -> AppResult<Option<notification::Model>> {
        if self
            .moderation_repo
            .is_reported_between(&ping.sender_id, &ping.receiver_id)
            .await?
        {
            return Ok(None);
        }

        let notification = self
            .create_internal(
                &ping.receiver_id,
                Some(&ping.sender_id),
                NotificationTarget::Ping,
                &ping.id,
                "ping_received",
                json!({ "handle": sender.handle }),
                &format!("/ping/user/{}", sender.id),
            )
            .await?;
        Ok(Some(notification))
    }

    /// Notify the requestee that a friend asked them to answer a question.
    pub async fn notify_response_request(
        &self,
        request: &response_request::Model,
        requester: &user::Model,
        question: &question::Model,
    ) -> AppResult<Option<notification::Model>> {
        if self
            .moderation_repo
            .is_reported_between(&request.requester_id, &request.requestee_id)
            .await?
        {
            return Ok(None);
        }

        let notification = self
            .create_internal(
                &request.requestee_id,
                Some(&request.requester_id),
                NotificationTarget::ResponseRequest,
                &request.id,
                "response_request_received",
                json!({ "handle": requester.handle, "question": question.content }),
                &format!("/questions/{}", question.id),
            )
            .await?;
        Ok(Some(notification))
    }

    /// List a user's visible notifications from the last 30 days.
    pub async fn list_notifications(&self, user_id: &str) -> AppResult<Vec<notification::Model>> {
        let since = chrono::Utc::now() - chrono::Duration::days(LISTING_WINDOW_DAYS);
        self.notification_repo
            .find_visible_by_user(user_id, since)
            .await
    }

    /// List a user's visible friend-request notifications.
    pub async fn list_friend_request_notifications(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<notification::Model>> {
        self.notification_repo
            .find_visible_by_user_and_kind(user_id, NotificationTarget::FriendRequest)
            .await
    }

    /// List a user's visible response-request notifications, excluding
    /// requests the user has already answered.
    pub async fn list_response_request_notifications(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<notification::Model>> {
        let notifications = self
            .notification_repo
            .find_visible_by_user_and_kind(user_id, NotificationTarget::ResponseRequest)
            .await?;

        let mut unanswered = Vec::new();
        for notification in notifications {
            let Some(request) = self
                .response_request_repo
                .find_by_id(&notification.target_id)
                .await?
            else {
                continue;
            };
            let since = notification
                .updated_at
                .unwrap_or(notification.created_at)
                .to_utc();
            let answered = self
                .response_repo
                .exists_answer_after(user_id, &request.question_id, since)
                .await?;
            if !answered {
                unanswered.push(notification);
            }
        }
        Ok(unanswered)
    }

    /// Mark the given notifications as read.
    pub async fn mark_read(&self, user_id: &str, ids: &[String]) -> AppResult<u64> {
        self.notification_repo.mark_ids_read(user_id, ids).await
    }

    /// Mark all of a user's notifications as read.
    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.mark_all_read(user_id).await
    }

    /// Count unread visible notifications for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use daybook_db::entities::user_report;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str, handle: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            handle: handle.to_string(),
            handle_lower: handle.to_lowercase(),
            email: format!("{handle}@example.com"),
            password_hash: "x".to_string(),
            token: None,
            display_name: None,
            bio: None,
            profile_color: "#AABBCC".to_string(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            is_admin: false,
            deleted_at: None,
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_request(id: &str, requester: &str, requestee: &str) -> friend_request::Model {
        friend_request::Model {
            id: id.to_string(),
            requester_id: requester.to_string(),
            requestee_id: requestee.to_string(),
            accepted: None,
            deleted_at: None,
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(
        notification_db: Arc<sea_orm::DatabaseConnection>,
        moderation_db: Arc<sea_orm::DatabaseConnection>,
    ) -> NotificationService {
        let other = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        NotificationService::new(
            NotificationRepository::new(notification_db),
            ModerationRepository::new(moderation_db),
            UserRepository::new(Arc::clone(&other)),
            ResponseRequestRepository::new(Arc::clone(&other)),
            ResponseRepository::new(other),
        )
    }

    #[tokio::test]
    async fn test_friend_request_fanout_suppressed_between_reported_pair() {
        let report = user_report::Model {
            id: "r1".to_string(),
            reporter_id: "bob".to_string(),
            reported_user_id: "alice".to_string(),
            created_at: chrono::Utc::now().into(),
        };
        let moderation_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![report]])
                .into_connection(),
        );
        let notification_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service_with(notification_db, moderation_db);

        let requester = test_user("alice", "alice");
        let request = test_request("fr1", "alice", "bob");
        let result = service
            .notify_friend_request(&request, &requester)
            .await
            .unwrap();

        // No notification row is created for a reported pair
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_friend_request_fanout_creates_notification() {
        let moderation_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user_report::Model>::new()])
                .into_connection(),
        );
        let created = notification::Model {
            id: "n1".to_string(),
            user_id: "bob".to_string(),
            actor_id: Some("alice".to_string()),
            target_kind: NotificationTarget::FriendRequest,
            target_id: "fr1".to_string(),
            message_key: "friend_request_received".to_string(),
            message_args: json!({ "handle": "alice" }),
            redirect_url: "/users/alice".to_string(),
            is_read: false,
            is_visible: true,
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        };
        let notification_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![created]])
                .into_connection(),
        );
        let service = service_with(notification_db, moderation_db);

        let requester = test_user("alice", "alice");
        let request = test_request("fr1", "alice", "bob");
        let result = service
            .notify_friend_request(&request, &requester)
            .await
            .unwrap();

        let notification = result.unwrap();
        assert_eq!(notification.user_id, "bob");
        assert_eq!(notification.message_key, "friend_request_received");
        assert_eq!(notification.target_kind, NotificationTarget::FriendRequest);
        assert!(!notification.is_read);
        assert!(notification.is_visible);
    }
}
