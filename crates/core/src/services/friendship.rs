//! Social graph store.
//!
//! Owns friend requests, friendship edges, favorite/hidden markers and the
//! cascades between them. Every mutation invokes the notification fanout
//! explicitly right after it succeeds, so the trigger graph is visible in
//! one place.

use std::collections::HashMap;

use daybook_common::{AppError, AppResult, IdGenerator};
use daybook_db::{
    entities::{favorite, friend_request, friendship, hidden, user},
    repositories::{
        canonical_pair, CheckInRepository, FavoriteRepository, FriendRequestRepository,
        FriendshipRepository, HiddenRepository, ModerationRepository, NoteRepository,
        ResponseRepository, UserRepository,
    },
};
use sea_orm::Set;

use crate::services::notification::NotificationService;
use crate::services::visibility::VisibilityService;

/// Filters for the friend listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendListFilter {
    /// Every friend, ordered by handle.
    All,
    /// Friends with unread content, most recently updated first. Hidden
    /// friends are excluded.
    HasUpdates,
    /// Favorited friends, ordered by handle.
    Favorites,
}

/// How many recommendations to return at most.
const RECOMMENDATION_LIMIT: usize = 25;

/// Social graph service.
#[derive(Clone)]
pub struct FriendshipService {
    user_repo: UserRepository,
    friendship_repo: FriendshipRepository,
    friend_request_repo: FriendRequestRepository,
    favorite_repo: FavoriteRepository,
    hidden_repo: HiddenRepository,
    moderation_repo: ModerationRepository,
    response_repo: ResponseRepository,
    check_in_repo: CheckInRepository,
    note_repo: NoteRepository,
    notifications: NotificationService,
    visibility: VisibilityService,
    id_gen: IdGenerator,
}

impl FriendshipService {
    /// Create a new friendship service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        friendship_repo: FriendshipRepository,
        friend_request_repo: FriendRequestRepository,
        favorite_repo: FavoriteRepository,
        hidden_repo: HiddenRepository,
        moderation_repo: ModerationRepository,
        response_repo: ResponseRepository,
        check_in_repo: CheckInRepository,
        note_repo: NoteRepository,
        notifications: NotificationService,
        visibility: VisibilityService,
    ) -> Self {
        Self {
            user_repo,
            friendship_repo,
            friend_request_repo,
            favorite_repo,
            hidden_repo,
            moderation_repo,
            response_repo,
            check_in_repo,
            note_repo,
            notifications,
            visibility,
            id_gen: IdGenerator::new(),
        }
    }

    /// Check whether two users are friends.
    pub async fn are_friends(&self, user_a: &str, user_b: &str) -> AppResult<bool> {
        self.friendship_repo.are_friends(user_a, user_b).await
    }

    /// Send a friend request.
    ///
    /// Fails with `Conflict` when the users are already friends or a live
    /// request exists in either direction. A concurrent duplicate insert
    /// losing the uniqueness race is silently ignored.
    pub async fn send_friend_request(
        &self,
        requester_id: &str,
        requestee_id: &str,
    ) -> AppResult<Option<friend_request::Model>> {
        if requester_id == requestee_id {
            return Err(AppError::BadRequest(
                "Cannot send a friend request to yourself".to_string(),
            ));
        }

        let requester = self.user_repo.get_by_id(requester_id).await?;
        self.user_repo.get_by_id(requestee_id).await?;

        if self
            .friendship_repo
            .are_friends(requester_id, requestee_id)
            .await?
        {
            return Err(AppError::Conflict("Already friends".to_string()));
        }

        if self
            .friend_request_repo
            .exists_live_between(requester_id, requestee_id)
            .await?
        {
            return Err(AppError::Conflict(
                "Friend request already exists".to_string(),
            ));
        }

        let model = friend_request::ActiveModel {
            id: Set(self.id_gen.generate()),
            requester_id: Set(requester_id.to_string()),
            requestee_id: Set(requestee_id.to_string()),
            accepted: Set(None),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let request = match self.friend_request_repo.create(model).await {
            Ok(request) => request,
            Err(err) => {
                // Lost the uniqueness race to a concurrent caller: the
                // request exists, which is what was asked for.
                if self
                    .friend_request_repo
                    .exists_live_between(requester_id, requestee_id)
                    .await?
                {
                    tracing::debug!(
                        requester_id,
                        requestee_id,
                        "Duplicate friend request insert lost the race; ignoring"
                    );
                    return Ok(None);
                }
                return Err(err);
            }
        };

        self.notifications
            .notify_friend_request(&request, &requester)
            .await?;

        Ok(Some(request))
    }

    /// Accept or reject a pending friend request.
    ///
    /// Only the requestee may answer; acceptance materializes the symmetric
    /// friendship edge and fans out "became friends" notifications to both
    /// parties. Either answer retires the original request notification.
    pub async fn respond_to_friend_request(
        &self,
        requestee_id: &str,
        requester_id: &str,
        accept: bool,
    ) -> AppResult<()> {
        let request = self
            .friend_request_repo
            .find_pending_by_pair(requester_id, requestee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))?;

        let request = self
            .friend_request_repo
            .mark_responded(request, accept)
            .await?;

        if accept {
            // Re-applying an accept (e.g. via reinstatement) is a no-op:
            // the edge and its notifications already exist.
            if !self
                .friendship_repo
                .are_friends(requester_id, requestee_id)
                .await?
            {
                let requester = self.user_repo.get_by_id(requester_id).await?;
                let requestee = self.user_repo.get_by_id(requestee_id).await?;

                self.notifications
                    .notify_became_friends(&requester, &requestee)
                    .await?;

                let (a, b) = canonical_pair(requester_id, requestee_id);
                let edge = friendship::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    user_a_id: Set(a.to_string()),
                    user_b_id: Set(b.to_string()),
                    created_at: Set(chrono::Utc::now().into()),
                };
                self.friendship_repo.create(edge).await?;

                // First-friend nudge for either party
                for user in [&requester, &requestee] {
                    if self.friendship_repo.find_friend_ids(&user.id).await?.len() == 1 {
                        self.notifications.notify_first_friend(user).await?;
                    }
                }
            }
        }

        self.notifications
            .mark_friend_request_answered(requestee_id, &request.id)
            .await?;

        Ok(())
    }

    /// Withdraw a pending friend request.
    ///
    /// The request is soft-deleted and its notification removed.
    pub async fn withdraw_friend_request(
        &self,
        requester_id: &str,
        requestee_id: &str,
    ) -> AppResult<()> {
        let request = self
            .friend_request_repo
            .find_live_by_pair(requester_id, requestee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Friend request not found".to_string()))?;

        let request_id = request.id.clone();
        self.friend_request_repo.soft_delete(request).await?;
        self.notifications
            .delete_for_friend_request(&request_id)
            .await?;
        Ok(())
    }

    /// Remove a friendship.
    ///
    /// Cascades: friendship notifications between the pair are
    /// hard-deleted, residual requests are hard-deleted, favorite/hidden
    /// markers are removed in both directions, and each user is scrubbed
    /// from the other's content share lists. Third-party relationships are
    /// untouched.
    pub async fn remove_friendship(&self, user_id: &str, friend_id: &str) -> AppResult<()> {
        if !self.friendship_repo.are_friends(user_id, friend_id).await? {
            return Err(AppError::NotFound("Not friends".to_string()));
        }

        self.friendship_repo
            .delete_by_pair(user_id, friend_id)
            .await?;

        self.notifications
            .delete_friendship_between(user_id, friend_id)
            .await?;
        self.friend_request_repo
            .hard_delete_between(user_id, friend_id)
            .await?;

        self.favorite_repo.delete_between(user_id, friend_id).await?;
        self.hidden_repo.delete_between(user_id, friend_id).await?;

        self.response_repo
            .scrub_share_friend(user_id, friend_id)
            .await?;
        self.response_repo
            .scrub_share_friend(friend_id, user_id)
            .await?;
        self.check_in_repo
            .scrub_share_friend(user_id, friend_id)
            .await?;
        self.check_in_repo
            .scrub_share_friend(friend_id, user_id)
            .await?;
        self.note_repo.scrub_share_friend(user_id, friend_id).await?;
        self.note_repo.scrub_share_friend(friend_id, user_id).await?;

        tracing::info!(user_id, friend_id, "Removed friendship");
        Ok(())
    }

    /// Mark a friend as favorite.
    ///
    /// Fails with `PreconditionFailed` when the target is not currently a
    /// friend, keeping favorites a subset of friends.
    pub async fn add_favorite(&self, user_id: &str, friend_id: &str) -> AppResult<()> {
        if !self.friendship_repo.are_friends(user_id, friend_id).await? {
            return Err(AppError::PreconditionFailed(
                "Favorites must be friends".to_string(),
            ));
        }
        if self.favorite_repo.exists(user_id, friend_id).await? {
            return Err(AppError::Conflict("Already a favorite".to_string()));
        }

        let model = favorite::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            friend_id: Set(friend_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.favorite_repo.create(model).await?;
        Ok(())
    }

    /// Remove a favorite marker. Idempotent.
    pub async fn remove_favorite(&self, user_id: &str, friend_id: &str) -> AppResult<()> {
        self.favorite_repo.delete_by_pair(user_id, friend_id).await
    }

    /// Hide a friend from the update feed.
    ///
    /// Fails with `PreconditionFailed` when the target is not a friend.
    /// Hidden and favorite are mutually exclusive; the favorite marker is
    /// evicted first.
    pub async fn add_hidden(&self, user_id: &str, friend_id: &str) -> AppResult<()> {
        if !self.friendship_repo.are_friends(user_id, friend_id).await? {
            return Err(AppError::PreconditionFailed(
                "Hidden friends must be friends".to_string(),
            ));
        }
        if self.hidden_repo.exists(user_id, friend_id).await? {
            return Err(AppError::Conflict("Already hidden".to_string()));
        }

        self.favorite_repo.delete_by_pair(user_id, friend_id).await?;

        let model = hidden::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            friend_id: Set(friend_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.hidden_repo.create(model).await?;
        Ok(())
    }

    /// Remove a hidden marker. Idempotent.
    pub async fn remove_hidden(&self, user_id: &str, friend_id: &str) -> AppResult<()> {
        self.hidden_repo.delete_by_pair(user_id, friend_id).await
    }

    /// List pending friend requests received by a user.
    pub async fn list_received_requests(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<friend_request::Model>> {
        self.friend_request_repo.find_received_pending(user_id).await
    }

    /// List friend requests a user sent that were not accepted.
    pub async fn list_sent_requests(&self, user_id: &str) -> AppResult<Vec<friend_request::Model>> {
        self.friend_request_repo.find_sent_unaccepted(user_id).await
    }

    /// The friend IDs of a user.
    pub async fn friend_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        self.friendship_repo.find_friend_ids(user_id).await
    }

    /// List a user's friends under the given filter.
    pub async fn list_friends(
        &self,
        user_id: &str,
        filter: FriendListFilter,
    ) -> AppResult<Vec<user::Model>> {
        match filter {
            FriendListFilter::All => {
                let ids = self.friendship_repo.find_friend_ids(user_id).await?;
                let mut friends = self.user_repo.find_by_ids(&ids).await?;
                friends.sort_by(|a, b| a.handle.cmp(&b.handle));
                Ok(friends)
            }
            FriendListFilter::Favorites => {
                let ids = self.favorite_repo.find_friend_ids(user_id).await?;
                let mut friends = self.user_repo.find_by_ids(&ids).await?;
                friends.sort_by(|a, b| a.handle.cmp(&b.handle));
                Ok(friends)
            }
            FriendListFilter::HasUpdates => self.friends_with_updates(user_id).await,
        }
    }

    /// Friends (hidden excluded) with accessible content the user has not
    /// read yet, most recently updated first.
    async fn friends_with_updates(&self, user_id: &str) -> AppResult<Vec<user::Model>> {
        let mut ids = self.friendship_repo.find_friend_ids(user_id).await?;
        let hidden = self.hidden_repo.find_friend_ids(user_id).await?;
        ids.retain(|id| !hidden.contains(id));

        let friends = self.user_repo.find_by_ids(&ids).await?;
        let mut with_updates = Vec::new();
        for friend in friends {
            if let Some(last_update) = self.unread_update_time(user_id, &friend.id).await? {
                with_updates.push((last_update, friend));
            }
        }
        with_updates.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(with_updates.into_iter().map(|(_, friend)| friend).collect())
    }

    /// The most recent creation time among the friend's accessible content,
    /// if any of it is unread by the viewer.
    async fn unread_update_time(
        &self,
        viewer_id: &str,
        friend_id: &str,
    ) -> AppResult<Option<chrono::DateTime<chrono::FixedOffset>>> {
        let mut has_unread = false;
        let mut most_recent: Option<chrono::DateTime<chrono::FixedOffset>> = None;

        let reader_has = |readers: &serde_json::Value| {
            readers
                .as_array()
                .is_some_and(|a| a.iter().any(|v| v.as_str() == Some(viewer_id)))
        };

        for response in self.response_repo.find_by_author(friend_id).await? {
            if self.visibility.can_view_response(viewer_id, &response).await? {
                most_recent = most_recent.max(Some(response.created_at));
                if !reader_has(&response.reader_ids) {
                    has_unread = true;
                }
            }
        }

        if let Some(check_in) = self.check_in_repo.find_active_by_author(friend_id).await? {
            if self.visibility.can_view_check_in(viewer_id, &check_in).await? {
                most_recent = most_recent.max(Some(check_in.created_at));
                if !reader_has(&check_in.reader_ids) {
                    has_unread = true;
                }
            }
        }

        for note in self.note_repo.find_by_author(friend_id).await? {
            if self.visibility.can_view_note(viewer_id, &note).await? {
                most_recent = most_recent.max(Some(note.created_at));
                if !reader_has(&note.reader_ids) {
                    has_unread = true;
                }
            }
        }

        Ok(if has_unread { most_recent } else { None })
    }

    /// Recommend friends-of-friends, ranked by mutual friend count.
    ///
    /// Excludes the user, existing friends, users covered by a block rec
    /// and users with an outstanding request from the caller.
    pub async fn recommended_friends(&self, user_id: &str) -> AppResult<Vec<user::Model>> {
        let friend_ids = self.friendship_repo.find_friend_ids(user_id).await?;
        let blocked = self.moderation_repo.find_block_rec_ids(user_id).await?;
        let requested = self.friend_request_repo.find_requested_ids(user_id).await?;

        let mut mutual_counts: HashMap<String, usize> = HashMap::new();
        for friend_id in &friend_ids {
            for candidate in self.friendship_repo.find_friend_ids(friend_id).await? {
                if candidate == user_id
                    || friend_ids.contains(&candidate)
                    || blocked.contains(&candidate)
                    || requested.contains(&candidate)
                {
                    continue;
                }
                *mutual_counts.entry(candidate).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = mutual_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(RECOMMENDATION_LIMIT);

        let order: Vec<String> = ranked.into_iter().map(|(id, _)| id).collect();
        let mut users = self.user_repo.find_by_ids(&order).await?;
        users.sort_by_key(|u| order.iter().position(|id| id == &u.id));
        Ok(users)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use daybook_db::entities::notification;
    use daybook_db::repositories::{FriendGroupRepository, ResponseRequestRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn test_user(id: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            handle: id.to_string(),
            handle_lower: id.to_string(),
            email: format!("{id}@example.com"),
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

    fn test_edge(id: &str, user_a: &str, user_b: &str) -> friendship::Model {
        friendship::Model {
            id: id.to_string(),
            user_a_id: user_a.to_string(),
            user_b_id: user_b.to_string(),
            created_at: chrono::Utc::now().into(),
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

    /// Per-repository mock connections for the full service.
    struct ServiceDbs {
        user: Arc<sea_orm::DatabaseConnection>,
        friendship: Arc<sea_orm::DatabaseConnection>,
        request: Arc<sea_orm::DatabaseConnection>,
        favorite: Arc<sea_orm::DatabaseConnection>,
        hidden: Arc<sea_orm::DatabaseConnection>,
        response: Arc<sea_orm::DatabaseConnection>,
        check_in: Arc<sea_orm::DatabaseConnection>,
        note: Arc<sea_orm::DatabaseConnection>,
        notification: Arc<sea_orm::DatabaseConnection>,
        moderation: Arc<sea_orm::DatabaseConnection>,
        notification_user: Arc<sea_orm::DatabaseConnection>,
    }

    impl Default for ServiceDbs {
        fn default() -> Self {
            Self {
                user: empty_db(),
                friendship: empty_db(),
                request: empty_db(),
                favorite: empty_db(),
                hidden: empty_db(),
                response: empty_db(),
                check_in: empty_db(),
                note: empty_db(),
                notification: empty_db(),
                moderation: empty_db(),
                notification_user: empty_db(),
            }
        }
    }

    fn service_full(dbs: ServiceDbs) -> FriendshipService {
        let other = empty_db();
        let notifications = NotificationService::new(
            daybook_db::repositories::NotificationRepository::new(dbs.notification),
            ModerationRepository::new(dbs.moderation),
            UserRepository::new(dbs.notification_user),
            ResponseRequestRepository::new(Arc::clone(&other)),
            ResponseRepository::new(Arc::clone(&other)),
        );
        let visibility = VisibilityService::new(
            FriendshipRepository::new(Arc::clone(&other)),
            ModerationRepository::new(Arc::clone(&other)),
            FriendGroupRepository::new(Arc::clone(&other)),
        );
        FriendshipService::new(
            UserRepository::new(dbs.user),
            FriendshipRepository::new(dbs.friendship),
            FriendRequestRepository::new(dbs.request),
            FavoriteRepository::new(dbs.favorite),
            HiddenRepository::new(dbs.hidden),
            ModerationRepository::new(other),
            ResponseRepository::new(dbs.response),
            CheckInRepository::new(dbs.check_in),
            NoteRepository::new(dbs.note),
            notifications,
            visibility,
        )
    }

    fn service(
        friendship_db: Arc<sea_orm::DatabaseConnection>,
        request_db: Arc<sea_orm::DatabaseConnection>,
    ) -> FriendshipService {
        let other = empty_db();
        let notifications = NotificationService::new(
            daybook_db::repositories::NotificationRepository::new(Arc::clone(&other)),
            ModerationRepository::new(Arc::clone(&other)),
            UserRepository::new(Arc::clone(&other)),
            ResponseRequestRepository::new(Arc::clone(&other)),
            ResponseRepository::new(Arc::clone(&other)),
        );
        let visibility = VisibilityService::new(
            FriendshipRepository::new(Arc::clone(&other)),
            ModerationRepository::new(Arc::clone(&other)),
            FriendGroupRepository::new(Arc::clone(&other)),
        );
        FriendshipService::new(
            UserRepository::new(Arc::clone(&other)),
            FriendshipRepository::new(friendship_db),
            FriendRequestRepository::new(request_db),
            FavoriteRepository::new(Arc::clone(&other)),
            HiddenRepository::new(Arc::clone(&other)),
            ModerationRepository::new(Arc::clone(&other)),
            ResponseRepository::new(Arc::clone(&other)),
            CheckInRepository::new(Arc::clone(&other)),
            NoteRepository::new(other),
            notifications,
            visibility,
        )
    }

    #[tokio::test]
    async fn test_request_to_yourself_rejected() {
        let service = service(empty_db(), empty_db());
        let result = service.send_friend_request("alice", "alice").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_respond_without_pending_request_is_not_found() {
        let request_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friend_request::Model>::new()])
                .into_connection(),
        );
        let service = service(empty_db(), request_db);

        let result = service
            .respond_to_friend_request("bob", "alice", true)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_friendship_requires_edge() {
        let friendship_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friendship::Model>::new()])
                .into_connection(),
        );
        let service = service(friendship_db, empty_db());

        let result = service.remove_friendship("alice", "bob").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_favorite_requires_friendship() {
        let friendship_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friendship::Model>::new()])
                .into_connection(),
        );
        let service = service(friendship_db, empty_db());

        let result = service.add_favorite("alice", "dave").await;
        assert!(matches!(result, Err(AppError::PreconditionFailed(_))));
    }

    #[tokio::test]
    async fn test_add_hidden_requires_friendship() {
        let friendship_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friendship::Model>::new()])
                .into_connection(),
        );
        let service = service(friendship_db, empty_db());

        let result = service.add_hidden("alice", "dave").await;
        assert!(matches!(result, Err(AppError::PreconditionFailed(_))));
    }

    fn test_notification(id: &str, user_id: &str, actor_id: &str) -> notification::Model {
        notification::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            actor_id: Some(actor_id.to_string()),
            target_kind: daybook_db::entities::notification::NotificationTarget::User,
            target_id: actor_id.to_string(),
            message_key: "became_friends".to_string(),
            message_args: serde_json::json!({}),
            redirect_url: format!("/users/{actor_id}"),
            is_read: false,
            is_visible: true,
            created_at: chrono::Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_accept_materializes_edge_and_notifies_both() {
        // bob accepts alice's pending request: the request is marked
        // accepted, both users get a became-friends notification, the
        // symmetric edge is created, and the original request
        // notification is retired.
        let mut accepted = test_request("fr1", "alice", "bob");
        accepted.accepted = Some(true);

        let dbs = ServiceDbs {
            request: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([vec![test_request("fr1", "alice", "bob")]])
                    .append_query_results([vec![accepted]])
                    .into_connection(),
            ),
            friendship: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    // not friends yet
                    .append_query_results([Vec::<friendship::Model>::new()])
                    // edge insert
                    .append_query_results([vec![test_edge("f1", "alice", "bob")]])
                    // friend id lookups for the first-friend nudge
                    .append_query_results([vec![test_edge("f1", "alice", "bob")]])
                    .append_query_results([vec![test_edge("f1", "alice", "bob")]])
                    .into_connection(),
            ),
            user: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([vec![test_user("alice")]])
                    .append_query_results([vec![test_user("bob")]])
                    .into_connection(),
            ),
            moderation: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([Vec::<daybook_db::entities::user_report::Model>::new()])
                    .into_connection(),
            ),
            notification: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([vec![test_notification("n1", "bob", "alice")]])
                    .append_query_results([vec![test_notification("n2", "alice", "bob")]])
                    .append_exec_results([MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    }])
                    .into_connection(),
            ),
            notification_user: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    // no system actor configured: the nudge is skipped
                    .append_query_results([Vec::<user::Model>::new()])
                    .append_query_results([Vec::<user::Model>::new()])
                    .into_connection(),
            ),
            ..ServiceDbs::default()
        };

        let service = service_full(dbs);
        service
            .respond_to_friend_request("bob", "alice", true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_hidden_evicts_favorite() {
        let dbs = ServiceDbs {
            friendship: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([vec![test_edge("f1", "alice", "bob")]])
                    .into_connection(),
            ),
            hidden: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([Vec::<daybook_db::entities::hidden::Model>::new()])
                    .append_query_results([vec![daybook_db::entities::hidden::Model {
                        id: "h1".to_string(),
                        user_id: "alice".to_string(),
                        friend_id: "bob".to_string(),
                        created_at: chrono::Utc::now().into(),
                    }]])
                    .into_connection(),
            ),
            favorite: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    // the favorite marker is deleted before hiding
                    .append_exec_results([MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    }])
                    .into_connection(),
            ),
            ..ServiceDbs::default()
        };

        let service = service_full(dbs);
        service.add_hidden("alice", "bob").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_friendship_cascades() {
        // Removing the edge also clears friendship notifications, residual
        // requests, favorite/hidden markers and share-list membership.
        let exec_ok = || MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        };

        let dbs = ServiceDbs {
            friendship: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([vec![test_edge("f1", "alice", "bob")]])
                    .append_query_results([vec![test_edge("f1", "alice", "bob")]])
                    .append_exec_results([exec_ok()])
                    .into_connection(),
            ),
            notification: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_exec_results([exec_ok()])
                    .into_connection(),
            ),
            request: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_exec_results([exec_ok()])
                    .into_connection(),
            ),
            favorite: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_exec_results([exec_ok()])
                    .into_connection(),
            ),
            hidden: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_exec_results([exec_ok()])
                    .into_connection(),
            ),
            response: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([Vec::<daybook_db::entities::response::Model>::new()])
                    .append_query_results([Vec::<daybook_db::entities::response::Model>::new()])
                    .into_connection(),
            ),
            check_in: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([Vec::<daybook_db::entities::check_in::Model>::new()])
                    .append_query_results([Vec::<daybook_db::entities::check_in::Model>::new()])
                    .into_connection(),
            ),
            note: Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([Vec::<daybook_db::entities::note::Model>::new()])
                    .append_query_results([Vec::<daybook_db::entities::note::Model>::new()])
                    .into_connection(),
            ),
            ..ServiceDbs::default()
        };

        let service = service_full(dbs);
        service.remove_friendship("alice", "bob").await.unwrap();
    }
}
