//! Ping service.
//!
//! Pings are tiny emoji/text messages between two friends, grouped into one
//! room per pair. Listing a room marks the caller's unread pings as read
//! and reports which page the oldest unread one fell on, so clients can
//! keep their pagination anchored.

use daybook_common::{AppError, AppResult, IdGenerator};
use daybook_db::{
    entities::{ping, ping::PingEmoji, ping_room},
    repositories::{canonical_pair, FriendshipRepository, PingRepository, UserRepository},
};
use sea_orm::Set;

use crate::services::notification::NotificationService;

/// A ping listing with its pagination anchor.
#[derive(Debug)]
pub struct PingListing {
    /// The room's pings, newest first, with the read state frozen as it
    /// was before this listing.
    pub pings: Vec<ping::Model>,
    /// 1-based page number containing the oldest previously-unread ping.
    pub oldest_unread_page: u64,
}

/// Ping service.
#[derive(Clone)]
pub struct PingService {
    ping_repo: PingRepository,
    friendship_repo: FriendshipRepository,
    user_repo: UserRepository,
    notifications: NotificationService,
    page_size: u64,
    id_gen: IdGenerator,
}

impl PingService {
    /// Create a new ping service.
    #[must_use]
    pub const fn new(
        ping_repo: PingRepository,
        friendship_repo: FriendshipRepository,
        user_repo: UserRepository,
        notifications: NotificationService,
        page_size: u64,
    ) -> Self {
        Self {
            ping_repo,
            friendship_repo,
            user_repo,
            notifications,
            page_size,
            id_gen: IdGenerator::new(),
        }
    }

    /// Both users must be friends to share a ping room.
    async fn require_connected(&self, user_id: &str, other_id: &str) -> AppResult<()> {
        self.user_repo.get_by_id(other_id).await?;
        if !self.friendship_repo.are_friends(user_id, other_id).await? {
            return Err(AppError::Forbidden(
                "You are not connected to this user".to_string(),
            ));
        }
        Ok(())
    }

    /// Fetch the pair's room, creating it on first use.
    async fn get_or_create_room(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> AppResult<ping_room::Model> {
        if let Some(room) = self.ping_repo.find_room_by_pair(user_a, user_b).await? {
            return Ok(room);
        }
        let (u1, u2) = canonical_pair(user_a, user_b);
        let model = ping_room::ActiveModel {
            id: Set(self.id_gen.generate()),
            user1_id: Set(u1.to_string()),
            user2_id: Set(u2.to_string()),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        match self.ping_repo.create_room(model).await {
            Ok(room) => Ok(room),
            Err(err) => {
                // Concurrent first pings can race on room creation
                if let Some(room) = self.ping_repo.find_room_by_pair(user_a, user_b).await? {
                    Ok(room)
                } else {
                    Err(err)
                }
            }
        }
    }

    /// List the pings exchanged with another user.
    ///
    /// Marks the caller's unread pings as read; the returned models keep
    /// the pre-listing read state so clients can highlight new entries.
    pub async fn list_pings(&self, user_id: &str, other_id: &str) -> AppResult<PingListing> {
        self.require_connected(user_id, other_id).await?;
        let room = self.get_or_create_room(user_id, other_id).await?;

        let pings = self.ping_repo.find_by_room(&room.id).await?;

        let oldest_unread_page = match self.ping_repo.find_oldest_unread(&room.id, user_id).await? {
            Some(oldest) => {
                let position = self.ping_repo.count_from_id(&room.id, &oldest.id).await?;
                (position.saturating_sub(1)) / self.page_size + 1
            }
            None => 1,
        };

        self.ping_repo.mark_all_read(&room.id, user_id).await?;

        Ok(PingListing {
            pings,
            oldest_unread_page,
        })
    }

    /// Send a ping to a friend.
    ///
    /// Returns the ping and the caller's own unread count for the room.
    pub async fn send_ping(
        &self,
        sender_id: &str,
        receiver_id: &str,
        emoji: Option<PingEmoji>,
        content: Option<String>,
    ) -> AppResult<(ping::Model, u64)> {
        if emoji.is_none() && content.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::BadRequest(
                "Either an emoji or a content must be provided".to_string(),
            ));
        }

        self.require_connected(sender_id, receiver_id).await?;
        let room = self.get_or_create_room(sender_id, receiver_id).await?;

        let model = ping::ActiveModel {
            id: Set(self.id_gen.generate()),
            ping_room_id: Set(room.id.clone()),
            sender_id: Set(sender_id.to_string()),
            receiver_id: Set(receiver_id.to_string()),
            emoji: Set(emoji),
            content: Set(content),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };
        let ping = self.ping_repo.create_ping(model).await?;

        let sender = self.user_repo.get_by_id(sender_id).await?;
        self.notifications.notify_ping(&ping, &sender).await?;

        let unread_count = self.ping_repo.count_unread(&room.id, sender_id).await?;
        Ok((ping, unread_count))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use daybook_db::repositories::{
        ModerationRepository, NotificationRepository, ResponseRepository,
        ResponseRequestRepository,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn service(page_size: u64) -> PingService {
        let other = empty_db();
        let notifications = NotificationService::new(
            NotificationRepository::new(Arc::clone(&other)),
            ModerationRepository::new(Arc::clone(&other)),
            UserRepository::new(Arc::clone(&other)),
            ResponseRequestRepository::new(Arc::clone(&other)),
            ResponseRepository::new(Arc::clone(&other)),
        );
        PingService::new(
            PingRepository::new(Arc::clone(&other)),
            FriendshipRepository::new(Arc::clone(&other)),
            UserRepository::new(other),
            notifications,
            page_size,
        )
    }

    #[tokio::test]
    async fn test_ping_requires_emoji_or_content() {
        let service = service(10);
        let result = service.send_ping("alice", "bob", None, None).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = service
            .send_ping("alice", "bob", None, Some(String::new()))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_oldest_unread_page_arithmetic() {
        // With a page size of 10: positions 1-10 land on page 1, 11 on 2.
        let page = |position: u64, page_size: u64| (position.saturating_sub(1)) / page_size + 1;
        assert_eq!(page(1, 10), 1);
        assert_eq!(page(10, 10), 1);
        assert_eq!(page(11, 10), 2);
        assert_eq!(page(25, 10), 3);
    }
}
