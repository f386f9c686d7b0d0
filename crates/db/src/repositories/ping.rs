//! Ping repository (rooms and pings).

use std::sync::Arc;

use crate::entities::{ping, ping_room, Ping, PingRoom};
use daybook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use super::friendship::canonical_pair;

/// Ping repository for database operations.
#[derive(Clone)]
pub struct PingRepository {
    db: Arc<DatabaseConnection>,
}

impl PingRepository {
    /// Create a new ping repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the room for a pair of users, if any.
    pub async fn find_room_by_pair(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> AppResult<Option<ping_room::Model>> {
        let (u1, u2) = canonical_pair(user_a, user_b);
        PingRoom::find()
            .filter(ping_room::Column::User1Id.eq(u1))
            .filter(ping_room::Column::User2Id.eq(u2))
            .filter(ping_room::Column::DeletedAt.is_null())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a room.
    ///
    /// The model must already carry a canonicalized pair.
    pub async fn create_room(&self, model: ping_room::ActiveModel) -> AppResult<ping_room::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a ping.
    pub async fn create_ping(&self, model: ping::ActiveModel) -> AppResult<ping::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a room's pings, newest first.
    pub async fn find_by_room(&self, room_id: &str) -> AppResult<Vec<ping::Model>> {
        Ping::find()
            .filter(ping::Column::PingRoomId.eq(room_id))
            .order_by_desc(ping::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the oldest unread ping addressed to the receiver in a room.
    pub async fn find_oldest_unread(
        &self,
        room_id: &str,
        receiver_id: &str,
    ) -> AppResult<Option<ping::Model>> {
        Ping::find()
            .filter(ping::Column::PingRoomId.eq(room_id))
            .filter(ping::Column::ReceiverId.eq(receiver_id))
            .filter(ping::Column::IsRead.eq(false))
            .order_by_asc(ping::Column::Id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count pings in a room at or after the given ping ID.
    ///
    /// Used to locate which page the oldest unread ping falls on.
    pub async fn count_from_id(&self, room_id: &str, ping_id: &str) -> AppResult<u64> {
        Ping::find()
            .filter(ping::Column::PingRoomId.eq(room_id))
            .filter(ping::Column::Id.gte(ping_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count unread pings addressed to the receiver in a room.
    pub async fn count_unread(&self, room_id: &str, receiver_id: &str) -> AppResult<u64> {
        Ping::find()
            .filter(ping::Column::PingRoomId.eq(room_id))
            .filter(ping::Column::ReceiverId.eq(receiver_id))
            .filter(ping::Column::IsRead.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark every unread ping addressed to the receiver in a room as read.
    pub async fn mark_all_read(&self, room_id: &str, receiver_id: &str) -> AppResult<u64> {
        let result = Ping::update_many()
            .col_expr(ping::Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(ping::Column::PingRoomId.eq(room_id))
            .filter(ping::Column::ReceiverId.eq(receiver_id))
            .filter(ping::Column::IsRead.eq(false))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
