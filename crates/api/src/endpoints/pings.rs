//! Ping endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use daybook_common::AppResult;
use daybook_db::entities::ping::{self, PingEmoji};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Ping representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub emoji: Option<PingEmoji>,
    pub content: Option<String>,
    pub is_read: bool,
    pub created_at: String,
}

impl From<ping::Model> for PingResponse {
    fn from(ping: ping::Model) -> Self {
        Self {
            id: ping.id,
            sender_id: ping.sender_id,
            receiver_id: ping.receiver_id,
            emoji: ping.emoji,
            content: ping.content,
            is_read: ping.is_read,
            created_at: ping.created_at.to_rfc3339(),
        }
    }
}

/// Ping listing with the pagination anchor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PingListResponse {
    pub pings: Vec<PingResponse>,
    pub oldest_unread_page: u64,
}

/// List pings exchanged with another user; marks them read.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<PingListResponse>> {
    let listing = state.ping_service.list_pings(&user.id, &user_id).await?;
    Ok(ApiResponse::ok(PingListResponse {
        pings: listing.pings.into_iter().map(Into::into).collect(),
        oldest_unread_page: listing.oldest_unread_page,
    }))
}

/// Create-ping request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePingRequest {
    pub emoji: Option<PingEmoji>,
    pub content: Option<String>,
}

/// Create-ping response with the caller's unread count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePingResponse {
    pub ping: PingResponse,
    pub unread_count: u64,
}

/// Send a ping to a friend.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<CreatePingRequest>,
) -> AppResult<ApiResponse<CreatePingResponse>> {
    let (ping, unread_count) = state
        .ping_service
        .send_ping(&user.id, &user_id, req.emoji, req.content)
        .await?;
    Ok(ApiResponse::ok(CreatePingResponse {
        ping: ping.into(),
        unread_count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", get(list))
        .route("/{user_id}", post(create))
}
