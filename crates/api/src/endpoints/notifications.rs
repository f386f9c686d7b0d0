//! Notification endpoints.

use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use daybook_common::AppResult;
use daybook_db::entities::notification::{self, NotificationTarget};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Notification representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    pub actor_id: Option<String>,
    pub message_key: String,
    pub message_args: serde_json::Value,
    pub redirect_url: String,
    pub is_read: bool,
    pub is_friend_request: bool,
    pub is_response_request: bool,
    pub is_recent: bool,
    pub created_at: String,
}

impl From<notification::Model> for NotificationResponse {
    fn from(notification: notification::Model) -> Self {
        let age = chrono::Utc::now().signed_duration_since(notification.created_at.to_utc());
        Self {
            id: notification.id,
            actor_id: notification.actor_id,
            message_key: notification.message_key,
            message_args: notification.message_args,
            redirect_url: notification.redirect_url,
            is_read: notification.is_read,
            is_friend_request: notification.target_kind == NotificationTarget::FriendRequest,
            is_response_request: notification.target_kind == NotificationTarget::ResponseRequest,
            is_recent: age.num_days() <= 7,
            created_at: notification.created_at.to_rfc3339(),
        }
    }
}

/// List visible notifications from the last 30 days.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<NotificationResponse>>> {
    let notifications = state.notification_service.list_notifications(&user.id).await?;
    Ok(ApiResponse::ok(
        notifications.into_iter().map(Into::into).collect(),
    ))
}

/// List friend-request notifications.
async fn list_friend_requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list_friend_request_notifications(&user.id)
        .await?;
    Ok(ApiResponse::ok(
        notifications.into_iter().map(Into::into).collect(),
    ))
}

/// List response-request notifications, excluding answered ones.
async fn list_response_requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list_response_request_notifications(&user.id)
        .await?;
    Ok(ApiResponse::ok(
        notifications.into_iter().map(Into::into).collect(),
    ))
}

/// Mark-read request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    pub ids: Vec<String>,
}

/// Mark-read response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadResponse {
    pub updated: u64,
}

/// Mark the given notifications as read.
async fn mark_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MarkReadRequest>,
) -> AppResult<ApiResponse<MarkReadResponse>> {
    let updated = state
        .notification_service
        .mark_read(&user.id, &req.ids)
        .await?;
    Ok(ApiResponse::ok(MarkReadResponse { updated }))
}

/// Mark every notification as read.
async fn mark_all_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<MarkReadResponse>> {
    let updated = state.notification_service.mark_all_read(&user.id).await?;
    Ok(ApiResponse::ok(MarkReadResponse { updated }))
}

/// Unread count response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// Count unread notifications.
async fn unread_count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UnreadCountResponse>> {
    let count = state.notification_service.count_unread(&user.id).await?;
    Ok(ApiResponse::ok(UnreadCountResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/friend-requests", get(list_friend_requests))
        .route("/response-requests", get(list_response_requests))
        .route("/read", patch(mark_read))
        .route("/read-all", patch(mark_all_read))
        .route("/unread-count", get(unread_count))
}
