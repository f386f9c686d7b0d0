//! Friend graph endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use daybook_common::{AppError, AppResult};
use daybook_core::FriendListFilter;
use daybook_db::entities::friend_request;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

use super::users::UserSummary;

/// Friend request body naming the other user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestBody {
    pub user_id: String,
}

/// Friend request representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestResponse {
    pub id: String,
    pub requester_id: String,
    pub requestee_id: String,
    pub accepted: Option<bool>,
    pub created_at: String,
}

impl From<friend_request::Model> for FriendRequestResponse {
    fn from(request: friend_request::Model) -> Self {
        Self {
            id: request.id,
            requester_id: request.requester_id,
            requestee_id: request.requestee_id,
            accepted: request.accepted,
            created_at: request.created_at.to_rfc3339(),
        }
    }
}

/// Send a friend request.
async fn send_request(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FriendRequestBody>,
) -> AppResult<ApiResponse<Option<FriendRequestResponse>>> {
    let request = state
        .friendship_service
        .send_friend_request(&user.id, &req.user_id)
        .await?;
    Ok(ApiResponse::ok(request.map(Into::into)))
}

/// Accept a friend request from the named user.
async fn accept_request(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FriendRequestBody>,
) -> AppResult<ApiResponse<()>> {
    state
        .friendship_service
        .respond_to_friend_request(&user.id, &req.user_id, true)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Reject a friend request from the named user.
async fn reject_request(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FriendRequestBody>,
) -> AppResult<ApiResponse<()>> {
    state
        .friendship_service
        .respond_to_friend_request(&user.id, &req.user_id, false)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Withdraw a friend request the caller sent.
async fn withdraw_request(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FriendRequestBody>,
) -> AppResult<ApiResponse<()>> {
    state
        .friendship_service
        .withdraw_friend_request(&user.id, &req.user_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// List pending requests received by the caller.
async fn received_requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FriendRequestResponse>>> {
    let requests = state
        .friendship_service
        .list_received_requests(&user.id)
        .await?;
    Ok(ApiResponse::ok(
        requests.into_iter().map(Into::into).collect(),
    ))
}

/// List requests the caller sent that were not accepted.
async fn sent_requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FriendRequestResponse>>> {
    let requests = state.friendship_service.list_sent_requests(&user.id).await?;
    Ok(ApiResponse::ok(
        requests.into_iter().map(Into::into).collect(),
    ))
}

/// Friend list params.
#[derive(Debug, Deserialize)]
pub struct FriendListParams {
    #[serde(rename = "type")]
    pub list_type: String,
}

/// List the caller's friends under a filter.
async fn list_friends(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<FriendListParams>,
) -> AppResult<ApiResponse<Vec<UserSummary>>> {
    let filter = match params.list_type.as_str() {
        "all" => FriendListFilter::All,
        "has_updates" => FriendListFilter::HasUpdates,
        "favorites" => FriendListFilter::Favorites,
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown friend list type: {other}"
            )))
        }
    };
    let friends = state.friendship_service.list_friends(&user.id, filter).await?;
    Ok(ApiResponse::ok(
        friends.into_iter().map(Into::into).collect(),
    ))
}

/// Remove a friendship.
async fn remove_friend(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(friend_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state
        .friendship_service
        .remove_friendship(&user.id, &friend_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Body naming a friend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendBody {
    pub friend_id: String,
}

/// Mark a friend as favorite.
async fn add_favorite(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FriendBody>,
) -> AppResult<ApiResponse<()>> {
    state
        .friendship_service
        .add_favorite(&user.id, &req.friend_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Remove a favorite marker.
async fn remove_favorite(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(friend_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state
        .friendship_service
        .remove_favorite(&user.id, &friend_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Hide a friend from the update feed.
async fn add_hidden(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FriendBody>,
) -> AppResult<ApiResponse<()>> {
    state
        .friendship_service
        .add_hidden(&user.id, &req.friend_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Remove a hidden marker.
async fn remove_hidden(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(friend_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state
        .friendship_service
        .remove_hidden(&user.id, &friend_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Recommended friends, ranked by mutual friend count.
async fn recommended(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserSummary>>> {
    let users = state.friendship_service.recommended_friends(&user.id).await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Exclude a user from the caller's recommendations.
async fn block_recommendation(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FriendRequestBody>,
) -> AppResult<ApiResponse<()>> {
    state
        .block_service
        .block_recommendation(&user.id, &req.user_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_friends))
        .route("/requests", post(send_request))
        .route("/requests/accept", post(accept_request))
        .route("/requests/reject", post(reject_request))
        .route("/requests/withdraw", post(withdraw_request))
        .route("/requests/received", get(received_requests))
        .route("/requests/sent", get(sent_requests))
        .route("/favorites", post(add_favorite))
        .route("/favorites/{friend_id}", delete(remove_favorite))
        .route("/hidden", post(add_hidden))
        .route("/hidden/{friend_id}", delete(remove_hidden))
        .route("/recommended", get(recommended))
        .route("/recommended/block", post(block_recommendation))
        .route("/{friend_id}", delete(remove_friend))
}
