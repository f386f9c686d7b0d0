//! Friend group endpoints.

use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use daybook_common::AppResult;
use daybook_db::entities::friend_group;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Friend group representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub order_index: i32,
    pub created_at: String,
}

impl From<friend_group::Model> for GroupResponse {
    fn from(group: friend_group::Model) -> Self {
        Self {
            id: group.id,
            name: group.name,
            order_index: group.order_index,
            created_at: group.created_at.to_rfc3339(),
        }
    }
}

/// Create/rename request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBody {
    pub name: String,
}

/// List the caller's groups.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<GroupResponse>>> {
    let groups = state.friend_group_service.list_groups(&user.id).await?;
    Ok(ApiResponse::ok(groups.into_iter().map(Into::into).collect()))
}

/// Create a group.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<GroupBody>,
) -> AppResult<ApiResponse<GroupResponse>> {
    let group = state
        .friend_group_service
        .create_group(&user.id, &req.name)
        .await?;
    Ok(ApiResponse::ok(group.into()))
}

/// Rename a group.
async fn rename(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(req): Json<GroupBody>,
) -> AppResult<ApiResponse<GroupResponse>> {
    let group = state
        .friend_group_service
        .rename_group(&user.id, &group_id, &req.name)
        .await?;
    Ok(ApiResponse::ok(group.into()))
}

/// Delete a group.
async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state
        .friend_group_service
        .delete_group(&user.id, &group_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Group member list.
async fn members(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> AppResult<ApiResponse<Vec<String>>> {
    let ids = state
        .friend_group_service
        .member_ids(&user.id, &group_id)
        .await?;
    Ok(ApiResponse::ok(ids))
}

/// Add-member request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
    pub friend_id: String,
}

/// Add a friend to a group.
async fn add_member(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(req): Json<MemberBody>,
) -> AppResult<ApiResponse<()>> {
    state
        .friend_group_service
        .add_member(&user.id, &group_id, &req.friend_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Remove a friend from a group.
async fn remove_member(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((group_id, friend_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<()>> {
    state
        .friend_group_service
        .remove_member(&user.id, &group_id, &friend_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/", post(create))
        .route("/{group_id}", patch(rename))
        .route("/{group_id}", delete(remove))
        .route("/{group_id}/members", get(members))
        .route("/{group_id}/members", post(add_member))
        .route("/{group_id}/members/{friend_id}", delete(remove_member))
}
