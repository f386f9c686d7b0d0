//! User account endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use daybook_common::AppResult;
use daybook_core::SignupInput;
use daybook_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Minimal user shape used across listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub profile_color: String,
}

impl From<user::Model> for UserSummary {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            handle: user.handle,
            display_name: user.display_name,
            profile_color: user.profile_color,
        }
    }
}

/// Full profile shape for the current user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: String,
    pub handle: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub profile_color: String,
    pub language: String,
    pub timezone: String,
    pub created_at: String,
}

impl From<user::Model> for UserDetail {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            handle: user.handle,
            email: user.email,
            display_name: user.display_name,
            bio: user.bio,
            profile_color: user.profile_color,
            language: user.language,
            timezone: user.timezone,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Signup request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub handle: String,
    pub email: String,
    pub password: String,
    pub language: Option<String>,
    pub timezone: Option<String>,
}

/// Signup/login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserDetail,
    pub token: String,
}

/// Create an account.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let user = state
        .user_service
        .signup(SignupInput {
            handle: req.handle,
            email: req.email,
            password: req.password,
            language: req.language,
            timezone: req.timezone,
        })
        .await?;

    let token = user.token.clone().unwrap_or_default();
    Ok(ApiResponse::ok(SessionResponse {
        user: user.into(),
        token,
    }))
}

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Handle or email.
    pub name: String,
    pub password: String,
}

/// Sign in with handle or email.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let (user, token) = state.user_service.login(&req.name, &req.password).await?;
    Ok(ApiResponse::ok(SessionResponse {
        user: user.into(),
        token,
    }))
}

/// Current user profile.
async fn me(AuthUser(user): AuthUser) -> AppResult<ApiResponse<UserDetail>> {
    Ok(ApiResponse::ok(user.into()))
}

/// Delete the current account.
async fn delete_me(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.delete_account(&user.id).await?;
    Ok(ApiResponse::ok(()))
}

/// Search params.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_limit() -> u64 {
    20
}

/// Search users by handle.
async fn search(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<ApiResponse<Vec<UserSummary>>> {
    let limit = params.limit.min(100);
    let users = state
        .user_service
        .search(&params.query, &user.id, limit)
        .await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Public profile by handle.
async fn profile(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<ApiResponse<UserSummary>> {
    let user = state.user_service.get_by_handle(&handle).await?;
    Ok(ApiResponse::ok(user.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/me", delete(delete_me))
        .route("/search", get(search))
        .route("/{handle}", get(profile))
}
