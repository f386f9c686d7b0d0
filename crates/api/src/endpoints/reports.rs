//! Report endpoints (moderation boundary).

use axum::{extract::State, routing::post, Json, Router};
use daybook_common::AppResult;
use daybook_db::entities::content_report::ContentKind;
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// User report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUserBody {
    pub user_id: String,
}

/// Report a user; suppresses all interaction between the pair.
async fn report_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReportUserBody>,
) -> AppResult<ApiResponse<()>> {
    state.block_service.report_user(&user.id, &req.user_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Content report request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContentBody {
    pub target_kind: ContentKind,
    pub target_id: String,
}

/// Report a content item; hides it from the caller.
async fn report_content(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReportContentBody>,
) -> AppResult<ApiResponse<()>> {
    state
        .block_service
        .report_content(&user.id, req.target_kind, &req.target_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(report_user))
        .route("/content", post(report_content))
}
