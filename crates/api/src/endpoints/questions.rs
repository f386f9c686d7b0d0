//! Daily question endpoints.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use daybook_common::AppResult;
use daybook_db::entities::{question, response_request};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Question representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub content: String,
    pub is_admin_question: bool,
    pub selected_date: Option<String>,
    pub created_at: String,
}

impl From<question::Model> for QuestionResponse {
    fn from(question: question::Model) -> Self {
        Self {
            id: question.id,
            content: question.content,
            is_admin_question: question.is_admin_question,
            selected_date: question.selected_date.map(|d| d.to_string()),
            created_at: question.created_at.to_rfc3339(),
        }
    }
}

/// Daily questions params.
#[derive(Debug, Deserialize)]
pub struct DailyParams {
    /// Date in `YYYY-MM-DD`; defaults to today.
    pub date: Option<chrono::NaiveDate>,
}

/// The questions selected for a date.
async fn daily(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DailyParams>,
) -> AppResult<ApiResponse<Vec<QuestionResponse>>> {
    let date = params
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let questions = state.question_service.daily_questions(date).await?;
    Ok(ApiResponse::ok(
        questions.into_iter().map(Into::into).collect(),
    ))
}

/// Response request representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRequestResponse {
    pub id: String,
    pub requester_id: String,
    pub requestee_id: String,
    pub question_id: String,
    pub created_at: String,
}

impl From<response_request::Model> for ResponseRequestResponse {
    fn from(request: response_request::Model) -> Self {
        Self {
            id: request.id,
            requester_id: request.requester_id,
            requestee_id: request.requestee_id,
            question_id: request.question_id,
            created_at: request.created_at.to_rfc3339(),
        }
    }
}

/// Ask-a-friend request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponseRequestBody {
    pub requestee_id: String,
    pub question_id: String,
}

/// Ask a friend to answer a question.
async fn send_response_request(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SendResponseRequestBody>,
) -> AppResult<ApiResponse<Option<ResponseRequestResponse>>> {
    let request = state
        .question_service
        .send_response_request(&user.id, &req.requestee_id, &req.question_id)
        .await?;
    Ok(ApiResponse::ok(request.map(Into::into)))
}

/// Response requests received in the last 30 days.
async fn received_response_requests(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ResponseRequestResponse>>> {
    let requests = state
        .question_service
        .received_response_requests(&user.id)
        .await?;
    Ok(ApiResponse::ok(
        requests.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", get(daily))
        .route("/response-requests", post(send_response_request))
        .route(
            "/response-requests/received",
            get(received_response_requests),
        )
}
