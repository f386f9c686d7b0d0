//! Content endpoints (responses, notes, check-ins, moments, feeds).

use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Json, Router,
};
use daybook_common::AppResult;
use daybook_core::{CreateCheckInInput, CreateResponseInput, Feed};
use daybook_db::entities::{category, check_in, moment, note, note::Visibility, response};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

fn read_by(reader_ids: &serde_json::Value, viewer_id: &str) -> bool {
    reader_ids
        .as_array()
        .is_some_and(|a| a.iter().any(|v| v.as_str() == Some(viewer_id)))
}

/// Response representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    pub id: String,
    pub author_id: String,
    pub question_id: String,
    pub content: String,
    pub visibility: Visibility,
    pub current_user_read: bool,
    pub created_at: String,
}

impl ResponseItem {
    fn from_model(response: response::Model, viewer_id: &str) -> Self {
        Self {
            id: response.id,
            author_id: response.author_id,
            question_id: response.question_id,
            content: response.content,
            visibility: response.visibility,
            current_user_read: read_by(&response.reader_ids, viewer_id),
            created_at: response.created_at.to_rfc3339(),
        }
    }
}

/// Note representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteItem {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub category_id: Option<String>,
    pub visibility: Visibility,
    pub current_user_read: bool,
    pub created_at: String,
}

impl NoteItem {
    fn from_model(note: note::Model, viewer_id: &str) -> Self {
        Self {
            id: note.id,
            author_id: note.author_id,
            content: note.content,
            category_id: note.category_id,
            visibility: note.visibility,
            current_user_read: read_by(&note.reader_ids, viewer_id),
            created_at: note.created_at.to_rfc3339(),
        }
    }
}

/// Check-in representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInItem {
    pub id: String,
    pub author_id: String,
    pub mood: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub visibility: Visibility,
    pub current_user_read: bool,
    pub created_at: String,
}

impl CheckInItem {
    fn from_model(check_in: check_in::Model, viewer_id: &str) -> Self {
        Self {
            id: check_in.id,
            author_id: check_in.author_id,
            mood: check_in.mood,
            description: check_in.description,
            is_active: check_in.is_active,
            visibility: check_in.visibility,
            current_user_read: read_by(&check_in.reader_ids, viewer_id),
            created_at: check_in.created_at.to_rfc3339(),
        }
    }
}

/// Moment representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentItem {
    pub id: String,
    pub author_id: String,
    pub date: String,
    pub mood: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<moment::Model> for MomentItem {
    fn from(moment: moment::Model) -> Self {
        Self {
            id: moment.id,
            author_id: moment.author_id,
            date: moment.date.to_string(),
            mood: moment.mood,
            description: moment.description,
            created_at: moment.created_at.to_rfc3339(),
        }
    }
}

/// Category representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub id: String,
    pub name: String,
    pub sharing_scope: Visibility,
}

impl From<category::Model> for CategoryItem {
    fn from(category: category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            sharing_scope: category.sharing_scope,
        }
    }
}

/// Feed representation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub responses: Vec<ResponseItem>,
    pub notes: Vec<NoteItem>,
}

impl FeedResponse {
    fn from_feed(feed: Feed, viewer_id: &str) -> Self {
        Self {
            responses: feed
                .responses
                .into_iter()
                .map(|r| ResponseItem::from_model(r, viewer_id))
                .collect(),
            notes: feed
                .notes
                .into_iter()
                .map(|n| NoteItem::from_model(n, viewer_id))
                .collect(),
        }
    }
}

/// Create-response request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponseBody {
    pub question_id: String,
    pub content: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub share_friend_ids: Vec<String>,
    #[serde(default)]
    pub share_group_ids: Vec<String>,
}

/// Answer a question.
async fn create_response(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateResponseBody>,
) -> AppResult<ApiResponse<ResponseItem>> {
    let response = state
        .content_service
        .create_response(
            &user.id,
            CreateResponseInput {
                question_id: req.question_id,
                content: req.content,
                visibility: req.visibility,
                share_friend_ids: req.share_friend_ids,
                share_group_ids: req.share_group_ids,
            },
        )
        .await?;
    Ok(ApiResponse::ok(ResponseItem::from_model(response, &user.id)))
}

/// Create-note request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteBody {
    pub content: String,
    pub category_id: String,
    #[serde(default)]
    pub share_friend_ids: Vec<String>,
    #[serde(default)]
    pub share_group_ids: Vec<String>,
}

/// Post a note; its scope comes from the category.
async fn create_note(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateNoteBody>,
) -> AppResult<ApiResponse<NoteItem>> {
    let note = state
        .content_service
        .create_note(
            &user.id,
            &req.content,
            &req.category_id,
            req.share_friend_ids,
            req.share_group_ids,
        )
        .await?;
    Ok(ApiResponse::ok(NoteItem::from_model(note, &user.id)))
}

/// Create-check-in request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckInBody {
    pub mood: Option<String>,
    pub description: Option<String>,
    pub visibility: Visibility,
    #[serde(default)]
    pub share_friend_ids: Vec<String>,
    #[serde(default)]
    pub share_group_ids: Vec<String>,
}

/// Post a check-in; deactivates the previous one.
async fn create_check_in(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCheckInBody>,
) -> AppResult<ApiResponse<CheckInItem>> {
    let check_in = state
        .content_service
        .create_check_in(
            &user.id,
            CreateCheckInInput {
                mood: req.mood,
                description: req.description,
                visibility: req.visibility,
                share_friend_ids: req.share_friend_ids,
                share_group_ids: req.share_group_ids,
            },
        )
        .await?;
    Ok(ApiResponse::ok(CheckInItem::from_model(check_in, &user.id)))
}

/// Create-moment request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMomentBody {
    pub date: chrono::NaiveDate,
    pub mood: Option<String>,
    pub description: Option<String>,
}

/// Post the day's moment.
async fn create_moment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateMomentBody>,
) -> AppResult<ApiResponse<MomentItem>> {
    let moment = state
        .content_service
        .create_moment(&user.id, req.date, req.mood, req.description)
        .await?;
    Ok(ApiResponse::ok(moment.into()))
}

/// Friend feed.
async fn friend_feed(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<FeedResponse>> {
    let feed = state.content_service.friend_feed(&user.id).await?;
    Ok(ApiResponse::ok(FeedResponse::from_feed(feed, &user.id)))
}

/// Anonymous feed.
async fn anonymous_feed(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<FeedResponse>> {
    let feed = state.content_service.anonymous_feed(&user.id).await?;
    Ok(ApiResponse::ok(FeedResponse::from_feed(feed, &user.id)))
}

/// An author's responses the caller may see.
async fn user_responses(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<ApiResponse<Vec<ResponseItem>>> {
    let author = state.user_service.get_by_handle(&handle).await?;
    let responses = state
        .content_service
        .list_user_responses(&user.id, &author.id)
        .await?;
    Ok(ApiResponse::ok(
        responses
            .into_iter()
            .map(|r| ResponseItem::from_model(r, &user.id))
            .collect(),
    ))
}

/// An author's notes the caller may see.
async fn user_notes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<ApiResponse<Vec<NoteItem>>> {
    let author = state.user_service.get_by_handle(&handle).await?;
    let notes = state
        .content_service
        .list_user_notes(&user.id, &author.id)
        .await?;
    Ok(ApiResponse::ok(
        notes
            .into_iter()
            .map(|n| NoteItem::from_model(n, &user.id))
            .collect(),
    ))
}

/// An author's active check-in, if visible.
async fn user_check_in(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<ApiResponse<Option<CheckInItem>>> {
    let author = state.user_service.get_by_handle(&handle).await?;
    let check_in = state
        .content_service
        .active_check_in(&user.id, &author.id)
        .await?;
    Ok(ApiResponse::ok(
        check_in.map(|c| CheckInItem::from_model(c, &user.id)),
    ))
}

/// An author's moments the caller may see.
async fn user_moments(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<ApiResponse<Vec<MomentItem>>> {
    let author = state.user_service.get_by_handle(&handle).await?;
    let moments = state
        .content_service
        .list_user_moments(&user.id, &author.id)
        .await?;
    Ok(ApiResponse::ok(
        moments.into_iter().map(Into::into).collect(),
    ))
}

/// Mark a response as read.
async fn read_response(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.content_service.mark_response_read(&user.id, &id).await?;
    Ok(ApiResponse::ok(()))
}

/// Mark a note as read.
async fn read_note(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.content_service.mark_note_read(&user.id, &id).await?;
    Ok(ApiResponse::ok(()))
}

/// Mark a check-in as read.
async fn read_check_in(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.content_service.mark_check_in_read(&user.id, &id).await?;
    Ok(ApiResponse::ok(()))
}

/// Mark all of an author's notes as read.
async fn read_all_notes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let author = state.user_service.get_by_handle(&handle).await?;
    state
        .content_service
        .mark_all_notes_read(&user.id, &author.id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Mark all of an author's responses as read.
async fn read_all_responses(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let author = state.user_service.get_by_handle(&handle).await?;
    state
        .content_service
        .mark_all_responses_read(&user.id, &author.id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// List note categories.
async fn categories(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CategoryItem>>> {
    let categories = state.content_service.list_categories().await?;
    Ok(ApiResponse::ok(
        categories.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/responses", post(create_response))
        .route("/notes", post(create_note))
        .route("/check-ins", post(create_check_in))
        .route("/moments", post(create_moment))
        .route("/feed/friends", get(friend_feed))
        .route("/feed/anonymous", get(anonymous_feed))
        .route("/users/{handle}/responses", get(user_responses))
        .route("/users/{handle}/notes", get(user_notes))
        .route("/users/{handle}/check-in", get(user_check_in))
        .route("/users/{handle}/moments", get(user_moments))
        .route("/users/{handle}/notes/read-all", patch(read_all_notes))
        .route(
            "/users/{handle}/responses/read-all",
            patch(read_all_responses),
        )
        .route("/responses/{id}/read", patch(read_response))
        .route("/notes/{id}/read", patch(read_note))
        .route("/check-ins/{id}/read", patch(read_check_in))
        .route("/categories", get(categories))
}
