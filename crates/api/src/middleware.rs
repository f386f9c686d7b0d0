//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use daybook_core::{
    BlockService, ContentService, FriendGroupService, FriendshipService, NotificationService,
    PingService, QuestionService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub friendship_service: FriendshipService,
    pub friend_group_service: FriendGroupService,
    pub notification_service: NotificationService,
    pub ping_service: PingService,
    pub content_service: ContentService,
    pub question_service: QuestionService,
    pub block_service: BlockService,
}

/// Authentication middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Try to extract token from header
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        // Authenticate user by token
        if let Ok(user) = state.user_service.authenticate_by_token(token).await {
            req.extensions_mut().insert(user);
        }
    }

    next.run(req).await
}
