//! API endpoints.

mod content;
mod friends;
mod groups;
mod notifications;
mod pings;
mod questions;
mod reports;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/friends", friends::router())
        .nest("/groups", groups::router())
        .nest("/notifications", notifications::router())
        .nest("/pings", pings::router())
        .nest("/questions", questions::router())
        .nest("/content", content::router())
        .nest("/reports", reports::router())
}
