//! Daybook server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use daybook_api::{middleware::AppState, router as api_router};
use daybook_common::Config;
use daybook_core::{
    BlockService, ContentService, FriendGroupService, FriendshipService, NotificationService,
    PingService, QuestionService, UserService, VisibilityService,
};
use daybook_db::repositories::{
    CheckInRepository, FavoriteRepository, FriendGroupRepository, FriendRequestRepository,
    FriendshipRepository, HiddenRepository, ModerationRepository, MomentRepository,
    NoteRepository, NotificationRepository, PingRepository, QuestionRepository,
    ResponseRepository, ResponseRequestRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daybook=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting daybook server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = daybook_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    daybook_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let friendship_repo = FriendshipRepository::new(Arc::clone(&db));
    let friend_request_repo = FriendRequestRepository::new(Arc::clone(&db));
    let favorite_repo = FavoriteRepository::new(Arc::clone(&db));
    let hidden_repo = HiddenRepository::new(Arc::clone(&db));
    let moderation_repo = ModerationRepository::new(Arc::clone(&db));
    let friend_group_repo = FriendGroupRepository::new(Arc::clone(&db));
    let question_repo = QuestionRepository::new(Arc::clone(&db));
    let response_repo = ResponseRepository::new(Arc::clone(&db));
    let response_request_repo = ResponseRequestRepository::new(Arc::clone(&db));
    let note_repo = NoteRepository::new(Arc::clone(&db));
    let check_in_repo = CheckInRepository::new(Arc::clone(&db));
    let moment_repo = MomentRepository::new(Arc::clone(&db));
    let ping_repo = PingRepository::new(Arc::clone(&db));
    let notification_repo = NotificationRepository::new(Arc::clone(&db));

    // Initialize services
    let notification_service = NotificationService::new(
        notification_repo,
        moderation_repo.clone(),
        user_repo.clone(),
        response_request_repo.clone(),
        response_repo.clone(),
    );

    let visibility_service = VisibilityService::new(
        friendship_repo.clone(),
        moderation_repo.clone(),
        friend_group_repo.clone(),
    );

    let user_service = UserService::new(
        user_repo.clone(),
        friend_group_repo.clone(),
        response_repo.clone(),
        note_repo.clone(),
        check_in_repo.clone(),
        moment_repo.clone(),
        notification_service.clone(),
    );

    let friendship_service = FriendshipService::new(
        user_repo.clone(),
        friendship_repo.clone(),
        friend_request_repo,
        favorite_repo,
        hidden_repo,
        moderation_repo.clone(),
        response_repo.clone(),
        check_in_repo.clone(),
        note_repo.clone(),
        notification_service.clone(),
        visibility_service.clone(),
    );

    let friend_group_service =
        FriendGroupService::new(friend_group_repo, friendship_repo.clone());

    let ping_service = PingService::new(
        ping_repo,
        friendship_repo.clone(),
        user_repo.clone(),
        notification_service.clone(),
        config.server.page_size,
    );

    let content_service = ContentService::new(
        response_repo,
        note_repo,
        check_in_repo,
        moment_repo,
        question_repo.clone(),
        friendship_repo.clone(),
        visibility_service,
    );

    let question_service = QuestionService::new(
        question_repo,
        response_request_repo,
        friendship_repo,
        user_repo,
        notification_service.clone(),
    );

    let block_service = BlockService::new(moderation_repo);

    // Create app state
    let state = AppState {
        user_service,
        friendship_service,
        friend_group_service,
        notification_service,
        ping_service,
        content_service,
        question_service,
        block_service,
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            daybook_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
