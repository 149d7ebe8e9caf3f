//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use parlor_shared::signal::shutdown_signal;

use super::{
    handler::{
        create_room, health_check, join_room, list_rooms, list_users, receive_messages,
        register_user, send_message, unregister_user,
    },
    state::AppState,
};

/// Build the chat server router.
///
/// Split out from `run` so integration tests can serve the app on an
/// ephemeral port.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/users", post(register_user))
        .route("/api/users/{username}", delete(unregister_user))
        .route("/api/rooms", post(create_room).get(list_rooms))
        .route("/api/rooms/{room}/users", get(list_users))
        .route("/api/rooms/{room}/join", post(join_room))
        .route(
            "/api/rooms/{room}/messages",
            post(send_message).get(receive_messages),
        )
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the chat server
///
/// # Arguments
///
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 9000)
/// * `state` - Shared application state
pub async fn run(
    host: String,
    port: u16,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = app(state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Chat server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
