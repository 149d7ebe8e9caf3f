//! HTTP facade over the registry store.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use parlor_shared::signal::shutdown_signal;
use parlor_shared::wire::{Endpoint, RegisterProcedureRequest};

use super::registry::RegistryStore;

/// Build the binder router over the given store.
///
/// Split out from `run` so integration tests can serve the app on an
/// ephemeral port.
pub fn app(store: Arc<RegistryStore>) -> Router {
    Router::new()
        .route("/api/procedures", post(register_procedure))
        .route("/api/procedures/{name}", get(lookup_procedure))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Run the binder service
///
/// # Arguments
///
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 5000)
pub async fn run(host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(RegistryStore::new());
    let app = app(store);

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Binder listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Binder shutdown complete");

    Ok(())
}

/// Register a procedure name; always acknowledges with `true`
async fn register_procedure(
    State(store): State<Arc<RegistryStore>>,
    Json(req): Json<RegisterProcedureRequest>,
) -> Json<bool> {
    store
        .register(
            req.name,
            Endpoint {
                host: req.host,
                port: req.port,
            },
        )
        .await;
    Json(true)
}

/// Look up a procedure name; JSON `null` is the not-found marker
async fn lookup_procedure(
    State(store): State<Arc<RegistryStore>>,
    Path(name): Path<String>,
) -> Json<Option<Endpoint>> {
    Json(store.lookup(&name).await)
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
