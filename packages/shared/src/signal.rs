//! Graceful shutdown signal handling, shared by the service binaries.

/// Resolve when Ctrl+C is received
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
