//! Logging setup shared by the binder, server and client binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The default level applies to every crate in the process; it can be
/// overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "binder", "server")
/// * `default_level` - The default log level (e.g., "debug", "info")
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Fallback filter directives. The bare leading level enables every target,
/// so library crates (store, registry, tower-http spans) log too; a
/// crate-name directive alone would silence everything outside that crate.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{},{}={}",
        default_log_level, binary_name, default_log_level
    )
}
