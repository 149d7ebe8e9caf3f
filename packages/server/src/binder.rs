//! Startup registration with the binder.
//!
//! The chat server advertises every remote-callable procedure name under its
//! own host and port. Registration is retried with a fixed delay; if the
//! binder never answers, startup fails loudly rather than leaving the server
//! running undiscoverable.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use parlor_shared::wire::RegisterProcedureRequest;

/// Procedure names the chat service registers with the binder. Clients may
/// resolve any one of them to discover the server address.
pub const CHAT_PROCEDURES: [&str; 9] = [
    "register_user",
    "unregister_user",
    "create_room",
    "join_room",
    "send_message",
    "receive_messages",
    "receive_new_messages",
    "list_rooms",
    "list_users",
];

/// Failures talking to the binder
#[derive(Debug, Error)]
pub enum BinderError {
    #[error("Binder request failed: {0}")]
    Transport(String),

    #[error("Binder rejected registration of '{0}'")]
    Rejected(String),
}

/// The binder as seen by the chat server. A seam so registration logic can
/// be tested without a live binder process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BinderDirectory: Send + Sync {
    /// Register one procedure name under (host, port)
    async fn register_procedure(
        &self,
        name: &str,
        host: &str,
        port: u16,
    ) -> Result<(), BinderError>;
}

/// HTTP implementation against a real binder process
pub struct HttpBinderClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBinderClient {
    /// # Arguments
    ///
    /// * `base_url` - Binder base URL (e.g., "http://127.0.0.1:5000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BinderDirectory for HttpBinderClient {
    async fn register_procedure(
        &self,
        name: &str,
        host: &str,
        port: u16,
    ) -> Result<(), BinderError> {
        let response = self
            .http
            .post(format!("{}/api/procedures", self.base_url))
            .json(&RegisterProcedureRequest {
                name: name.to_string(),
                host: host.to_string(),
                port,
            })
            .send()
            .await
            .map_err(|e| BinderError::Transport(e.to_string()))?;

        let ack: bool = response
            .error_for_status()
            .map_err(|e| BinderError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| BinderError::Transport(e.to_string()))?;

        if !ack {
            return Err(BinderError::Rejected(name.to_string()));
        }
        Ok(())
    }
}

/// Register all chat procedures, retrying the whole batch on failure.
///
/// # Arguments
///
/// * `binder` - Binder client
/// * `host` / `port` - The address the chat server is reachable at
/// * `max_attempts` - Attempts before giving up
/// * `retry_delay` - Delay between attempts
pub async fn register_chat_procedures(
    binder: &dyn BinderDirectory,
    host: &str,
    port: u16,
    max_attempts: u32,
    retry_delay: Duration,
) -> Result<(), BinderError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match try_register_all(binder, host, port).await {
            Ok(()) => {
                tracing::info!(
                    "Registered {} procedures with the binder as {}:{}",
                    CHAT_PROCEDURES.len(),
                    host,
                    port
                );
                return Ok(());
            }
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    "Binder registration failed (attempt {}/{}): {}. Retrying in {:?}",
                    attempt,
                    max_attempts,
                    e,
                    retry_delay
                );
                tokio::time::sleep(retry_delay).await;
            }
            Err(e) => {
                tracing::error!(
                    "Binder registration failed after {} attempts: {}",
                    max_attempts,
                    e
                );
                return Err(e);
            }
        }
    }
}

async fn try_register_all(
    binder: &dyn BinderDirectory,
    host: &str,
    port: u16,
) -> Result<(), BinderError> {
    for name in CHAT_PROCEDURES {
        binder.register_procedure(name, host, port).await?;
    }
    Ok(())
}
