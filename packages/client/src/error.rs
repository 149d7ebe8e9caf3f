//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Username is already in use on the chat server
    #[error("Username '{0}' is already in use")]
    DuplicateUsername(String),

    /// The binder answered but no chat server is registered
    #[error("No chat server is registered with the binder")]
    ServiceUnresolved,

    /// The server rejected the request (precondition, not-found, conflict)
    #[error("{0}")]
    Rejected(String),

    /// Transport failure talking to the binder or the chat server
    #[error("Connection error: {0}")]
    Connection(String),
}
