//! JSON wire types exchanged between the binder, the chat server and clients.
//!
//! Every remote surface speaks these DTOs; the server converts them to and
//! from its domain types at the handler boundary.

use serde::{Deserialize, Serialize};

/// Network address of a registered service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Base URL for HTTP calls against this endpoint
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Binder: register a procedure name under an endpoint (last write wins)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProcedureRequest {
    pub name: String,
    pub host: String,
    pub port: u16,
}

/// Whether a message targets the whole room or a single member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Broadcast,
    Unicast,
}

/// A chat message as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub origin: String,
    /// Only present for unicast messages
    pub destination: Option<String>,
    pub content: String,
    /// Sortable `YYYY-MM-DD HH:MM:SS` encoding (see `time::TIMESTAMP_FORMAT`)
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
}

/// Registration acknowledgement.
///
/// `server_time` is the server clock at registration; clients seed their
/// polling cursor from it so a skewed local clock cannot skip messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub message: String,
    pub server_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub room: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub username: String,
}

/// Join snapshot: current members plus the recent visible history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub users: Vec<String>,
    pub messages: Vec<MessageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub username: String,
    pub content: String,
    /// Present for unicast sends; must name a current room member
    pub recipient: Option<String>,
}

/// Acknowledgement carrying the timestamp assigned to the message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub timestamp: String,
}

/// Query string for the message fetch endpoint.
///
/// Without `since` the full visible log is returned; with `since` only
/// messages strictly newer than the given timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveQuery {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

/// Plain acknowledgement with a human-readable status line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

/// Error body returned alongside a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
