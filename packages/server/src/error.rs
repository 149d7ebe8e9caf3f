//! Error types for the chat server.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use thiserror::Error;

use parlor_shared::wire::ErrorBody;

use crate::domain::DomainError;

/// Failures of chat operations, returned as typed results to the caller.
///
/// The taxonomy follows the remote surface: conflicts (duplicate names),
/// not-found (absent user/room) and failed preconditions (membership and
/// recipient checks).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("User '{0}' is already registered")]
    UserAlreadyExists(String),

    #[error("User '{0}' is not registered")]
    UserNotFound(String),

    #[error("Room '{0}' already exists")]
    RoomAlreadyExists(String),

    #[error("Room '{0}' does not exist")]
    RoomNotFound(String),

    #[error("User '{user}' is not a member of room '{room}'")]
    NotInRoom { user: String, room: String },

    #[error("Recipient '{recipient}' is not a member of room '{room}'")]
    RecipientNotInRoom { recipient: String, room: String },

    #[error("Room '{0}' has no other members to receive the message")]
    NoOtherMembers(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            ChatError::UserAlreadyExists(_) | ChatError::RoomAlreadyExists(_) => {
                StatusCode::CONFLICT
            }
            ChatError::UserNotFound(_) | ChatError::RoomNotFound(_) => StatusCode::NOT_FOUND,
            ChatError::NotInRoom { .. }
            | ChatError::RecipientNotInRoom { .. }
            | ChatError::NoOtherMembers(_) => StatusCode::PRECONDITION_FAILED,
            ChatError::Invalid(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
