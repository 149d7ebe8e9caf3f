//! Domain types for the chat server.
//!
//! Value objects validate once at the boundary; the rest of the code can
//! then assume names are well-formed.

mod room;

pub use room::Room;

use parlor_shared::wire::{MessageDto, MessageKind};
use thiserror::Error;

/// Maximum length for usernames and room names
pub const MAX_NAME_LEN: usize = 32;

/// Validation failures for domain values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Name must be at most {MAX_NAME_LEN} characters")]
    NameTooLong,
    #[error("Message content must not be empty")]
    EmptyContent,
}

fn validate_name(value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyName);
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::NameTooLong);
    }
    Ok(())
}

/// A registered user's name, unique per chat server instance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        validate_name(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A room's name, unique per chat server instance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        validate_name(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An immutable chat message inside a room's log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub kind: MessageKind,
    pub origin: Username,
    /// Only set for unicast messages
    pub destination: Option<Username>,
    pub content: String,
    /// Store-wide sequence number; log order is unambiguous even when
    /// wall-clock seconds collide
    pub seq: u64,
    /// Unix timestamp (seconds) the message was assigned, clamped
    /// non-decreasing per room
    pub sent_at_secs: i64,
    /// Sortable wire encoding of `sent_at_secs`
    pub timestamp: String,
}

impl ChatMessage {
    /// Visibility filter shared by the join snapshot and both receive
    /// operations: broadcasts, plus unicasts addressed to `user`.
    pub fn visible_to(&self, user: &Username) -> bool {
        match self.kind {
            MessageKind::Broadcast => true,
            MessageKind::Unicast => self.destination.as_ref() == Some(user),
        }
    }

    pub fn to_dto(&self) -> MessageDto {
        MessageDto {
            kind: self.kind,
            origin: self.origin.as_str().to_string(),
            destination: self.destination.as_ref().map(|u| u.as_str().to_string()),
            content: self.content.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// Validate message content at the boundary
pub fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::EmptyContent);
    }
    Ok(())
}
