//! HTTP API endpoint handlers.
//!
//! Handlers translate between wire DTOs and the store's domain types; all
//! state logic lives in the store.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use parlor_shared::wire::{
    Ack, CreateRoomRequest, JoinRoomRequest, JoinRoomResponse, MessageDto, ReceiveQuery,
    RegisterUserRequest, RegisterUserResponse, SendMessageRequest, SendMessageResponse,
};

use crate::error::ChatError;

use super::state::AppState;

/// Register a username; the ack carries the server clock so the client can
/// seed its polling cursor without trusting its own clock
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Json<RegisterUserResponse>, ChatError> {
    state.store.register_user(&req.username).await?;
    Ok(Json(RegisterUserResponse {
        message: format!("User '{}' registered.", req.username),
        server_time: state.store.current_timestamp(),
    }))
}

/// Unregister a username, leaving any occupied room
pub async fn unregister_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Ack>, ChatError> {
    state.store.unregister_user(&username).await?;
    Ok(Json(Ack {
        message: format!("User '{}' unregistered.", username),
    }))
}

/// Create a room
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<Ack>, ChatError> {
    state.store.create_room(&req.room).await?;
    Ok(Json(Ack {
        message: format!("Room '{}' created.", req.room),
    }))
}

/// List all room names
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.store.list_rooms().await)
}

/// List the members of a room
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<Vec<String>>, ChatError> {
    Ok(Json(state.store.list_users(&room).await?))
}

/// Join a room; returns the member list and the recent visible history
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Json(req): Json<JoinRoomRequest>,
) -> Result<Json<JoinRoomResponse>, ChatError> {
    let snapshot = state.store.join_room(&req.username, &room).await?;
    Ok(Json(JoinRoomResponse {
        users: snapshot.users,
        messages: snapshot.messages.iter().map(|m| m.to_dto()).collect(),
    }))
}

/// Send a broadcast or unicast message into a room
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ChatError> {
    let message = state
        .store
        .send_message(&req.username, &room, &req.content, req.recipient.as_deref())
        .await?;
    Ok(Json(SendMessageResponse {
        timestamp: message.timestamp,
    }))
}

/// Fetch a member's visible messages; with `since`, only strictly newer ones
pub async fn receive_messages(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    Query(query): Query<ReceiveQuery>,
) -> Result<Json<Vec<MessageDto>>, ChatError> {
    let messages = match &query.since {
        Some(since) => {
            state
                .store
                .receive_new_messages(&query.username, &room, since)
                .await?
        }
        None => state.store.receive_messages(&query.username, &room).await?,
    };
    Ok(Json(messages.iter().map(|m| m.to_dto()).collect()))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
