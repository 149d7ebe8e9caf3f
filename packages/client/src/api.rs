//! Typed HTTP API wrapper around the chat server, discovered via the binder.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use parlor_shared::wire::{
    Ack, CreateRoomRequest, Endpoint, ErrorBody, JoinRoomRequest, JoinRoomResponse, MessageDto,
    RegisterUserRequest, RegisterUserResponse, SendMessageRequest, SendMessageResponse,
};

use crate::error::ClientError;

/// Procedure name used for discovery; any registered name resolves to the
/// same chat server address.
const DISCOVERY_PROCEDURE: &str = "join_room";

/// Chat server API client. Cheap to clone; the underlying HTTP client is
/// shared.
#[derive(Clone)]
pub struct ChatApi {
    base_url: String,
    http: reqwest::Client,
}

impl ChatApi {
    /// Resolve the chat server through the binder. The binder is consulted
    /// only here; every later call goes straight to the resolved address.
    pub async fn discover(binder_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::new();
        let resolved: Option<Endpoint> = http
            .get(format!(
                "{}/api/procedures/{}",
                binder_url, DISCOVERY_PROCEDURE
            ))
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?
            .json()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        let endpoint = resolved.ok_or(ClientError::ServiceUnresolved)?;
        tracing::info!(
            "Resolved chat server at {}:{} via binder",
            endpoint.host,
            endpoint.port
        );
        Ok(Self {
            base_url: endpoint.base_url(),
            http,
        })
    }

    pub async fn register_user(&self, username: &str) -> Result<RegisterUserResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/users", self.base_url))
            .json(&RegisterUserRequest {
                username: username.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        if response.status() == StatusCode::CONFLICT {
            return Err(ClientError::DuplicateUsername(username.to_string()));
        }
        Self::expect_json(response).await
    }

    pub async fn unregister_user(&self, username: &str) -> Result<Ack, ClientError> {
        let response = self
            .http
            .delete(format!("{}/api/users/{}", self.base_url, username))
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::expect_json(response).await
    }

    pub async fn create_room(&self, room: &str) -> Result<Ack, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/rooms", self.base_url))
            .json(&CreateRoomRequest {
                room: room.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::expect_json(response).await
    }

    pub async fn join_room(
        &self,
        username: &str,
        room: &str,
    ) -> Result<JoinRoomResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/rooms/{}/join", self.base_url, room))
            .json(&JoinRoomRequest {
                username: username.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::expect_json(response).await
    }

    pub async fn send_message(
        &self,
        username: &str,
        room: &str,
        content: &str,
        recipient: Option<&str>,
    ) -> Result<SendMessageResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/rooms/{}/messages", self.base_url, room))
            .json(&SendMessageRequest {
                username: username.to_string(),
                content: content.to_string(),
                recipient: recipient.map(|r| r.to_string()),
            })
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::expect_json(response).await
    }

    pub async fn receive_new_messages(
        &self,
        username: &str,
        room: &str,
        since: &str,
    ) -> Result<Vec<MessageDto>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/rooms/{}/messages", self.base_url, room))
            .query(&[("username", username), ("since", since)])
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::expect_json(response).await
    }

    pub async fn list_rooms(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/rooms", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::expect_json(response).await
    }

    pub async fn list_users(&self, room: &str) -> Result<Vec<String>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/rooms/{}/users", self.base_url, room))
            .send()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;
        Self::expect_json(response).await
    }

    /// Decode a success body, or surface the server's error string
    async fn expect_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::Connection(e.to_string()))
        } else {
            let body: ErrorBody = response
                .json()
                .await
                .map_err(|e| ClientError::Connection(e.to_string()))?;
            Err(ClientError::Rejected(body.error))
        }
    }
}
