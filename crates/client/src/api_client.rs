//! HTTP API client for the chat server.

#[cfg(test)]
#[path = "api_client_test.rs"]
mod api_client_test;

use chatline_shared::{
    ApiError, Chat, EditMessageRequest, LoginRequest, LoginResponse, Message, RegisterRequest,
    SendMessageRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP client for the chat REST API.
///
/// Carries the bearer token it was built with; build a fresh client after
/// the session changes so requests always reflect the current token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: String::new(),
            token: None,
        }
    }

    /// Set the base URL for API requests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attach a bearer token. Requests without one go out unauthenticated
    /// and the server decides whether to reject them.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    fn authorize(&self, rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => rb.header("Authorization", bearer(token)),
            None => rb,
        }
    }

    /// Make a GET request and decode a JSON response
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        let rb = self.authorize(self.client.get(self.url(path)));

        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();

        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    /// Make a POST request with a JSON body
    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let rb = self.client.post(self.url(path));
        self.send_json(rb, body).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let rb = self.client.put(self.url(path));
        self.send_json(rb, body).await
    }

    /// Make a DELETE request; the response body is discarded
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let rb = self.authorize(self.client.delete(self.url(path)));

        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();

        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }

        Ok(())
    }

    async fn send_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        rb: reqwest::RequestBuilder,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let body_bytes =
            serde_json::to_vec(body).map_err(|e| ApiError::Deserialize(e.to_string()))?;

        let resp = self
            .authorize(rb)
            .body(body_bytes)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }

        if text.is_empty() {
            serde_json::from_str("null").map_err(|e| ApiError::Deserialize(e.to_string()))
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))
        }
    }

    // --- REST operations, one per remote endpoint ---

    /// Sign in. The raw response is validated by the session layer.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post_json(
            LOGIN_ENDPOINT,
            &LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    /// Create an account. Only the status matters; the response body shape
    /// is up to the server and is not decoded.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let body_bytes =
            serde_json::to_vec(&body).map_err(|e| ApiError::Deserialize(e.to_string()))?;

        let resp = self
            .authorize(self.client.post(self.url(REGISTER_ENDPOINT)))
            .body(body_bytes)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }

        Ok(())
    }

    /// List the chats the user participates in.
    pub async fn chats_for_user(&self, user_id: &str) -> Result<Vec<Chat>, ApiError> {
        self.get_json(&chats_endpoint(user_id)).await
    }

    /// List the message history of a chat.
    pub async fn messages_for_chat(&self, chat_id: &str) -> Result<Vec<Message>, ApiError> {
        self.get_json(&messages_endpoint(chat_id)).await
    }

    /// Persist a new message.
    pub async fn send_message(
        &self,
        chat_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<Message, ApiError> {
        self.post_json(
            &add_message_endpoint(chat_id, user_id),
            &SendMessageRequest {
                content: content.to_string(),
            },
        )
        .await
    }

    /// Persist an edit to an existing message.
    pub async fn edit_message(
        &self,
        chat_id: &str,
        message_id: &str,
        content: &str,
    ) -> Result<Message, ApiError> {
        self.put_json(
            &message_endpoint(chat_id, message_id),
            &EditMessageRequest {
                content: content.to_string(),
            },
        )
        .await
    }

    /// Delete a message.
    pub async fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<(), ApiError> {
        self.delete(&message_endpoint(chat_id, message_id)).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) const LOGIN_ENDPOINT: &str = "/user/login";
pub(crate) const REGISTER_ENDPOINT: &str = "/user/register";

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub(crate) fn chats_endpoint(user_id: &str) -> String {
    format!("/chat/{user_id}/chats")
}

pub(crate) fn messages_endpoint(chat_id: &str) -> String {
    format!("/message/{chat_id}/messages")
}

pub(crate) fn add_message_endpoint(chat_id: &str, user_id: &str) -> String {
    format!("/message/{chat_id}/messages/{user_id}/Add")
}

pub(crate) fn message_endpoint(chat_id: &str, message_id: &str) -> String {
    format!("/message/{chat_id}/messages/{message_id}")
}
