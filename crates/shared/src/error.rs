//! Error taxonomy for the client modules.

use thiserror::Error;

/// Transport and response-layer failures. These are propagated to callers
/// unchanged; the view layer decides what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Network(String),
    Http { status: u16, body: String },
    Deserialize(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            ApiError::Deserialize(msg) => write!(f, "Deserialization error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Failures of the login/register flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// Empty credentials are rejected locally, before any network call.
    #[error("username and password must not be empty")]
    EmptyCredentials,
    /// The server answered success but the payload lacks a required field.
    #[error("invalid server response: {0}")]
    InvalidResponse(&'static str),
    #[error("registration failed: {0}")]
    RegistrationFailed(ApiError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failures of a hub invocation, surfaced to the caller instead of being
/// logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("hub connection is not established")]
    NotConnected,
    #[error("hub connection channel closed")]
    ChannelClosed,
}
