//! Session store: the authenticated identity, its persistence, and the
//! login/register/logout operations.

#[cfg(test)]
#[path = "auth_session_test.rs"]
mod auth_session_test;

use chatline_shared::{AuthError, AuthSession, LoginResponse};
use dioxus::prelude::*;

use crate::api_client::ApiClient;
use crate::hub;
use crate::storage;

/// Storage key for the persisted session record (`{token, userId, username}`).
pub const SESSION_KEY: &str = "auth";
/// Storage key for the configured server host.
pub const HOST_KEY: &str = "server_host";

const DEFAULT_HOST: &str = "localhost:5000";

/// Authentication context provided to the app
#[derive(Clone, Copy, Debug)]
pub struct AuthContext {
    pub session: Signal<Option<AuthSession>>,
    pub server_host: Signal<String>,
}

/// Provider component that restores the session before the router renders
/// and keeps storage in sync with the signal afterwards.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let session = use_signal(restore_session);
    let server_host = use_signal(initial_server_host);

    // Mirror the session to persistent storage
    use_effect(move || match session.cloned() {
        Some(sess) => {
            storage::save(SESSION_KEY, &sess);
        }
        None => {
            storage::remove(SESSION_KEY);
        }
    });

    // Mirror the host to persistent storage
    use_effect(move || {
        storage::save(HOST_KEY, &server_host.cloned());
    });

    use_context_provider(|| AuthContext {
        session,
        server_host,
    });

    children
}

/// Restore the persisted session. A record that fails to parse is discarded
/// so the client starts signed out.
fn restore_session() -> Option<AuthSession> {
    match storage::load::<AuthSession>(SESSION_KEY) {
        Some(session) => Some(session),
        None => {
            if storage::exists(SESSION_KEY) {
                crate::log_warn!("discarding unreadable session record");
                storage::remove(SESSION_KEY);
            }
            None
        }
    }
}

fn initial_server_host() -> String {
    if let Some(host) = storage::load::<String>(HOST_KEY) {
        return host;
    }
    // Default to the current origin's host for local development
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        if let Ok(host) = window.location().host() {
            return host;
        }
    }
    DEFAULT_HOST.to_string()
}

impl AuthContext {
    /// Sign in against the remote API and populate the session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let session = login_request(&self.client(), username, password).await?;
        self.session.set(Some(session));
        Ok(())
    }

    /// Create an account, then sign in with the same credentials.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let session = register_request(&self.client(), username, password).await?;
        self.session.set(Some(session));
        Ok(())
    }

    /// Drop the session: tears down the hub connection and removes the
    /// persisted record. The caller navigates back to the login view.
    pub fn logout(&mut self) {
        hub::disconnect();
        storage::remove(SESSION_KEY);
        self.session.set(None);
    }

    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user_id(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.user_id.clone())
    }

    pub fn username(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.username.clone())
    }

    /// An API client carrying the current token. Built per call so a token
    /// change is always reflected in the next request.
    pub fn client(&self) -> ApiClient {
        ApiClient::new()
            .with_base_url(base_url_for(&self.server_host.read()))
            .with_token(self.token())
    }

    /// Construct an API URL for a path on the configured server.
    pub fn api_url(&self, path: &str) -> String {
        join_url(&base_url_for(&self.server_host.read()), path)
    }

    /// Construct the WebSocket counterpart of an API URL.
    pub fn ws_url(&self, path: &str) -> String {
        http_to_ws(&self.api_url(path))
    }
}

/// Local credential check: empty credentials never reach the network.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::EmptyCredentials);
    }
    Ok(())
}

/// Build a session from a login response. The server must return both a
/// token and a user id; the username falls back to the name that was
/// submitted when the server omits it.
pub fn session_from_response(
    response: LoginResponse,
    username: &str,
) -> Result<AuthSession, AuthError> {
    let token = response
        .token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidResponse("missing token"))?;
    let user_id = response
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or(AuthError::InvalidResponse("missing user id"))?;
    let username = response.username.unwrap_or_else(|| username.to_string());
    Ok(AuthSession {
        token,
        user_id,
        username,
    })
}

/// Sign in over HTTP and validate the response.
pub async fn login_request(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<AuthSession, AuthError> {
    validate_credentials(username, password)?;
    let response = client.login(username, password).await?;
    session_from_response(response, username)
}

/// Register over HTTP, then sign in with the same credentials.
pub async fn register_request(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<AuthSession, AuthError> {
    validate_credentials(username, password)?;
    client
        .register(username, password)
        .await
        .map_err(AuthError::RegistrationFailed)?;
    login_request(client, username, password).await
}

/// Normalize the configured host into an http(s) base URL. Local hosts get
/// plain http, anything else https.
pub(crate) fn base_url_for(host: &str) -> String {
    if host.trim().is_empty() {
        return String::new();
    }
    if host.contains("://") {
        return host.trim_end_matches('/').to_string();
    }
    let name = host.split(':').next().unwrap_or(host);
    let is_local = name == "localhost"
        || name == "127.0.0.1"
        || name == "0.0.0.0"
        || name.starts_with("192.168.")
        || name.starts_with("10.");
    if is_local {
        format!("http://{}", host.trim_end_matches('/'))
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if base.is_empty() {
        // No host configured; fall back to same-origin relative paths
        return if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Convert an http(s) URL to its ws(s) counterpart.
pub(crate) fn http_to_ws(url: &str) -> String {
    if url.starts_with("https://") {
        url.replacen("https://", "wss://", 1)
    } else if url.starts_with("http://") {
        url.replacen("http://", "ws://", 1)
    } else {
        // Relative path: prepend the page origin when running in a browser
        #[cfg(target_arch = "wasm32")]
        if let Some(window) = web_sys::window() {
            if let Ok(origin) = window.location().origin() {
                let ws_origin = if origin.starts_with("https://") {
                    origin.replacen("https://", "wss://", 1)
                } else {
                    origin.replacen("http://", "ws://", 1)
                };
                return format!(
                    "{}{}",
                    ws_origin.trim_end_matches('/'),
                    if url.starts_with('/') {
                        url.to_string()
                    } else {
                        format!("/{url}")
                    }
                );
            }
        }
        url.to_string()
    }
}
