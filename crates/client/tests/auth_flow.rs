//! End-to-end auth flow against a local stub of the chat API.

#![cfg(not(target_arch = "wasm32"))]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};

use chatline_client::api_client::ApiClient;
use chatline_client::auth_session::{login_request, register_request};
use chatline_shared::{AuthError, LoginRequest, RegisterRequest};

/// Everything the stub server saw, for assertions.
#[derive(Clone, Default)]
struct Recorded {
    logins: Arc<Mutex<Vec<LoginRequest>>>,
    registers: Arc<Mutex<Vec<RegisterRequest>>>,
    chat_auth_headers: Arc<Mutex<Vec<Option<String>>>>,
}

async fn register_handler(
    State(recorded): State<Recorded>,
    Json(request): Json<RegisterRequest>,
) -> StatusCode {
    recorded.registers.lock().unwrap().push(request);
    StatusCode::CREATED
}

async fn login_handler(
    State(recorded): State<Recorded>,
    Json(request): Json<LoginRequest>,
) -> Json<serde_json::Value> {
    let username = request.username.clone();
    recorded.logins.lock().unwrap().push(request);
    Json(serde_json::json!({
        "token": "tok-1",
        "userId": "u-1",
        "username": username,
    }))
}

async fn chats_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
) -> Json<Vec<serde_json::Value>> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    recorded.chat_auth_headers.lock().unwrap().push(auth_header);
    Json(Vec::new())
}

async fn spawn_stub() -> Result<(String, Recorded)> {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/user/register", post(register_handler))
        .route("/user/login", post(login_handler))
        .route("/chat/:user_id/chats", get(chats_handler))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok((format!("http://{addr}"), recorded))
}

#[tokio::test]
async fn register_logs_in_with_the_same_credentials() -> Result<()> {
    let (base, recorded) = spawn_stub().await?;
    let client = ApiClient::new().with_base_url(base);

    let session = register_request(&client, "alice", "pw1").await?;

    assert_eq!(session.token, "tok-1");
    assert_eq!(session.user_id, "u-1");
    assert_eq!(session.username, "alice");

    let registers = recorded.registers.lock().unwrap();
    assert_eq!(registers.len(), 1);
    assert_eq!(registers[0].username, "alice");

    let logins = recorded.logins.lock().unwrap();
    assert_eq!(logins.len(), 1);
    assert_eq!(logins[0].username, "alice");
    assert_eq!(logins[0].password, "pw1");
    Ok(())
}

#[tokio::test]
async fn authenticated_requests_carry_the_session_token() -> Result<()> {
    let (base, recorded) = spawn_stub().await?;
    let client = ApiClient::new().with_base_url(base.clone());

    let session = login_request(&client, "alice", "pw1").await?;

    // A client rebuilt from the session carries its token on every request
    let authed = ApiClient::new()
        .with_base_url(base)
        .with_token(Some(session.token.clone()));
    authed.chats_for_user(&session.user_id).await?;

    let headers = recorded.chat_auth_headers.lock().unwrap();
    assert_eq!(headers.as_slice(), [Some("Bearer tok-1".to_string())]);
    Ok(())
}

#[tokio::test]
async fn unauthenticated_requests_send_no_authorization_header() -> Result<()> {
    let (base, recorded) = spawn_stub().await?;
    let client = ApiClient::new().with_base_url(base);

    client.chats_for_user("u-1").await?;

    let headers = recorded.chat_auth_headers.lock().unwrap();
    assert_eq!(headers.as_slice(), [None]);
    Ok(())
}

#[tokio::test]
async fn empty_credentials_never_reach_the_server() -> Result<()> {
    let (base, recorded) = spawn_stub().await?;
    let client = ApiClient::new().with_base_url(base);

    let result = login_request(&client, "", "pw1").await;
    assert!(matches!(result, Err(AuthError::EmptyCredentials)));

    let result = login_request(&client, "alice", "").await;
    assert!(matches!(result, Err(AuthError::EmptyCredentials)));

    assert!(recorded.logins.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn login_without_a_token_in_the_response_fails() -> Result<()> {
    // A stub whose login response is missing the token field
    let app = Router::new().route(
        "/user/login",
        post(|| async { Json(serde_json::json!({"userId": "u-1"})) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::new().with_base_url(format!("http://{addr}"));
    let result = login_request(&client, "alice", "pw1").await;
    assert!(matches!(result, Err(AuthError::InvalidResponse(_))));
    Ok(())
}

#[tokio::test]
async fn failed_registration_does_not_attempt_login() -> Result<()> {
    let logins = Arc::new(Mutex::new(0u32));
    let logins_for_handler = logins.clone();

    let app = Router::new()
        .route(
            "/user/register",
            post(|| async { (StatusCode::CONFLICT, "username taken") }),
        )
        .route(
            "/user/login",
            post(move || {
                let logins = logins_for_handler.clone();
                async move {
                    *logins.lock().unwrap() += 1;
                    Json(serde_json::json!({"token": "tok", "userId": "u"}))
                }
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::new().with_base_url(format!("http://{addr}"));
    let result = register_request(&client, "alice", "pw1").await;
    assert!(matches!(result, Err(AuthError::RegistrationFailed(_))));
    assert_eq!(*logins.lock().unwrap(), 0);
    Ok(())
}
