//! chatline client: a Dioxus chat application.
//!
//! The client talks to two external services: a REST API for auth and
//! chat/message CRUD, and a push-messaging hub for real-time delivery.

pub mod api_client;
pub mod auth_session;
pub mod hub;
pub mod logging;
pub mod routes;
pub mod storage;
pub mod stores;
pub mod views;

pub use api_client::ApiClient;
pub use auth_session::{AuthContext, AuthProvider};
pub use routes::Route;
