//! Real-time hub client.
//!
//! A single persistent connection per client session carries named
//! invocations out (`JoinChat`, `LeaveChat`, `SendMessage`) and named
//! events in (`ReceiveMessage`, `MessageEdited`, `MessageDeleted`,
//! `UserJoined`, `UserLeft`).
//!
//! # Architecture
//!
//! ```text
//!   HubManager (component)
//!        │ owns
//!   HubConnection ── reconnect loop, re-reads the token per attempt
//!        │ decodes
//!   HubEvent ──► message store + HUB_EVENTS signal
//!        ▲
//!   HubHandle ── join/leave/send, guarded by ConnectionState
//! ```
//!
//! Components read the message store (and `HUB_EVENTS` where they need the
//! raw event stream); they never touch the transport directly.

mod connection;
mod manager;

pub use connection::{ConnectionState, HubConnection, HubHandle, ReconnectConfig};
pub use manager::{
    connection_state, disconnect, handle, hub_url, is_connected, HubManager, HUB_EVENTS, HUB_PATH,
};
