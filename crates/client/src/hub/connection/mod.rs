//! Hub connection primitives: state, reconnect policy, and the sending
//! handle. The platform-specific transport lives in the sibling modules.


use chatline_shared::{ClientInvocation, HubError};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;

/// Connection state of the hub link.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
    Failed { reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(
            self,
            ConnectionState::Connecting | ConnectionState::Reconnecting { .. }
        )
    }
}

/// Automatic-reconnect policy. Drops are retried with exponential backoff;
/// callers never drive reconnection themselves.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Maximum number of reconnect attempts (0 = infinite)
    pub max_attempts: u32,
    /// Initial delay in milliseconds
    pub initial_delay_ms: u32,
    /// Maximum delay in milliseconds
    pub max_delay_ms: u32,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 1.5,
        }
    }
}

impl ReconnectConfig {
    /// Calculate delay for a given attempt number
    pub fn delay_for_attempt(&self, attempt: u32) -> u32 {
        let delay = self.initial_delay_ms as f32 * self.backoff_multiplier.powi(attempt as i32);
        (delay as u32).min(self.max_delay_ms)
    }
}

/// Handle for invoking hub methods through the connection.
#[derive(Clone)]
pub struct HubHandle {
    sender: UnboundedSender<ClientInvocation>,
    state: Signal<ConnectionState>,
}

impl HubHandle {
    pub(crate) fn new(sender: UnboundedSender<ClientInvocation>, state: Signal<ConnectionState>) -> Self {
        Self { sender, state }
    }

    pub fn state(&self) -> ConnectionState {
        self.state.read().clone()
    }

    /// Join a chat's broadcast group.
    pub fn join_chat(&self, chat_id: &str, user_id: &str) -> Result<(), HubError> {
        self.invoke(ClientInvocation::JoinChat {
            chat_id: chat_id.to_string(),
            user_id: user_id.to_string(),
        })
    }

    /// Leave a chat's broadcast group.
    pub fn leave_chat(&self, chat_id: &str, user_id: &str) -> Result<(), HubError> {
        self.invoke(ClientInvocation::LeaveChat {
            chat_id: chat_id.to_string(),
            user_id: user_id.to_string(),
        })
    }

    /// Broadcast a message to a chat.
    pub fn send_message(
        &self,
        chat_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<(), HubError> {
        self.invoke(ClientInvocation::SendMessage {
            chat_id: chat_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
        })
    }

    fn invoke(&self, invocation: ClientInvocation) -> Result<(), HubError> {
        dispatch_invocation(&self.state.read(), &invocation, &self.sender)
    }
}

/// Queue an invocation for the write task. Invocations made while the link
/// is not established never reach the transport.
pub(crate) fn dispatch_invocation(
    state: &ConnectionState,
    invocation: &ClientInvocation,
    sender: &UnboundedSender<ClientInvocation>,
) -> Result<(), HubError> {
    if !state.is_connected() {
        crate::log_warn!(
            "{} dropped: hub is {:?}",
            invocation.target_name(),
            state
        );
        return Err(HubError::NotConnected);
    }
    sender
        .unbounded_send(invocation.clone())
        .map_err(|_| HubError::ChannelClosed)
}

// Include platform-specific transport
#[cfg(target_arch = "wasm32")]
mod connection_wasm;
#[cfg(target_arch = "wasm32")]
pub use connection_wasm::HubConnection;

#[cfg(not(target_arch = "wasm32"))]
mod connection_native;
#[cfg(not(target_arch = "wasm32"))]
pub use connection_native::HubConnection;
