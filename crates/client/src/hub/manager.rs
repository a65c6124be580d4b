//! Owns the single hub connection for the client session.
//!
//! Inbound events are applied to the message store and appended to
//! `HUB_EVENTS`; components read those reactively instead of touching the
//! transport.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::rc::Rc;

use chatline_shared::HubEvent;
use dioxus::prelude::*;

use super::connection::{ConnectionState, HubConnection, HubHandle};
use crate::auth_session::AuthContext;
use crate::stores::MESSAGES;

/// Path of the hub endpoint on the configured server.
pub const HUB_PATH: &str = "/chatHub";

/// Every event the hub pushed this session, in delivery order.
pub static HUB_EVENTS: GlobalSignal<Vec<HubEvent>> = Signal::global(Vec::new);

/// Mirrored state of the active connection.
pub static HUB_STATE: GlobalSignal<ConnectionState> =
    Signal::global(|| ConnectionState::Disconnected);

/// Handle of the active connection, if any.
pub static HUB_HANDLE: GlobalSignal<Option<HubHandle>> = Signal::global(|| None);

/// Current state of the hub link.
pub fn connection_state() -> ConnectionState {
    HUB_STATE.read().clone()
}

pub fn is_connected() -> bool {
    connection_state().is_connected()
}

/// Handle for invoking hub methods, when a connection exists.
pub fn handle() -> Option<HubHandle> {
    HUB_HANDLE.read().clone()
}

/// Tear down the published connection state (used during logout). The
/// manager drops the connection itself when it sees the session change.
pub fn disconnect() {
    HUB_HANDLE.write().take();
    HUB_EVENTS.write().clear();
    *HUB_STATE.write() = ConnectionState::Disconnected;
}

/// Build the hub endpoint URL for one (re)connect attempt. Callers pass
/// the token they read at call time, which is what keeps reconnects from
/// reusing a stale one.
pub fn hub_url(ws_base: &str, token: &str) -> Option<String> {
    let mut url = url::Url::parse(ws_base).ok()?;
    url.query_pairs_mut().append_pair("access_token", token);
    Some(url.to_string())
}

/// Component that owns the hub connection for the session.
#[component]
pub fn HubManager(children: Element) -> Element {
    let auth = use_context::<AuthContext>();

    let mut active = use_signal(|| None::<Rc<HubConnection>>);
    let mut last_user_id = use_signal(|| None::<String>);

    // Establish/tear down the connection as the session changes
    use_effect(move || {
        let session = auth.session.read().clone();
        let current_user_id = session.as_ref().map(|s| s.user_id.clone());

        if *last_user_id.read() != current_user_id {
            // Different user or logged out; the old connection winds down
            // once dropped here.
            active.write().take();
            HUB_HANDLE.write().take();
            *HUB_STATE.write() = ConnectionState::Disconnected;
            last_user_id.set(current_user_id.clone());
        }

        if session.is_none() || active.read().is_some() {
            return;
        }

        // Token and endpoint are re-read on every (re)connect attempt
        let auth_for_url = auth;
        let url_builder = move || {
            let token = auth_for_url.token()?;
            hub_url(&auth_for_url.ws_url(HUB_PATH), &token)
        };

        let on_event = move |event: HubEvent| {
            apply_event(&event);
            HUB_EVENTS.write().push(event);
        };

        let connection = HubConnection::new(url_builder, on_event);
        *HUB_HANDLE.write() = Some(connection.handle());
        active.set(Some(Rc::new(connection)));
    });

    // Mirror the connection state into the global
    use_effect(move || {
        if let Some(connection) = active.read().as_ref() {
            let state = connection.state.read().clone();
            *HUB_STATE.write() = state;
        }
    });

    children
}

/// Apply a hub event to the message store. Events about messages or chats
/// this client does not hold are ignored.
fn apply_event(event: &HubEvent) {
    match event {
        HubEvent::ReceiveMessage { message } => {
            MESSAGES
                .write()
                .entry(message.chat_id.clone())
                .or_default()
                .add_message(message.clone());
        }
        HubEvent::MessageEdited { message } => {
            if let Some(chat) = MESSAGES.write().get_mut(&message.chat_id) {
                chat.apply_edit(message);
            }
        }
        HubEvent::MessageDeleted {
            chat_id,
            message_id,
        } => {
            if let Some(chat) = MESSAGES.write().get_mut(chat_id) {
                chat.apply_delete(message_id);
            }
        }
        HubEvent::UserJoined { chat_id, user_id } => {
            crate::log_info!("user {} joined chat {}", user_id, chat_id);
        }
        HubEvent::UserLeft { chat_id, user_id } => {
            crate::log_info!("user {} left chat {}", user_id, chat_id);
        }
    }
}
