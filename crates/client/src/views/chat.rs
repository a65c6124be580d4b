//! Chat page: chat list, live message history, and the send box.
//!
//! Message history and hub pushes both land in the global message store;
//! this view renders the store and drives the HTTP/hub operations.

use dioxus::prelude::*;

use chatline_shared::{Chat, Message};

use crate::auth_session::AuthContext;
use crate::hub;
use crate::routes::{use_route_guard, Route};
use crate::stores::MESSAGES;

#[component]
pub fn ChatView() -> Element {
    use_route_guard();

    let auth = use_context::<AuthContext>();
    let nav = use_navigator();

    let selected_chat = use_signal(|| None::<Chat>);
    let mut draft = use_signal(String::new);
    let mut editing = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let chats = use_resource(move || async move {
        let Some(user_id) = auth.user_id() else {
            return Err("not signed in".to_string());
        };
        auth.client()
            .chats_for_user(&user_id)
            .await
            .map_err(|e| e.to_string())
    });

    let username = auth.username().unwrap_or_default();
    let my_user_id = auth.user_id();

    let hub_label = match hub::connection_state() {
        hub::ConnectionState::Connected => "connected",
        hub::ConnectionState::Connecting | hub::ConnectionState::Reconnecting { .. } => {
            "connecting"
        }
        hub::ConnectionState::Disconnected => "offline",
        hub::ConnectionState::Failed { .. } => "failed",
    };

    let send = move |evt: FormEvent| {
        evt.prevent_default();
        let content = draft.cloned();
        if content.trim().is_empty() {
            return;
        }
        let Some(chat) = selected_chat.cloned() else {
            return;
        };
        let Some(user_id) = auth.user_id() else {
            return;
        };
        let editing_id = editing.cloned();
        spawn(async move {
            let client = auth.client();
            // Sends and edits persist over HTTP; the hub carries the
            // broadcast. The store deduplicates the echo by id.
            let result = match editing_id.as_deref() {
                Some(message_id) => client.edit_message(&chat.id, message_id, &content).await,
                None => client.send_message(&chat.id, &user_id, &content).await,
            };
            match result {
                Ok(message) => {
                    {
                        let mut store = MESSAGES.write();
                        let entry = store.entry(chat.id.clone()).or_default();
                        if editing_id.is_some() {
                            entry.apply_edit(&message);
                        } else {
                            entry.add_message(message.clone());
                        }
                    }
                    if editing_id.is_none() {
                        if let Some(handle) = hub::handle() {
                            if let Err(e) =
                                handle.send_message(&chat.id, &user_id, &message.content)
                            {
                                crate::log_warn!("broadcast skipped: {}", e);
                            }
                        }
                    }
                    draft.set(String::new());
                    editing.set(None);
                    error.set(None);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let mut auth_for_logout = auth;
    let logout = move |_| {
        auth_for_logout.logout();
        nav.replace(Route::Login {});
    };

    let chat_entries: Vec<Chat> = chats
        .read()
        .as_ref()
        .and_then(|res| res.as_ref().ok())
        .cloned()
        .unwrap_or_default();
    let chats_error: Option<String> = chats
        .read()
        .as_ref()
        .and_then(|res| res.as_ref().err())
        .cloned();
    let chats_loading = chats.read().is_none();

    // Current chat's messages, straight from the store
    let current_messages: Vec<Message> = selected_chat
        .read()
        .as_ref()
        .and_then(|chat| MESSAGES.read().get(&chat.id).map(|c| c.messages.clone()))
        .unwrap_or_default();

    rsx! {
        div { class: "chat-page",
            header { class: "chat-header",
                span { class: "chat-user", "{username}" }
                span { class: "chat-hub-state", "{hub_label}" }
                button { onclick: logout, "Log out" }
            }
            div { class: "chat-body",
                aside { class: "chat-list",
                    if let Some(message) = chats_error {
                        p { class: "error", "{message}" }
                    } else if chats_loading {
                        p { "Loading chats..." }
                    }
                    for chat in chat_entries {
                        button {
                            key: "{chat.id}",
                            class: "chat-entry",
                            onclick: {
                                let chat = chat.clone();
                                move |_| open_chat(auth, selected_chat, error, chat.clone())
                            },
                            "{chat.title()}"
                        }
                    }
                }
                main { class: "chat-messages",
                    if let Some(message) = error.cloned() {
                        p { class: "error", "{message}" }
                    }
                    for msg in current_messages {
                        div { key: "{msg.id}", class: "message",
                            span { class: "message-author", "{msg.user_id}" }
                            span { class: "message-content", "{msg.content}" }
                            if Some(&msg.user_id) == my_user_id.as_ref() {
                                button {
                                    class: "message-action",
                                    onclick: {
                                        let id = msg.id.clone();
                                        let content = msg.content.clone();
                                        move |_| {
                                            editing.set(Some(id.clone()));
                                            draft.set(content.clone());
                                        }
                                    },
                                    "edit"
                                }
                                button {
                                    class: "message-action",
                                    onclick: {
                                        let chat_id = msg.chat_id.clone();
                                        let id = msg.id.clone();
                                        move |_| {
                                            delete_message(auth, error, chat_id.clone(), id.clone())
                                        }
                                    },
                                    "delete"
                                }
                            }
                        }
                    }
                    form { class: "chat-send", onsubmit: send,
                        input {
                            placeholder: "Write a message",
                            value: "{draft}",
                            oninput: move |evt| draft.set(evt.value()),
                        }
                        if editing.read().is_some() {
                            button {
                                r#type: "button",
                                onclick: move |_| {
                                    editing.set(None);
                                    draft.set(String::new());
                                },
                                "Cancel edit"
                            }
                        }
                        button {
                            r#type: "submit",
                            disabled: selected_chat.read().is_none(),
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

/// Switch the active chat: move the hub membership over and fetch the
/// history into the store.
fn open_chat(
    auth: AuthContext,
    mut selected: Signal<Option<Chat>>,
    mut error: Signal<Option<String>>,
    chat: Chat,
) {
    let Some(user_id) = auth.user_id() else {
        return;
    };
    let previous = selected.read().as_ref().map(|c| c.id.clone());
    if previous.as_deref() == Some(chat.id.as_str()) {
        return;
    }

    // Best effort while disconnected; the hub layer logs the warning and
    // the join happens again on reselect.
    if let Some(handle) = hub::handle() {
        if let Some(previous_id) = previous {
            let _ = handle.leave_chat(&previous_id, &user_id);
        }
        if let Err(e) = handle.join_chat(&chat.id, &user_id) {
            crate::log_warn!("join skipped: {}", e);
        }
    }

    let chat_id = chat.id.clone();
    selected.set(Some(chat));
    spawn(async move {
        match auth.client().messages_for_chat(&chat_id).await {
            Ok(history) => {
                MESSAGES
                    .write()
                    .entry(chat_id.clone())
                    .or_default()
                    .set_history(history);
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    });
}

fn delete_message(
    auth: AuthContext,
    mut error: Signal<Option<String>>,
    chat_id: String,
    message_id: String,
) {
    spawn(async move {
        match auth.client().delete_message(&chat_id, &message_id).await {
            Ok(()) => {
                if let Some(chat) = MESSAGES.write().get_mut(&chat_id) {
                    chat.apply_delete(&message_id);
                }
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    });
}
