//! Global message store.
//!
//! Single source of truth for chat messages: the REST history fetch and
//! the hub push events both land here, and views render from here.

#[cfg(test)]
#[path = "messages_test.rs"]
mod messages_test;

use std::collections::HashMap;

use chatline_shared::Message;
use dioxus::prelude::*;

/// Messages for a single chat.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChatMessages {
    /// All messages in this chat, sorted by created_at ascending.
    pub messages: Vec<Message>,
    /// Whether the history has been fetched over HTTP.
    pub is_loaded: bool,
}

/// Global message store keyed by chat id.
pub static MESSAGES: GlobalSignal<HashMap<String, ChatMessages>> = Signal::global(HashMap::new);

impl ChatMessages {
    /// Add a message, maintaining sort order by created_at.
    /// Returns false if a message with the same id already exists.
    pub fn add_message(&mut self, msg: Message) -> bool {
        if self.messages.iter().any(|m| m.id == msg.id) {
            return false;
        }

        let pos = self
            .messages
            .binary_search_by(|m| m.created_at.cmp(&msg.created_at))
            .unwrap_or_else(|pos| pos);

        self.messages.insert(pos, msg);
        true
    }

    /// Replace the content of an existing message. An edit for an id this
    /// client has never seen is ignored; returns whether anything changed.
    pub fn apply_edit(&mut self, edited: &Message) -> bool {
        match self.messages.iter_mut().find(|m| m.id == edited.id) {
            Some(existing) => {
                existing.content = edited.content.clone();
                true
            }
            None => false,
        }
    }

    /// Remove a message by id; an unknown id is ignored.
    pub fn apply_delete(&mut self, message_id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != message_id);
        self.messages.len() != before
    }

    /// Set the full message history (from a REST fetch) and mark the chat
    /// as loaded.
    pub fn set_history(&mut self, mut messages: Vec<Message>) {
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        self.messages = messages;
        self.is_loaded = true;
    }
}
