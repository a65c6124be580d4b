//! Wire contract for the real-time hub connection.
//!
//! Both directions carry JSON text frames of the shape
//! `{"target": <name>, "arguments": {...}}`: the client invokes named hub
//! methods, the server pushes named events.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Hub methods the client invokes. Identifiers are strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "target", content = "arguments")]
pub enum ClientInvocation {
    #[serde(rename_all = "camelCase")]
    JoinChat { chat_id: String, user_id: String },
    #[serde(rename_all = "camelCase")]
    LeaveChat { chat_id: String, user_id: String },
    #[serde(rename_all = "camelCase")]
    SendMessage {
        chat_id: String,
        user_id: String,
        content: String,
    },
}

impl ClientInvocation {
    /// The hub method name as it appears on the wire.
    pub fn target_name(&self) -> &'static str {
        match self {
            ClientInvocation::JoinChat { .. } => "JoinChat",
            ClientInvocation::LeaveChat { .. } => "LeaveChat",
            ClientInvocation::SendMessage { .. } => "SendMessage",
        }
    }
}

/// Events the server pushes over the hub connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "target", content = "arguments")]
pub enum HubEvent {
    ReceiveMessage { message: Message },
    MessageEdited { message: Message },
    #[serde(rename_all = "camelCase")]
    MessageDeleted { chat_id: String, message_id: String },
    #[serde(rename_all = "camelCase")]
    UserJoined { chat_id: String, user_id: String },
    #[serde(rename_all = "camelCase")]
    UserLeft { chat_id: String, user_id: String },
}
