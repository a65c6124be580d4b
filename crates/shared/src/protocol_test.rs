use serde_json::json;

use super::*;

#[test]
fn join_chat_serializes_with_target_and_arguments() {
    let invocation = ClientInvocation::JoinChat {
        chat_id: "7".into(),
        user_id: "42".into(),
    };
    let value = serde_json::to_value(&invocation).unwrap();
    assert_eq!(
        value,
        json!({"target": "JoinChat", "arguments": {"chatId": "7", "userId": "42"}})
    );
}

#[test]
fn send_message_carries_string_identifiers_and_content() {
    let invocation = ClientInvocation::SendMessage {
        chat_id: "7".into(),
        user_id: "42".into(),
        content: "hello".into(),
    };
    let value = serde_json::to_value(&invocation).unwrap();
    assert_eq!(
        value,
        json!({
            "target": "SendMessage",
            "arguments": {"chatId": "7", "userId": "42", "content": "hello"}
        })
    );
}

#[test]
fn target_name_matches_the_wire_name() {
    let invocation = ClientInvocation::LeaveChat {
        chat_id: "7".into(),
        user_id: "42".into(),
    };
    assert_eq!(invocation.target_name(), "LeaveChat");
    assert_eq!(
        serde_json::to_value(&invocation).unwrap()["target"],
        "LeaveChat"
    );
}

#[test]
fn receive_message_event_parses() {
    let frame = json!({
        "target": "ReceiveMessage",
        "arguments": {
            "message": {"id": "m1", "chatId": "c1", "userId": "u1", "content": "hi"}
        }
    });
    match serde_json::from_value::<HubEvent>(frame).unwrap() {
        HubEvent::ReceiveMessage { message } => {
            assert_eq!(message.id, "m1");
            assert_eq!(message.chat_id, "c1");
            assert_eq!(message.user_id, "u1");
            assert!(message.created_at.is_none());
        }
        other => panic!("wrong event: {other:?}"),
    }
}

#[test]
fn message_deleted_event_parses() {
    let frame = json!({
        "target": "MessageDeleted",
        "arguments": {"chatId": "c1", "messageId": "m1"}
    });
    match serde_json::from_value::<HubEvent>(frame).unwrap() {
        HubEvent::MessageDeleted {
            chat_id,
            message_id,
        } => {
            assert_eq!(chat_id, "c1");
            assert_eq!(message_id, "m1");
        }
        other => panic!("wrong event: {other:?}"),
    }
}

#[test]
fn user_presence_events_parse() {
    for target in ["UserJoined", "UserLeft"] {
        let frame = json!({
            "target": target,
            "arguments": {"chatId": "c1", "userId": "u1"}
        });
        assert!(serde_json::from_value::<HubEvent>(frame).is_ok());
    }
}

#[test]
fn unknown_target_is_rejected() {
    let frame = json!({"target": "Nonsense", "arguments": {}});
    assert!(serde_json::from_value::<HubEvent>(frame).is_err());
}
