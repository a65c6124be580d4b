use chatline_shared::Message;
use chrono::{TimeZone, Utc};

use super::*;

fn message(id: &str, ts: i64) -> Message {
    Message {
        id: id.to_string(),
        chat_id: "c1".to_string(),
        user_id: "u1".to_string(),
        content: format!("message {id}"),
        created_at: Some(Utc.timestamp_opt(ts, 0).unwrap()),
    }
}

#[test]
fn add_message_keeps_messages_sorted() {
    let mut chat = ChatMessages::default();
    assert!(chat.add_message(message("b", 20)));
    assert!(chat.add_message(message("a", 10)));
    assert!(chat.add_message(message("c", 30)));

    let ids: Vec<_> = chat.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn add_message_deduplicates_by_id() {
    let mut chat = ChatMessages::default();
    assert!(chat.add_message(message("a", 10)));
    assert!(!chat.add_message(message("a", 10)));
    assert_eq!(chat.messages.len(), 1);
}

#[test]
fn edit_replaces_content_for_a_known_id() {
    let mut chat = ChatMessages::default();
    chat.add_message(message("a", 10));

    let mut edited = message("a", 10);
    edited.content = "changed".to_string();
    assert!(chat.apply_edit(&edited));
    assert_eq!(chat.messages[0].content, "changed");
}

#[test]
fn edit_for_an_unknown_id_is_ignored() {
    let mut chat = ChatMessages::default();
    chat.add_message(message("a", 10));
    let before = chat.messages.clone();

    let mut edited = message("ghost", 99);
    edited.content = "changed".to_string();
    assert!(!chat.apply_edit(&edited));
    assert_eq!(chat.messages, before);
}

#[test]
fn delete_removes_only_the_named_message() {
    let mut chat = ChatMessages::default();
    chat.add_message(message("a", 10));
    chat.add_message(message("b", 20));

    assert!(chat.apply_delete("a"));
    assert!(!chat.apply_delete("ghost"));

    let ids: Vec<_> = chat.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["b"]);
}

#[test]
fn set_history_sorts_and_marks_loaded() {
    let mut chat = ChatMessages::default();
    assert!(!chat.is_loaded);

    chat.set_history(vec![message("b", 20), message("a", 10)]);
    assert!(chat.is_loaded);

    let ids: Vec<_> = chat.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}
