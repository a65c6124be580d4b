use super::*;

#[test]
fn hub_url_carries_the_token_as_a_query_parameter() {
    assert_eq!(
        hub_url("ws://localhost:5000/chatHub", "tok1").unwrap(),
        "ws://localhost:5000/chatHub?access_token=tok1"
    );
}

#[test]
fn hub_url_reflects_a_token_change_between_attempts() {
    // The connection loop re-invokes its URL builder on every attempt; a
    // token refreshed in between must show up in the next URL.
    let token = std::cell::Cell::new("old-token");
    let build = || hub_url("wss://chat.example.com/chatHub", token.get());

    let first = build().unwrap();
    token.set("new-token");
    let second = build().unwrap();

    assert!(first.ends_with("access_token=old-token"));
    assert!(second.ends_with("access_token=new-token"));
}

#[test]
fn hub_url_encodes_the_token() {
    let url = hub_url("ws://localhost:5000/chatHub", "a b").unwrap();
    assert!(url.contains("access_token=a+b"));
}

#[test]
fn hub_url_rejects_an_invalid_base() {
    assert_eq!(hub_url("not a url", "tok"), None);
}
