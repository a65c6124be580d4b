use super::*;

#[test]
fn chats_endpoint_formats_expected_path() {
    assert_eq!(chats_endpoint("u123"), "/chat/u123/chats");
}

#[test]
fn messages_endpoint_formats_expected_path() {
    assert_eq!(messages_endpoint("c7"), "/message/c7/messages");
}

#[test]
fn add_message_endpoint_keeps_the_add_suffix() {
    assert_eq!(
        add_message_endpoint("c7", "u123"),
        "/message/c7/messages/u123/Add"
    );
}

#[test]
fn edit_and_delete_share_the_bare_resource_path() {
    assert_eq!(message_endpoint("c7", "m42"), "/message/c7/messages/m42");
}

#[test]
fn bearer_formats_the_authorization_value() {
    assert_eq!(bearer("tok-1"), "Bearer tok-1");
}

#[test]
fn url_joins_base_and_path() {
    let client = ApiClient::new().with_base_url("http://chat.example.test/");
    assert_eq!(
        client.url("/user/login"),
        "http://chat.example.test/user/login"
    );
    assert_eq!(
        client.url("user/login"),
        "http://chat.example.test/user/login"
    );
}

#[test]
fn url_without_base_stays_relative() {
    let client = ApiClient::new();
    assert_eq!(client.url("user/login"), "/user/login");
    assert_eq!(client.url("/user/login"), "/user/login");
}

#[test]
fn url_passes_absolute_urls_through() {
    let client = ApiClient::new().with_base_url("http://chat.example.test");
    assert_eq!(
        client.url("https://other.example.test/x"),
        "https://other.example.test/x"
    );
}
