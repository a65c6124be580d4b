use super::*;

#[test]
fn unauthenticated_chat_navigation_redirects_to_login() {
    assert_eq!(
        resolve_navigation(&Route::ChatView {}, false),
        Some(Route::Login {})
    );
}

#[test]
fn authenticated_guest_views_redirect_to_chat() {
    assert_eq!(
        resolve_navigation(&Route::Login {}, true),
        Some(Route::ChatView {})
    );
    assert_eq!(
        resolve_navigation(&Route::Register {}, true),
        Some(Route::ChatView {})
    );
}

#[test]
fn allowed_navigations_pass_through() {
    assert_eq!(resolve_navigation(&Route::ChatView {}, true), None);
    assert_eq!(resolve_navigation(&Route::Login {}, false), None);
    assert_eq!(resolve_navigation(&Route::Register {}, false), None);
}

#[test]
fn landing_route_forwards_by_auth_state() {
    assert_eq!(
        resolve_navigation(&Route::Home {}, true),
        Some(Route::ChatView {})
    );
    assert_eq!(
        resolve_navigation(&Route::Home {}, false),
        Some(Route::Login {})
    );
}
