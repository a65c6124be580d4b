//! Application routes and the authentication route guard.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::views::{ChatView, Home, Login, Register};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // Landing page forwards to login or chat
    #[route("/")]
    Home {},

    // Guest-only auth routes
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},

    // Authenticated chat view
    #[route("/chat")]
    ChatView {},
}

impl Route {
    /// Views that require an authenticated session.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::ChatView {})
    }

    /// Views only reachable while signed out.
    pub fn requires_guest(&self) -> bool {
        matches!(self, Route::Login {} | Route::Register {})
    }
}

/// Decide whether navigating to `target` is allowed. Returns the redirect
/// target when it is not; `None` lets the navigation through.
pub fn resolve_navigation(target: &Route, authenticated: bool) -> Option<Route> {
    if target.requires_auth() && !authenticated {
        return Some(Route::Login {});
    }
    if target.requires_guest() && authenticated {
        return Some(Route::ChatView {});
    }
    if matches!(target, Route::Home {}) {
        // The landing route always forwards somewhere concrete
        return Some(if authenticated {
            Route::ChatView {}
        } else {
            Route::Login {}
        });
    }
    None
}

/// Apply the route guard for the current view.
///
/// The session is restored synchronously by `AuthProvider` before the
/// router renders, so the decision never races the restore. The effect
/// reads the session signal, which also re-applies the guard when the
/// session changes while the view is mounted (e.g. logout).
pub fn use_route_guard() {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let current = use_route::<Route>();

    use_effect(move || {
        let authenticated = auth.session.read().is_some();
        if let Some(redirect) = resolve_navigation(&current, authenticated) {
            nav.replace(redirect);
        }
    });
}
