//! Landing view; the route guard forwards to the chat or the login form.

use dioxus::prelude::*;

use crate::routes::use_route_guard;

#[component]
pub fn Home() -> Element {
    use_route_guard();

    rsx! {
        div { class: "page page-center", "Redirecting..." }
    }
}
