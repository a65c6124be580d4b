//! chatline client entry point.
//!
//! The web (wasm32) build is the primary target; a native window is
//! available behind the `desktop` feature.

#![allow(non_snake_case)]

use dioxus::prelude::*;

use chatline_client::auth_session::AuthProvider;
use chatline_client::hub::HubManager;
use chatline_client::routes::Route;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("chatline_client=debug")),
            )
            .init();
    }

    #[cfg(any(target_arch = "wasm32", feature = "desktop"))]
    dioxus::launch(App);

    #[cfg(not(any(target_arch = "wasm32", feature = "desktop")))]
    eprintln!(
        "chatline-client: this build has no native renderer; \
         serve the web target or enable the `desktop` feature"
    );
}

#[allow(dead_code)]
#[component]
fn App() -> Element {
    rsx! {
        AuthProvider {
            HubManager {
                Router::<Route> {}
            }
        }
    }
}
