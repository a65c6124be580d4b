//! Registration form wiring. A successful registration signs in with the
//! same credentials.

use dioxus::prelude::*;

use crate::auth_session::AuthContext;
use crate::routes::{use_route_guard, Route};

#[component]
pub fn Register() -> Element {
    use_route_guard();

    let mut auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let user = username.cloned();
        let pass = password.cloned();
        spawn(async move {
            busy.set(true);
            match auth.register(&user, &pass).await {
                Ok(()) => {
                    error.set(None);
                    nav.replace(Route::ChatView {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page page-center",
            h1 { "Create account" }
            if let Some(message) = error.cloned() {
                p { class: "error", "{message}" }
            }
            form { class: "auth-form", onsubmit: submit,
                input {
                    placeholder: "Username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button { r#type: "submit", disabled: busy(), "Register" }
            }
            p {
                "Already registered? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
