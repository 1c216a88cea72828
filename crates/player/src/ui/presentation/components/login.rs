//! Mode selection form
//!
//! Validation happens in the composer; the rejected-input message comes back
//! through the view state as `error`.

use dioxus::prelude::*;

use crate::application::LoginKind;
use crate::ui::use_composer;

#[component]
pub fn LoginView(error: Option<String>) -> Element {
    let composer = use_composer();
    let mut kind = use_signal(LoginKind::default);
    let mut password = use_signal(String::new);
    let mut entity_key = use_signal(String::new);

    let submit = move |_: MouseEvent| {
        let input = match kind() {
            LoginKind::Admin => password.read().clone(),
            LoginKind::User => entity_key.read().clone(),
        };
        if let Err(err) = composer.login(kind(), &input) {
            tracing::debug!(error = %err, "Login rejected");
        }
    };

    rsx! {
        div {
            class: "login",
            h2 { "Select Mode" }
            label {
                input {
                    r#type: "radio",
                    name: "mode",
                    checked: kind() == LoginKind::Admin,
                    onchange: move |_| kind.set(LoginKind::Admin),
                }
                "Admin"
            }
            label {
                class: "mode-option",
                input {
                    r#type: "radio",
                    name: "mode",
                    checked: kind() == LoginKind::User,
                    onchange: move |_| kind.set(LoginKind::User),
                }
                "Hackathon User"
            }
            div {
                class: "login-form",
                if kind() == LoginKind::Admin {
                    input {
                        r#type: "password",
                        value: "{password}",
                        placeholder: "Admin password",
                        oninput: move |evt| password.set(evt.value()),
                    }
                } else {
                    input {
                        r#type: "text",
                        value: "{entity_key}",
                        placeholder: "Enter your entity key",
                        oninput: move |evt| entity_key.set(evt.value()),
                    }
                }
                button { onclick: submit, "Login" }
                if let Some(error) = error {
                    p { class: "error", "{error}" }
                }
            }
        }
    }
}
