use dioxus::prelude::*;

use crate::ui::use_composer;

/// Placeholder while the session has nothing to show yet.
///
/// With `can_logout` set the session already has an identity, so its last
/// transport error and a way out are shown.
#[component]
pub fn Loading(
    message: String,
    error: Option<String>,
    #[props(default)] can_logout: bool,
) -> Element {
    let composer = use_composer();

    rsx! {
        div {
            class: "user-dashboard",
            h2 { "{message}" }
            if let Some(error) = error {
                p { class: "error", "{error}" }
            }
            if can_logout {
                button {
                    class: "logout-btn",
                    onclick: move |_| composer.logout(),
                    "Logout"
                }
            }
        }
    }
}
