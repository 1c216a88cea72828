use dioxus::prelude::*;
use futures_util::StreamExt;
use goldrush_domain::EntityKey;

use crate::application::{Phase, Screen, ViewComposer};
use crate::infrastructure::ClientConfig;

pub mod presentation;

use presentation::components::{AdminView, Loading, LoginView, UserView};

/// Identity token handed over by the platform at launch.
/// This is passed via Dioxus context from the composition root.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StartupToken(pub Option<EntityKey>);

/// Hook to access the view composer from Dioxus context
pub fn use_composer() -> ViewComposer {
    use_context::<ViewComposer>()
}

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `crates/player/src/main.rs`).
    let composer = use_composer();
    let config = use_context::<ClientConfig>();
    let startup = use_context::<StartupToken>();

    let mut view = use_signal(|| composer.state());

    use_hook({
        let composer = composer.clone();
        move || {
            spawn(async move {
                composer.start(startup.0).await;
            });
        }
    });

    use_future(move || {
        let composer = composer.clone();
        async move {
            let mut updates = composer.subscribe();
            while let Some(state) = updates.next().await {
                view.set(state);
            }
        }
    });

    let state = view.read().clone();
    let bounds = config.bounds();

    let waiting = state.awaiting_data();
    let loading_message = if state.phase() == Phase::UserActive {
        "Loading player data..."
    } else {
        "Loading..."
    };
    let loading_error = if waiting {
        state.last_error.clone()
    } else {
        None
    };
    let token = state.mode.identity_token().cloned();

    let body = match (state.screen(), state.world.clone(), state.status.clone(), token) {
        (Screen::Login, ..) => rsx! {
            LoginView { error: state.login_error.clone() }
        },
        (Screen::Admin, Some(world), _, _) => rsx! {
            AdminView {
                world,
                bounds,
                replay_active: state.replay_active,
                replay: state.replay,
                last_error: state.last_error.clone(),
            }
        },
        (Screen::User, _, Some(status), Some(token)) => rsx! {
            UserView { status, token }
        },
        _ => rsx! {
            Loading {
                message: loading_message.to_string(),
                error: loading_error,
                can_logout: waiting,
            }
        },
    };

    rsx! {
        document::Stylesheet {
            href: asset!("/assets/css/goldrush.css"),
        }

        div {
            class: "app",
            {body}
        }
    }
}
