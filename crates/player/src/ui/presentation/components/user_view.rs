use dioxus::prelude::*;
use goldrush_domain::{EntityKey, UserStatus};

use crate::ui::use_composer;

/// What a participant sees about themselves
#[component]
pub fn UserView(status: UserStatus, token: EntityKey) -> Element {
    let composer = use_composer();
    let glyph = status.glyph.clone().unwrap_or_default();
    let name = status.display_name.clone();
    let gold = status.gold;
    let stolen = status.stolen;
    let coordinates = format!("({}, {})", status.position.x, status.position.y);
    let rank = status.rank.clone();
    let gold_remaining = status.gold_remaining;

    rsx! {
        div {
            class: "user-dashboard",
            h2 {
                "Welcome, "
                span { class: "player-name", "{name}" }
                " {glyph}"
            }
            div {
                class: "user-card",
                p { strong { "Gold: " } "{gold}" }
                p { strong { "Stolen: " } "{stolen}" }
                p { strong { "Coordinates: " } "{coordinates}" }
                p { strong { "Leaderboard Position: " } "{rank}" }
                p { strong { "Gold Remaining: " } "{gold_remaining}" }
                p { class: "entity-id", "Entity ID: {token}" }
            }
            button {
                class: "logout-btn",
                onclick: move |_| composer.logout(),
                "Logout"
            }
        }
    }
}
