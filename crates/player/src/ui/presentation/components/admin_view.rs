//! Admin view: leaderboard, replay controls and the full board

use dioxus::prelude::*;
use goldrush_domain::{Snapshot, WorldBounds};

use super::Board;
use crate::application::ReplayStatus;
use crate::ui::use_composer;

fn replay_label(replay: ReplayStatus) -> Option<String> {
    match replay {
        ReplayStatus::Idle => None,
        ReplayStatus::Playing { frame, total } => Some(format!("Replaying {frame}/{total}")),
        ReplayStatus::Finished { total } => Some(format!("Replay finished ({total} frames)")),
    }
}

#[component]
pub fn AdminView(
    world: Snapshot,
    bounds: WorldBounds,
    replay_active: bool,
    replay: ReplayStatus,
    last_error: Option<String>,
) -> Element {
    let composer = use_composer();
    let mut log_cleared = use_signal(|| false);

    let standings: Vec<(String, String, i64)> = world
        .standings()
        .into_iter()
        .enumerate()
        .map(|(index, entity)| {
            (
                entity.id().to_string(),
                format!(
                    "{}. {} {}",
                    index + 1,
                    entity.display_name(),
                    entity.glyph().unwrap_or_default()
                ),
                entity.score(),
            )
        })
        .collect();

    let on_toggle = {
        let composer = composer.clone();
        move |_: MouseEvent| {
            if let Err(err) = composer.toggle_replay_active() {
                tracing::warn!(error = %err, "Pause/resume rejected");
            }
        }
    };
    let on_replay = {
        let composer = composer.clone();
        move |_: MouseEvent| {
            let composer = composer.clone();
            log_cleared.set(false);
            spawn(async move {
                if let Err(err) = composer.play_replay().await {
                    tracing::debug!(error = %err, "Replay not started");
                }
            });
        }
    };
    let on_clear = {
        let composer = composer.clone();
        move |_: MouseEvent| {
            let composer = composer.clone();
            spawn(async move {
                match composer.clear_logs().await {
                    Ok(()) => log_cleared.set(true),
                    Err(err) => {
                        log_cleared.set(false);
                        tracing::debug!(error = %err, "Log not cleared");
                    }
                }
            });
        }
    };
    let on_logout = move |_: MouseEvent| composer.logout();

    rsx! {
        div {
            class: "game-container",
            div {
                class: "scoreboard",
                h2 { "🏆 Leaderboard" }
                ul {
                    for (key, label, score) in standings {
                        li {
                            key: "{key}",
                            class: "scoreboard-entry",
                            span { "{label}" }
                            span { "{score}" }
                        }
                    }
                }
            }
            div {
                class: "board",
                div {
                    class: "button-row",
                    button {
                        onclick: on_toggle,
                        if replay_active { "▶️ Resume Updates" } else { "⏸️ Pause Updates" }
                    }
                    button { onclick: on_replay, "▶️ Play summary of game" }
                    button { onclick: on_clear, "🗑️ Clear log" }
                }
                if let Some(label) = replay_label(replay) {
                    p { class: "replay-status", "{label}" }
                }
                if log_cleared() {
                    p { class: "replay-status", "Log cleared" }
                }
                if let Some(error) = last_error {
                    p { class: "error", "{error}" }
                }
                Board { world, bounds }
                div {
                    class: "logout-container",
                    button { onclick: on_logout, "Logout" }
                }
            }
        }
    }
}
