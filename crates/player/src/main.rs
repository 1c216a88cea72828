//! Gold Rush client - composition root binary.

use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use goldrush_player::application::ViewComposer;
use goldrush_player::infrastructure::{platform, ClientConfig, HttpGameApi};
use goldrush_player::ui::StartupToken;

fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goldrush_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let config = ClientConfig::from_env()?;
    tracing::info!(backend = %config.backend_url, "Starting Gold Rush client");

    let api = Arc::new(HttpGameApi::new(&config));
    let composer = ViewComposer::new(api, platform::create_scheduler(), config.timing());
    let startup = StartupToken(platform::initial_entity_key());

    // Launch Dioxus
    #[allow(unused_mut)]
    let mut builder = dioxus::LaunchBuilder::new();

    #[cfg(feature = "desktop")]
    {
        let window = dioxus::desktop::WindowBuilder::new().with_title("Gold Rush");
        builder = builder.with_cfg(dioxus::desktop::Config::new().with_window(window));
    }

    builder
        .with_context(composer)
        .with_context(config)
        .with_context(startup)
        .launch(goldrush_player::ui::app);

    Ok(())
}
