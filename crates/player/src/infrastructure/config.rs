//! Client configuration

use std::time::Duration;

use anyhow::{Context, Result};
use goldrush_domain::{WorldBounds, DEFAULT_WORLD_SIZE};
use tracing::warn;

use crate::application::SyncTiming;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Client configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Gold Rush backend
    pub backend_url: String,
    /// Side of the square world
    pub world_size: i32,
    /// Live polling period
    pub live_period_ms: u64,
    /// Delay between replay frames
    pub replay_frame_ms: u64,
    /// Per-request timeout (desktop only)
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            world_size: DEFAULT_WORLD_SIZE,
            live_period_ms: 1000,
            replay_frame_ms: 300,
            request_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Desktop reads the process environment after loading `.env`; the browser
    /// build only sees values baked in at compile time.
    pub fn from_env() -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();
            Self::from_lookup(|key| std::env::var(key).ok())
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::from_lookup(compile_time_var)
        }
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let backend_url = var("GOLDRUSH_BACKEND_URL")
            .or_else(|| var("VITE_BACKEND_URL"))
            .unwrap_or(defaults.backend_url);
        url::Url::parse(&backend_url)
            .with_context(|| format!("GOLDRUSH_BACKEND_URL must be a valid URL: {backend_url}"))?;

        let world_size = var("GOLDRUSH_WORLD_SIZE")
            .and_then(|raw| parse_or_warn::<i32>("GOLDRUSH_WORLD_SIZE", &raw))
            .filter(|size| {
                let valid = WorldBounds::new(*size).is_ok();
                if !valid {
                    warn!(size, "GOLDRUSH_WORLD_SIZE must be positive, using default");
                }
                valid
            })
            .unwrap_or(defaults.world_size);

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            world_size,
            live_period_ms: positive_millis(&var, "GOLDRUSH_LIVE_PERIOD_MS", defaults.live_period_ms),
            replay_frame_ms: positive_millis(
                &var,
                "GOLDRUSH_REPLAY_FRAME_MS",
                defaults.replay_frame_ms,
            ),
            request_timeout_ms: positive_millis(
                &var,
                "GOLDRUSH_REQUEST_TIMEOUT_MS",
                defaults.request_timeout_ms,
            ),
        })
    }

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world_size).unwrap_or_default()
    }

    pub fn timing(&self) -> SyncTiming {
        SyncTiming {
            live_period: Duration::from_millis(self.live_period_ms),
            replay_frame: Duration::from_millis(self.replay_frame_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, raw, "Invalid number, using default");
            None
        }
    }
}

fn positive_millis(var: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    var(key)
        .and_then(|raw| parse_or_warn::<u64>(key, &raw))
        .filter(|ms| *ms > 0)
        .unwrap_or(default)
}

#[cfg(target_arch = "wasm32")]
fn compile_time_var(key: &str) -> Option<String> {
    let value = match key {
        "GOLDRUSH_BACKEND_URL" => option_env!("GOLDRUSH_BACKEND_URL"),
        "VITE_BACKEND_URL" => option_env!("VITE_BACKEND_URL"),
        "GOLDRUSH_WORLD_SIZE" => option_env!("GOLDRUSH_WORLD_SIZE"),
        "GOLDRUSH_LIVE_PERIOD_MS" => option_env!("GOLDRUSH_LIVE_PERIOD_MS"),
        "GOLDRUSH_REPLAY_FRAME_MS" => option_env!("GOLDRUSH_REPLAY_FRAME_MS"),
        "GOLDRUSH_REQUEST_TIMEOUT_MS" => option_env!("GOLDRUSH_REQUEST_TIMEOUT_MS"),
        _ => None,
    };
    value.map(str::to_string)
}
