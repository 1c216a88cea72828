//! Game API Port - the four backend calls the client makes
//!
//! Adapters translate wire payloads into domain types before returning, so
//! application services never see backend JSON.

use goldrush_domain::{EntityKey, LogEntry, Snapshot, UserStatus};
use thiserror::Error;

/// Errors from talking to the backend.
///
/// Callers treat every variant the same way: keep the last good state.
/// 4xx and 5xx responses are deliberately not told apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Network unreachable, timeout, or the request could not be built
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Port for the Gold Rush backend
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait GameApiPort: Send + Sync {
    /// Full world snapshot, authenticated with the admin credential
    async fn fetch_world(&self, credential: &str) -> Result<Snapshot, ApiError>;

    /// Status of a single participant, keyed by its identity token
    async fn fetch_status(&self, token: &EntityKey) -> Result<UserStatus, ApiError>;

    /// The whole archived log, oldest entry first
    async fn fetch_logs(&self, credential: &str) -> Result<Vec<LogEntry>, ApiError>;

    /// Truncate the archived log
    async fn clear_logs(&self, credential: &str) -> Result<(), ApiError>;
}
