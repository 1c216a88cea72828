//! Desktop platform implementations

use std::sync::Arc;
use std::time::Duration;

use goldrush_domain::EntityKey;
use tracing::debug;

use crate::infrastructure::url_handler::parse_url_scheme;
use crate::ports::outbound::{TaskFuture, TaskScheduler};

/// Environment variable that can carry the identity token
pub const ENTITY_KEY_VAR: &str = "GOLDRUSH_ENTITY_KEY";

/// Scheduler backed by the ambient tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TaskScheduler for TokioScheduler {
    fn spawn(&self, task: TaskFuture) {
        tokio::spawn(task);
    }

    fn sleep(&self, duration: Duration) -> TaskFuture {
        Box::pin(tokio::time::sleep(duration))
    }
}

pub fn create_scheduler() -> Arc<dyn TaskScheduler> {
    Arc::new(TokioScheduler)
}

/// Token supplied out-of-band: `GOLDRUSH_ENTITY_KEY`, or a
/// `goldrush://play?entityKey=...` deep link as the first argument.
pub fn initial_entity_key() -> Option<EntityKey> {
    if let Some(key) = std::env::var(ENTITY_KEY_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    {
        debug!("Identity token taken from {ENTITY_KEY_VAR}");
        return Some(EntityKey::new(key));
    }

    let link = std::env::args().nth(1)?;
    let key = parse_url_scheme(&link)?.entity_key().cloned();
    if key.is_some() {
        debug!("Identity token taken from deep link");
    }
    key
}
