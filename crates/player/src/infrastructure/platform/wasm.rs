//! WASM platform implementations

use std::sync::Arc;
use std::time::Duration;

use goldrush_domain::EntityKey;

use crate::infrastructure::url_handler::entity_key_from_query;
use crate::ports::outbound::{TaskFuture, TaskScheduler};

/// Scheduler on the browser event loop
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmScheduler;

impl TaskScheduler for WasmScheduler {
    fn spawn(&self, task: TaskFuture) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> TaskFuture {
        Box::pin(gloo_timers::future::sleep(duration))
    }
}

pub fn create_scheduler() -> Arc<dyn TaskScheduler> {
    Arc::new(WasmScheduler)
}

/// Token from the page's own query string (`?entityKey=...`)
pub fn initial_entity_key() -> Option<EntityKey> {
    let search = web_sys::window()?.location().search().ok()?;
    entity_key_from_query(&search)
}
