//! Platform abstraction ports for cross-platform compatibility
//!
//! Desktop runs on tokio, the browser on `wasm-bindgen-futures`. Services only
//! see this trait, so the sync loops are identical on both and can be driven
//! by tokio's paused clock in tests.

use std::{future::Future, pin::Pin, time::Duration};

/// A detached unit of work handed to the scheduler.
#[cfg(not(target_arch = "wasm32"))]
pub type TaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A detached unit of work handed to the scheduler.
#[cfg(target_arch = "wasm32")]
pub type TaskFuture = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// Spawning and timers
pub trait TaskScheduler: Send + Sync {
    /// Run `task` in the background; the caller does not wait for it.
    fn spawn(&self, task: TaskFuture);

    /// Resolve after `duration`
    fn sleep(&self, duration: Duration) -> TaskFuture;
}
