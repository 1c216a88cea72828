//! Application services
//!
//! Services depend on port traits, not concrete infrastructure
//! implementations.

pub mod live_sync;
pub mod mode_resolver;
pub mod replay_service;
pub mod view_composer;

pub use live_sync::{LiveSync, LiveTarget};
pub use mode_resolver::{resolve_login, LoginKind, ModeResolver, StartupResolution};
pub use replay_service::ReplayEngine;
pub use view_composer::{SyncTiming, ViewComposer, WorkerKind};
