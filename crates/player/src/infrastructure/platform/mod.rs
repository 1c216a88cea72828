//! Platform-specific implementations
//!
//! This module provides platform-specific implementations of the
//! `TaskScheduler` port and of the startup identity token lookup.
//!
//! The correct platform is selected at compile time based on the target architecture.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

#[cfg(target_arch = "wasm32")]
pub use wasm::{create_scheduler, initial_entity_key, WasmScheduler};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{create_scheduler, initial_entity_key, TokioScheduler};
