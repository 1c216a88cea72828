//! Application layer: use cases driven by the UI, written against ports.

pub mod error;
pub mod services;
pub mod state;

pub use error::{LoginError, ServiceError};
pub use services::{LoginKind, SyncTiming, ViewComposer, WorkerKind};
pub use state::{Phase, ReplayStatus, Screen, ViewState};
