//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to talk to the backend and the async runtime
//! without depending on concrete implementations.

pub mod api_port;
pub mod platform;

#[cfg(any(test, feature = "testing"))]
pub use api_port::MockGameApiPort;
pub use api_port::{ApiError, GameApiPort};
pub use platform::{TaskFuture, TaskScheduler};
