//! Gold Rush client.
//!
//! This crate contains application logic, infrastructure adapters and the
//! Dioxus UI. Multi-platform support is provided via compile-time `cfg`
//! selection; the UI is behind the `ui` feature so the core builds and tests
//! without a webview.

pub mod application;
pub mod infrastructure;
pub mod ports;

#[cfg(feature = "ui")]
pub mod ui;

#[cfg(feature = "ui")]
pub use ui::app;
