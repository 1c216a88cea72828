pub mod config;
pub mod http_client;
pub mod message_translator;
pub mod platform;
pub mod url_handler;

#[cfg(all(any(test, feature = "testing"), not(target_arch = "wasm32")))]
pub mod testing;

pub use config::ClientConfig;
pub use http_client::HttpGameApi;
