//! Domain entities

mod entity;
mod log_entry;
mod snapshot;
mod user_status;

pub use entity::{Entity, UNKNOWN_GLYPH};
pub use log_entry::LogEntry;
pub use snapshot::Snapshot;
pub use user_status::UserStatus;
