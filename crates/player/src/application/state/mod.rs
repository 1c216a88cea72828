//! Client-side state shared between the view composer and its workers.

mod epoch;
mod store;
mod view_state;

pub use epoch::SyncEpoch;
pub use store::ViewStore;
pub use view_state::{Phase, ReplayStatus, Screen, ViewState};
