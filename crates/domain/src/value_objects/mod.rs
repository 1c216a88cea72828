//! Value objects - Immutable objects defined by their attributes

mod coord;
mod rank;

pub use coord::{Coord, WorldBounds, DEFAULT_WORLD_SIZE};
pub use rank::ordinal;
