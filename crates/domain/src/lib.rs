//! Gold Rush domain: world snapshots, the client's session mode, and the
//! projection of a snapshot onto the rendered board.

extern crate self as goldrush_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod projector;
pub mod session;
pub mod value_objects;

pub use entities::{Entity, LogEntry, Snapshot, UserStatus, UNKNOWN_GLYPH};
pub use error::DomainError;
pub use ids::EntityKey;
pub use projector::{
    project_cell, project_grid, Cell, Occupant, WorldProjector, HAZARD_GLYPH, OBSTACLE_GLYPH,
    RESOURCE_GLYPH,
};
pub use session::SessionMode;
pub use value_objects::{ordinal, Coord, WorldBounds, DEFAULT_WORLD_SIZE};
