//! World projector - sparse snapshot to dense renderable grid
//!
//! Occupancy precedence, highest first: entity, resource, hazard, obstacle, empty.
//! The `pickup` and `blocked` flags are cosmetic and computed independently of
//! occupancy.

use std::collections::HashMap;

use crate::{Coord, Entity, EntityKey, Snapshot, WorldBounds};

pub const RESOURCE_GLYPH: &str = "💰";
pub const HAZARD_GLYPH: &str = "🕷️";
pub const OBSTACLE_GLYPH: &str = "⛔️";

/// What a cell renders as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupant {
    Entity { id: EntityKey, glyph: String },
    Resource,
    Hazard,
    Obstacle,
    Empty,
}

impl Occupant {
    pub fn glyph(&self) -> &str {
        match self {
            Occupant::Entity { glyph, .. } => glyph,
            Occupant::Resource => RESOURCE_GLYPH,
            Occupant::Hazard => HAZARD_GLYPH,
            Occupant::Obstacle => OBSTACLE_GLYPH,
            Occupant::Empty => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Occupant::Empty)
    }
}

/// Renderable descriptor for a single board coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub coord: Coord,
    pub occupant: Occupant,
    /// A resource is under an entity
    pub pickup: bool,
    /// An obstacle sits next to an entity
    pub blocked: bool,
}

impl Cell {
    pub fn glyph(&self) -> &str {
        self.occupant.glyph()
    }
}

/// Projects one snapshot, indexing entity positions once.
pub struct WorldProjector<'a> {
    snapshot: &'a Snapshot,
    bounds: WorldBounds,
    by_position: HashMap<Coord, &'a Entity>,
}

impl<'a> WorldProjector<'a> {
    pub fn new(snapshot: &'a Snapshot, bounds: WorldBounds) -> Self {
        let mut by_position = HashMap::with_capacity(snapshot.entities().len());
        // Entities iterate in key order; the first one on a square wins.
        for entity in snapshot.entities().values() {
            by_position.entry(entity.position()).or_insert(entity);
        }
        Self {
            snapshot,
            bounds,
            by_position,
        }
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        let entity = self.by_position.get(&coord).copied();
        let is_resource = self.snapshot.resource_sites().contains(&coord);
        let is_obstacle = self.snapshot.obstacle_sites().contains(&coord);

        let occupant = if let Some(entity) = entity {
            Occupant::Entity {
                id: entity.id().clone(),
                glyph: entity.render_glyph().to_string(),
            }
        } else if is_resource {
            Occupant::Resource
        } else if self.snapshot.hazard_sites().contains(&coord) {
            Occupant::Hazard
        } else if is_obstacle {
            Occupant::Obstacle
        } else {
            Occupant::Empty
        };

        let blocked = is_obstacle
            && self
                .by_position
                .keys()
                .any(|pos| pos.is_orthogonally_adjacent(&coord));

        Cell {
            coord,
            occupant,
            pickup: is_resource && entity.is_some(),
            blocked,
        }
    }

    /// Full board, top row (`y = size - 1`) first, each row left to right.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        let size = self.bounds.size();
        (0..size)
            .rev()
            .map(|y| (0..size).map(|x| self.cell(Coord::new(x, y))).collect())
            .collect()
    }
}

/// Project a single coordinate of `snapshot`.
pub fn project_cell(snapshot: &Snapshot, coord: Coord) -> Cell {
    WorldProjector::new(snapshot, WorldBounds::default()).cell(coord)
}

/// Project the whole board of `snapshot` in row-major, top-down order.
pub fn project_grid(snapshot: &Snapshot, bounds: WorldBounds) -> Vec<Vec<Cell>> {
    WorldProjector::new(snapshot, bounds).rows()
}
