//! Simple test fixtures used across unit tests.

use goldrush_domain::{Coord, Entity, Snapshot, UserStatus, WorldBounds};

/// A world holding a single entity at `(x, y)`
pub fn snapshot_with_entity_at(x: i32, y: i32) -> Snapshot {
    let entity = Entity::new(
        format!("entity-{x}-{y}"),
        "Ana",
        Coord::new(x, y),
        WorldBounds::default(),
    )
    .unwrap_or_else(|err| panic!("fixture entity out of bounds: {err}"));
    Snapshot::new().with_entity(entity.with_glyph("🧝"))
}

/// S0, S1, S2: one entity walking right
pub fn three_frames() -> Vec<Snapshot> {
    (0..3).map(|x| snapshot_with_entity_at(x, 0)).collect()
}

pub fn status_with_gold(gold: u32) -> UserStatus {
    UserStatus {
        display_name: "Ana".to_string(),
        glyph: Some("🧝".to_string()),
        gold,
        stolen: 0,
        position: Coord::new(3, 4),
        rank: "1st".to_string(),
        gold_remaining: 10,
    }
}
