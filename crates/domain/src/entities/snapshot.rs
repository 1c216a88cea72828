//! One consistent instant of world state

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Coord, Entity, EntityKey};

/// Immutable view of the whole world at one instant.
///
/// Built once with the `with_*` methods, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    entities: BTreeMap<EntityKey, Entity>,
    resource_sites: BTreeSet<Coord>,
    hazard_sites: BTreeSet<Coord>,
    obstacle_sites: BTreeSet<Coord>,
    /// Descending by score, insertion order is rank order. Empty for older payloads.
    ranking: Vec<Entity>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    // Builder-style methods

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.insert(entity.id().clone(), entity);
        self
    }

    pub fn with_entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        for entity in entities {
            self.entities.insert(entity.id().clone(), entity);
        }
        self
    }

    pub fn with_resource_sites(mut self, sites: impl IntoIterator<Item = Coord>) -> Self {
        self.resource_sites.extend(sites);
        self
    }

    pub fn with_hazard_sites(mut self, sites: impl IntoIterator<Item = Coord>) -> Self {
        self.hazard_sites.extend(sites);
        self
    }

    pub fn with_obstacle_sites(mut self, sites: impl IntoIterator<Item = Coord>) -> Self {
        self.obstacle_sites.extend(sites);
        self
    }

    pub fn with_ranking(mut self, ranking: Vec<Entity>) -> Self {
        self.ranking = ranking;
        self
    }

    // Read-only accessors

    pub fn entities(&self) -> &BTreeMap<EntityKey, Entity> {
        &self.entities
    }

    pub fn entity(&self, id: &EntityKey) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn resource_sites(&self) -> &BTreeSet<Coord> {
        &self.resource_sites
    }

    pub fn hazard_sites(&self) -> &BTreeSet<Coord> {
        &self.hazard_sites
    }

    pub fn obstacle_sites(&self) -> &BTreeSet<Coord> {
        &self.obstacle_sites
    }

    pub fn ranking(&self) -> &[Entity] {
        &self.ranking
    }

    /// First entity (in key order) standing on `coord`.
    pub fn entity_at(&self, coord: Coord) -> Option<&Entity> {
        self.entities.values().find(|e| e.position() == coord)
    }

    /// Resources still lying on the board
    pub fn remaining_resources(&self) -> usize {
        self.resource_sites.len()
    }

    /// Leaderboard to display.
    ///
    /// Uses `ranking` when the payload carried one; otherwise derives it from
    /// the entity map, highest score first and ties broken by key.
    pub fn standings(&self) -> Vec<&Entity> {
        if !self.ranking.is_empty() {
            return self.ranking.iter().collect();
        }
        let mut standings: Vec<&Entity> = self.entities.values().collect();
        standings.sort_by(|a, b| b.score().cmp(&a.score()).then_with(|| a.id().cmp(b.id())));
        standings
    }
}
