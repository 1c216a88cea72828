//! Translation from backend wire payloads to domain types
//!
//! The translator never fails: pieces that would break a domain invariant are
//! dropped with a warning and the rest of the payload is kept.

use chrono::{DateTime, NaiveDateTime, Utc};
use goldrush_domain::{ordinal, Coord, Entity, LogEntry, Snapshot, UserStatus, WorldBounds};
use goldrush_shared::{EntityData, LeaderboardEntryData, LogEntryData, StatusResponse, WorldResponse};
use tracing::warn;

/// `GET /admin/world` body to a snapshot
pub fn translate_world(world: WorldResponse, bounds: WorldBounds) -> Snapshot {
    let entities: Vec<Entity> = world
        .entities
        .iter()
        .filter_map(|(key, data)| translate_entity(key, data, bounds))
        .collect();

    let ranking = world
        .leaderboard
        .unwrap_or_default()
        .iter()
        .filter_map(|row| translate_ranking_row(row, &world.entities, bounds))
        .collect();

    Snapshot::new()
        .with_entities(entities)
        .with_resource_sites(coords(&world.gold))
        .with_hazard_sites(coords(&world.spiders))
        .with_obstacle_sites(coords(&world.mountains))
        .with_ranking(ranking)
}

/// `GET /status` body to the participant's status view
pub fn translate_status(status: StatusResponse) -> UserStatus {
    let rank = status
        .position
        .filter(|position| !position.trim().is_empty())
        .or_else(|| status.rank.map(ordinal))
        .unwrap_or_else(|| "-".to_string());

    UserStatus {
        display_name: status.name,
        glyph: status.emoji.filter(|glyph| !glyph.trim().is_empty()),
        gold: status.gold,
        stolen: status.stolen,
        position: Coord::new(status.coordinates.x, status.coordinates.y),
        rank,
        gold_remaining: status.gold_remaining,
    }
}

/// `GET /admin/logs` entries, in the order the backend returned them
pub fn translate_logs(entries: Vec<LogEntryData>, bounds: WorldBounds) -> Vec<LogEntry> {
    entries
        .into_iter()
        .enumerate()
        .map(|(sequence, entry)| {
            let log_entry = LogEntry::new(sequence, translate_world(entry.board, bounds));
            match entry.timestamp.as_deref().and_then(parse_timestamp) {
                Some(at) => log_entry.recorded_at(at),
                None => log_entry,
            }
        })
        .collect()
}

fn coords(pairs: &[[i32; 2]]) -> Vec<Coord> {
    pairs.iter().map(|[x, y]| Coord::new(*x, *y)).collect()
}

fn translate_entity(key: &str, data: &EntityData, bounds: WorldBounds) -> Option<Entity> {
    let entity = Entity::new(key, data.name.as_str(), Coord::new(data.x, data.y), bounds)
        .map_err(|err| warn!(entity_key = key, error = %err, "Skipping entity"))
        .ok()?;
    let entity = entity.with_score(data.score);
    Some(match &data.emoji {
        Some(glyph) => entity.with_glyph(glyph.as_str()),
        None => entity,
    })
}

fn translate_ranking_row(
    row: &LeaderboardEntryData,
    entities: &std::collections::HashMap<String, EntityData>,
    bounds: WorldBounds,
) -> Option<Entity> {
    // Older leaderboards carry no position; borrow it from the entity map.
    let (x, y) = match (row.x, row.y) {
        (Some(x), Some(y)) => (x, y),
        _ => {
            let Some(data) = entities.get(&row.entity_key) else {
                warn!(entity_key = %row.entity_key, "Leaderboard row has no position");
                return None;
            };
            (data.x, data.y)
        }
    };
    translate_entity(
        &row.entity_key,
        &EntityData {
            x,
            y,
            name: row.name.clone(),
            emoji: row.emoji.clone(),
            score: row.score,
        },
        bounds,
    )
}

/// RFC 3339, or a naive ISO timestamp taken as UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Some(naive.and_utc()),
        Err(err) => {
            warn!(timestamp = raw, error = %err, "Unparseable log timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldrush_domain::EntityKey;
    use serde_json::json;

    fn world(body: serde_json::Value) -> Snapshot {
        let response: WorldResponse = serde_json::from_value(body).expect("world json");
        translate_world(response, WorldBounds::default())
    }

    #[test]
    fn world_fields_map_to_snapshot() {
        let snapshot = world(json!({
            "gold": [[3, 4]],
            "spiders": [[5, 5]],
            "mountains": [[0, 0], [0, 1]],
            "entities": {
                "a1": {"x": 3, "y": 4, "name": "Ana", "emoji": "🧝", "score": 7}
            }
        }));

        let ana = snapshot.entity(&EntityKey::new("a1")).expect("entity");
        assert_eq!(ana.display_name(), "Ana");
        assert_eq!(ana.glyph(), Some("🧝"));
        assert_eq!(ana.score(), 7);
        assert!(snapshot.resource_sites().contains(&Coord::new(3, 4)));
        assert!(snapshot.hazard_sites().contains(&Coord::new(5, 5)));
        assert_eq!(snapshot.obstacle_sites().len(), 2);
        assert!(snapshot.ranking().is_empty());
    }

    #[test]
    fn out_of_bounds_entities_are_skipped() {
        let snapshot = world(json!({
            "entities": {
                "in": {"x": 19, "y": 0, "name": "In"},
                "out": {"x": 20, "y": 0, "name": "Out"}
            }
        }));

        assert_eq!(snapshot.entities().len(), 1);
        assert!(snapshot.entity(&EntityKey::new("out")).is_none());
    }

    #[test]
    fn leaderboard_rows_keep_order_and_borrow_positions() {
        let snapshot = world(json!({
            "entities": {
                "a": {"x": 1, "y": 1, "name": "A", "score": 1},
                "b": {"x": 2, "y": 2, "name": "B", "score": 9}
            },
            "leaderboard": [
                {"entityKey": "b", "name": "B", "score": 9, "x": 2, "y": 2},
                {"entityKey": "a", "name": "A", "score": 1},
                {"entityKey": "ghost", "name": "Gone", "score": 0}
            ]
        }));

        let ids: Vec<&str> = snapshot.ranking().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(snapshot.ranking()[1].position(), Coord::new(1, 1));
    }

    #[test]
    fn status_prefers_position_then_numeric_rank() {
        let mut response: StatusResponse = serde_json::from_value(json!({
            "gold": 5,
            "name": "Ana",
            "emoji": "",
            "coordinates": {"x": 3, "y": 4},
            "rank": 2,
            "stolen": -1,
            "goldRemaining": 40
        }))
        .expect("status json");

        let status = translate_status(response.clone());
        assert_eq!(status.rank, "2nd");
        assert_eq!(status.glyph, None);
        assert_eq!(status.stolen, -1);
        assert_eq!(status.gold_remaining, 40);
        assert_eq!(status.position, Coord::new(3, 4));

        response.position = Some("1st".to_string());
        assert_eq!(translate_status(response).rank, "1st");
    }

    #[test]
    fn logs_are_sequenced_and_keep_bad_timestamps() {
        let entries: Vec<LogEntryData> = serde_json::from_value(json!([
            {"board": {"gold": [[1, 1]]}, "timestamp": "2025-05-01T10:00:00Z"},
            {"board": {"gold": []}, "timestamp": "2025-05-01T10:00:01.250000"},
            {"board": {}, "timestamp": "yesterday"}
        ]))
        .expect("log json");

        let log = translate_logs(entries, WorldBounds::default());

        assert_eq!(log.len(), 3);
        assert_eq!(log[2].sequence, 2);
        assert!(log[0].recorded_at.is_some());
        assert!(log[1].recorded_at.is_some());
        assert!(log[2].recorded_at.is_none());
        assert_eq!(log[0].snapshot.remaining_resources(), 1);
    }
}
