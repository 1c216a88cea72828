//! Response bodies returned by the backend

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A participant as it appears in the world's `entities` map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityData {
    pub x: i32,
    pub y: i32,
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub score: i64,
}

/// One row of the leaderboard. Older payloads omit the position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryData {
    pub entity_key: String,
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
}

/// `GET /admin/world`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldResponse {
    #[serde(default)]
    pub gold: Vec<[i32; 2]>,
    #[serde(default)]
    pub spiders: Vec<[i32; 2]>,
    #[serde(default)]
    pub mountains: Vec<[i32; 2]>,
    #[serde(default)]
    pub entities: HashMap<String, EntityData>,
    #[serde(default)]
    pub leaderboard: Option<Vec<LeaderboardEntryData>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatesData {
    pub x: i32,
    pub y: i32,
}

/// `GET /status?entityKey=...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub gold: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub coordinates: CoordinatesData,
    /// Leaderboard position already formatted, e.g. "2nd"
    #[serde(default)]
    pub position: Option<String>,
    /// Numeric leaderboard position, used when `position` is absent
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub stolen: i64,
    #[serde(default, alias = "remainingGold")]
    pub gold_remaining: u32,
}

/// One archived board from `GET /admin/logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntryData {
    #[serde(alias = "snapshot")]
    pub board: WorldResponse,
    #[serde(default, alias = "recordedAt")]
    pub timestamp: Option<String>,
}

/// `GET /admin/logs` - either a bare array or wrapped in `{ "logs": [...] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogsResponse {
    Bare(Vec<LogEntryData>),
    Wrapped { logs: Vec<LogEntryData> },
}

impl LogsResponse {
    pub fn into_entries(self) -> Vec<LogEntryData> {
        match self {
            LogsResponse::Bare(entries) | LogsResponse::Wrapped { logs: entries } => entries,
        }
    }
}
