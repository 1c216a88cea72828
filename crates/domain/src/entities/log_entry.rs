use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Snapshot;

/// One archived snapshot from the append-only game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Position in the log, starting at 0
    pub sequence: usize,
    pub snapshot: Snapshot,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl LogEntry {
    pub fn new(sequence: usize, snapshot: Snapshot) -> Self {
        Self {
            sequence,
            snapshot,
            recorded_at: None,
        }
    }

    pub fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = Some(at);
        self
    }
}
