//! Per-participant status projection

use serde::{Deserialize, Serialize};

use crate::Coord;

/// What a participant is allowed to see about themselves.
///
/// Recomputed on every status fetch; has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub display_name: String,
    pub glyph: Option<String>,
    /// Resources collected so far
    pub gold: u32,
    /// Net theft counter; positive when the participant stole more than it lost
    pub stolen: i64,
    pub position: Coord,
    /// Leaderboard position with ordinal suffix, e.g. "2nd"
    pub rank: String,
    /// Resources still on the board
    pub gold_remaining: u32,
}
