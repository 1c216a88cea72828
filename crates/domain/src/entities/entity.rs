//! A participant on the board

use serde::{Deserialize, Serialize};

use crate::{Coord, DomainError, EntityKey, WorldBounds};

/// Glyph drawn for an entity that never chose one
pub const UNKNOWN_GLYPH: &str = "❓";

/// A registered participant and where it currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    id: EntityKey,
    display_name: String,
    glyph: Option<String>,
    /// Net score; negative when the participant has been robbed more than it collected
    score: i64,
    position: Coord,
}

impl Entity {
    /// Create an entity, rejecting positions outside `bounds`.
    pub fn new(
        id: impl Into<EntityKey>,
        display_name: impl Into<String>,
        position: Coord,
        bounds: WorldBounds,
    ) -> Result<Self, DomainError> {
        let position = bounds.check(position)?;
        Ok(Self {
            id: id.into(),
            display_name: display_name.into(),
            glyph: None,
            score: 0,
            position,
        })
    }

    // Builder-style methods

    /// Set the rendering glyph; blank glyphs count as unset.
    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        let glyph = glyph.into();
        self.glyph = if glyph.trim().is_empty() {
            None
        } else {
            Some(glyph)
        };
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    // Read-only accessors

    pub fn id(&self) -> &EntityKey {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    /// The glyph to draw, falling back to [`UNKNOWN_GLYPH`].
    pub fn render_glyph(&self) -> &str {
        self.glyph().unwrap_or(UNKNOWN_GLYPH)
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn position(&self) -> Coord {
        self.position
    }
}
