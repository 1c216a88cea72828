use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Side length of the square world used by the Gold Rush backend.
pub const DEFAULT_WORLD_SIZE: i32 = 20;

/// Integer grid coordinate. `y` grows upwards (row 0 is the bottom of the board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when the two coordinates share an edge (not a corner)
    pub fn is_orthogonally_adjacent(&self, other: &Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The fixed square `[0, size) x [0, size)` every entity lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBounds {
    size: i32,
}

impl WorldBounds {
    pub fn new(size: i32) -> Result<Self, DomainError> {
        if size <= 0 {
            return Err(DomainError::validation(format!(
                "World size must be positive, got {size}"
            )));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (0..self.size).contains(&coord.x) && (0..self.size).contains(&coord.y)
    }

    /// Fails with [`DomainError::OutOfBounds`] when `coord` lies outside the world.
    pub fn check(&self, coord: Coord) -> Result<Coord, DomainError> {
        if self.contains(coord) {
            Ok(coord)
        } else {
            Err(DomainError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                size: self.size,
            })
        }
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            size: DEFAULT_WORLD_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_excludes_diagonals_and_self() {
        let c = Coord::new(5, 5);
        assert!(c.is_orthogonally_adjacent(&Coord::new(5, 6)));
        assert!(c.is_orthogonally_adjacent(&Coord::new(4, 5)));
        assert!(!c.is_orthogonally_adjacent(&Coord::new(6, 6)));
        assert!(!c.is_orthogonally_adjacent(&c));
    }

    #[test]
    fn bounds_are_half_open() {
        let bounds = WorldBounds::default();
        assert!(bounds.contains(Coord::new(0, 0)));
        assert!(bounds.contains(Coord::new(19, 19)));
        assert!(!bounds.contains(Coord::new(20, 0)));
        assert!(!bounds.contains(Coord::new(0, -1)));
        assert_eq!(
            bounds.check(Coord::new(20, 3)),
            Err(DomainError::OutOfBounds { x: 20, y: 3, size: 20 })
        );
    }

    #[test]
    fn zero_sized_world_is_rejected() {
        assert!(WorldBounds::new(0).is_err());
    }
}
