#![warn(missing_docs)]
//! Physics primitives (AABB, collision volumes).

use glam::DVec3;
use mineward_core::Position;

/// Player collision width along X and Z.
pub const PLAYER_WIDTH: f64 = 0.6;
/// Player collision height.
pub const PLAYER_HEIGHT: f64 = 1.8;

/// Axis-aligned bounding box used for collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z).
    pub min: DVec3,
    /// Maximum corner (x, y, z).
    pub max: DVec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Unit box filling one cell.
    pub fn cell(pos: Position) -> Self {
        let min = DVec3::new(pos.x as f64, pos.y as f64, pos.z as f64);
        Self::new(min, min + DVec3::ONE)
    }

    /// Collision volume of a player standing with their feet at `feet`.
    pub fn player(feet: DVec3) -> Self {
        let half = PLAYER_WIDTH / 2.0;
        Self::new(
            DVec3::new(feet.x - half, feet.y, feet.z - half),
            DVec3::new(feet.x + half, feet.y + PLAYER_HEIGHT, feet.z + half),
        )
    }

    /// Tests for overlap with positive volume.
    ///
    /// Boxes that merely share a face do not intersect, so a player standing
    /// on a cell does not occupy it.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmplt(other.max).all() && self.max.cmpgt(other.min).all()
    }
}
