#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod blocks;
mod digging;
mod direction;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use digging::{DiggingStatus, DiggingStatusError};
pub use direction::{Direction, DirectionError};

/// Block identifier naming a block kind. `0` is air.
pub type BlockId = u8;
/// Orientation/sub-state bits stored alongside a block.
pub type BlockMeta = u8;
/// Item identifier carried by pickups. Block items share the block id space.
pub type ItemId = u16;

/// Reserved ID for air.
pub const BLOCK_AIR: BlockId = 0;

/// Lowest valid vertical coordinate.
pub const WORLD_MIN_Y: i8 = 0;
/// Highest valid vertical coordinate.
pub const WORLD_MAX_Y: i8 = 127;

/// Absolute cell position in the world grid.
///
/// Horizontal axes are unbounded for practical purposes; the vertical axis is
/// bounded to [`WORLD_MIN_Y`]..=[`WORLD_MAX_Y`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// East/west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i8,
    /// North/south coordinate.
    pub z: i32,
}

impl Position {
    /// Construct a position.
    pub const fn new(x: i32, y: i8, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Move one cell toward `direction`.
    ///
    /// Returns `None` for [`Direction::Undetermined`] and when the result would
    /// leave the vertical world range. Callers treat `None` as "abort", never
    /// as a zero offset.
    pub fn translate(self, direction: Direction) -> Option<Self> {
        if direction == Direction::Undetermined {
            return None;
        }
        let (dx, dy, dz) = direction.offset();
        let y = self.y.checked_add(dy)?;
        if !(WORLD_MIN_Y..=WORLD_MAX_Y).contains(&y) {
            return None;
        }
        Some(Self {
            x: self.x.wrapping_add(dx),
            y,
            z: self.z.wrapping_add(dz),
        })
    }

    /// Neighbouring cells paired with the direction leading to them.
    ///
    /// Cells outside the vertical range are skipped.
    pub fn neighbours(self) -> impl Iterator<Item = (Direction, Position)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.translate(dir).map(|pos| (dir, pos)))
    }

    /// Centre of the cell in world space.
    pub fn center(self) -> [f64; 3] {
        [
            self.x as f64 + 0.5,
            self.y as f64 + 0.5,
            self.z as f64 + 0.5,
        ]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Contents of one cell: block kind plus metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Block {
    /// Block kind.
    pub id: BlockId,
    /// Orientation/sub-state bits.
    pub meta: BlockMeta,
}

impl Block {
    /// The empty cell.
    pub const AIR: Self = Self {
        id: BLOCK_AIR,
        meta: 0,
    };

    /// Construct a block value.
    pub const fn new(id: BlockId, meta: BlockMeta) -> Self {
        Self { id, meta }
    }

    /// True when the cell holds nothing.
    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == BLOCK_AIR
    }
}
