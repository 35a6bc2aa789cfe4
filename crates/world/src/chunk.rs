use std::fmt;

use mineward_core::{Block, Position};

/// Chunk width (X axis) in cells.
pub const CHUNK_SIZE_X: usize = 16;
/// Chunk height (Y axis) in cells.
pub const CHUNK_SIZE_Y: usize = 128;
/// Chunk depth (Z axis) in cells.
pub const CHUNK_SIZE_Z: usize = 16;
/// Total cell count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Chunk-local position (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    /// Split a world position into its chunk and local offset.
    ///
    /// Returns `None` for positions below the world floor.
    pub fn from_world(pos: Position) -> Option<(ChunkPos, Self)> {
        let y = usize::try_from(pos.y).ok()?;
        if y >= CHUNK_SIZE_Y {
            return None;
        }
        let local = Self {
            x: pos.x.rem_euclid(CHUNK_SIZE_X as i32) as usize,
            y,
            z: pos.z.rem_euclid(CHUNK_SIZE_Z as i32) as usize,
        };
        Some((ChunkPos::containing(pos), local))
    }

    /// Convert to a linear index within the cell array.
    pub fn index(self) -> usize {
        debug_assert!(self.x < CHUNK_SIZE_X);
        debug_assert!(self.y < CHUNK_SIZE_Y);
        debug_assert!(self.z < CHUNK_SIZE_Z);
        (self.y * CHUNK_SIZE_Z + self.z) * CHUNK_SIZE_X + self.x
    }
}

/// Chunk coordinate (X,Z) in chunk space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk column holding `pos`.
    pub const fn containing(pos: Position) -> Self {
        Self {
            x: pos.x >> 4,
            z: pos.z >> 4,
        }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Column of cells covering the full world height.
pub struct Chunk {
    cells: Vec<Block>,
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new() -> Self {
        Self {
            cells: vec![Block::AIR; CHUNK_VOLUME],
        }
    }

    /// Fetch a cell copy.
    pub fn block(&self, local: LocalPos) -> Block {
        self.cells[local.index()]
    }

    /// Overwrite a cell.
    pub fn set_block(&mut self, local: LocalPos, block: Block) {
        self.cells[local.index()] = block;
    }
}
