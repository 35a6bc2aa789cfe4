//! Placement directions and the neighbour offsets they select.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::BlockMeta;

/// Face of a cell, used both as neighbour selector and stored orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    South,
    /// +Z
    North,
    /// -X
    West,
    /// +X
    East,
    /// Client did not target a face.
    Undetermined,
}

/// Error returned when a wire code names no direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown direction code {0}")]
pub struct DirectionError(pub i8);

impl Direction {
    /// The six canonical directions in wire-code order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::South,
        Direction::North,
        Direction::West,
        Direction::East,
    ];

    /// Horizontal directions only.
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::West,
        Direction::East,
    ];

    /// Decode the face code sent by clients.
    ///
    /// Negative codes mean "no face" and decode to [`Direction::Undetermined`].
    pub fn from_wire(code: i8) -> Result<Self, DirectionError> {
        match code {
            i8::MIN..=-1 => Ok(Direction::Undetermined),
            0 => Ok(Direction::Down),
            1 => Ok(Direction::Up),
            2 => Ok(Direction::South),
            3 => Ok(Direction::North),
            4 => Ok(Direction::West),
            5 => Ok(Direction::East),
            other => Err(DirectionError(other)),
        }
    }

    /// Encode as the client face code.
    pub const fn to_wire(self) -> i8 {
        match self {
            Direction::Down => 0,
            Direction::Up => 1,
            Direction::South => 2,
            Direction::North => 3,
            Direction::West => 4,
            Direction::East => 5,
            Direction::Undetermined => -1,
        }
    }

    /// Orientation bits stored with a placed block.
    pub const fn as_meta(self) -> BlockMeta {
        match self {
            Direction::Undetermined => 0,
            other => other.to_wire() as BlockMeta,
        }
    }

    /// Recover a direction from stored orientation bits.
    pub fn from_meta(meta: BlockMeta) -> Self {
        match i8::try_from(meta) {
            Ok(code) => Self::from_wire(code).unwrap_or(Direction::Undetermined),
            Err(_) => Direction::Undetermined,
        }
    }

    /// Cell offset `(dx, dy, dz)` selected by this direction.
    ///
    /// [`Direction::Undetermined`] yields no movement.
    pub const fn offset(self) -> (i32, i8, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::South => (0, 0, -1),
            Direction::North => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
            Direction::Undetermined => (0, 0, 0),
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::South => Direction::North,
            Direction::North => Direction::South,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::Undetermined => Direction::Undetermined,
        }
    }

    /// True for the four compass directions.
    pub const fn is_horizontal(self) -> bool {
        matches!(
            self,
            Direction::South | Direction::North | Direction::West | Direction::East
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_are_stable() {
        for (code, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(Direction::from_wire(code as i8), Ok(*dir));
            assert_eq!(dir.to_wire(), code as i8);
        }
        assert_eq!(Direction::from_wire(-1), Ok(Direction::Undetermined));
        assert_eq!(Direction::from_wire(6), Err(DirectionError(6)));
    }

    #[test]
    fn offsets_are_unit_vectors() {
        for dir in Direction::ALL {
            let (dx, dy, dz) = dir.offset();
            assert_eq!(dx.abs() + i32::from(dy.abs()) + dz.abs(), 1);
        }
        assert_eq!(Direction::Undetermined.offset(), (0, 0, 0));
    }

    #[test]
    fn opposite_cancels_offset() {
        for dir in Direction::ALL {
            let (ax, ay, az) = dir.offset();
            let (bx, by, bz) = dir.opposite().offset();
            assert_eq!((ax + bx, ay + by, az + bz), (0, 0, 0));
        }
    }

    #[test]
    fn meta_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_meta(dir.as_meta()), dir);
        }
        assert_eq!(Direction::from_meta(0xF0), Direction::Undetermined);
    }
}
