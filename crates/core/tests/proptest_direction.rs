//! Property-based tests for direction geometry
//!
//! Validates for any cell and face:
//! - Up moves exactly one cell vertically and nothing else
//! - Opposite faces cancel out
//! - The undetermined face never moves anything
//! - Wire codes decode back to the same face

use mineward_core::{Direction, Position, WORLD_MAX_Y, WORLD_MIN_Y};
use proptest::prelude::*;

fn any_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    /// Property: translate(up) raises y by one and keeps x and z
    #[test]
    fn up_moves_one_cell_vertically(
        x in any::<i32>(),
        y in WORLD_MIN_Y..WORLD_MAX_Y,
        z in any::<i32>(),
    ) {
        let pos = Position::new(x, y, z);
        let up = pos.translate(Direction::Up).unwrap();
        prop_assert_eq!(up, Position::new(x, y + 1, z));
    }

    /// Property: the undetermined face aborts every translation
    #[test]
    fn undetermined_never_translates(x in any::<i32>(), y in any::<i8>(), z in any::<i32>()) {
        prop_assert_eq!(Position::new(x, y, z).translate(Direction::Undetermined), None);
    }

    /// Property: stepping out and back returns to the start
    #[test]
    fn opposite_faces_cancel(
        x in -1_000_000i32..1_000_000,
        y in (WORLD_MIN_Y + 1)..WORLD_MAX_Y,
        z in -1_000_000i32..1_000_000,
        dir in any_direction(),
    ) {
        let pos = Position::new(x, y, z);
        let there = pos.translate(dir).unwrap();
        prop_assert_ne!(there, pos);
        prop_assert_eq!(there.translate(dir.opposite()), Some(pos));
    }

    /// Property: translation never leaves the vertical range
    #[test]
    fn translation_stays_in_world(y in any::<i8>(), dir in any_direction()) {
        if let Some(moved) = Position::new(0, y, 0).translate(dir) {
            prop_assert!((WORLD_MIN_Y..=WORLD_MAX_Y).contains(&moved.y));
        }
    }

    /// Property: every wire code either decodes and re-encodes or is rejected
    #[test]
    fn wire_codes_round_trip(code in any::<i8>()) {
        match Direction::from_wire(code) {
            Ok(Direction::Undetermined) => prop_assert!(code < 0),
            Ok(dir) => prop_assert_eq!(dir.to_wire(), code),
            Err(err) => prop_assert!(code >= 6 && err.0 == code),
        }
    }
}
