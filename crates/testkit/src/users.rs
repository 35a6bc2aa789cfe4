//! Scripted users for worldtests.

use std::collections::BTreeSet;

use mineward_core::{Direction, Position};
use mineward_server::{User, UserDirectory, UserId};

/// A user with a fixed facing and a fixed set of occupied cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeUser {
    /// Session identifier.
    pub id: UserId,
    /// Direction reported for every cell.
    pub facing: Direction,
    /// Cells the user's collision volume overlaps.
    pub occupied: BTreeSet<Position>,
}

impl FakeUser {
    /// User occupying nothing.
    pub fn new(id: UserId, facing: Direction) -> Self {
        Self {
            id,
            facing,
            occupied: BTreeSet::new(),
        }
    }

    /// Builder adding an occupied cell.
    pub fn occupying(mut self, pos: Position) -> Self {
        self.occupied.insert(pos);
        self
    }
}

impl User for FakeUser {
    fn id(&self) -> UserId {
        self.id
    }

    fn facing_relative_to(&self, _pos: Position) -> Direction {
        self.facing
    }

    fn occupies_cell(&self, pos: Position) -> bool {
        self.occupied.contains(&pos)
    }
}

/// A directory of fake users.
#[derive(Debug, Clone, Default)]
pub struct FakeRoster {
    users: Vec<FakeUser>,
}

impl FakeRoster {
    /// Roster holding `users`.
    pub fn new(users: impl IntoIterator<Item = FakeUser>) -> Self {
        Self {
            users: users.into_iter().collect(),
        }
    }

    /// Nobody connected.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl UserDirectory for FakeRoster {
    fn any_occupies(&self, pos: Position) -> bool {
        self.users.iter().any(|user| user.occupies_cell(pos))
    }
}
