//! Players as seen by the interaction layer.

use std::sync::{PoisonError, RwLock};

use glam::DVec3;
use mineward_core::{Direction, Position};
use mineward_physics::Aabb;

/// Session-assigned user identifier.
pub type UserId = u32;

/// The acting player of an interaction event.
pub trait User: Send + Sync {
    /// Session identifier.
    fn id(&self) -> UserId;

    /// Horizontal direction the user faces when looking at `pos`.
    fn facing_relative_to(&self, pos: Position) -> Direction;

    /// Whether the user's collision volume overlaps `pos`.
    fn occupies_cell(&self, pos: Position) -> bool;
}

/// Query over every connected user.
pub trait UserDirectory: Send + Sync {
    /// True if any connected user's collision volume overlaps `pos`.
    fn any_occupies(&self, pos: Position) -> bool;
}

impl<U: User> UserDirectory for Vec<U> {
    fn any_occupies(&self, pos: Position) -> bool {
        self.iter().any(|user| user.occupies_cell(pos))
    }
}

/// Reference user backed by a foot position.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: UserId,
    name: String,
    feet: DVec3,
}

impl Player {
    /// Create a player standing at `feet`.
    pub fn new(id: UserId, name: impl Into<String>, feet: DVec3) -> Self {
        Self {
            id,
            name: name.into(),
            feet,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Foot position.
    pub fn position(&self) -> DVec3 {
        self.feet
    }

    /// Move the player.
    pub fn set_position(&mut self, feet: DVec3) {
        self.feet = feet;
    }

    /// Collision volume at the current position.
    pub fn bounds(&self) -> Aabb {
        Aabb::player(self.feet)
    }
}

impl User for Player {
    fn id(&self) -> UserId {
        self.id
    }

    fn facing_relative_to(&self, pos: Position) -> Direction {
        let [cx, _, cz] = pos.center();
        let dx = cx - self.feet.x;
        let dz = cz - self.feet.z;
        // Ties go to the z axis.
        if dx.abs() > dz.abs() {
            if dx > 0.0 {
                Direction::East
            } else {
                Direction::West
            }
        } else if dz > 0.0 {
            Direction::North
        } else {
            Direction::South
        }
    }

    fn occupies_cell(&self, pos: Position) -> bool {
        self.bounds().intersects(&Aabb::cell(pos))
    }
}

/// Live set of connected players.
#[derive(Default)]
pub struct Roster {
    players: RwLock<Vec<Player>>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a player.
    pub fn join(&self, player: Player) {
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        players.retain(|p| p.id != player.id);
        players.push(player);
    }

    /// Remove a player. Returns true when they were present.
    pub fn leave(&self, id: UserId) -> bool {
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        let before = players.len();
        players.retain(|p| p.id != id);
        players.len() != before
    }

    /// Update a player's position. Returns false for unknown ids.
    pub fn move_to(&self, id: UserId, feet: DVec3) -> bool {
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        match players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.set_position(feet);
                true
            }
            None => false,
        }
    }

    /// Snapshot of a player.
    pub fn get(&self, id: UserId) -> Option<Player> {
        let players = self.players.read().unwrap_or_else(PoisonError::into_inner);
        players.iter().find(|p| p.id == id).cloned()
    }

    /// Number of connected players.
    pub fn len(&self) -> usize {
        self.players.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserDirectory for Roster {
    fn any_occupies(&self, pos: Position) -> bool {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .any_occupies(pos)
    }
}
