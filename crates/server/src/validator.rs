//! Placement gates: support stackability, user occupancy and cell emptiness.

use std::collections::BTreeSet;

use mineward_core::{BlockId, Position};
use mineward_world::{default_non_stackable, WorldMap};

use crate::UserDirectory;

/// Which block kinds refuse to support further placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPolicy {
    non_stackable: BTreeSet<BlockId>,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            non_stackable: default_non_stackable(),
        }
    }
}

impl PlacementPolicy {
    /// Policy with an explicit non-supporting set.
    ///
    /// Air is always non-supporting whether or not it is listed.
    pub fn with_non_stackable(ids: impl IntoIterator<Item = BlockId>) -> Self {
        let mut non_stackable: BTreeSet<BlockId> = ids.into_iter().collect();
        non_stackable.insert(mineward_core::BLOCK_AIR);
        Self { non_stackable }
    }

    /// Whether a block may be placed against `id`.
    pub fn is_support_stackable(&self, id: BlockId) -> bool {
        !self.non_stackable.contains(&id)
    }

    /// The non-supporting set.
    pub fn non_stackable(&self) -> &BTreeSet<BlockId> {
        &self.non_stackable
    }
}

/// The three placement predicates bound to live collaborators.
#[derive(Clone, Copy)]
pub struct PlacementValidator<'a> {
    world: &'a dyn WorldMap,
    users: &'a dyn UserDirectory,
    policy: &'a PlacementPolicy,
}

impl<'a> PlacementValidator<'a> {
    /// Bind the predicates to a world, its users and a stackability table.
    pub fn new(
        world: &'a dyn WorldMap,
        users: &'a dyn UserDirectory,
        policy: &'a PlacementPolicy,
    ) -> Self {
        Self {
            world,
            users,
            policy,
        }
    }

    /// Table lookup on the support block kind.
    pub fn is_support_stackable(&self, id: BlockId) -> bool {
        self.policy.is_support_stackable(id)
    }

    /// True if any connected user's collision volume overlaps `pos`.
    pub fn is_cell_occupied_by_user(&self, pos: Position) -> bool {
        self.users.any_occupies(pos)
    }

    /// True only if the world reports air at `pos`. Unloaded cells are not empty.
    pub fn is_cell_empty(&self, pos: Position) -> bool {
        matches!(self.world.block(pos), Some(block) if block.is_air())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use mineward_core::{blocks, Block};
    use mineward_world::{ChunkMap, ChunkPos};

    use crate::Player;

    #[test]
    fn custom_policy_always_rejects_air() {
        let policy = PlacementPolicy::with_non_stackable([blocks::TORCH]);
        assert!(!policy.is_support_stackable(blocks::AIR));
        assert!(!policy.is_support_stackable(blocks::TORCH));
        assert!(policy.is_support_stackable(blocks::WATER));
    }

    #[test]
    fn emptiness_requires_a_loaded_air_cell() {
        let world = ChunkMap::new(4, 0);
        let users: Vec<Player> = Vec::new();
        let policy = PlacementPolicy::default();
        let validator = PlacementValidator::new(&world, &users, &policy);

        let pos = Position::new(0, 64, 0);
        assert!(!validator.is_cell_empty(pos));

        world.load_chunk(ChunkPos::containing(pos));
        assert!(validator.is_cell_empty(pos));

        world.fill(pos, Block::new(blocks::STONE, 0));
        assert!(!validator.is_cell_empty(pos));
    }

    #[test]
    fn occupancy_consults_every_user() {
        let world = ChunkMap::new(1, 0);
        let users = vec![
            Player::new(1, "a", DVec3::new(0.5, 64.0, 0.5)),
            Player::new(2, "b", DVec3::new(8.5, 64.0, 8.5)),
        ];
        let policy = PlacementPolicy::default();
        let validator = PlacementValidator::new(&world, &users, &policy);

        assert!(validator.is_cell_occupied_by_user(Position::new(8, 65, 8)));
        assert!(!validator.is_cell_occupied_by_user(Position::new(4, 64, 4)));
    }
}
