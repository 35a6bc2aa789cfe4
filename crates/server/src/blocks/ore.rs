use mineward_core::{DiggingStatus, Direction, ItemId, Position};

use crate::behavior::defaults;
use crate::{BlockBehavior, BlockContext, DropRule, Outcome, User};

/// Ores that drop an item stack instead of themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OreBehavior {
    item: ItemId,
    count: u32,
}

impl OreBehavior {
    /// Drop `count` of `item` when mined.
    pub const fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }

    /// The configured drop.
    pub fn drop_rule(&self) -> DropRule {
        DropRule::Item {
            item: self.item,
            count: self.count,
        }
    }
}

impl BlockBehavior for OreBehavior {
    fn name(&self) -> &'static str {
        "ore"
    }

    fn on_broken(
        &self,
        ctx: &BlockContext<'_>,
        _user: &dyn User,
        _status: DiggingStatus,
        pos: Position,
        _direction: Direction,
    ) -> Outcome {
        defaults::destroy(ctx, pos, self.drop_rule())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use mineward_core::{blocks, Block};
    use mineward_world::{ChunkMap, WorldMap};

    use crate::{PlacementPolicy, Player};

    #[test]
    fn redstone_ore_drops_four_dust() {
        let world = ChunkMap::new(4, 0);
        let pos = Position::new(4, 12, 4);
        world.fill(pos, Block::new(blocks::REDSTONE_ORE, 0));
        let users: Vec<Player> = Vec::new();
        let policy = PlacementPolicy::default();
        let ctx = BlockContext::new(&world, &users, &policy);
        let user = Player::new(1, "p", DVec3::ZERO);

        let ore = OreBehavior::new(blocks::items::REDSTONE, 4);
        let out = ore.on_broken(&ctx, &user, DiggingStatus::Broken, pos, Direction::Up);

        assert_eq!(out.changes().len(), 1);
        assert_eq!(world.block(pos), Some(Block::AIR));
        let pickups = world.pickups();
        assert_eq!(pickups.len(), 1);
        assert_eq!(pickups[0].item, blocks::items::REDSTONE);
        assert_eq!(pickups[0].count, 4);
        assert_eq!(world.take_block_changes().len(), 1);
    }
}
