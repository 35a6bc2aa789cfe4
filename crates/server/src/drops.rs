//! Turns destroyed blocks into pickups.

use mineward_core::{blocks, BlockId, ItemId, Position};
use mineward_world::WorldMap;

/// Stack size of every pickup spawned by the default break and replace paths.
pub const DEFAULT_DROP_COUNT: u32 = 1;

/// What a destroyed block leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRule {
    /// One item of the block itself.
    SelfItem,
    /// A fixed item stack.
    Item {
        /// Dropped item.
        item: ItemId,
        /// Stack size; zero drops nothing.
        count: u32,
    },
    /// Nothing.
    Nothing,
}

/// Spawns pickups through the world map.
#[derive(Clone, Copy)]
pub struct DropSpawner<'a> {
    world: &'a dyn WorldMap,
}

impl<'a> DropSpawner<'a> {
    /// Spawner writing into `world`.
    pub fn new(world: &'a dyn WorldMap) -> Self {
        Self { world }
    }

    /// Spawn `count` of `item` at `pos`.
    pub fn spawn_pickup(&self, pos: Position, item: ItemId, count: u32) {
        self.world.spawn_pickup(pos, item, count);
    }

    /// Spawn what `rule` yields for a destroyed `block`.
    pub fn spawn_for(&self, pos: Position, block: BlockId, rule: DropRule) {
        match rule {
            DropRule::SelfItem => {
                self.spawn_pickup(pos, blocks::item_for(block), DEFAULT_DROP_COUNT)
            }
            DropRule::Item { item, count } if count > 0 => self.spawn_pickup(pos, item, count),
            DropRule::Item { .. } | DropRule::Nothing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineward_world::ChunkMap;

    #[test]
    fn self_item_drops_one_of_the_block() {
        let world = ChunkMap::new(1, 0);
        let drops = DropSpawner::new(&world);
        drops.spawn_for(Position::new(1, 2, 3), blocks::DIRT, DropRule::SelfItem);
        let pickups = world.pickups();
        assert_eq!(pickups.len(), 1);
        assert_eq!(pickups[0].item, blocks::DIRT as ItemId);
        assert_eq!(pickups[0].count, DEFAULT_DROP_COUNT);
    }

    #[test]
    fn fixed_item_and_nothing_rules() {
        let world = ChunkMap::new(1, 0);
        let drops = DropSpawner::new(&world);
        let pos = Position::new(0, 10, 0);
        drops.spawn_for(
            pos,
            blocks::REDSTONE_ORE,
            DropRule::Item {
                item: blocks::items::REDSTONE,
                count: 4,
            },
        );
        drops.spawn_for(pos, blocks::GLASS, DropRule::Nothing);
        drops.spawn_for(pos, blocks::GLASS, DropRule::Item { item: 1, count: 0 });

        let pickups = world.pickups();
        assert_eq!(pickups.len(), 1);
        assert_eq!(pickups[0].item, blocks::items::REDSTONE);
        assert_eq!(pickups[0].count, 4);
    }
}
