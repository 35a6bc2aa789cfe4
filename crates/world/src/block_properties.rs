//! Block properties - structural flags used by placement and propagation.

use std::collections::BTreeSet;

use mineward_core::{blocks, BlockId};

bitflags::bitflags! {
    /// Structural traits of a block kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BlockFlags: u8 {
        /// Has a full collision volume.
        const SOLID = 0b0000_0001;
        /// Flowing or still liquid.
        const LIQUID = 0b0000_0010;
        /// Other blocks may be placed against it.
        const SUPPORTS_STACKING = 0b0000_0100;
        /// Hangs off a neighbouring support and breaks without it.
        const ATTACHABLE = 0b0000_1000;
        /// Falls when the cell below is empty.
        const GRAVITY = 0b0001_0000;
        /// Needs soil directly below.
        const PLANT = 0b0010_0000;
    }
}

impl Default for BlockFlags {
    fn default() -> Self {
        BlockFlags::SOLID | BlockFlags::SUPPORTS_STACKING
    }
}

/// Default flags for a block kind. Unknown ids behave like a plain solid block.
pub fn block_flags(id: BlockId) -> BlockFlags {
    match id {
        blocks::AIR | blocks::FIRE => BlockFlags::empty(),

        blocks::WATER | blocks::STATIONARY_WATER | blocks::LAVA | blocks::STATIONARY_LAVA => {
            BlockFlags::LIQUID
        }

        blocks::SAND | blocks::GRAVEL => BlockFlags::default() | BlockFlags::GRAVITY,

        blocks::TORCH
        | blocks::REDSTONE_TORCH_OFF
        | blocks::REDSTONE_TORCH_ON
        | blocks::LADDER
        | blocks::LEVER
        | blocks::WALL_SIGN
        | blocks::SIGN_POST => BlockFlags::ATTACHABLE,

        blocks::SAPLING
        | blocks::YELLOW_FLOWER
        | blocks::RED_ROSE
        | blocks::BROWN_MUSHROOM
        | blocks::RED_MUSHROOM
        | blocks::CROPS
        | blocks::REEDS
        | blocks::TALL_GRASS => BlockFlags::PLANT,

        blocks::REDSTONE_WIRE | blocks::MINECART_TRACKS | blocks::SNOW => BlockFlags::empty(),

        // Solid, but right-click opens them or they are not full cubes.
        blocks::WORKBENCH
        | blocks::FURNACE
        | blocks::BURNING_FURNACE
        | blocks::CHEST
        | blocks::JUKEBOX
        | blocks::WOODEN_DOOR
        | blocks::IRON_DOOR
        | blocks::ICE
        | blocks::CAKE
        | blocks::CACTUS => BlockFlags::SOLID,

        _ => BlockFlags::default(),
    }
}

/// Whether a block placed against `id` may be stacked onto it.
pub fn supports_stacking(id: BlockId) -> bool {
    block_flags(id).contains(BlockFlags::SUPPORTS_STACKING)
}

/// Every block id that does not support stacking under the default table.
pub fn default_non_stackable() -> BTreeSet<BlockId> {
    (BlockId::MIN..=BlockId::MAX)
        .filter(|id| !supports_stacking(*id))
        .collect()
}
