//! Well-known block and item ids.
//!
//! Ids follow the classic numbering so worlds and clients agree on them.
#![allow(missing_docs)]

use crate::{BlockId, ItemId};

pub const AIR: BlockId = 0;
pub const STONE: BlockId = 1;
pub const GRASS: BlockId = 2;
pub const DIRT: BlockId = 3;
pub const COBBLESTONE: BlockId = 4;
pub const PLANKS: BlockId = 5;
pub const SAPLING: BlockId = 6;
pub const BEDROCK: BlockId = 7;
pub const WATER: BlockId = 8;
pub const STATIONARY_WATER: BlockId = 9;
pub const LAVA: BlockId = 10;
pub const STATIONARY_LAVA: BlockId = 11;
pub const SAND: BlockId = 12;
pub const GRAVEL: BlockId = 13;
pub const GOLD_ORE: BlockId = 14;
pub const IRON_ORE: BlockId = 15;
pub const COAL_ORE: BlockId = 16;
pub const LOG: BlockId = 17;
pub const LEAVES: BlockId = 18;
pub const GLASS: BlockId = 20;
pub const LAPIS_ORE: BlockId = 21;
pub const TALL_GRASS: BlockId = 31;
pub const YELLOW_FLOWER: BlockId = 37;
pub const RED_ROSE: BlockId = 38;
pub const BROWN_MUSHROOM: BlockId = 39;
pub const RED_MUSHROOM: BlockId = 40;
pub const TORCH: BlockId = 50;
pub const FIRE: BlockId = 51;
pub const CHEST: BlockId = 54;
pub const REDSTONE_WIRE: BlockId = 55;
pub const DIAMOND_ORE: BlockId = 56;
pub const WORKBENCH: BlockId = 58;
pub const CROPS: BlockId = 59;
pub const FARMLAND: BlockId = 60;
pub const FURNACE: BlockId = 61;
pub const BURNING_FURNACE: BlockId = 62;
pub const SIGN_POST: BlockId = 63;
pub const WOODEN_DOOR: BlockId = 64;
pub const LADDER: BlockId = 65;
pub const MINECART_TRACKS: BlockId = 66;
pub const WALL_SIGN: BlockId = 68;
pub const LEVER: BlockId = 69;
pub const IRON_DOOR: BlockId = 71;
pub const REDSTONE_ORE: BlockId = 73;
pub const GLOWING_REDSTONE_ORE: BlockId = 74;
pub const REDSTONE_TORCH_OFF: BlockId = 75;
pub const REDSTONE_TORCH_ON: BlockId = 76;
pub const SNOW: BlockId = 78;
pub const ICE: BlockId = 79;
pub const CACTUS: BlockId = 81;
pub const REEDS: BlockId = 83;
pub const JUKEBOX: BlockId = 84;
pub const CAKE: BlockId = 92;

/// Non-block items dropped by ores.
pub mod items {
    use crate::ItemId;

    pub const COAL: ItemId = 263;
    pub const DIAMOND: ItemId = 264;
    pub const REDSTONE: ItemId = 331;
    pub const DYE: ItemId = 351;
}

/// Item that represents a block when dropped.
pub const fn item_for(block: BlockId) -> ItemId {
    block as ItemId
}
