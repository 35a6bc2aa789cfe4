//! mineward - block interaction layer for a multiplayer voxel world server
//!
//! Re-exports the workspace crates and wires the standard setup: a chunk map,
//! a player roster and a registry with the configured behaviors bound.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

pub use mineward_core::{
    blocks, Block, BlockId, BlockMeta, DiggingStatus, Direction, ItemId, Position, BLOCK_AIR,
};
pub use mineward_physics::Aabb;
pub use mineward_server::{
    BlockBehavior, BlockContext, BlockRegistry, CellChange, ConfigError, DefaultBehavior,
    DropRule, InteractionEvent, InteractionPipeline, Outcome, PlacementPolicy, Player, Roster,
    ServerConfig, User, UserDirectory, DEFAULT_CONFIG_PATH,
};
pub use mineward_world::{BlockChange, ChunkMap, ChunkPos, Pickup, WorldMap};

/// Chunks kept resident by [`BlockInteractions::from_config`].
pub const DEFAULT_CHUNK_CAPACITY: usize = 1024;

/// A ready-to-use interaction stack over an in-memory world.
pub struct BlockInteractions {
    world: Arc<ChunkMap>,
    roster: Arc<Roster>,
    pipeline: InteractionPipeline,
}

impl BlockInteractions {
    /// Build the stack described by `config`.
    ///
    /// `seed` drives pickup scatter so runs are reproducible.
    pub fn from_config(config: &ServerConfig, seed: u64) -> Self {
        let world = Arc::new(ChunkMap::new(DEFAULT_CHUNK_CAPACITY, seed));
        let roster = Arc::new(Roster::new());
        let mut registry = BlockRegistry::new(world.clone(), roster.clone())
            .with_policy(config.placement_policy());
        config.install(&mut registry);
        info!(
            bindings = registry.len(),
            cascade_limit = config.propagation.cascade_limit,
            "block interactions ready"
        );
        let pipeline =
            InteractionPipeline::new(registry).with_cascade_limit(config.propagation.cascade_limit);
        Self {
            world,
            roster,
            pipeline,
        }
    }

    /// Build from [`DEFAULT_CONFIG_PATH`], falling back to the defaults when
    /// the file is missing or invalid.
    pub fn load(seed: u64) -> Self {
        Self::from_config(&ServerConfig::load(), seed)
    }

    /// Load `path` strictly and build from it.
    pub fn from_config_path(path: &Path, seed: u64) -> Result<Self> {
        let config = ServerConfig::load_strict(path)?;
        Ok(Self::from_config(&config, seed))
    }

    pub fn world(&self) -> &Arc<ChunkMap> {
        &self.world
    }

    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    pub fn pipeline(&self) -> &InteractionPipeline {
        &self.pipeline
    }
}

impl Default for BlockInteractions {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default(), 0)
    }
}
