//! Server-side interaction settings, read from TOML.

use std::sync::Arc;
use std::{fs, path::Path};

use anyhow::{Context, Result};
use mineward_core::{blocks, BlockId, ItemId, BLOCK_AIR};
use mineward_world::default_non_stackable;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::blocks::{
    AttachedBehavior, ConsumableBehavior, FallingBehavior, OreBehavior, PlantBehavior,
};
use crate::pipeline::DEFAULT_CASCADE_LIMIT;
use crate::{BlockRegistry, PlacementPolicy};

/// Where [`ServerConfig::load`] looks, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/server.toml";

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the schema.
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// A behavior list binds air.
    #[error("behaviors.{list} binds air (block 0)")]
    Air {
        /// Name of the offending list.
        list: &'static str,
    },
    /// An ore is configured to drop nothing.
    #[error("ore drop for block {block} has a count of zero")]
    ZeroDropCount {
        /// Ore block id.
        block: BlockId,
    },
}

/// Interaction settings. Every section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `[placement]`: what blocks can be placed against.
    pub placement: PlacementConfig,
    /// `[behaviors]`: block kinds bound to each behavior.
    pub behaviors: BehaviorConfig,
    /// `[propagation]`: neighbour notification limits.
    pub propagation: PropagationConfig,
}

/// Placement policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Block kinds nothing may be placed against. Air is always included.
    pub non_stackable: Vec<BlockId>,
}

/// Behavior bindings by block kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Blocks that fall until they land on something.
    pub falling: Vec<BlockId>,
    /// Floor or wall mounted.
    pub attached: Vec<BlockId>,
    /// Wall mounted only.
    pub wall_attached: Vec<BlockId>,
    /// Floor mounted only.
    pub floor_attached: Vec<BlockId>,
    /// Blocks that break on the first hit.
    pub consumable: Vec<BlockId>,
    /// Plants and the soil they need.
    pub plant: Vec<PlantGroup>,
    /// Ores with their own drops.
    pub ore: Vec<OreDrop>,
}

/// Plants sharing one soil set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlantGroup {
    /// Plant block kinds.
    pub blocks: Vec<BlockId>,
    /// Block kinds they may stand on.
    pub soil: Vec<BlockId>,
}

/// What one ore kind drops when broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct OreDrop {
    /// Ore block id.
    pub block: BlockId,
    /// Dropped item.
    pub item: ItemId,
    /// Items per break.
    pub count: u32,
}

/// Neighbour notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Neighbour notifications processed per inbound event.
    pub cascade_limit: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            non_stackable: default_non_stackable().into_iter().collect(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        let soil = vec![blocks::GRASS, blocks::DIRT, blocks::FARMLAND];
        Self {
            falling: vec![blocks::SAND, blocks::GRAVEL],
            attached: vec![
                blocks::TORCH,
                blocks::LEVER,
                blocks::REDSTONE_TORCH_OFF,
                blocks::REDSTONE_TORCH_ON,
            ],
            wall_attached: vec![blocks::LADDER, blocks::WALL_SIGN],
            floor_attached: vec![blocks::SIGN_POST, blocks::REDSTONE_WIRE],
            consumable: vec![blocks::SNOW, blocks::TALL_GRASS],
            plant: vec![
                PlantGroup {
                    blocks: vec![
                        blocks::SAPLING,
                        blocks::YELLOW_FLOWER,
                        blocks::RED_ROSE,
                        blocks::BROWN_MUSHROOM,
                        blocks::RED_MUSHROOM,
                    ],
                    soil: soil.clone(),
                },
                PlantGroup {
                    blocks: vec![blocks::CROPS],
                    soil: vec![blocks::FARMLAND],
                },
                PlantGroup {
                    blocks: vec![blocks::REEDS],
                    soil: soil.into_iter().chain([blocks::SAND]).collect(),
                },
            ],
            ore: classic_ore_drops(),
        }
    }
}

/// Ores that do not drop themselves.
fn classic_ore_drops() -> Vec<OreDrop> {
    use mineward_core::blocks::items;
    let entry = |block, item, count| OreDrop { block, item, count };
    vec![
        entry(blocks::COAL_ORE, items::COAL, 1),
        entry(blocks::DIAMOND_ORE, items::DIAMOND, 1),
        entry(blocks::REDSTONE_ORE, items::REDSTONE, 4),
        entry(blocks::GLOWING_REDSTONE_ORE, items::REDSTONE, 4),
        entry(blocks::LAPIS_ORE, items::DYE, 4),
    ]
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            cascade_limit: DEFAULT_CASCADE_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Load from the default path, falling back to defaults on errors.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to load {}: {err}. Using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    warn!(
                        "Server config not found at {}. Using defaults",
                        path.display()
                    );
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                Self::default()
            }
        }
    }

    /// Load from `path`, returning errors to the caller.
    ///
    /// Intended for tests and validation tooling; the server uses
    /// [`ServerConfig::load_from_path`].
    pub fn load_strict(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Reject bindings of air and ore drops with a zero count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.behaviors;
        let lists: [(&'static str, &[BlockId]); 5] = [
            ("falling", b.falling.as_slice()),
            ("attached", b.attached.as_slice()),
            ("wall_attached", b.wall_attached.as_slice()),
            ("floor_attached", b.floor_attached.as_slice()),
            ("consumable", b.consumable.as_slice()),
        ];
        for (list, ids) in lists {
            if ids.contains(&BLOCK_AIR) {
                return Err(ConfigError::Air { list });
            }
        }
        if b.plant.iter().any(|group| group.blocks.contains(&BLOCK_AIR)) {
            return Err(ConfigError::Air { list: "plant" });
        }
        for drop in &b.ore {
            if drop.block == BLOCK_AIR {
                return Err(ConfigError::Air { list: "ore" });
            }
            if drop.count == 0 {
                return Err(ConfigError::ZeroDropCount { block: drop.block });
            }
        }
        Ok(())
    }

    /// Placement policy described by `[placement]`.
    pub fn placement_policy(&self) -> PlacementPolicy {
        PlacementPolicy::with_non_stackable(self.placement.non_stackable.iter().copied())
    }

    /// Bind the configured behaviors into `registry`.
    ///
    /// Later lists win when a block id appears more than once.
    pub fn install(&self, registry: &mut BlockRegistry) {
        let b = &self.behaviors;
        registry.register_all(b.falling.iter().copied(), Arc::new(FallingBehavior));
        registry.register_all(
            b.attached.iter().copied(),
            Arc::new(AttachedBehavior::floor_or_wall()),
        );
        registry.register_all(
            b.wall_attached.iter().copied(),
            Arc::new(AttachedBehavior::wall_only()),
        );
        registry.register_all(
            b.floor_attached.iter().copied(),
            Arc::new(AttachedBehavior::floor_only()),
        );
        registry.register_all(b.consumable.iter().copied(), Arc::new(ConsumableBehavior));
        for group in &b.plant {
            registry.register_all(
                group.blocks.iter().copied(),
                Arc::new(PlantBehavior::new(group.soil.iter().copied())),
            );
        }
        for drop in &b.ore {
            registry.register(drop.block, Arc::new(OreBehavior::new(drop.item, drop.count)));
        }
        debug!(bindings = registry.len(), "installed configured block behaviors");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineward_world::ChunkMap;

    use crate::Player;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("mineward-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.propagation.cascade_limit, DEFAULT_CASCADE_LIMIT);
        assert!(!cfg.placement_policy().is_support_stackable(blocks::TORCH));
    }

    #[test]
    fn partial_sections_override_only_what_they_name() {
        let cfg = ServerConfig::from_toml_str(
            r#"
            [placement]
            non_stackable = [20]

            [propagation]
            cascade_limit = 16
            "#,
        )
        .unwrap();
        assert_eq!(cfg.propagation.cascade_limit, 16);
        let policy = cfg.placement_policy();
        assert!(!policy.is_support_stackable(blocks::GLASS));
        assert!(!policy.is_support_stackable(blocks::AIR));
        assert!(policy.is_support_stackable(blocks::TORCH));
        assert_eq!(cfg.behaviors, BehaviorConfig::default());
    }

    #[test]
    fn binding_air_is_rejected() {
        let err = ServerConfig::from_toml_str("[behaviors]\nfalling = [12, 0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Air { list: "falling" }));
    }

    #[test]
    fn zero_ore_count_is_rejected() {
        let err = ServerConfig::from_toml_str(
            "[[behaviors.ore]]\nblock = 16\nitem = 263\ncount = 0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDropCount { block: 16 }));
    }

    #[test]
    fn lenient_load_falls_back_on_bad_file() {
        let path = temp_path("broken.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[propagation]\ncascade_limit = \"lots\"\n").unwrap();

        assert_eq!(ServerConfig::load_from_path(&path), ServerConfig::default());
        assert!(ServerConfig::load_strict(&path).is_err());
        assert_eq!(
            ServerConfig::load_from_path(&temp_path("missing.toml")),
            ServerConfig::default()
        );
    }

    #[test]
    fn saved_config_loads_back() {
        let mut cfg = ServerConfig::default();
        cfg.propagation.cascade_limit = 64;
        cfg.behaviors.consumable = vec![blocks::SNOW];
        let path = temp_path("nested/server.toml");

        cfg.save_to_path(&path).unwrap();
        assert_eq!(ServerConfig::load_strict(&path).unwrap(), cfg);
    }

    #[test]
    fn install_binds_every_list() {
        let world = Arc::new(ChunkMap::new(1, 0));
        let users: Arc<Vec<Player>> = Arc::new(Vec::new());
        let mut registry = BlockRegistry::new(world, users);
        ServerConfig::default().install(&mut registry);

        assert_eq!(registry.behavior(blocks::SAND).name(), "falling");
        assert_eq!(registry.behavior(blocks::LADDER).name(), "attached");
        assert_eq!(registry.behavior(blocks::REEDS).name(), "plant");
        assert_eq!(registry.behavior(blocks::COAL_ORE).name(), "ore");
        assert_eq!(registry.behavior(blocks::SNOW).name(), "consumable");
        assert_eq!(registry.behavior(blocks::STONE).name(), "default");
    }
}
