#![warn(missing_docs)]
//! Block interaction layer: routes dig and placement events to per-type
//! behaviors and applies their effects to the world.

mod behavior;
pub mod blocks;
mod config;
mod drops;
mod event;
mod pipeline;
mod registry;
mod user;
mod validator;

pub use behavior::{defaults, BlockBehavior, BlockContext, DefaultBehavior};
pub use config::{
    BehaviorConfig, ConfigError, OreDrop, PlacementConfig, PlantGroup, PropagationConfig,
    ServerConfig, DEFAULT_CONFIG_PATH,
};
pub use drops::{DropRule, DropSpawner, DEFAULT_DROP_COUNT};
pub use event::{CellChange, EventKind, InteractionEvent, Outcome};
pub use pipeline::{InteractionPipeline, DEFAULT_CASCADE_LIMIT};
pub use registry::BlockRegistry;
pub use user::{Player, Roster, User, UserDirectory, UserId};
pub use validator::{PlacementPolicy, PlacementValidator};
