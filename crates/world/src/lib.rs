//! World-side collaborators of the interaction layer: cell storage, block
//! properties and pickup spawning.

mod block_properties;
mod chunk;
mod map;
mod pickup;

pub use block_properties::*;
pub use chunk::*;
pub use map::*;
pub use pickup::*;
