//! Behaviors for block kinds that differ from the default pipeline.

mod attached;
mod consumable;
mod falling;
mod ore;
mod plant;

pub use attached::AttachedBehavior;
pub use consumable::ConsumableBehavior;
pub use falling::FallingBehavior;
pub use ore::OreBehavior;
pub use plant::PlantBehavior;
