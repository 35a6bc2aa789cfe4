//! Per-block-type interaction handlers.
//!
//! A [`BlockBehavior`] overrides any subset of nine hooks. Hooks that are not
//! overridden fall back to the default pipeline in [`defaults`], so a type
//! binding only has to describe what makes its block different.

use mineward_core::{Block, BlockId, DiggingStatus, Direction, Position};
use mineward_world::WorldMap;

use crate::{DropRule, DropSpawner, Outcome, PlacementPolicy, PlacementValidator, User, UserDirectory};

/// Collaborators a handler may touch.
#[derive(Clone, Copy)]
pub struct BlockContext<'a> {
    /// Authoritative storage and broadcast.
    pub world: &'a dyn WorldMap,
    /// Connected users, for occupancy checks.
    pub users: &'a dyn UserDirectory,
    /// Stackability table.
    pub policy: &'a PlacementPolicy,
}

impl<'a> BlockContext<'a> {
    /// Bundle the collaborators for one dispatch.
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

    /// Placement predicates bound to this context.
    pub fn validator(&self) -> PlacementValidator<'a> {
        PlacementValidator::new(self.world, self.users, self.policy)
    }

    /// Pickup spawner bound to this context.
    pub fn drops(&self) -> DropSpawner<'a> {
        DropSpawner::new(self.world)
    }
}

/// Handler set for one block kind.
///
/// Every hook returns the cells it rewrote. Rejections return
/// [`Outcome::unchanged`]; there is no error channel.
#[allow(unused_variables)]
pub trait BlockBehavior: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str {
        "default"
    }

    /// The user began digging `pos`.
    fn on_started_digging(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        status: DiggingStatus,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        Outcome::unchanged()
    }

    /// Dig progress on `pos`; also receives unrecognised digging statuses.
    fn on_digging(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        status: DiggingStatus,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        Outcome::unchanged()
    }

    /// The user gave up digging `pos`.
    fn on_stopped_digging(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        status: DiggingStatus,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        Outcome::unchanged()
    }

    /// The user finished digging `pos`. Breaks the block by default.
    fn on_broken(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        status: DiggingStatus,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        defaults::broken(ctx, pos)
    }

    /// The neighbour on the `direction` side of `pos` was destroyed. `old_block`
    /// is what stood there.
    fn on_neighbour_broken(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        old_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        Outcome::unchanged()
    }

    /// The user placed `new_block` against the `direction` face of the support
    /// cell `pos`. Runs the default placement by default.
    fn on_place(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        new_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        defaults::place(ctx, user, new_block, pos, direction)
    }

    /// The neighbour on the `direction` side of `pos` changed from air to `new_block`.
    fn on_neighbour_place(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        new_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        Outcome::unchanged()
    }

    /// `new_block` consumes the block at `pos` in place.
    fn on_replace(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        new_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        defaults::replace(ctx, pos)
    }

    /// The neighbour on the `direction` side of `pos` changed from `old_block`
    /// to something other than air.
    fn on_neighbour_move(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        old_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        Outcome::unchanged()
    }
}

/// Behavior used for every block kind without its own binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBehavior;

impl BlockBehavior for DefaultBehavior {}

/// The default pipeline, callable from overriding behaviors.
pub mod defaults {
    use super::*;

    /// Destroy the block at `pos` and drop one of it.
    ///
    /// Broadcast precedes the storage write.
    pub fn broken(ctx: &BlockContext<'_>, pos: Position) -> Outcome {
        destroy(ctx, pos, DropRule::SelfItem)
    }

    /// Consume the block at `pos` in place, dropping one of it.
    pub fn replace(ctx: &BlockContext<'_>, pos: Position) -> Outcome {
        destroy(ctx, pos, DropRule::SelfItem)
    }

    /// Set `pos` to air on clients and in storage, then spawn what `rule` yields.
    ///
    /// Unreadable cells and cells that are already air are left alone.
    pub fn destroy(ctx: &BlockContext<'_>, pos: Position, rule: DropRule) -> Outcome {
        let Some(previous) = ctx.world.block(pos) else {
            return Outcome::unchanged();
        };
        if previous.is_air() {
            return Outcome::unchanged();
        }

        ctx.world.send_block_change(pos, Block::AIR);
        ctx.world.set_block(pos, Block::AIR);
        ctx.drops().spawn_for(pos, previous.id, rule);

        Outcome::changed(pos, previous, Block::AIR)
    }

    /// Place `new_block` next to the support cell `pos`, on the face `direction`.
    ///
    /// The stored metadata is the user's facing toward the destination, not the
    /// client-supplied face.
    pub fn place(
        ctx: &BlockContext<'_>,
        user: &dyn User,
        new_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        let Some(destination) = placement_target(ctx, pos, direction) else {
            return Outcome::unchanged();
        };
        let validator = ctx.validator();
        if validator.is_cell_occupied_by_user(destination) {
            return Outcome::unchanged();
        }
        if !validator.is_cell_empty(destination) {
            return Outcome::unchanged();
        }

        let facing = user.facing_relative_to(destination);
        write(ctx, destination, Block::AIR, Block::new(new_block, facing.as_meta()))
    }

    /// Support checks shared by every placement path.
    ///
    /// Returns the destination cell when the support at `pos` is loaded and
    /// stackable and `direction` selects a cell inside the world.
    pub fn placement_target(
        ctx: &BlockContext<'_>,
        pos: Position,
        direction: Direction,
    ) -> Option<Position> {
        let support = ctx.world.block(pos)?;
        if !ctx.validator().is_support_stackable(support.id) {
            return None;
        }
        pos.translate(direction)
    }

    /// Write then broadcast `current` at `pos`.
    pub fn write(ctx: &BlockContext<'_>, pos: Position, previous: Block, current: Block) -> Outcome {
        ctx.world.set_block(pos, current);
        ctx.world.send_block_change(pos, current);
        Outcome::changed(pos, previous, current)
    }
}
