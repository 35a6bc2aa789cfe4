use mineward_core::{Block, BlockId, Direction, Position};

use crate::behavior::defaults;
use crate::{BlockBehavior, BlockContext, DropRule, Outcome, User};

/// Torches, ladders, levers and signs: hang off the face they were placed on
/// and break when that support goes away.
///
/// The stored metadata is the clicked face, pointing from the support toward
/// the attached block.
#[derive(Debug, Clone, Copy)]
pub struct AttachedBehavior {
    allow_floor: bool,
    allow_wall: bool,
}

impl AttachedBehavior {
    /// Attaches to floors and walls (torches, levers).
    pub const fn floor_or_wall() -> Self {
        Self {
            allow_floor: true,
            allow_wall: true,
        }
    }

    /// Attaches to walls only (ladders, wall signs).
    pub const fn wall_only() -> Self {
        Self {
            allow_floor: false,
            allow_wall: true,
        }
    }

    /// Attaches to floors only (sign posts, redstone wire).
    pub const fn floor_only() -> Self {
        Self {
            allow_floor: true,
            allow_wall: false,
        }
    }

    fn accepts(&self, face: Direction) -> bool {
        match face {
            Direction::Up => self.allow_floor,
            face if face.is_horizontal() => self.allow_wall,
            _ => false,
        }
    }
}

impl Default for AttachedBehavior {
    fn default() -> Self {
        Self::floor_or_wall()
    }
}

impl BlockBehavior for AttachedBehavior {
    fn name(&self) -> &'static str {
        "attached"
    }

    fn on_place(
        &self,
        ctx: &BlockContext<'_>,
        _user: &dyn User,
        new_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        if !self.accepts(direction) {
            return Outcome::unchanged();
        }
        let Some(destination) = defaults::placement_target(ctx, pos, direction) else {
            return Outcome::unchanged();
        };
        let validator = ctx.validator();
        if validator.is_cell_occupied_by_user(destination) {
            return Outcome::unchanged();
        }
        if !validator.is_cell_empty(destination) {
            return Outcome::unchanged();
        }
        defaults::write(
            ctx,
            destination,
            Block::AIR,
            Block::new(new_block, direction.as_meta()),
        )
    }

    fn on_neighbour_broken(
        &self,
        ctx: &BlockContext<'_>,
        _user: &dyn User,
        _old_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        let Some(block) = ctx.world.block(pos) else {
            return Outcome::unchanged();
        };
        let face = Direction::from_meta(block.meta);
        if face == Direction::Undetermined || direction != face.opposite() {
            return Outcome::unchanged();
        }
        defaults::destroy(ctx, pos, DropRule::SelfItem)
    }
}
