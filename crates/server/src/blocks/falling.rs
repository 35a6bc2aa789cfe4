use mineward_core::{Block, BlockId, Direction, Position};

use crate::behavior::defaults;
use crate::{BlockBehavior, BlockContext, Outcome, User};

/// Sand and gravel: drop to the lowest empty cell below.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallingBehavior;

impl FallingBehavior {
    /// Move the block at `pos` down until the cell below is solid or unloaded.
    pub fn settle(ctx: &BlockContext<'_>, pos: Position) -> Outcome {
        let Some(block) = ctx.world.block(pos) else {
            return Outcome::unchanged();
        };
        if block.is_air() {
            return Outcome::unchanged();
        }

        let mut landing = pos;
        while let Some(below) = landing.translate(Direction::Down) {
            match ctx.world.block(below) {
                Some(cell) if cell.is_air() => landing = below,
                _ => break,
            }
        }
        if landing == pos {
            return Outcome::unchanged();
        }

        defaults::write(ctx, pos, block, Block::AIR).merge(defaults::write(
            ctx,
            landing,
            Block::AIR,
            block,
        ))
    }
}

impl BlockBehavior for FallingBehavior {
    fn name(&self) -> &'static str {
        "falling"
    }

    fn on_place(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        new_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        let placed = defaults::place(ctx, user, new_block, pos, direction);
        let Some(landed_at) = placed.changes().last().map(|change| change.pos) else {
            return placed;
        };
        let fall = Self::settle(ctx, landed_at);
        placed.merge(fall)
    }

    fn on_neighbour_broken(
        &self,
        ctx: &BlockContext<'_>,
        _user: &dyn User,
        _old_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        if direction != Direction::Down {
            return Outcome::unchanged();
        }
        Self::settle(ctx, pos)
    }

    fn on_neighbour_move(
        &self,
        ctx: &BlockContext<'_>,
        _user: &dyn User,
        _old_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        if direction != Direction::Down {
            return Outcome::unchanged();
        }
        Self::settle(ctx, pos)
    }
}
