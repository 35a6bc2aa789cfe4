use std::collections::BTreeSet;

use mineward_core::{BlockId, Direction, Position};

use crate::behavior::defaults;
use crate::{BlockBehavior, BlockContext, DropRule, Outcome, User};

/// Saplings, flowers, crops and reeds: only grow on soil and pop off when the
/// soil below goes away.
#[derive(Debug, Clone)]
pub struct PlantBehavior {
    soil: BTreeSet<BlockId>,
}

impl PlantBehavior {
    /// Plant that accepts any block in `soil` directly below it.
    pub fn new(soil: impl IntoIterator<Item = BlockId>) -> Self {
        Self {
            soil: soil.into_iter().collect(),
        }
    }

    /// Whether `id` can hold this plant.
    pub fn grows_on(&self, id: BlockId) -> bool {
        self.soil.contains(&id)
    }

    fn check_soil(&self, ctx: &BlockContext<'_>, pos: Position) -> Outcome {
        let Some(below) = pos.translate(Direction::Down) else {
            return Outcome::unchanged();
        };
        match ctx.world.block(below) {
            Some(soil) if !self.grows_on(soil.id) => defaults::destroy(ctx, pos, DropRule::SelfItem),
            _ => Outcome::unchanged(),
        }
    }
}

impl BlockBehavior for PlantBehavior {
    fn name(&self) -> &'static str {
        "plant"
    }

    fn on_place(
        &self,
        ctx: &BlockContext<'_>,
        user: &dyn User,
        new_block: BlockId,
        pos: Position,
        direction: Direction,
    ) -> Outcome {
        if direction != Direction::Up {
            return Outcome::unchanged();
        }
        match ctx.world.block(pos) {
            Some(soil) if self.grows_on(soil.id) => {
                defaults::place(ctx, user, new_block, pos, direction)
            }
            _ => Outcome::unchanged(),
        }
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
        self.check_soil(ctx, pos)
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
        self.check_soil(ctx, pos)
    }
}
