use mineward_core::{DiggingStatus, Direction, Position};

use crate::behavior::defaults;
use crate::{BlockBehavior, BlockContext, Outcome, User};

/// Snow layers and tall grass: break on the first hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsumableBehavior;

impl BlockBehavior for ConsumableBehavior {
    fn name(&self) -> &'static str {
        "consumable"
    }

    fn on_started_digging(
        &self,
        ctx: &BlockContext<'_>,
        _user: &dyn User,
        _status: DiggingStatus,
        pos: Position,
        _direction: Direction,
    ) -> Outcome {
        defaults::broken(ctx, pos)
    }
}
