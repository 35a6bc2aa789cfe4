//! Entry points used by the session layer, plus neighbour propagation.
//!
//! Every cell rewritten while handling an event notifies its six neighbours.
//! Notifications run breadth-first and are capped per inbound event so a
//! runaway cascade cannot stall the caller.

use std::collections::VecDeque;

use tracing::{debug, trace};

use mineward_core::{BlockId, DiggingStatus, Direction, Position};

use crate::{BlockRegistry, CellChange, InteractionEvent, User};

/// Neighbour notifications processed for one inbound event unless configured.
pub const DEFAULT_CASCADE_LIMIT: usize = 512;

/// Registry plus the propagation rules around it.
pub struct InteractionPipeline {
    registry: BlockRegistry,
    cascade_limit: usize,
}

impl InteractionPipeline {
    /// Wrap `registry` with the default cascade limit.
    pub fn new(registry: BlockRegistry) -> Self {
        Self {
            registry,
            cascade_limit: DEFAULT_CASCADE_LIMIT,
        }
    }

    /// Cap the number of neighbour notifications per inbound event.
    pub fn with_cascade_limit(mut self, cascade_limit: usize) -> Self {
        self.cascade_limit = cascade_limit;
        self
    }

    /// Notification budget per inbound event.
    pub fn cascade_limit(&self) -> usize {
        self.cascade_limit
    }

    /// Bindings and collaborators events are routed through.
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Mutable access for late bindings.
    pub fn registry_mut(&mut self) -> &mut BlockRegistry {
        &mut self.registry
    }

    /// A dig packet. Returns the number of cells changed, cascades included.
    pub fn digging(
        &self,
        user: &dyn User,
        status: DiggingStatus,
        pos: Position,
        face: Direction,
    ) -> usize {
        self.handle(InteractionEvent::digging(user, status, pos, face))
    }

    /// A placement packet: `candidate` against the support at `pos`.
    pub fn place(
        &self,
        user: &dyn User,
        candidate: BlockId,
        pos: Position,
        face: Direction,
    ) -> usize {
        self.handle(InteractionEvent::Place {
            user,
            new_block: candidate,
            pos,
            direction: face,
        })
    }

    /// The block at `pos` is consumed in place.
    pub fn replace(
        &self,
        user: &dyn User,
        candidate: BlockId,
        pos: Position,
        face: Direction,
    ) -> usize {
        self.handle(InteractionEvent::Replace {
            user,
            new_block: candidate,
            pos,
            direction: face,
        })
    }

    /// Dispatch `event` and propagate whatever it changed.
    pub fn handle(&self, event: InteractionEvent<'_>) -> usize {
        let user = event.user();
        let changes = self.registry.dispatch(event).into_changes();
        if changes.is_empty() {
            return 0;
        }
        changes.len() + self.propagate(user, changes)
    }

    fn propagate(&self, user: &dyn User, changes: Vec<CellChange>) -> usize {
        let world = self.registry.world();
        let mut queue: VecDeque<CellChange> = changes.into();
        let mut budget = self.cascade_limit;
        let mut produced = 0;

        while let Some(change) = queue.pop_front() {
            for (dir, neighbour) in change.pos.neighbours() {
                match world.block(neighbour) {
                    Some(block) if !block.is_air() => {}
                    _ => continue,
                }
                if budget == 0 {
                    debug!(
                        origin = %change.pos,
                        limit = self.cascade_limit,
                        pending = queue.len(),
                        "neighbour cascade budget exhausted"
                    );
                    return produced;
                }
                budget -= 1;

                let event = notification(user, change, neighbour, dir.opposite());
                trace!(kind = ?event.kind(), pos = %neighbour, "notifying neighbour");
                let follow_up = self.registry.dispatch(event).into_changes();
                produced += follow_up.len();
                queue.extend(follow_up);
            }
        }
        produced
    }
}

/// Event telling `neighbour` that `change` happened one step in `toward`.
fn notification<'a>(
    user: &'a dyn User,
    change: CellChange,
    neighbour: Position,
    toward: Direction,
) -> InteractionEvent<'a> {
    if change.current.is_air() {
        InteractionEvent::NeighbourBroken {
            user,
            old_block: change.previous.id,
            pos: neighbour,
            direction: toward,
        }
    } else if change.previous.is_air() {
        InteractionEvent::NeighbourPlace {
            user,
            new_block: change.current.id,
            pos: neighbour,
            direction: toward,
        }
    } else {
        InteractionEvent::NeighbourMove {
            user,
            old_block: change.previous.id,
            pos: neighbour,
            direction: toward,
        }
    }
}
