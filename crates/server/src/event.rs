//! Inbound interaction events and what handling them changed.

use mineward_core::{Block, BlockId, DiggingStatus, Direction, Position};

use crate::User;

/// An interaction delivered by the session layer.
///
/// Dig events carry the client status and face; placement events carry the
/// candidate block; neighbour events carry the block that changed next door
/// and the direction from the notified cell toward it.
#[derive(Clone, Copy)]
pub enum InteractionEvent<'a> {
    /// First hit on a cell.
    StartedDigging {
        /// Acting user.
        user: &'a dyn User,
        /// Status code reported by the client.
        status: DiggingStatus,
        /// Cell being dug.
        pos: Position,
        /// Face the client reported.
        direction: Direction,
    },
    /// Continued digging.
    Digging {
        /// Acting user.
        user: &'a dyn User,
        /// Status code reported by the client.
        status: DiggingStatus,
        /// Cell being dug.
        pos: Position,
        /// Face the client reported.
        direction: Direction,
    },
    /// Digging abandoned.
    StoppedDigging {
        /// Acting user.
        user: &'a dyn User,
        /// Status code reported by the client.
        status: DiggingStatus,
        /// Cell being dug.
        pos: Position,
        /// Face the client reported.
        direction: Direction,
    },
    /// Block finished breaking.
    Broken {
        /// Acting user.
        user: &'a dyn User,
        /// Status code reported by the client.
        status: DiggingStatus,
        /// Cell being dug.
        pos: Position,
        /// Face the client reported.
        direction: Direction,
    },
    /// An adjacent block was destroyed.
    NeighbourBroken {
        /// User whose event caused the change.
        user: &'a dyn User,
        /// Block that stood in the neighbouring cell.
        old_block: BlockId,
        /// Notified cell.
        pos: Position,
        /// Direction from `pos` toward the changed neighbour.
        direction: Direction,
    },
    /// User placed `new_block` against the support cell `pos`.
    Place {
        /// Placing user.
        user: &'a dyn User,
        /// Candidate block.
        new_block: BlockId,
        /// Support cell that was clicked.
        pos: Position,
        /// Clicked face of the support.
        direction: Direction,
    },
    /// An adjacent cell received a block.
    NeighbourPlace {
        /// User whose event caused the change.
        user: &'a dyn User,
        /// Block now in the neighbouring cell.
        new_block: BlockId,
        /// Notified cell.
        pos: Position,
        /// Direction from `pos` toward the changed neighbour.
        direction: Direction,
    },
    /// The block at `pos` is consumed in place.
    Replace {
        /// Acting user.
        user: &'a dyn User,
        /// Block taking the consumed block's place.
        new_block: BlockId,
        /// Cell being consumed.
        pos: Position,
        /// Face the client reported.
        direction: Direction,
    },
    /// An adjacent cell changed without being placed or broken.
    NeighbourMove {
        /// User whose event caused the change.
        user: &'a dyn User,
        /// Block that stood in the neighbouring cell.
        old_block: BlockId,
        /// Notified cell.
        pos: Position,
        /// Direction from `pos` toward the changed neighbour.
        direction: Direction,
    },
}

/// Discriminant of [`InteractionEvent`], for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`InteractionEvent::StartedDigging`].
    StartedDigging,
    /// [`InteractionEvent::Digging`].
    Digging,
    /// [`InteractionEvent::StoppedDigging`].
    StoppedDigging,
    /// [`InteractionEvent::Broken`].
    Broken,
    /// [`InteractionEvent::NeighbourBroken`].
    NeighbourBroken,
    /// [`InteractionEvent::Place`].
    Place,
    /// [`InteractionEvent::NeighbourPlace`].
    NeighbourPlace,
    /// [`InteractionEvent::Replace`].
    Replace,
    /// [`InteractionEvent::NeighbourMove`].
    NeighbourMove,
}

impl<'a> InteractionEvent<'a> {
    /// Build the dig event matching a client status code.
    pub fn digging(
        // Acting user.
        user: &'a dyn User,
        // Status code reported by the client.
        status: DiggingStatus,
        // Cell being dug.
        pos: Position,
        // Face the client reported.
        direction: Direction,
    ) -> Self {
        match status {
            DiggingStatus::Started => Self::StartedDigging {
                user,
                status,
                pos,
                direction,
            },
            DiggingStatus::InProgress => Self::Digging {
                user,
                status,
                pos,
                direction,
            },
            DiggingStatus::Stopped => Self::StoppedDigging {
                user,
                status,
                pos,
                direction,
            },
            DiggingStatus::Broken => Self::Broken {
                user,
                status,
                pos,
                direction,
            },
        }
    }

    /// Which handler this event targets.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::StartedDigging { .. } => EventKind::StartedDigging,
            Self::Digging { .. } => EventKind::Digging,
            Self::StoppedDigging { .. } => EventKind::StoppedDigging,
            Self::Broken { .. } => EventKind::Broken,
            Self::NeighbourBroken { .. } => EventKind::NeighbourBroken,
            Self::Place { .. } => EventKind::Place,
            Self::NeighbourPlace { .. } => EventKind::NeighbourPlace,
            Self::Replace { .. } => EventKind::Replace,
            Self::NeighbourMove { .. } => EventKind::NeighbourMove,
        }
    }

    /// Target cell.
    pub fn pos(&self) -> Position {
        match *self {
            Self::StartedDigging { pos, .. }
            | Self::Digging { pos, .. }
            | Self::StoppedDigging { pos, .. }
            | Self::Broken { pos, .. }
            | Self::NeighbourBroken { pos, .. }
            | Self::Place { pos, .. }
            | Self::NeighbourPlace { pos, .. }
            | Self::Replace { pos, .. }
            | Self::NeighbourMove { pos, .. } => pos,
        }
    }

    /// Acting user.
    pub fn user(&self) -> &'a dyn User {
        match *self {
            Self::StartedDigging { user, .. }
            | Self::Digging { user, .. }
            | Self::StoppedDigging { user, .. }
            | Self::Broken { user, .. }
            | Self::NeighbourBroken { user, .. }
            | Self::Place { user, .. }
            | Self::NeighbourPlace { user, .. }
            | Self::Replace { user, .. }
            | Self::NeighbourMove { user, .. } => user,
        }
    }

    /// The candidate block for placement events; `None` for everything else.
    pub fn candidate(&self) -> Option<BlockId> {
        match *self {
            Self::Place { new_block, .. } => Some(new_block),
            _ => None,
        }
    }
}

/// One cell rewritten while handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    /// Rewritten cell.
    pub pos: Position,
    /// Contents before the write.
    pub previous: Block,
    /// Contents after the write.
    pub current: Block,
}

/// What handling an event did to the world.
///
/// Rejections and unreadable cells produce an empty outcome; this is not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    changes: Vec<CellChange>,
}

impl Outcome {
    /// Nothing changed.
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// A single cell changed.
    pub fn changed(pos: Position, previous: Block, current: Block) -> Self {
        Self {
            changes: vec![CellChange {
                pos,
                previous,
                current,
            }],
        }
    }

    /// True when the event had no effect.
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }

    /// Cells rewritten, in write order.
    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }

    /// Append the changes of a follow-up step.
    pub fn merge(mut self, other: Outcome) -> Self {
        self.changes.extend(other.changes);
        self
    }

    /// Consume into the list of changes.
    pub fn into_changes(self) -> Vec<CellChange> {
        self.changes
    }
}
