//! A [`WorldMap`] that remembers every call made to it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use mineward_core::{Block, ItemId, Position};
use mineward_world::WorldMap;
use serde::Serialize;

/// One call observed by [`RecordingWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum WorldCall {
    /// `block(pos)`.
    Read {
        /// Cell read.
        pos: Position,
    },
    /// `set_block(pos, block)`.
    SetBlock {
        /// Cell written.
        pos: Position,
        /// Value stored.
        block: Block,
    },
    /// `send_block_change(pos, block)`.
    SendBlockChange {
        /// Cell broadcast.
        pos: Position,
        /// Value broadcast.
        block: Block,
    },
    /// `spawn_pickup(pos, item, count)`.
    SpawnPickup {
        /// Cell the pickup spawned in.
        pos: Position,
        /// Item kind.
        item: ItemId,
        /// Stack size.
        count: u32,
    },
}

impl WorldCall {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            WorldCall::Read { .. } => "read",
            WorldCall::SetBlock { .. } => "set_block",
            WorldCall::SendBlockChange { .. } => "send_block_change",
            WorldCall::SpawnPickup { .. } => "spawn_pickup",
        }
    }

    /// True for everything except reads.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, WorldCall::Read { .. })
    }
}

#[derive(Default)]
struct State {
    cells: BTreeMap<Position, Block>,
    unloaded: BTreeSet<Position>,
    calls: Vec<WorldCall>,
}

/// In-memory world where every cell is loaded air unless set or unloaded.
///
/// Writes update the stored cell, so multi-step handlers see their own effects.
#[derive(Default)]
pub struct RecordingWorld {
    state: Mutex<State>,
}

impl RecordingWorld {
    /// Create an all-air world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RecordingWorld::put`].
    pub fn with_block(self, pos: Position, block: Block) -> Self {
        self.put(pos, block);
        self
    }

    /// Store `block` at `pos` without recording a call.
    pub fn put(&self, pos: Position, block: Block) {
        let mut state = self.lock();
        state.unloaded.remove(&pos);
        state.cells.insert(pos, block);
    }

    /// Make `pos` read as not loaded.
    pub fn unload(&self, pos: Position) {
        let mut state = self.lock();
        state.cells.remove(&pos);
        state.unloaded.insert(pos);
    }

    /// Current contents of `pos` without recording a call.
    pub fn peek(&self, pos: Position) -> Option<Block> {
        let state = self.lock();
        if state.unloaded.contains(&pos) {
            return None;
        }
        Some(state.cells.get(&pos).copied().unwrap_or(Block::AIR))
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<WorldCall> {
        self.lock().calls.clone()
    }

    /// Every call except reads, in order.
    pub fn mutations(&self) -> Vec<WorldCall> {
        self.lock()
            .calls
            .iter()
            .copied()
            .filter(WorldCall::is_mutation)
            .collect()
    }

    /// Forget the recorded calls, keeping cell contents.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WorldMap for RecordingWorld {
    fn block(&self, pos: Position) -> Option<Block> {
        let value = self.peek(pos);
        self.lock().calls.push(WorldCall::Read { pos });
        value
    }

    fn set_block(&self, pos: Position, block: Block) {
        let mut state = self.lock();
        state.calls.push(WorldCall::SetBlock { pos, block });
        if !state.unloaded.contains(&pos) {
            state.cells.insert(pos, block);
        }
    }

    fn send_block_change(&self, pos: Position, block: Block) {
        self.lock()
            .calls
            .push(WorldCall::SendBlockChange { pos, block });
    }

    fn spawn_pickup(&self, pos: Position, item: ItemId, count: u32) {
        self.lock()
            .calls
            .push(WorldCall::SpawnPickup { pos, item, count });
    }
}
