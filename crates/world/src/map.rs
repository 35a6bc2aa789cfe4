//! The authoritative world map contract and an in-memory implementation.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use tracing::trace;

use mineward_core::{Block, Direction, ItemId, Position};

use crate::{Chunk, ChunkPos, LocalPos, Pickup, PickupLedger};

/// Storage, broadcast and entity-spawn operations the interaction layer needs.
///
/// Individual calls only need to be atomic on their own. Whole handlers are
/// serialized through [`WorldMap::lock_region`], which callers hold from the
/// first read of a cell until the handler's last write.
pub trait WorldMap: Send + Sync {
    /// Current contents of `pos`, or `None` when the chunk is not loaded.
    fn block(&self, pos: Position) -> Option<Block>;

    /// Write `block` into authoritative storage.
    fn set_block(&self, pos: Position, block: Block);

    /// Tell observing clients that `pos` now holds `block`.
    fn send_block_change(&self, pos: Position, block: Block);

    /// Create a pickup entity carrying `count` of `item` at `pos`.
    fn spawn_pickup(&self, pos: Position, item: ItemId, count: u32);

    /// Keep every other handler out of `pos` and its neighbours until the
    /// returned guard is dropped.
    ///
    /// Must not be re-entered on the same thread while a guard is live. The
    /// default holds nothing, which suits maps that are only used from one
    /// thread.
    fn lock_region(&self, _pos: Position) -> RegionGuard<'_> {
        RegionGuard::unguarded()
    }
}

impl<W: WorldMap + ?Sized> WorldMap for Arc<W> {
    fn block(&self, pos: Position) -> Option<Block> {
        (**self).block(pos)
    }

    fn set_block(&self, pos: Position, block: Block) {
        (**self).set_block(pos, block)
    }

    fn send_block_change(&self, pos: Position, block: Block) {
        (**self).send_block_change(pos, block)
    }

    fn spawn_pickup(&self, pos: Position, item: ItemId, count: u32) {
        (**self).spawn_pickup(pos, item, count)
    }

    fn lock_region(&self, pos: Position) -> RegionGuard<'_> {
        (**self).lock_region(pos)
    }
}

/// Exclusive hold on a region of the map, released on drop.
#[must_use = "the region is released as soon as the guard is dropped"]
pub struct RegionGuard<'a> {
    held: Vec<MutexGuard<'a, ()>>,
}

impl<'a> RegionGuard<'a> {
    /// Wrap lock guards that together cover a region.
    ///
    /// Callers acquiring several locks must take them in a fixed global order.
    pub fn new(held: Vec<MutexGuard<'a, ()>>) -> Self {
        Self { held }
    }

    /// A guard that holds nothing.
    pub fn unguarded() -> Self {
        Self { held: Vec::new() }
    }

    /// Number of locks held.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Returns true when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl std::fmt::Debug for RegionGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionGuard")
            .field("locks", &self.held.len())
            .finish()
    }
}

/// A block change queued for delivery to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlockChange {
    /// Changed cell.
    pub pos: Position,
    /// New contents.
    pub block: Block,
}

type SharedChunk = Arc<Mutex<Chunk>>;

/// Number of region locks shared by all chunk columns.
pub const REGION_STRIPES: usize = 64;

fn stripe(pos: ChunkPos) -> usize {
    let hash =
        i64::from(pos.x).wrapping_mul(73_856_093) ^ i64::from(pos.z).wrapping_mul(19_349_663);
    hash.rem_euclid(REGION_STRIPES as i64) as usize
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory world with LRU chunk residency.
///
/// Each chunk sits behind its own storage lock, taken for a single read or
/// write. Handlers are serialized separately by striped region locks keyed on
/// chunk column, so a region guard never blocks plain storage access. Cells in
/// chunks that are not resident read as not loaded and ignore writes.
pub struct ChunkMap {
    chunks: Mutex<LruCache<ChunkPos, SharedChunk>>,
    regions: Vec<Mutex<()>>,
    outbox: Mutex<Vec<BlockChange>>,
    pickups: Mutex<PickupLedger>,
}

impl ChunkMap {
    /// Create a map holding at most `capacity` chunks. `seed` drives pickup scatter.
    pub fn new(capacity: usize, seed: u64) -> Self {
        let cap = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            chunks: Mutex::new(LruCache::new(cap)),
            regions: (0..REGION_STRIPES).map(|_| Mutex::new(())).collect(),
            outbox: Mutex::new(Vec::new()),
            pickups: Mutex::new(PickupLedger::new(seed)),
        }
    }

    /// Make `pos` resident, creating an empty chunk if needed.
    ///
    /// May evict the least recently used chunk.
    pub fn load_chunk(&self, pos: ChunkPos) {
        let mut chunks = lock(&self.chunks);
        if chunks.get(&pos).is_some() {
            return;
        }
        if let Some((evicted, _)) = chunks.push(pos, Arc::new(Mutex::new(Chunk::new()))) {
            if evicted != pos {
                trace!(chunk = %evicted, "evicted chunk");
            }
        }
    }

    /// Drop `pos` from residency. Returns true when it was loaded.
    pub fn unload_chunk(&self, pos: ChunkPos) -> bool {
        lock(&self.chunks).pop(&pos).is_some()
    }

    /// Returns true when `pos` is resident.
    pub fn is_loaded(&self, pos: ChunkPos) -> bool {
        lock(&self.chunks).contains(&pos)
    }

    /// Number of resident chunks.
    pub fn len(&self) -> usize {
        lock(&self.chunks).len()
    }

    /// Returns true when no chunks are resident.
    pub fn is_empty(&self) -> bool {
        lock(&self.chunks).is_empty()
    }

    /// Write a cell directly, loading its chunk first. Intended for world setup.
    pub fn fill(&self, pos: Position, block: Block) {
        self.load_chunk(ChunkPos::containing(pos));
        self.set_block(pos, block);
    }

    /// Drain the block changes broadcast since the last call.
    pub fn take_block_changes(&self) -> Vec<BlockChange> {
        std::mem::take(&mut *lock(&self.outbox))
    }

    /// Snapshot of spawned pickups.
    pub fn pickups(&self) -> Vec<Pickup> {
        lock(&self.pickups).pickups().to_vec()
    }

    /// Remove and return every spawned pickup.
    pub fn take_pickups(&self) -> Vec<Pickup> {
        lock(&self.pickups).take()
    }

    fn chunk(&self, pos: ChunkPos) -> Option<SharedChunk> {
        lock(&self.chunks).get(&pos).cloned()
    }
}

impl WorldMap for ChunkMap {
    fn block(&self, pos: Position) -> Option<Block> {
        let (chunk_pos, local) = LocalPos::from_world(pos)?;
        let chunk = self.chunk(chunk_pos)?;
        let block = lock(&*chunk).block(local);
        Some(block)
    }

    fn set_block(&self, pos: Position, block: Block) {
        let Some((chunk_pos, local)) = LocalPos::from_world(pos) else {
            return;
        };
        if let Some(chunk) = self.chunk(chunk_pos) {
            lock(&*chunk).set_block(local, block);
        }
    }

    fn send_block_change(&self, pos: Position, block: Block) {
        lock(&self.outbox).push(BlockChange { pos, block });
    }

    fn spawn_pickup(&self, pos: Position, item: ItemId, count: u32) {
        lock(&self.pickups).spawn(pos, item, count);
    }

    fn lock_region(&self, pos: Position) -> RegionGuard<'_> {
        // Handlers reach at most one cell sideways, so the target column and
        // its four horizontal neighbours cover everything they touch.
        let mut stripes: Vec<usize> = std::iter::once(pos)
            .chain(Direction::HORIZONTAL.into_iter().filter_map(|dir| pos.translate(dir)))
            .map(|cell| stripe(ChunkPos::containing(cell)))
            .collect();
        stripes.sort_unstable();
        stripes.dedup();
        RegionGuard::new(stripes.into_iter().map(|i| lock(&self.regions[i])).collect())
    }
}
