//! Pickup entities spawned when blocks are destroyed.
//!
//! Only spawning is modelled here; physics and collection belong to the
//! entity simulation.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use mineward_core::{ItemId, Position};

/// Maximum horizontal scatter from the cell centre, in blocks.
pub const PICKUP_SCATTER: f64 = 0.25;

/// A dropped item stack lying in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    /// Unique ID for this pickup.
    pub id: u64,
    /// Cell the pickup came from.
    pub origin: Position,
    /// World X position.
    pub x: f64,
    /// World Y position.
    pub y: f64,
    /// World Z position.
    pub z: f64,
    /// Item carried.
    pub item: ItemId,
    /// Stack size.
    pub count: u32,
}

/// Allocates pickup ids and keeps the spawned pickups.
pub struct PickupLedger {
    pickups: Vec<Pickup>,
    next_id: u64,
    rng: StdRng,
}

impl PickupLedger {
    /// Create an empty ledger whose scatter is reproducible from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            pickups: Vec::new(),
            next_id: 1,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn a pickup at the centre of `origin` with a small horizontal scatter.
    ///
    /// Returns the new pickup's id.
    pub fn spawn(&mut self, origin: Position, item: ItemId, count: u32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let [cx, cy, cz] = origin.center();
        let x = cx + self.rng.gen_range(-PICKUP_SCATTER..=PICKUP_SCATTER);
        let z = cz + self.rng.gen_range(-PICKUP_SCATTER..=PICKUP_SCATTER);

        self.pickups.push(Pickup {
            id,
            origin,
            x,
            y: cy,
            z,
            item,
            count,
        });
        id
    }

    /// Pickups currently in the world.
    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    /// Remove and return every pickup (handed to the entity simulation).
    pub fn take(&mut self) -> Vec<Pickup> {
        std::mem::take(&mut self.pickups)
    }

    /// Number of pickups currently held.
    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    /// Returns true when no pickups are held.
    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }
}
