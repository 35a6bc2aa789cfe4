//! Binds block kinds to behaviors and routes events to them.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use mineward_core::{BlockId, BLOCK_AIR};
use mineward_world::WorldMap;

use crate::{
    BlockBehavior, BlockContext, DefaultBehavior, InteractionEvent, Outcome, PlacementPolicy,
    UserDirectory,
};

/// Registry of block behaviors plus the collaborators they act on.
///
/// Bindings are made once at startup and read-only afterwards. Kinds without
/// a binding use [`DefaultBehavior`].
pub struct BlockRegistry {
    behaviors: BTreeMap<BlockId, Arc<dyn BlockBehavior>>,
    fallback: Arc<dyn BlockBehavior>,
    world: Arc<dyn WorldMap>,
    users: Arc<dyn UserDirectory>,
    policy: PlacementPolicy,
}

impl BlockRegistry {
    /// Create a registry with no bindings and the default placement policy.
    pub fn new(world: Arc<dyn WorldMap>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            behaviors: BTreeMap::new(),
            fallback: Arc::new(DefaultBehavior),
            world,
            users,
            policy: PlacementPolicy::default(),
        }
    }

    /// Replace the placement policy.
    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bind `behavior` to `id`, replacing any earlier binding.
    pub fn register(&mut self, id: BlockId, behavior: Arc<dyn BlockBehavior>) {
        let name = behavior.name();
        if let Some(previous) = self.behaviors.insert(id, behavior) {
            info!(
                block = id,
                previous = previous.name(),
                behavior = name,
                "rebinding block behavior"
            );
        } else {
            debug!(block = id, behavior = name, "registered block behavior");
        }
    }

    /// Bind the same behavior to several kinds.
    pub fn register_all(
        &mut self,
        ids: impl IntoIterator<Item = BlockId>,
        behavior: Arc<dyn BlockBehavior>,
    ) {
        for id in ids {
            self.register(id, Arc::clone(&behavior));
        }
    }

    /// True when `id` has its own binding.
    pub fn is_registered(&self, id: BlockId) -> bool {
        self.behaviors.contains_key(&id)
    }

    /// Number of explicit bindings.
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Returns true when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Behavior handling `id`, falling back to the default.
    pub fn behavior(&self, id: BlockId) -> &dyn BlockBehavior {
        self.behaviors
            .get(&id)
            .map(|b| b.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    /// World the registry acts on.
    pub fn world(&self) -> &dyn WorldMap {
        self.world.as_ref()
    }

    /// Placement policy in force.
    pub fn policy(&self) -> &PlacementPolicy {
        &self.policy
    }

    /// Handler context over the registry's collaborators.
    pub fn context(&self) -> BlockContext<'_> {
        BlockContext::new(self.world.as_ref(), self.users.as_ref(), &self.policy)
    }

    /// Block kind whose behavior handles `event`.
    ///
    /// Placement routes on the candidate block; everything else on the block
    /// currently at the target. Unreadable targets route to the default.
    pub fn routing_block(&self, event: &InteractionEvent<'_>) -> BlockId {
        match event.candidate() {
            Some(candidate) => candidate,
            None => self
                .world
                .block(event.pos())
                .map(|block| block.id)
                .unwrap_or(BLOCK_AIR),
        }
    }

    /// Route `event` to the behavior of the relevant block kind.
    ///
    /// Never fails: an event either changes the world or has no effect. The
    /// region around the target stays locked from the routing read until the
    /// handler returns, so concurrent events on one cell apply one at a time.
    pub fn dispatch(&self, event: InteractionEvent<'_>) -> Outcome {
        if event.candidate() == Some(BLOCK_AIR) {
            return Outcome::unchanged();
        }

        let _region = self.world.lock_region(event.pos());
        let behavior = self.behavior(self.routing_block(&event));
        let ctx = self.context();

        match event {
            InteractionEvent::StartedDigging {
                user,
                status,
                pos,
                direction,
            } => behavior.on_started_digging(&ctx, user, status, pos, direction),
            InteractionEvent::Digging {
                user,
                status,
                pos,
                direction,
            } => behavior.on_digging(&ctx, user, status, pos, direction),
            InteractionEvent::StoppedDigging {
                user,
                status,
                pos,
                direction,
            } => behavior.on_stopped_digging(&ctx, user, status, pos, direction),
            InteractionEvent::Broken {
                user,
                status,
                pos,
                direction,
            } => behavior.on_broken(&ctx, user, status, pos, direction),
            InteractionEvent::NeighbourBroken {
                user,
                old_block,
                pos,
                direction,
            } => behavior.on_neighbour_broken(&ctx, user, old_block, pos, direction),
            InteractionEvent::Place {
                user,
                new_block,
                pos,
                direction,
            } => behavior.on_place(&ctx, user, new_block, pos, direction),
            InteractionEvent::NeighbourPlace {
                user,
                new_block,
                pos,
                direction,
            } => behavior.on_neighbour_place(&ctx, user, new_block, pos, direction),
            InteractionEvent::Replace {
                user,
                new_block,
                pos,
                direction,
            } => behavior.on_replace(&ctx, user, new_block, pos, direction),
            InteractionEvent::NeighbourMove {
                user,
                old_block,
                pos,
                direction,
            } => behavior.on_neighbour_move(&ctx, user, old_block, pos, direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use glam::DVec3;
    use mineward_core::{blocks, Block, DiggingStatus, Direction, Position};
    use mineward_world::ChunkMap;

    use crate::{Player, User};

    #[derive(Default)]
    struct CountingBehavior {
        started: AtomicUsize,
    }

    impl BlockBehavior for CountingBehavior {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_started_digging(
            &self,
            _ctx: &BlockContext<'_>,
            _user: &dyn User,
            _status: DiggingStatus,
            _pos: Position,
            _direction: Direction,
        ) -> Outcome {
            self.started.fetch_add(1, Ordering::SeqCst);
            Outcome::unchanged()
        }
    }

    fn registry() -> (Arc<ChunkMap>, BlockRegistry) {
        let world = Arc::new(ChunkMap::new(4, 0));
        let users: Arc<Vec<Player>> = Arc::new(Vec::new());
        let registry = BlockRegistry::new(world.clone(), users);
        (world, registry)
    }

    #[test]
    fn dig_events_route_on_existing_block() {
        let (world, mut registry) = registry();
        let counting = Arc::new(CountingBehavior::default());
        registry.register(blocks::STONE, counting.clone());

        let pos = Position::new(1, 10, 1);
        world.fill(pos, Block::new(blocks::STONE, 0));
        let user = Player::new(1, "digger", DVec3::new(0.5, 10.0, 3.5));

        let _ = registry.dispatch(InteractionEvent::digging(
            &user,
            DiggingStatus::Started,
            pos,
            Direction::Up,
        ));
        assert_eq!(counting.started.load(Ordering::SeqCst), 1);

        world.fill(pos, Block::new(blocks::DIRT, 0));
        let _ = registry.dispatch(InteractionEvent::digging(
            &user,
            DiggingStatus::Started,
            pos,
            Direction::Up,
        ));
        assert_eq!(counting.started.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_kinds_use_default_behavior() {
        let (_world, registry) = registry();
        assert!(!registry.is_registered(200));
        assert_eq!(registry.behavior(200).name(), "default");
    }

    #[test]
    fn rebinding_replaces_behavior() {
        let (_world, mut registry) = registry();
        registry.register(blocks::SAND, Arc::new(CountingBehavior::default()));
        registry.register(blocks::SAND, Arc::new(DefaultBehavior));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.behavior(blocks::SAND).name(), "default");
    }

    #[test]
    fn placing_air_is_ignored() {
        let (world, registry) = registry();
        let support = Position::new(0, 10, 0);
        world.fill(support, Block::new(blocks::STONE, 0));
        let user = Player::new(1, "p", DVec3::new(4.5, 11.0, 0.5));

        let out = registry.dispatch(InteractionEvent::Place {
            user: &user,
            new_block: blocks::AIR,
            pos: support,
            direction: Direction::Up,
        });
        assert!(out.is_unchanged());
        assert!(world.take_block_changes().is_empty());
    }
}
