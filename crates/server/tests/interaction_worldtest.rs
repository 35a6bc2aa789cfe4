//! Interaction worldtest - drives the registry against a recording world.
//!
//! Validates the default break, replace and placement paths call the world
//! exactly as expected, and that every rejection leaves it untouched.

use std::sync::Arc;

use mineward_core::{blocks, Block, DiggingStatus, Direction, Position};
use mineward_server::{BlockRegistry, DefaultBehavior, InteractionEvent, Outcome};
use mineward_testkit::{EventRecord, FakeRoster, FakeUser, JsonlSink, RecordingWorld, WorldCall};

fn registry_over(world: &Arc<RecordingWorld>, roster: FakeRoster) -> BlockRegistry {
    BlockRegistry::new(world.clone(), Arc::new(roster))
}

fn dirt() -> Block {
    Block::new(blocks::DIRT, 0)
}

#[test]
fn broken_dirt_becomes_air_with_one_pickup() {
    let pos = Position::new(10, 64, 10);
    let world = Arc::new(RecordingWorld::new().with_block(pos, dirt()));
    let registry = registry_over(&world, FakeRoster::empty());
    let user = FakeUser::new(1, Direction::North);

    let outcome = registry.dispatch(InteractionEvent::digging(
        &user,
        DiggingStatus::Broken,
        pos,
        Direction::Up,
    ));

    assert_eq!(outcome, Outcome::changed(pos, dirt(), Block::AIR));
    assert_eq!(world.peek(pos), Some(Block::AIR));
    assert_eq!(
        world.mutations(),
        vec![
            WorldCall::SendBlockChange {
                pos,
                block: Block::AIR
            },
            WorldCall::SetBlock {
                pos,
                block: Block::AIR
            },
            WorldCall::SpawnPickup {
                pos,
                item: blocks::DIRT as u16,
                count: 1
            },
        ]
    );
}

#[test]
fn place_on_dirt_writes_user_facing_and_broadcasts_once() {
    let support = Position::new(5, 63, 5);
    let destination = Position::new(5, 64, 5);
    let world = Arc::new(RecordingWorld::new().with_block(support, dirt()));
    let registry = registry_over(&world, FakeRoster::empty());
    let user = FakeUser::new(1, Direction::West);

    let outcome = registry.dispatch(InteractionEvent::Place {
        user: &user,
        new_block: blocks::STONE,
        pos: support,
        direction: Direction::Up,
    });

    let placed = Block::new(blocks::STONE, Direction::West.as_meta());
    assert_eq!(outcome, Outcome::changed(destination, Block::AIR, placed));
    assert_eq!(world.peek(destination), Some(placed));
    assert_eq!(
        world.mutations(),
        vec![
            WorldCall::SetBlock {
                pos: destination,
                block: placed
            },
            WorldCall::SendBlockChange {
                pos: destination,
                block: placed
            },
        ]
    );
}

#[test]
fn replace_and_broken_make_identical_world_calls() {
    let pos = Position::new(-3, 70, 12);
    let user = FakeUser::new(1, Direction::South);

    let broken_world = Arc::new(RecordingWorld::new().with_block(pos, dirt()));
    registry_over(&broken_world, FakeRoster::empty()).dispatch(InteractionEvent::Broken {
        user: &user,
        status: DiggingStatus::Broken,
        pos,
        direction: Direction::Up,
    });

    let replace_world = Arc::new(RecordingWorld::new().with_block(pos, dirt()));
    registry_over(&replace_world, FakeRoster::empty()).dispatch(InteractionEvent::Replace {
        user: &user,
        new_block: blocks::STONE,
        pos,
        direction: Direction::Up,
    });

    assert_eq!(broken_world.calls(), replace_world.calls());
    assert_eq!(broken_world.mutations().len(), 3);
}

#[test]
fn placement_rejections_leave_world_untouched() {
    let support = Position::new(0, 40, 0);
    let above = Position::new(0, 41, 0);
    let user = FakeUser::new(1, Direction::East);

    // Destination already holds a block.
    let world = Arc::new(
        RecordingWorld::new()
            .with_block(support, dirt())
            .with_block(above, Block::new(blocks::GLASS, 0)),
    );
    let out = registry_over(&world, FakeRoster::empty()).dispatch(InteractionEvent::Place {
        user: &user,
        new_block: blocks::STONE,
        pos: support,
        direction: Direction::Up,
    });
    assert!(out.is_unchanged());
    assert!(world.mutations().is_empty());

    // Non-stackable support, with an empty destination.
    let world = Arc::new(RecordingWorld::new().with_block(support, Block::new(blocks::WATER, 0)));
    let out = registry_over(&world, FakeRoster::empty()).dispatch(InteractionEvent::Place {
        user: &user,
        new_block: blocks::STONE,
        pos: support,
        direction: Direction::Up,
    });
    assert!(out.is_unchanged());
    assert!(world.mutations().is_empty());

    // Somebody is standing in the destination.
    let world = Arc::new(RecordingWorld::new().with_block(support, dirt()));
    let bystander = FakeUser::new(2, Direction::North).occupying(above);
    let out = registry_over(&world, FakeRoster::new([bystander])).dispatch(
        InteractionEvent::Place {
            user: &user,
            new_block: blocks::STONE,
            pos: support,
            direction: Direction::Up,
        },
    );
    assert!(out.is_unchanged());
    assert!(world.mutations().is_empty());

    // Undetermined face.
    let world = Arc::new(RecordingWorld::new().with_block(support, dirt()));
    let out = registry_over(&world, FakeRoster::empty()).dispatch(InteractionEvent::Place {
        user: &user,
        new_block: blocks::STONE,
        pos: support,
        direction: Direction::Undetermined,
    });
    assert!(out.is_unchanged());
    assert!(world.mutations().is_empty());
}

#[test]
fn unloaded_cells_abort_silently() {
    let pos = Position::new(100, 10, 100);
    let world = Arc::new(RecordingWorld::new());
    world.unload(pos);
    let registry = registry_over(&world, FakeRoster::empty());
    let user = FakeUser::new(1, Direction::North);

    for status in [
        DiggingStatus::Started,
        DiggingStatus::InProgress,
        DiggingStatus::Stopped,
        DiggingStatus::Broken,
    ] {
        let out = registry.dispatch(InteractionEvent::digging(&user, status, pos, Direction::Up));
        assert!(out.is_unchanged());
    }
    let out = registry.dispatch(InteractionEvent::Replace {
        user: &user,
        new_block: blocks::STONE,
        pos,
        direction: Direction::Up,
    });
    assert!(out.is_unchanged());
    assert!(world.mutations().is_empty());
}

#[test]
fn unregistered_kind_matches_explicit_default() {
    const UNKNOWN: u8 = 201;
    let pos = Position::new(2, 30, 2);
    let user = FakeUser::new(1, Direction::North);

    let run = |registry: &BlockRegistry| {
        let support = Position::new(2, 29, 2);
        let events = [
            InteractionEvent::digging(&user, DiggingStatus::Started, pos, Direction::Up),
            InteractionEvent::digging(&user, DiggingStatus::InProgress, pos, Direction::Up),
            InteractionEvent::digging(&user, DiggingStatus::Stopped, pos, Direction::Up),
            InteractionEvent::NeighbourBroken {
                user: &user,
                old_block: blocks::STONE,
                pos,
                direction: Direction::Down,
            },
            InteractionEvent::NeighbourPlace {
                user: &user,
                new_block: blocks::STONE,
                pos,
                direction: Direction::Down,
            },
            InteractionEvent::NeighbourMove {
                user: &user,
                old_block: blocks::STONE,
                pos,
                direction: Direction::Down,
            },
            InteractionEvent::digging(&user, DiggingStatus::Broken, pos, Direction::Up),
            InteractionEvent::Place {
                user: &user,
                new_block: UNKNOWN,
                pos: support,
                direction: Direction::Up,
            },
        ];
        events
            .into_iter()
            .map(|event| registry.dispatch(event))
            .collect::<Vec<_>>()
    };

    let seed = |world: &RecordingWorld| {
        world.put(pos, Block::new(UNKNOWN, 3));
        world.put(Position::new(2, 29, 2), Block::new(blocks::STONE, 0));
    };

    let implicit_world = RecordingWorld::new();
    seed(&implicit_world);
    let implicit_world = Arc::new(implicit_world);
    let implicit = registry_over(&implicit_world, FakeRoster::empty());

    let explicit_world = RecordingWorld::new();
    seed(&explicit_world);
    let explicit_world = Arc::new(explicit_world);
    let mut explicit = registry_over(&explicit_world, FakeRoster::empty());
    explicit.register(UNKNOWN, Arc::new(DefaultBehavior));

    assert_eq!(run(&implicit), run(&explicit));
    assert_eq!(implicit_world.calls(), explicit_world.calls());
    assert!(!implicit_world.mutations().is_empty());
}

#[test]
fn interaction_worldtest_event_log() {
    let output_path = std::env::temp_dir().join("interaction_worldtest.jsonl");
    let mut event_log = JsonlSink::create(&output_path).expect("can create event log");
    event_log
        .write(&EventRecord {
            seq: 0,
            kind: "TestStart",
            payload: "interaction worldtest started",
        })
        .expect("can write event");

    let pos = Position::new(1, 1, 1);
    let world = Arc::new(RecordingWorld::new().with_block(pos, Block::new(blocks::SAND, 0)));
    let registry = registry_over(&world, FakeRoster::empty());
    let user = FakeUser::new(1, Direction::North);
    registry.dispatch(InteractionEvent::digging(
        &user,
        DiggingStatus::Broken,
        pos,
        Direction::Up,
    ));

    event_log
        .write_calls(&world.calls())
        .expect("can write calls");

    let contents = std::fs::read_to_string(&output_path).expect("log readable");
    assert_eq!(contents.lines().count(), 1 + world.calls().len());
    assert!(contents.contains("spawn_pickup"));
}
