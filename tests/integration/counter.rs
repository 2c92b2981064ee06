//! A counter resource advanced once per tick by a scheduled system, with a
//! chained reporter observing each new value.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use scenecore_engine::{SchedulerLabel, System, SystemNode, World};
use scenecore_storage::Resource;

#[derive(Debug, Default)]
struct Counter(AtomicU64);
impl Resource for Counter {}

struct Increment;

impl System for Increment {
    fn name(&self) -> &str {
        "increment"
    }

    fn on_execute(&self, world: &World) {
        let counter = world.get_resource::<Counter>().unwrap();
        counter.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records the counter value it observes on every run.
struct Reporter {
    seen: Arc<Mutex<Vec<u64>>>,
}

impl System for Reporter {
    fn name(&self) -> &str {
        "reporter"
    }

    fn on_execute(&self, world: &World) {
        let counter = world.get_resource::<Counter>().unwrap();
        self.seen.lock().push(counter.0.load(Ordering::SeqCst));
    }
}

#[test]
fn the_counter_advances_once_per_tick() {
    let world = World::new();
    world.add_resource(Counter::default()).unwrap();
    world
        .add_system(SchedulerLabel::Update, SystemNode::new(Increment).unwrap())
        .unwrap();

    world.startup();
    for _ in 0..3 {
        world.update();
    }

    let counter = world.get_resource::<Counter>().unwrap();
    assert_eq!(counter.0.load(Ordering::SeqCst), 3);
}

#[test]
fn a_chained_reporter_sees_each_increment_immediately() {
    let world = World::new();
    world.add_resource(Counter::default()).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let chain = SystemNode::new(Increment).unwrap().chain(
        SystemNode::new(Reporter {
            seen: Arc::clone(&seen),
        })
        .unwrap(),
    );
    world.add_system(SchedulerLabel::Update, chain).unwrap();

    for _ in 0..3 {
        world.update();
    }

    // The reporter runs after the increment within the same tick.
    assert_eq!(*seen.lock(), vec![1, 2, 3]);
}

#[test]
fn phases_share_the_same_resource_state_within_a_tick() {
    let world = World::new();
    world.add_resource(Counter::default()).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    world
        .add_system(SchedulerLabel::PreUpdate, SystemNode::new(Increment).unwrap())
        .unwrap();
    world
        .add_system(
            SchedulerLabel::PostUpdate,
            SystemNode::new(Reporter {
                seen: Arc::clone(&seen),
            })
            .unwrap(),
        )
        .unwrap();

    world.update();
    world.update();

    assert_eq!(*seen.lock(), vec![1, 2]);
}
