//! Plugin registration and build ordering.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use scenecore_engine::{Plugin, SchedulerLabel, System, SystemNode, World};
use scenecore_foundation::ErrorKind;
use scenecore_storage::{Component, Resource};

#[derive(Debug, PartialEq)]
struct Score(u32);
impl Component for Score {}

#[derive(Debug, Default)]
struct BuildCount(AtomicU32);
impl Resource for BuildCount {}

/// Increments the build counter resource once per build.
#[derive(Default)]
struct CountingPlugin;

impl Plugin for CountingPlugin {
    fn build(&self, world: &Arc<World>) {
        if let Some(count) = world.get_resource::<BuildCount>() {
            count.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Registers the score component and a startup system spawning one entity.
#[derive(Default)]
struct ScorePlugin;

struct SpawnScore;

impl System for SpawnScore {
    fn name(&self) -> &str {
        "spawn-score"
    }

    fn on_execute(&self, world: &World) {
        world.spawn((Score(0),)).unwrap();
    }
}

impl Plugin for ScorePlugin {
    fn build(&self, world: &Arc<World>) {
        world.register_component::<Score>().unwrap();
        world
            .add_system(SchedulerLabel::Startup, SystemNode::new(SpawnScore).unwrap())
            .unwrap();
    }
}

#[test]
fn a_plugin_type_registers_at_most_once() {
    let world = World::new();
    world.register_plugin::<CountingPlugin>().unwrap();

    let err = world.register_plugin::<CountingPlugin>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateRegistration { .. }));
}

#[test]
fn startup_builds_each_plugin_exactly_once() {
    let world = World::new();
    world.add_resource(BuildCount::default()).unwrap();
    world.register_plugin::<CountingPlugin>().unwrap();

    world.startup();
    world.startup();

    let count = world.get_resource::<BuildCount>().unwrap();
    assert_eq!(count.0.load(Ordering::SeqCst), 1);
}

#[test]
fn plugin_registrations_are_visible_to_startup_systems() {
    let world = World::new();
    world.register_plugin::<ScorePlugin>().unwrap();

    world.startup();

    // The component the plugin registered exists and the startup system
    // already used it.
    assert_eq!(world.query_entities::<Score>().unwrap().len(), 1);
}

#[test]
fn duplicate_rejection_outlives_the_build() {
    let world = World::new();
    world.register_plugin::<ScorePlugin>().unwrap();
    world.startup();

    assert!(world.register_plugin::<ScorePlugin>().is_err());
}
