//! World entity, component, resource, and query behavior.

use scenecore_engine::World;
use scenecore_foundation::{EntityId, ErrorKind};
use scenecore_storage::{Component, Resource};

#[derive(Debug, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {}

#[derive(Debug, PartialEq)]
struct Velocity {
    dx: f32,
    dy: f32,
}
impl Component for Velocity {}

#[derive(Debug, PartialEq)]
struct Paused(bool);
impl Resource for Paused {}

fn motion_world() -> std::sync::Arc<World> {
    let world = World::new();
    world.register_component::<Position>().unwrap();
    world.register_component::<Velocity>().unwrap();
    world
}

#[test]
fn spawned_entities_are_queryable_in_spawn_order() {
    let world = motion_world();
    let a = world.spawn((Position { x: 0.0, y: 0.0 },)).unwrap();
    let b = world
        .spawn((Position { x: 1.0, y: 0.0 }, Velocity { dx: 1.0, dy: 0.0 }))
        .unwrap();
    let _bare = world.spawn_empty().unwrap();

    assert_eq!(world.entity_count(), 3);
    assert_eq!(world.query_entities::<Position>().unwrap(), vec![a, b]);
    assert_eq!(world.query_entities::<Velocity>().unwrap(), vec![b]);
}

#[test]
fn removing_an_entity_detaches_everything_it_carried() {
    let world = motion_world();
    let doomed = world
        .spawn((Position { x: 0.0, y: 0.0 }, Velocity { dx: 1.0, dy: 1.0 }))
        .unwrap();
    let survivor = world.spawn((Position { x: 9.0, y: 9.0 },)).unwrap();

    assert!(world.remove_entity(doomed));
    assert!(!world.remove_entity(doomed));

    assert_eq!(world.entity_count(), 1);
    assert_eq!(world.query_entities::<Position>().unwrap(), vec![survivor]);
    assert!(world.get_component::<Velocity>(doomed).unwrap().is_none());
}

#[test]
fn removing_an_unknown_id_is_a_benign_false() {
    let world = motion_world();
    world.spawn_empty().unwrap();
    assert!(!world.remove_entity(EntityId::new(u32::MAX - 2)));
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn component_lifecycle_through_the_world() {
    let world = motion_world();
    let entity = world.spawn_empty().unwrap();

    let handle = world
        .add_component(entity, Position { x: 1.0, y: 1.0 })
        .unwrap();
    assert_eq!(*handle, Position { x: 1.0, y: 1.0 });
    assert!(world.has_component::<Position>(entity).unwrap());

    let duplicate = world.add_component(entity, Position { x: 2.0, y: 2.0 });
    assert!(matches!(
        duplicate.unwrap_err().kind,
        ErrorKind::DuplicateComponent { .. }
    ));

    world
        .replace_component(entity, Position { x: 3.0, y: 3.0 })
        .unwrap();
    assert_eq!(
        *world.get_component::<Position>(entity).unwrap().unwrap(),
        Position { x: 3.0, y: 3.0 }
    );

    world.remove_component::<Position>(entity, false).unwrap();
    assert!(!world.has_component::<Position>(entity).unwrap());
}

#[test]
fn predicate_queries_filter_on_values() {
    let world = motion_world();
    let _origin = world.spawn((Position { x: 0.0, y: 0.0 },)).unwrap();
    let east = world.spawn((Position { x: 5.0, y: 0.0 },)).unwrap();
    let _west = world.spawn((Position { x: -5.0, y: 0.0 },)).unwrap();

    let eastern = world
        .query_entities_where::<Position>(|p| p.x > 0.0)
        .unwrap();
    assert_eq!(eastern, vec![east]);

    assert_eq!(
        world
            .first_entity_where::<Position>(|p| p.x < 0.0)
            .unwrap(),
        Some(_west)
    );
    assert_eq!(
        world
            .first_entity_where::<Position>(|p| p.y > 100.0)
            .unwrap(),
        None
    );
}

#[test]
fn with_queries_pair_ids_with_the_included_component() {
    let world = motion_world();
    let mover = world
        .spawn((Position { x: 1.0, y: 2.0 }, Velocity { dx: 0.5, dy: 0.5 }))
        .unwrap();
    // Carries the queried type but not the included one; skipped.
    world.spawn((Velocity { dx: 9.0, dy: 9.0 },)).unwrap();

    let results = world.query_entities_with::<Velocity, Position>().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].0, mover);
    assert_eq!(*results[0].1, Position { x: 1.0, y: 2.0 });

    let (first, position) = world
        .first_entity_with::<Velocity, Position>()
        .unwrap()
        .unwrap();
    assert_eq!(first, mover);
    assert_eq!(*position, Position { x: 1.0, y: 2.0 });
}

#[test]
fn queries_on_unregistered_types_fail_loudly() {
    let world = World::new();
    #[derive(Debug)]
    struct Ghost;
    impl Component for Ghost {}

    assert!(matches!(
        world.query_entities::<Ghost>().unwrap_err().kind,
        ErrorKind::TypeNotRegistered { .. }
    ));
    assert!(world.first_entity::<Ghost>().is_err());
}

#[test]
fn resources_are_world_scoped_singletons() {
    let world = World::new();
    world.add_resource(Paused(false)).unwrap();

    assert_eq!(*world.get_resource::<Paused>().unwrap(), Paused(false));
    assert!(world.add_resource(Paused(true)).is_err());

    world.remove_resource::<Paused>().unwrap();
    assert!(world.get_resource::<Paused>().is_none());
    assert!(world.remove_resource::<Paused>().is_err());
}
