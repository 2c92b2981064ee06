//! Component bundle attachment tests.

use scenecore_foundation::{EntityId, ErrorKind};
use scenecore_storage::{Component, ComponentBundle, ComponentsManager};

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
struct Label(&'static str);
impl Component for Label {}

#[test]
fn unit_bundle_attaches_nothing() {
    let mut manager = ComponentsManager::new();
    ().attach(&mut manager, EntityId::new(1)).unwrap();
    assert!(manager.is_empty());
}

#[test]
fn tuple_bundle_attaches_every_element() {
    let mut manager = ComponentsManager::new();
    manager.register::<Position>().unwrap();
    manager.register::<Velocity>().unwrap();
    manager.register::<Label>().unwrap();
    let entity = EntityId::new(1);

    (
        Position { x: 1.0, y: 2.0 },
        Velocity { dx: 3.0, dy: 4.0 },
        Label("player"),
    )
        .attach(&mut manager, entity)
        .unwrap();

    assert!(manager.has_component::<Position>(entity).unwrap());
    assert!(manager.has_component::<Velocity>(entity).unwrap());
    assert_eq!(
        *manager.get_component::<Label>(entity).unwrap().unwrap(),
        Label("player")
    );
}

#[test]
fn attachment_stops_at_the_first_failure() {
    let mut manager = ComponentsManager::new();
    manager.register::<Position>().unwrap();
    manager.register::<Label>().unwrap();
    let entity = EntityId::new(1);

    // Velocity is unregistered, so the middle element fails and the tail
    // never attaches.
    let err = (
        Position { x: 0.0, y: 0.0 },
        Velocity { dx: 0.0, dy: 0.0 },
        Label("orphan"),
    )
        .attach(&mut manager, entity)
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::TypeNotRegistered { .. }));
    assert!(manager.has_component::<Position>(entity).unwrap());
    assert!(!manager.has_component::<Label>(entity).unwrap());
}

#[test]
fn single_element_bundle_works() {
    let mut manager = ComponentsManager::new();
    manager.register::<Label>().unwrap();
    let entity = EntityId::new(1);

    (Label("solo"),).attach(&mut manager, entity).unwrap();
    assert!(manager.has_component::<Label>(entity).unwrap());
}
