//! Integration tests for containment rules
//!
//! Tests illegal moves, ownerless chains, detaching, and destruction.

use std::sync::Arc;

use mudlex_foundation::ErrorKind;
use mudlex_lexicon::WordRegistry;
use mudlex_world::{ObjectKind, World};

fn world() -> World {
    World::new(Arc::new(WordRegistry::new()))
}

#[test]
fn areas_cannot_be_contained() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let yard = world.spawn(ObjectKind::Area, "yard");
    let error = world.move_into(hall, yard).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::NotContainable(_)));
}

#[test]
fn items_cannot_hold_things() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let cup = world.spawn(ObjectKind::Item, "cup");
    let spoon = world.spawn(ObjectKind::Item, "spoon");
    world.move_into(cup, hall).unwrap();

    let error = world.move_into(spoon, cup).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::NotACarrier(_)));
    assert!(!error.is_fatal());
}

#[test]
fn cycles_are_rejected_without_mutation() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let outer = world.spawn_with_aliases(ObjectKind::Container, "box", &["box"]).unwrap();
    let inner = world.spawn_with_aliases(ObjectKind::Container, "tin", &["tin"]).unwrap();
    world.move_into(outer, hall).unwrap();
    world.move_into(inner, outer).unwrap();

    let error = world.move_into(outer, inner).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::ContainmentCycle { .. }));
    assert_eq!(world.container(outer).unwrap(), Some(hall));
    assert!(world.scope_of(hall).unwrap().has_noun("tin"));
}

#[test]
fn ownerless_chain_is_fatal() {
    let mut world = world();
    let shelf = world.spawn(ObjectKind::Feature, "shelf");
    let vase = world.spawn_with_aliases(ObjectKind::Item, "vase", &["vase"]).unwrap();

    let error = world.move_into(vase, shelf).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::OwnerlessContainment(_)));
    assert!(error.is_fatal());
    assert_eq!(world.container(vase).unwrap(), None);
}

#[test]
fn detached_contents_are_unregistered() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let sack = world.spawn_with_aliases(ObjectKind::Container, "sack", &["sack"]).unwrap();
    world.move_into(sack, hall).unwrap();
    let apple = world.spawn_with_aliases(ObjectKind::Item, "apple", &["apple"]).unwrap();
    world.move_into(apple, sack).unwrap();

    world.detach(sack).unwrap();
    assert!(!world.registry().has_noun("sack"));
    assert!(!world.registry().has_noun("apple"));
    assert_eq!(world.container(apple).unwrap(), Some(sack));
    assert!(world.registration_scope(apple).unwrap().is_none());

    world.move_into(sack, hall).unwrap();
    assert!(world.scope_of(hall).unwrap().has_noun("apple"));
}

#[test]
fn destroy_frees_handles_and_aliases() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let chest = world.spawn_with_aliases(ObjectKind::Container, "chest", &["chest"]).unwrap();
    world.move_into(chest, hall).unwrap();
    let key = world.spawn_with_aliases(ObjectKind::Item, "key", &["key"]).unwrap();
    world.move_into(key, chest).unwrap();

    world.destroy(chest).unwrap();
    assert!(!world.exists(chest));
    assert!(!world.exists(key));
    assert!(world.get(key).is_err());
    assert!(world.contents(hall).unwrap().is_empty());
    assert!(world.scope_of(hall).unwrap().is_empty());

    let reused = world.spawn(ObjectKind::Item, "pebble");
    assert!(world.exists(reused));
    assert!(!world.exists(chest));
}

#[test]
fn destroying_an_area_releases_its_scope() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let rug = world.spawn_with_aliases(ObjectKind::Item, "rug", &["rug"]).unwrap();
    world.move_into(rug, hall).unwrap();

    world.destroy(hall).unwrap();
    assert!(!world.registry().has_noun("rug"));
    assert!(world.is_empty());
}
