//! Integration tests for alias propagation
//!
//! Aliases follow objects as they move between areas, players, containers,
//! and creatures.

use std::sync::Arc;

use mudlex_lexicon::{GrammarDescriptor, ObjectSupport, VerbDefinition, WordRegistry};
use mudlex_world::{ObjectKind, World};

fn world() -> World {
    World::new(Arc::new(WordRegistry::new()))
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn nested_contents_follow_their_container() {
    let mut world = world();
    let hall = world.spawn_with_aliases(ObjectKind::Area, "hall", &["hall"]).unwrap();
    let player = world.spawn_with_aliases(ObjectKind::Player, "alice", &["alice"]).unwrap();
    world.move_into(player, hall).unwrap();

    let chest = world.spawn_with_aliases(ObjectKind::Container, "chest", &["chest"]).unwrap();
    world.move_into(chest, hall).unwrap();
    let bag = world.spawn_with_aliases(ObjectKind::Container, "bag", &["bag"]).unwrap();
    world.move_into(bag, chest).unwrap();
    let coin = world.spawn_with_aliases(ObjectKind::Item, "coin", &["coin", "gold coin"]).unwrap();
    world.move_into(coin, bag).unwrap();

    let hall_scope = world.scope_of(hall).unwrap();
    let inventory = world.scope_of(player).unwrap();
    assert!(hall_scope.has_noun("gold coin"));
    assert!(!inventory.has_noun("coin"));

    world.move_into(chest, player).unwrap();

    for alias in ["chest", "bag", "coin", "gold coin"] {
        assert!(inventory.has_noun(alias), "{alias} should be carried");
        assert!(!hall_scope.has_noun(alias), "{alias} should have left the hall");
    }
    assert_eq!(world.registry().noun_pair_count("coin", coin), 1);
    assert!(Arc::ptr_eq(&world.registration_scope(coin).unwrap().unwrap(), &inventory));
}

#[test]
fn local_verbs_travel_with_objects() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let cellar = world.spawn(ObjectKind::Area, "cellar");
    let crate_ = world.spawn_with_aliases(ObjectKind::Container, "crate", &["crate"]).unwrap();
    world.move_into(crate_, hall).unwrap();
    let lamp = world.spawn_with_aliases(ObjectKind::Item, "lamp", &["lamp"]).unwrap();
    let light = VerbDefinition::new("light", GrammarDescriptor::new().with_direct(ObjectSupport::Object))
        .unwrap();
    world.add_verb_alias(lamp, "light", light).unwrap();
    world.move_into(lamp, crate_).unwrap();

    assert!(world.scope_of(hall).unwrap().has_verb("light"));

    world.move_into(crate_, cellar).unwrap();
    assert!(!world.scope_of(hall).unwrap().has_verb("light"));
    assert!(world.scope_of(cellar).unwrap().has_verb("light"));
    assert_eq!(world.registry().verb_objects("light").single(), Some(lamp));
}

// =============================================================================
// Opaque carriers
// =============================================================================

#[test]
fn creature_belongings_are_hidden_until_dropped() {
    let mut world = world();
    let cave = world.spawn(ObjectKind::Area, "cave");
    let troll = world.spawn_with_aliases(ObjectKind::Creature, "troll", &["troll"]).unwrap();
    world.move_into(troll, cave).unwrap();
    let club = world.spawn_with_aliases(ObjectKind::Item, "club", &["club"]).unwrap();
    world.move_into(club, troll).unwrap();

    let scope = world.scope_of(cave).unwrap();
    assert!(scope.has_noun("troll"));
    assert!(!scope.has_noun("club"));
    assert!(!world.registry().has_noun("club"));
    assert!(world.registration_scope(club).unwrap().is_none());

    world.move_into(club, cave).unwrap();
    assert!(scope.has_noun("club"));
}

#[test]
fn player_aliases_register_where_they_stand() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let yard = world.spawn(ObjectKind::Area, "yard");
    let player = world.spawn_with_aliases(ObjectKind::Player, "bob", &["bob"]).unwrap();

    world.move_into(player, hall).unwrap();
    assert!(world.scope_of(hall).unwrap().has_noun("bob"));
    assert!(!world.scope_of(player).unwrap().has_noun("bob"));

    world.move_into(player, yard).unwrap();
    assert!(!world.scope_of(hall).unwrap().has_noun("bob"));
    assert!(world.scope_of(yard).unwrap().has_noun("bob"));
}

#[test]
fn alias_edits_apply_in_place() {
    let mut world = world();
    let hall = world.spawn(ObjectKind::Area, "hall");
    let sword = world.spawn_with_aliases(ObjectKind::Item, "sword", &["sword"]).unwrap();
    world.move_into(sword, hall).unwrap();
    let scope = world.scope_of(hall).unwrap();

    world.add_noun_alias(sword, "blade").unwrap();
    world.add_noun_alias(sword, "sword").unwrap();
    assert!(scope.has_noun("blade"));
    assert_eq!(scope.noun_count("sword", sword), 2);

    world.remove_noun_alias(sword, "sword").unwrap();
    assert!(scope.has_noun("sword"));
    world.remove_noun_alias(sword, "sword").unwrap();
    assert!(!scope.has_noun("sword"));
    assert!(world.remove_noun_alias(sword, "sword").is_err());
}
