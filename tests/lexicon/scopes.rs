//! Integration tests for lexical scopes
//!
//! Tests use-counted registration, mirroring into the registry, teardown,
//! and concurrent access through shared scopes.

use std::sync::Arc;
use std::thread;

use mudlex_foundation::{Alias, ObjectId};
use mudlex_lexicon::{LexicalScope, WordRegistry};
use proptest::prelude::*;

fn scope(registry: &Arc<WordRegistry>, owner: u64) -> LexicalScope {
    LexicalScope::new(ObjectId::new(owner, 1), Arc::clone(registry))
}

fn item(index: u64) -> ObjectId {
    ObjectId::new(index, 1)
}

// =============================================================================
// Use counts
// =============================================================================

#[test]
fn add_twice_remove_once_keeps_alias() {
    let registry = Arc::new(WordRegistry::new());
    let area = scope(&registry, 0);
    let sword = item(10);
    let alias = Alias::new("sword");

    assert!(area.add_noun(&alias, sword));
    assert!(!area.add_noun(&alias, sword));
    assert!(!area.remove_noun("sword", sword));

    assert!(area.has_noun("sword"));
    assert!(registry.has_noun("sword"));
    assert_eq!(area.noun_count("sword", sword), 1);

    assert!(area.remove_noun("sword", sword));
    assert!(!area.has_noun("sword"));
    assert!(!registry.has_noun("sword"));
}

#[test]
fn n_adds_then_n_removes_leave_nothing() {
    let registry = Arc::new(WordRegistry::new());
    let area = scope(&registry, 0);
    let player = scope(&registry, 1);
    let coin = item(10);
    let alias = Alias::new("coin");

    for _ in 0..5 {
        area.add_noun(&alias, coin);
        player.add_noun(&alias, coin);
    }
    assert_eq!(registry.noun_count("coin"), 2);

    for _ in 0..5 {
        area.remove_noun("coin", coin);
        player.remove_noun("coin", coin);
    }
    assert!(area.is_empty());
    assert!(player.is_empty());
    assert_eq!(registry.noun_count("coin"), 0);
    assert_eq!(registry.stats().noun_pairs, 0);
}

#[test]
fn removing_absent_pair_is_noop() {
    let registry = Arc::new(WordRegistry::new());
    let area = scope(&registry, 0);
    assert!(!area.remove_noun("ghost", item(3)));
    assert!(!area.remove_verb("haunt", item(3)));
    assert!(registry.stats().noun_pairs == 0 && registry.stats().verb_pairs == 0);
}

#[test]
fn alias_lookup_is_case_insensitive() {
    let registry = Arc::new(WordRegistry::new());
    let area = scope(&registry, 0);
    area.add_noun(&Alias::new("Gold  Ring"), item(4));
    area.add_verb(&Alias::new("Polish"), item(4));

    assert!(area.has_noun("GOLD ring"));
    assert_eq!(area.nouns("Gold Ring").single(), Some(item(4)));
    assert_eq!(area.noun_count(" gold  RING ", item(4)), 1);
    assert!(area.has_verb("POLISH"));
    assert!(registry.has_noun("Gold Ring"));
    assert_eq!(registry.noun_objects("GOLD RING").single(), Some(item(4)));
    assert!(registry.has_verb("Polish"));

    assert!(area.remove_noun("Gold Ring", item(4)));
    assert!(area.remove_verb("POLISH", item(4)));
    assert!(!area.has_noun("gold ring"));
    assert!(!registry.has_noun("gold ring"));
    assert!(!registry.has_verb("polish"));
    assert!(area.is_empty());
}

#[test]
fn dropping_scope_releases_registrations() {
    let registry = Arc::new(WordRegistry::new());
    let keep = scope(&registry, 0);
    keep.add_noun(&Alias::new("torch"), item(7));
    {
        let temporary = scope(&registry, 1);
        temporary.add_noun(&Alias::new("torch"), item(7));
        temporary.add_verb(&Alias::new("light"), item(7));
        assert_eq!(registry.noun_count("torch"), 2);
    }
    assert_eq!(registry.noun_count("torch"), 1);
    assert!(!registry.has_verb("light"));
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_registration_through_shared_scopes() {
    let registry = Arc::new(WordRegistry::new());
    let area = Arc::new(scope(&registry, 0));
    let other = Arc::new(scope(&registry, 1));

    let handles: Vec<_> = (0..8u64)
        .map(|worker| {
            let target = if worker % 2 == 0 {
                Arc::clone(&area)
            } else {
                Arc::clone(&other)
            };
            thread::spawn(move || {
                let alias = Alias::new("pebble");
                for round in 0..200u64 {
                    let object = item(100 + (round % 4));
                    target.add_noun(&alias, object);
                    assert!(target.has_noun("pebble"));
                    target.remove_noun("pebble", object);
                }
                target.add_noun(&alias, item(100 + worker));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Each worker left one registration of its own object behind.
    assert_eq!(area.nouns("pebble").len(), 4);
    assert_eq!(other.nouns("pebble").len(), 4);
    assert_eq!(registry.noun_count("pebble"), 8);
    for worker in 0..8u64 {
        assert_eq!(registry.noun_pair_count("pebble", item(100 + worker)), 1);
    }
}

// =============================================================================
// Properties
// =============================================================================

#[derive(Clone, Debug)]
enum Op {
    Add { scope: usize, alias: usize, object: u64 },
    Remove { scope: usize, alias: usize, object: u64 },
}

const ALIASES: [&str; 3] = ["lamp", "brass lamp", "key"];

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..3usize, 0..3u64)
            .prop_map(|(scope, alias, object)| Op::Add { scope, alias, object }),
        (0..3usize, 0..3usize, 0..3u64)
            .prop_map(|(scope, alias, object)| Op::Remove { scope, alias, object }),
    ]
}

proptest! {
    #[test]
    fn registry_mirrors_every_scope(ops in prop::collection::vec(op(), 0..64)) {
        let registry = Arc::new(WordRegistry::new());
        let scopes: Vec<LexicalScope> = (0..3).map(|owner| scope(&registry, owner)).collect();

        for op in &ops {
            match *op {
                Op::Add { scope, alias, object } => {
                    scopes[scope].add_noun(&Alias::new(ALIASES[alias]), item(object));
                }
                Op::Remove { scope, alias, object } => {
                    scopes[scope].remove_noun(ALIASES[alias], item(object));
                }
            }

            for alias in ALIASES {
                let mut total = 0;
                for object in 0..3 {
                    let holders = scopes
                        .iter()
                        .filter(|scope| scope.noun_count(alias, item(object)) > 0)
                        .count();
                    let holders = u32::try_from(holders).unwrap();
                    prop_assert_eq!(registry.noun_pair_count(alias, item(object)), holders);
                    total += holders;
                }
                prop_assert_eq!(registry.noun_count(alias), total);
            }
        }

        for scope in &scopes {
            scope.release();
        }
        prop_assert_eq!(registry.stats().noun_pairs, 0);
    }

    #[test]
    fn balanced_adds_and_removes_empty_the_scope(counts in prop::collection::vec(1..6u32, 1..6)) {
        let registry = Arc::new(WordRegistry::new());
        let area = scope(&registry, 0);
        let alias = Alias::new("thing");

        for (index, &count) in counts.iter().enumerate() {
            for _ in 0..count {
                area.add_noun(&alias, item(index as u64));
            }
        }
        prop_assert_eq!(registry.noun_count("thing") as usize, counts.len());

        for (index, &count) in counts.iter().enumerate() {
            for _ in 0..count {
                area.remove_noun("thing", item(index as u64));
            }
        }
        prop_assert!(area.is_empty());
        prop_assert!(!registry.has_noun("thing"));
    }
}
