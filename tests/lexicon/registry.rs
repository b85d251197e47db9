//! Integration tests for the global word registry
//!
//! Tests verb tiers, help lookup, and statistics.

use std::sync::Arc;

use mudlex_foundation::{Alias, ErrorKind, ObjectId};
use mudlex_lexicon::{
    GrammarDescriptor, LexicalScope, ObjectSupport, VerbDefinition, VerbTier, WordRegistry,
};

fn take() -> VerbDefinition {
    VerbDefinition::new("take", GrammarDescriptor::new().with_direct(ObjectSupport::Object))
        .unwrap()
        .with_help("take <thing>")
}

#[test]
fn tiers_are_separate() {
    let registry = WordRegistry::new();
    registry.register_verb(VerbTier::Global, "take", take()).unwrap();

    assert!(registry.has_tier_verb(VerbTier::Global, "take"));
    assert!(!registry.has_tier_verb(VerbTier::Builder, "take"));
    assert_eq!(registry.tier_definitions(VerbTier::Global, "take").len(), 1);
    assert!(registry.tier_definitions(VerbTier::EditMode, "take").is_empty());
}

#[test]
fn tier_lookups_ignore_case() {
    let registry = WordRegistry::new();
    registry.register_verb(VerbTier::Global, "Pick  Up", take()).unwrap();

    assert!(registry.has_tier_verb(VerbTier::Global, "PICK UP"));
    assert_eq!(registry.tier_definitions(VerbTier::Global, "Pick up").len(), 1);
    assert_eq!(registry.help("pick UP"), vec![(VerbTier::Global, "take <thing>".to_string())]);
    assert!(registry.has_verb(" pick up "));
    assert_eq!(registry.tier_aliases(VerbTier::Global), vec![Alias::new("pick up")]);
}

#[test]
fn blank_verb_alias_is_rejected() {
    let registry = WordRegistry::new();
    let error = registry.register_verb(VerbTier::Global, "   ", take()).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::InvalidAlias(_)));
}

#[test]
fn help_lists_highest_tier_first() {
    let registry = WordRegistry::new();
    registry.register_verb(VerbTier::Global, "take", take()).unwrap();
    let builder_take = VerbDefinition::new("seize", GrammarDescriptor::new())
        .unwrap()
        .with_help("take (builder)");
    registry.register_verb(VerbTier::Builder, "take", builder_take).unwrap();

    let help = registry.help("take");
    assert_eq!(help.len(), 2);
    assert_eq!(help[0], (VerbTier::Builder, "take (builder)".to_string()));
    assert_eq!(help[1], (VerbTier::Global, "take <thing>".to_string()));
}

#[test]
fn has_verb_sees_tiers_and_objects() {
    let registry = Arc::new(WordRegistry::new());
    registry.register_verb(VerbTier::Global, "look", take()).unwrap();
    let area = LexicalScope::new(ObjectId::new(0, 1), Arc::clone(&registry));
    area.add_verb(&Alias::new("pull"), ObjectId::new(5, 1));

    assert!(registry.has_verb("look"));
    assert!(registry.has_verb("pull"));
    assert!(!registry.has_verb("push"));
    assert_eq!(registry.verb_objects("pull").single(), Some(ObjectId::new(5, 1)));
}

#[test]
fn stats_count_aliases_pairs_and_definitions() {
    let registry = Arc::new(WordRegistry::new());
    registry.register_verb(VerbTier::Global, "take", take()).unwrap();
    registry.register_verb(VerbTier::Global, "get", take()).unwrap();
    registry.register_verb(VerbTier::EditMode, "rename", take()).unwrap();

    let area = LexicalScope::new(ObjectId::new(0, 1), Arc::clone(&registry));
    area.add_noun(&Alias::new("ring"), ObjectId::new(1, 1));
    area.add_noun(&Alias::new("ring"), ObjectId::new(2, 1));
    area.add_noun(&Alias::new("gold ring"), ObjectId::new(2, 1));

    let stats = registry.stats();
    assert_eq!(stats.noun_aliases, 2);
    assert_eq!(stats.noun_pairs, 3);
    assert_eq!(stats.definitions, 3);
    assert_eq!(
        stats.tier_aliases,
        vec![
            (VerbTier::EditMode, 1),
            (VerbTier::Builder, 0),
            (VerbTier::Global, 2)
        ]
    );
    assert!(stats.to_string().starts_with("nouns: 2 aliases / 3 pairs"));
}

#[test]
fn reset_clears_everything() {
    let registry = Arc::new(WordRegistry::new());
    registry.register_verb(VerbTier::Global, "take", take()).unwrap();
    let area = LexicalScope::new(ObjectId::new(0, 1), Arc::clone(&registry));
    area.add_noun(&Alias::new("ring"), ObjectId::new(1, 1));
    area.release();

    registry.reset();
    assert!(!registry.has_verb("take"));
    assert!(!registry.has_noun("ring"));
    assert_eq!(registry.stats().noun_pairs, 0);
}

#[test]
fn scopes_released_before_reset_mirror_cleanly_afterwards() {
    let registry = Arc::new(WordRegistry::new());
    let area = LexicalScope::new(ObjectId::new(0, 1), Arc::clone(&registry));
    let ring = Alias::new("ring");
    let item = ObjectId::new(1, 1);
    area.add_noun(&ring, item);
    area.add_noun(&ring, item);

    area.release();
    registry.reset();

    assert!(area.add_noun(&ring, item));
    assert_eq!(registry.noun_pair_count("ring", item), 1);
    assert!(area.remove_noun("ring", item));
    assert!(!registry.has_noun("ring"));
}
