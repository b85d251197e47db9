//! Verb meanings, tiers and candidate ranking

use std::sync::Arc;

use mudlex_foundation::{Alias, ObjectId};
use mudlex_lexicon::{
    GrammarDescriptor, LexicalScope, ObjectSupport, PrepositionRole, SentenceShape, StaticCatalog,
    VerbDefinition, VerbPriority, VerbTier, WordRegistry,
};
use mudlex_parser::{Actor, ParseContext, ParseOutcome, ParseStatus, Parser, ParserConfig};

struct Fixture {
    registry: Arc<WordRegistry>,
    area: LexicalScope,
    elsewhere: LexicalScope,
    catalog: StaticCatalog,
}

impl Fixture {
    fn new() -> Self {
        let registry = Arc::new(WordRegistry::new());
        Self {
            area: LexicalScope::new(ObjectId::new(0, 1), Arc::clone(&registry)),
            elsewhere: LexicalScope::new(ObjectId::new(1, 1), Arc::clone(&registry)),
            registry,
            catalog: StaticCatalog::new(),
        }
    }

    fn verb(&self, tier: VerbTier, alias: &str, command: &str, grammar: GrammarDescriptor) {
        let definition = VerbDefinition::new(command, grammar).unwrap();
        self.registry.register_verb(tier, alias, definition).unwrap();
    }

    fn noun(scope: &LexicalScope, index: u64, alias: &str) -> ObjectId {
        let id = ObjectId::new(index, 1);
        scope.add_noun(&Alias::new(alias), id);
        id
    }

    fn parse_as(&self, input: &str, actor: Actor) -> ParseOutcome {
        self.parse_with(input, actor, ParserConfig::default())
    }

    fn parse_with(&self, input: &str, actor: Actor, config: ParserConfig) -> ParseOutcome {
        let parser = Parser::new(Arc::clone(&self.registry)).with_config(config);
        let context = ParseContext::new(&self.catalog)
            .with_area(&self.area)
            .with_actor(actor);
        parser.parse(input, &context)
    }
}

fn object() -> GrammarDescriptor {
    GrammarDescriptor::new().with_direct(ObjectSupport::Object)
}

// =============================================================================
// Verb failures
// =============================================================================

#[test]
fn unknown_verb_keeps_the_whole_line() {
    let fixture = Fixture::new();
    let outcome = fixture.parse_as("Xyzzy the lamp", Actor::player());
    let result = outcome.resolved().unwrap();
    assert_eq!(result.status(), ParseStatus::InvalidVerb);
    assert_eq!(result.priority(), VerbPriority::Invalid);
    assert_eq!(result.unparsed(), "Xyzzy the lamp");
    assert!(result.command().is_none());
}

#[test]
fn blank_input_is_an_invalid_verb() {
    let fixture = Fixture::new();
    let result = fixture.parse_as("   ", Actor::player());
    assert_eq!(result.best().unwrap().status(), ParseStatus::InvalidVerb);
    assert_eq!(result.best().unwrap().unparsed(), "");
}

#[test]
fn builder_verbs_are_unavailable_to_players() {
    let fixture = Fixture::new();
    fixture.verb(VerbTier::Builder, "teleport", "teleport", object());
    Fixture::noun(&fixture.area, 2, "lamp");

    let player = fixture.parse_as("teleport lamp", Actor::player());
    let result = player.resolved().unwrap();
    assert_eq!(result.status(), ParseStatus::UnavailableVerb);
    assert_eq!(result.priority(), VerbPriority::Unavailable);
    assert_eq!(result.verb(), Some(&Alias::new("teleport")));
    assert_eq!(result.unparsed(), "lamp");

    let builder = fixture.parse_as("teleport lamp", Actor::builder());
    let result = builder.resolved().unwrap();
    assert_eq!(result.status(), ParseStatus::Valid);
    assert_eq!(result.priority(), VerbPriority::Builder);
}

#[test]
fn local_verbs_out_of_reach_are_unavailable() {
    let fixture = Fixture::new();
    let lever = ObjectId::new(3, 1);
    fixture.elsewhere.add_verb(&Alias::new("pull"), lever);

    let result = fixture.parse_as("pull the lever", Actor::player());
    assert_eq!(result.best().unwrap().status(), ParseStatus::UnavailableVerb);
    assert_eq!(result.best().unwrap().unparsed(), "the lever");
}

// =============================================================================
// Priority and ranking
// =============================================================================

#[test]
fn local_meaning_outranks_global() {
    let mut fixture = Fixture::new();
    fixture.verb(VerbTier::Global, "open", "open", object());
    let chest = Fixture::noun(&fixture.area, 4, "chest");
    fixture.area.add_verb(&Alias::new("open"), chest);
    fixture
        .catalog
        .insert(chest, "open", VerbDefinition::new("open-chest", object()).unwrap());

    let outcome = fixture.parse_as("open chest", Actor::player());
    let result = outcome.resolved().unwrap();
    assert_eq!(result.priority(), VerbPriority::Local);
    assert_eq!(result.command().unwrap().as_str(), "open-chest");
    assert_eq!(result.verb_object(), Some(chest));
}

#[test]
fn edit_mode_outranks_builder() {
    let fixture = Fixture::new();
    let text = GrammarDescriptor::new().with_direct(ObjectSupport::Text);
    fixture.verb(VerbTier::Builder, "name", "rename", text.clone());
    fixture.verb(VerbTier::EditMode, "name", "edit-name", text);

    let actor = Actor::builder().with_edit_mode(true);
    let outcome = fixture.parse_as("name The Keep", actor);
    let result = outcome.resolved().unwrap();
    assert_eq!(result.priority(), VerbPriority::EditMode);
    assert_eq!(result.direct().unwrap().text, "The Keep");

    let outcome = fixture.parse_as("name The Keep", Actor::builder());
    assert_eq!(outcome.resolved().unwrap().priority(), VerbPriority::Builder);
}

#[test]
fn better_status_wins_within_a_priority() {
    let fixture = Fixture::new();
    fixture.verb(VerbTier::Global, "take", "take", object());
    fixture.verb(
        VerbTier::Global,
        "take",
        "take-from",
        object()
            .with_indirect(ObjectSupport::Object)
            .with_preposition("from", PrepositionRole::From),
    );
    Fixture::noun(&fixture.area, 5, "lamp");
    Fixture::noun(&fixture.area, 6, "table");

    let plain = fixture.parse_as("take lamp", Actor::player());
    assert_eq!(plain.resolved().unwrap().command().unwrap().as_str(), "take");

    let from = fixture.parse_as("take lamp from table", Actor::player());
    let result = from.resolved().unwrap();
    assert_eq!(result.command().unwrap().as_str(), "take-from");
    assert_eq!(result.role(), Some(PrepositionRole::From));
}

#[test]
fn fewer_unparsed_words_wins() {
    let fixture = Fixture::new();
    fixture.verb(
        VerbTier::Global,
        "say",
        "say",
        GrammarDescriptor::new().with_direct(ObjectSupport::Text),
    );
    fixture.verb(
        VerbTier::Global,
        "say",
        "say-to",
        GrammarDescriptor::new()
            .with_indirect(ObjectSupport::Text)
            .with_preposition("to", PrepositionRole::To),
    );

    let outcome = fixture.parse_as("say hello to bob", Actor::player());
    let result = outcome.resolved().unwrap();
    assert_eq!(result.shape(), Some(SentenceShape::VerbText));
    assert_eq!(result.direct().unwrap().text, "hello to bob");

    let outcome = fixture.parse_as("say to bob", Actor::player());
    assert_eq!(outcome.best().unwrap().status(), ParseStatus::Valid);
}

#[test]
fn equal_ranks_are_ambiguous() {
    let fixture = Fixture::new();
    fixture.verb(VerbTier::Global, "hit", "hit", object());
    fixture.verb(VerbTier::Global, "hit", "strike", object());
    Fixture::noun(&fixture.area, 7, "gong");

    let outcome = fixture.parse_as("hit gong", Actor::player());
    assert!(outcome.is_ambiguous());
    assert!(outcome.resolved().is_none());
    match &outcome {
        ParseOutcome::Ambiguous(candidates) => assert_eq!(candidates.len(), 2),
        ParseOutcome::Resolved(_) => panic!("expected two interpretations"),
    }

    let limited = fixture.parse_with(
        "hit gong",
        Actor::player(),
        ParserConfig::default().with_max_candidates(1),
    );
    assert!(!limited.is_ambiguous());
}

#[test]
fn zero_candidate_limit_still_keeps_the_best() {
    let fixture = Fixture::new();
    fixture.verb(VerbTier::Global, "take", "take", object());
    Fixture::noun(&fixture.area, 7, "gong");
    let config = ParserConfig {
        max_candidates: 0,
        ..ParserConfig::default()
    };

    let parser = Parser::new(Arc::clone(&fixture.registry)).with_config(config.clone());
    let context = ParseContext::new(&fixture.catalog).with_area(&fixture.area);
    assert_eq!(parser.candidates("take gong", &context).len(), 1);

    let outcome = fixture.parse_with("take gong", Actor::player(), config);
    assert_eq!(outcome.resolved().unwrap().status(), ParseStatus::Valid);
}

// =============================================================================
// Builder fallback
// =============================================================================

#[test]
fn builder_fallback_reaches_distant_objects() {
    let fixture = Fixture::new();
    fixture.verb(VerbTier::Builder, "summon", "summon", object());
    fixture.verb(VerbTier::Global, "take", "take", object());
    let sword = Fixture::noun(&fixture.elsewhere, 8, "sword");

    let summoned = fixture.parse_as("summon sword", Actor::builder());
    let result = summoned.resolved().unwrap();
    assert_eq!(result.status(), ParseStatus::Valid);
    assert_eq!(result.direct().unwrap().objects.single(), Some(sword));

    let taken = fixture.parse_as("take sword", Actor::builder());
    assert_eq!(taken.best().unwrap().status(), ParseStatus::UnavailableDirect);

    let strict = fixture.parse_with("summon sword", Actor::builder(), ParserConfig::strict());
    assert_eq!(strict.best().unwrap().status(), ParseStatus::UnavailableDirect);
}

#[test]
fn multi_word_verbs_match_literally() {
    let fixture = Fixture::new();
    fixture.verb(VerbTier::Global, "pick up", "take", object());
    let lamp = Fixture::noun(&fixture.area, 9, "lamp");

    let outcome = fixture.parse_as("Pick Up the lamp", Actor::player());
    let result = outcome.resolved().unwrap();
    assert_eq!(result.verb(), Some(&Alias::new("pick up")));
    assert_eq!(result.direct().unwrap().objects.single(), Some(lamp));
    assert_eq!(result.direct().unwrap().text, "the lamp");
}
