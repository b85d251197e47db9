//! Integration tests for verb grammars
//!
//! Tests shape selection from grammar descriptors and preposition roles.

use mudlex_foundation::ErrorKind;
use mudlex_lexicon::{
    GrammarDescriptor, ObjectSupport, Placement, PrepositionRole, SentenceShape, VerbDefinition,
};

#[test]
fn every_shape_is_reachable_from_a_grammar() {
    use ObjectSupport::{No, Object, Text};

    let mut seen = Vec::new();
    for direct in [No, Object, Text] {
        for indirect in [No, Object, Text] {
            for preposition in [false, true] {
                let mut grammar = GrammarDescriptor::new()
                    .with_direct(direct)
                    .with_indirect(indirect);
                if preposition {
                    grammar = grammar.with_preposition("to", PrepositionRole::To);
                }
                if let Some(shape) = grammar.shape() {
                    assert_eq!(shape.direct(), direct);
                    assert_eq!(shape.indirect(), indirect);
                    assert_eq!(shape.has_preposition(), preposition);
                    seen.push(shape);
                }
            }
        }
    }
    assert_eq!(seen.len(), 12);
    for shape in SentenceShape::all() {
        assert!(seen.contains(&shape));
    }
}

#[test]
fn indirect_without_preposition_is_unsupported() {
    let grammar = GrammarDescriptor::new()
        .with_direct(ObjectSupport::Object)
        .with_indirect(ObjectSupport::Object);
    let error = VerbDefinition::new("give", grammar).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnsupportedGrammar(_)));
}

#[test]
fn preposition_roles() {
    let grammar = GrammarDescriptor::new()
        .with_direct(ObjectSupport::Object)
        .with_indirect(ObjectSupport::Object)
        .with_preposition("Under", PrepositionRole::Under)
        .with_preposition("of", PrepositionRole::Of);

    assert!(grammar.accepts_preposition("under"));
    assert_eq!(grammar.role_of("under").and_then(PrepositionRole::placement), Some(Placement::Under));
    assert!(grammar.role_of("of").is_some_and(PrepositionRole::swaps_objects));
    assert_eq!(grammar.role_of("with"), None);
    assert_eq!(grammar.shape(), Some(SentenceShape::VerbDirectPrepIndirect));
}
