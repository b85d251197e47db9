//! Main parser pipeline.
//!
//! Tokenizes the input, binds the verb, tries every meaning of that verb
//! the actor can reach, and ranks the resulting interpretations.

use std::cmp::Reverse;
use std::sync::Arc;

use tracing::{debug, trace};

use mudlex_foundation::{ObjectId, ObjectSet};
use mudlex_lexicon::{
    LexicalScope, VerbCatalog, VerbDefinition, VerbPriority, VerbTier, WordRegistry,
};

use crate::config::{Actor, ParserConfig};
use crate::result::{ParseResult, ParseStatus, VerbBinding};
use crate::shape::{MatchSentence, SlotMatcher};
use crate::span::{SpanMatch, SpanMatcher};
use crate::tokenizer::TokenSequence;

/// Everything a parse needs to know about the speaker's surroundings.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    /// The speaker's inventory scope.
    pub player: Option<&'a LexicalScope>,
    /// The scope of the area the speaker stands in.
    pub area: Option<&'a LexicalScope>,
    /// The speaker's privileges.
    pub actor: Actor,
    /// Where local verb grammars come from.
    pub catalog: &'a dyn VerbCatalog,
}

impl<'a> ParseContext<'a> {
    /// A context with no scopes and an ordinary player.
    #[must_use]
    pub fn new(catalog: &'a dyn VerbCatalog) -> Self {
        Self {
            player: None,
            area: None,
            actor: Actor::player(),
            catalog,
        }
    }

    /// Builder method to set the inventory scope.
    #[must_use]
    pub fn with_player(mut self, scope: &'a LexicalScope) -> Self {
        self.player = Some(scope);
        self
    }

    /// Builder method to set the area scope.
    #[must_use]
    pub fn with_area(mut self, scope: &'a LexicalScope) -> Self {
        self.area = Some(scope);
        self
    }

    /// Builder method to set the actor.
    #[must_use]
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = actor;
        self
    }

    fn scopes(&self) -> impl Iterator<Item = &'a LexicalScope> {
        self.player.into_iter().chain(self.area)
    }
}

/// The outcome of parsing one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// One interpretation ranks strictly highest.
    Resolved(ParseResult),
    /// Several interpretations tie for the highest rank.
    Ambiguous(Vec<ParseResult>),
}

impl ParseOutcome {
    /// The resolved result, or the first of the tied ones.
    #[must_use]
    pub fn best(&self) -> Option<&ParseResult> {
        match self {
            Self::Resolved(result) => Some(result),
            Self::Ambiguous(results) => results.first(),
        }
    }

    /// Returns true if the parse was ambiguous.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    /// The resolved result, if there is exactly one.
    #[must_use]
    pub fn resolved(&self) -> Option<&ParseResult> {
        match self {
            Self::Resolved(result) => Some(result),
            Self::Ambiguous(_) => None,
        }
    }
}

/// A candidate verb meaning, before its slots are bound.
struct Meaning {
    priority: VerbPriority,
    definition: VerbDefinition,
    object: Option<ObjectId>,
}

/// Turns player input into ranked interpretations.
#[derive(Debug)]
pub struct Parser {
    registry: Arc<WordRegistry>,
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the default configuration.
    #[must_use]
    pub fn new(registry: Arc<WordRegistry>) -> Self {
        Self {
            registry,
            config: ParserConfig::default(),
        }
    }

    /// Builder method to replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The registry verbs are looked up in.
    #[must_use]
    pub fn registry(&self) -> &Arc<WordRegistry> {
        &self.registry
    }

    /// Parses a line, resolving to one interpretation if one ranks highest.
    #[must_use]
    pub fn parse(&self, input: &str, context: &ParseContext<'_>) -> ParseOutcome {
        let mut candidates = self.candidates(input, context);
        let top = candidates.first().map(rank);
        let tied = candidates
            .iter()
            .take_while(|candidate| Some(rank(candidate)) == top)
            .count();

        let outcome = if tied <= 1 && !candidates.is_empty() {
            ParseOutcome::Resolved(candidates.swap_remove(0))
        } else {
            candidates.truncate(tied);
            ParseOutcome::Ambiguous(candidates)
        };
        if let Some(best) = outcome.best() {
            debug!(
                input,
                status = ?best.status(),
                priority = ?best.priority(),
                ambiguous = outcome.is_ambiguous(),
                "parsed input"
            );
        }
        outcome
    }

    /// Every interpretation of a line, best first.
    ///
    /// Ranked by verb priority, then status, then fewest unparsed words.
    /// Never empty.
    #[must_use]
    pub fn candidates(&self, input: &str, context: &ParseContext<'_>) -> Vec<ParseResult> {
        let tokens = TokenSequence::tokenize(input);
        if tokens.is_empty() {
            return vec![ParseResult::verb_failure(
                ParseStatus::InvalidVerb,
                VerbPriority::Invalid,
                None,
                String::new(),
            )];
        }

        let spans = SpanMatcher::new(&tokens, &self.config);
        let verb_spans = spans.literal();
        let full = tokens.full();

        let Some(verb) = verb_spans.longest_match(full, |alias| self.is_reachable_verb(alias, context))
        else {
            return vec![self.unreachable_verb(&tokens, verb_spans)];
        };

        let meanings = self.meanings(&verb, context);
        if meanings.is_empty() {
            return vec![ParseResult::verb_failure(
                ParseStatus::UnavailableVerb,
                VerbPriority::Unavailable,
                Some(verb.alias),
                tokens.original(full.after(verb.range)),
            )];
        }

        let rest = full.after(verb.range);
        let mut results: Vec<ParseResult> = meanings
            .into_iter()
            .map(|meaning| {
                let fallback =
                    self.config.builder_fallback && meaning.priority == VerbPriority::Builder;
                let slots = SlotMatcher::new(
                    spans,
                    context.player,
                    context.area,
                    &self.registry,
                    meaning.definition.grammar(),
                )
                .with_fallback(fallback);
                let sentence = meaning.definition.shape().match_sentence(&slots, rest);
                let result = ParseResult::assemble(
                    VerbBinding {
                        priority: meaning.priority,
                        command: meaning.definition.command().clone(),
                        alias: verb.alias.clone(),
                        object: meaning.object,
                        shape: meaning.definition.shape(),
                    },
                    sentence,
                );
                trace!(candidate = %result, "candidate interpretation");
                result
            })
            .collect();

        results.sort_by_key(|result| Reverse(rank(result)));
        results.truncate(self.config.max_candidates.max(1));
        results
    }

    /// Returns true if `alias` names a verb from a tier the actor may use, or
    /// a verb provided by something in the actor's scopes.
    fn is_reachable_verb(&self, alias: &str, context: &ParseContext<'_>) -> bool {
        VerbTier::lookup_order()
            .into_iter()
            .any(|tier| context.actor.can_use(tier) && self.registry.has_tier_verb(tier, alias))
            || context.scopes().any(|scope| scope.has_verb(alias))
    }

    /// Every meaning of a verb the actor can reach, highest tier first,
    /// then local meanings in object order.
    fn meanings(&self, verb: &SpanMatch, context: &ParseContext<'_>) -> Vec<Meaning> {
        let alias = verb.alias.as_str();
        let mut meanings = Vec::new();

        for tier in VerbTier::lookup_order() {
            if !context.actor.can_use(tier) {
                continue;
            }
            meanings.extend(
                self.registry
                    .tier_definitions(tier, alias)
                    .into_iter()
                    .map(|definition| Meaning {
                        priority: tier.priority(),
                        definition,
                        object: None,
                    }),
            );
        }

        let mut providers = ObjectSet::new();
        for scope in context.scopes() {
            providers.extend(scope.verbs(alias).iter());
        }
        for object in providers.iter() {
            meanings.extend(
                context
                    .catalog
                    .definitions(object, alias)
                    .into_iter()
                    .map(|definition| Meaning {
                        priority: VerbPriority::Local,
                        definition,
                        object: Some(object),
                    }),
            );
        }
        meanings
    }

    /// The result for input whose verb is not reachable from here.
    fn unreachable_verb(&self, tokens: &TokenSequence, spans: SpanMatcher<'_>) -> ParseResult {
        let full = tokens.full();
        match spans.longest_match(full, |alias| self.registry.has_verb(alias)) {
            Some(verb) => ParseResult::verb_failure(
                ParseStatus::UnavailableVerb,
                VerbPriority::Unavailable,
                Some(verb.alias),
                tokens.original(full.after(verb.range)),
            ),
            None => ParseResult::verb_failure(
                ParseStatus::InvalidVerb,
                VerbPriority::Invalid,
                None,
                tokens.original(full),
            ),
        }
    }
}

/// Sort key: higher is better.
fn rank(result: &ParseResult) -> (VerbPriority, ParseStatus, Reverse<usize>) {
    (
        result.priority(),
        result.status(),
        Reverse(result.unparsed_words()),
    )
}
