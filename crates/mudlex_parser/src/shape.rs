//! Sentence-shape matching.
//!
//! Each of the twelve [`SentenceShape`]s binds the words after the verb to
//! its slots, in sentence order. The last slot of a shape must consume
//! everything that remains; earlier slots take the longest span they can.

use tracing::trace;

use mudlex_foundation::ObjectSet;
use mudlex_lexicon::{
    GrammarDescriptor, LexicalScope, ObjectSupport, PrepositionRole, SentenceShape, WordRegistry,
};

use crate::result::{Binding, ParseStatus, SentenceMatch};
use crate::span::{SpanMatch, SpanMatcher};
use crate::tokenizer::TokenRange;

/// Which end of a range a slot must cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fit {
    /// Widest prefix.
    Longest,
    /// The whole range.
    Exact,
}

/// Outcome of binding one object slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotOutcome {
    /// Bound to objects in reach, consuming `range`.
    Bound(Binding, TokenRange),
    /// The words name something, but nothing in reach.
    Unavailable,
    /// The words name nothing.
    Invalid,
}

/// Binds slots for one candidate verb meaning.
///
/// Object slots are looked up in the player's scope and the area's scope;
/// the registry is consulted to tell "not here" from "no such thing", and
/// as a last resort when the builder fallback is enabled.
#[derive(Clone, Copy, Debug)]
pub struct SlotMatcher<'a> {
    spans: SpanMatcher<'a>,
    player: Option<&'a LexicalScope>,
    area: Option<&'a LexicalScope>,
    registry: &'a WordRegistry,
    grammar: &'a GrammarDescriptor,
    fallback: bool,
}

impl<'a> SlotMatcher<'a> {
    /// Creates a slot matcher.
    #[must_use]
    pub fn new(
        spans: SpanMatcher<'a>,
        player: Option<&'a LexicalScope>,
        area: Option<&'a LexicalScope>,
        registry: &'a WordRegistry,
        grammar: &'a GrammarDescriptor,
    ) -> Self {
        Self {
            spans,
            player,
            area,
            registry,
            grammar,
            fallback: false,
        }
    }

    /// Builder method to allow world-wide object lookup.
    #[must_use]
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Joins a range verbatim.
    #[must_use]
    pub fn text(&self, range: TokenRange) -> String {
        self.spans.tokens().original(range)
    }

    /// Binds an object slot as the widest prefix of `range`.
    #[must_use]
    pub fn longest_object(&self, range: TokenRange) -> SlotOutcome {
        self.object(range, Fit::Longest)
    }

    /// Binds an object slot to the whole of `range`.
    #[must_use]
    pub fn exact_object(&self, range: TokenRange) -> SlotOutcome {
        self.object(range, Fit::Exact)
    }

    fn span(&self, range: TokenRange, fit: Fit, known: impl Fn(&str) -> bool) -> Option<SpanMatch> {
        span_with(self.spans, range, fit, known)
    }

    fn object(&self, range: TokenRange, fit: Fit) -> SlotOutcome {
        let in_player = self
            .player
            .and_then(|scope| self.span(range, fit, |alias| scope.has_noun(alias)));
        let in_area = self
            .area
            .and_then(|scope| self.span(range, fit, |alias| scope.has_noun(alias)));

        let widest = match (in_player, in_area) {
            (Some(a), Some(b)) => Some(if b.range.end > a.range.end { b } else { a }),
            (found, None) | (None, found) => found,
        };

        if let Some(found) = widest {
            let mut objects = ObjectSet::new();
            for scope in self.player.into_iter().chain(self.area) {
                objects.extend(scope.nouns(found.alias.as_str()).iter());
            }
            trace!(alias = %found.alias, objects = objects.len(), "object slot bound");
            return SlotOutcome::Bound(
                Binding::object(self.text(found.range), found.alias, objects),
                found.range,
            );
        }

        let anywhere = self.span(range, fit, |alias| self.registry.has_noun(alias));
        match anywhere {
            Some(found) if self.fallback => {
                let objects = self.registry.noun_objects(found.alias.as_str());
                trace!(alias = %found.alias, "object slot bound by builder fallback");
                SlotOutcome::Bound(
                    Binding::object(self.text(found.range), found.alias, objects),
                    found.range,
                )
            }
            Some(_) => SlotOutcome::Unavailable,
            None => SlotOutcome::Invalid,
        }
    }

    /// Finds an accepted preposition at the start of `range`.
    #[must_use]
    pub fn preposition(&self, range: TokenRange, exact: bool) -> Option<(SpanMatch, PrepositionRole)> {
        let fit = if exact { Fit::Exact } else { Fit::Longest };
        let found = span_with(self.spans.literal(), range, fit, |alias| {
            self.grammar.accepts_preposition(alias)
        })?;
        let role = self.grammar.role_of(found.alias.as_str())?;
        Some((found, role))
    }
}

fn span_with(
    spans: SpanMatcher<'_>,
    range: TokenRange,
    fit: Fit,
    known: impl Fn(&str) -> bool,
) -> Option<SpanMatch> {
    match fit {
        Fit::Longest => spans.longest_match(range, known),
        Fit::Exact => spans.exact_match(range, known),
    }
}

/// Binds the words after a verb according to a sentence shape.
pub trait MatchSentence {
    /// Binds `rest` (the tokens after the verb) into the shape's slots.
    fn match_sentence(self, slots: &SlotMatcher<'_>, rest: TokenRange) -> SentenceMatch;
}

impl MatchSentence for SentenceShape {
    fn match_sentence(self, slots: &SlotMatcher<'_>, rest: TokenRange) -> SentenceMatch {
        trace!(shape = ?self, %rest, "matching sentence");
        match (self.direct(), self.has_preposition()) {
            (ObjectSupport::No, false) => verb_only(slots, rest),
            (ObjectSupport::Object, false) => verb_direct(slots, rest),
            (ObjectSupport::Text, false) => verb_text(slots, rest),
            (ObjectSupport::No, true) => verb_prep(slots, rest, self.indirect()),
            (ObjectSupport::Object, true) => verb_direct_prep(slots, rest, self.indirect()),
            (ObjectSupport::Text, true) => verb_text_prep(slots, rest, self.indirect()),
        }
    }
}

// =============================================================================
// Shapes without a preposition
// =============================================================================

fn verb_only(slots: &SlotMatcher<'_>, rest: TokenRange) -> SentenceMatch {
    if rest.is_empty() {
        SentenceMatch::stopped(ParseStatus::Valid, String::new())
    } else {
        SentenceMatch::stopped(ParseStatus::InvalidDirect, slots.text(rest))
    }
}

fn verb_direct(slots: &SlotMatcher<'_>, rest: TokenRange) -> SentenceMatch {
    if rest.is_empty() {
        return SentenceMatch::stopped(ParseStatus::InvalidDirect, String::new());
    }
    match slots.exact_object(rest) {
        SlotOutcome::Bound(binding, _) => SentenceMatch {
            direct: Some(binding),
            ..SentenceMatch::stopped(ParseStatus::Valid, String::new())
        },
        SlotOutcome::Unavailable => {
            SentenceMatch::stopped(ParseStatus::UnavailableDirect, slots.text(rest))
        }
        SlotOutcome::Invalid => SentenceMatch::stopped(ParseStatus::InvalidDirect, slots.text(rest)),
    }
}

fn verb_text(slots: &SlotMatcher<'_>, rest: TokenRange) -> SentenceMatch {
    if rest.is_empty() {
        return SentenceMatch::stopped(ParseStatus::InvalidDirect, String::new());
    }
    SentenceMatch {
        direct: Some(Binding::text(slots.text(rest))),
        ..SentenceMatch::stopped(ParseStatus::Valid, String::new())
    }
}

// =============================================================================
// Shared tail: indirect slot after a preposition
// =============================================================================

/// Binds the indirect slot to everything in `range`.
fn indirect_tail(
    slots: &SlotMatcher<'_>,
    range: TokenRange,
    indirect: ObjectSupport,
    mut sentence: SentenceMatch,
) -> SentenceMatch {
    match indirect {
        ObjectSupport::No => {
            sentence.status = ParseStatus::Valid;
        }
        _ if range.is_empty() => {
            sentence.status = ParseStatus::InvalidIndirect;
        }
        ObjectSupport::Text => {
            sentence.indirect = Some(Binding::text(slots.text(range)));
            sentence.status = ParseStatus::Valid;
        }
        ObjectSupport::Object => match slots.exact_object(range) {
            SlotOutcome::Bound(binding, _) => {
                sentence.indirect = Some(binding);
                sentence.status = ParseStatus::Valid;
            }
            SlotOutcome::Unavailable => {
                sentence.status = ParseStatus::UnavailableIndirect;
                sentence.unparsed = slots.text(range);
            }
            SlotOutcome::Invalid => {
                sentence.status = ParseStatus::InvalidIndirect;
                sentence.unparsed = slots.text(range);
            }
        },
    }
    sentence
}

/// Finds the preposition at `start`, honouring whether it ends the shape.
fn preposition_at(
    slots: &SlotMatcher<'_>,
    range: TokenRange,
    indirect: ObjectSupport,
) -> Option<(SpanMatch, PrepositionRole)> {
    slots.preposition(range, indirect == ObjectSupport::No)
}

fn with_preposition(
    slots: &SlotMatcher<'_>,
    found: &SpanMatch,
    role: PrepositionRole,
    direct: Option<Binding>,
    unparsed: String,
) -> SentenceMatch {
    SentenceMatch {
        status: ParseStatus::InvalidIndirect,
        direct,
        preposition: Some((slots.text(found.range), role)),
        indirect: None,
        unparsed,
    }
}

// =============================================================================
// VerbPrep*: no direct object
// =============================================================================

/// Scans front to back for the preposition and never tries a direct object.
/// Words skipped before the preposition are kept as unparsed text.
fn verb_prep(slots: &SlotMatcher<'_>, rest: TokenRange, indirect: ObjectSupport) -> SentenceMatch {
    for start in rest.start..rest.end {
        let tail = TokenRange::new(start, rest.end);
        let Some((found, role)) = preposition_at(slots, tail, indirect) else {
            continue;
        };
        let skipped = slots.text(rest.before(start));
        let sentence = with_preposition(slots, &found, role, None, skipped);
        return indirect_tail(slots, tail.after(found.range), indirect, sentence);
    }
    SentenceMatch::stopped(ParseStatus::InvalidPreposition, slots.text(rest))
}

// =============================================================================
// VerbDirectPrep*: object direct, then preposition
// =============================================================================

fn verb_direct_prep(
    slots: &SlotMatcher<'_>,
    rest: TokenRange,
    indirect: ObjectSupport,
) -> SentenceMatch {
    if rest.is_empty() {
        return SentenceMatch::stopped(ParseStatus::InvalidDirect, String::new());
    }

    let (direct, direct_range) = match slots.longest_object(rest) {
        SlotOutcome::Bound(binding, range) => (binding, range),
        SlotOutcome::Unavailable => {
            return SentenceMatch::stopped(ParseStatus::UnavailableDirect, slots.text(rest));
        }
        SlotOutcome::Invalid => {
            return SentenceMatch::stopped(ParseStatus::InvalidDirect, slots.text(rest));
        }
    };

    let after = rest.after(direct_range);
    let Some((found, role)) = preposition_at(slots, after, indirect) else {
        return SentenceMatch {
            direct: Some(direct),
            ..SentenceMatch::stopped(ParseStatus::InvalidPreposition, slots.text(after))
        };
    };

    let sentence = with_preposition(slots, &found, role, Some(direct), String::new());
    indirect_tail(slots, after.after(found.range), indirect, sentence)
}

// =============================================================================
// VerbTextPrep*: text direct, preposition located first
// =============================================================================

/// Scans split points back to front so the widest direct text wins. The
/// direct text is everything before the preposition and must not be empty.
///
/// A split whose preposition ends the line is kept as a fallback: if no
/// split leaves words for the indirect slot, the widest such split reports
/// the missing indirect.
fn verb_text_prep(
    slots: &SlotMatcher<'_>,
    rest: TokenRange,
    indirect: ObjectSupport,
) -> SentenceMatch {
    if rest.is_empty() {
        return SentenceMatch::stopped(ParseStatus::InvalidDirect, String::new());
    }

    let split = |start: usize, found: &SpanMatch, role: PrepositionRole, remainder: TokenRange| {
        let direct = Binding::text(slots.text(rest.before(start)));
        let sentence = with_preposition(slots, found, role, Some(direct), String::new());
        indirect_tail(slots, remainder, indirect, sentence)
    };

    let mut dangling = None;
    for start in (rest.start + 1..rest.end).rev() {
        let tail = TokenRange::new(start, rest.end);
        let Some((found, role)) = preposition_at(slots, tail, indirect) else {
            continue;
        };
        let remainder = tail.after(found.range);
        if indirect != ObjectSupport::No && remainder.is_empty() {
            if dangling.is_none() {
                dangling = Some((start, found, role, remainder));
            }
            continue;
        }
        return split(start, &found, role, remainder);
    }

    if let Some((start, found, role, remainder)) = dangling {
        trace!(%rest, "preposition ends the line; indirect missing");
        return split(start, &found, role, remainder);
    }
    if preposition_at(slots, rest, indirect).is_some() {
        return SentenceMatch::stopped(ParseStatus::InvalidDirect, String::new());
    }
    SentenceMatch::stopped(ParseStatus::InvalidPreposition, slots.text(rest))
}
