//! Session state for the REPL.
//!
//! A session holds the world, the parser bound to the world's registry,
//! the player doing the typing, and the exits linking areas together.

use std::collections::BTreeMap;
use std::sync::Arc;

use mudlex_foundation::{Error, ErrorKind, ObjectId, Result};
use mudlex_lexicon::WordRegistry;
use mudlex_parser::{Actor, ParseContext, ParseOutcome, Parser, ParserConfig};
use mudlex_world::{ObjectKind, World};
use tracing::info;

/// One player's view of a world.
pub struct Session {
    /// The world being explored.
    world: World,

    /// Parser sharing the world's registry.
    parser: Parser,

    /// The player typing commands.
    player: ObjectId,

    /// Current privileges.
    actor: Actor,

    /// Exit objects and the areas they lead to.
    exits: BTreeMap<ObjectId, ObjectId>,
}

impl Session {
    /// Creates a session in an empty world: one area and a player standing in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot be placed.
    pub fn new() -> Result<Self> {
        let mut world = World::new(Arc::new(WordRegistry::new()));
        let area = world.spawn_with_aliases(ObjectKind::Area, "The Void", &["void"])?;
        let player = world.spawn_with_aliases(ObjectKind::Player, "you", &["me", "self"])?;
        world.move_into(player, area)?;
        Ok(Self::with_world(world, player))
    }

    /// Creates a session over an existing world.
    #[must_use]
    pub fn with_world(world: World, player: ObjectId) -> Self {
        let parser = Parser::new(Arc::clone(world.registry()));
        Self {
            world,
            parser,
            player,
            actor: Actor::player(),
            exits: BTreeMap::new(),
        }
    }

    /// Builder method to set the parser configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::new(Arc::clone(self.world.registry())).with_config(config);
        self
    }

    /// Returns a reference to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Returns the parser.
    #[must_use]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// The player typing commands.
    #[must_use]
    pub fn player(&self) -> ObjectId {
        self.player
    }

    /// Current privileges.
    #[must_use]
    pub fn actor(&self) -> Actor {
        self.actor
    }

    /// Replaces the current privileges.
    pub fn set_actor(&mut self, actor: Actor) {
        info!(builder = actor.builder, edit_mode = actor.edit_mode, "actor changed");
        self.actor = actor;
    }

    /// The area the player stands in.
    #[must_use]
    pub fn area(&self) -> Option<ObjectId> {
        self.world.location(self.player)
    }

    // =========================================================================
    // Exits
    // =========================================================================

    /// Records that `exit` leads to `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if either handle is stale, or if `exit` is not an
    /// exit or `destination` is not an area.
    pub fn link_exit(&mut self, exit: ObjectId, destination: ObjectId) -> Result<()> {
        if self.world.get(exit)?.kind() != ObjectKind::Exit {
            return Err(Error::new(ErrorKind::Internal(format!("{exit} is not an exit"))));
        }
        if self.world.get(destination)?.kind() != ObjectKind::Area {
            return Err(Error::new(ErrorKind::Internal(format!(
                "{destination} is not an area"
            ))));
        }
        self.exits.insert(exit, destination);
        Ok(())
    }

    /// The area an exit leads to.
    #[must_use]
    pub fn exit_destination(&self, exit: ObjectId) -> Option<ObjectId> {
        self.exits.get(&exit).copied()
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parses a line from the player's point of view.
    #[must_use]
    pub fn parse(&self, input: &str) -> ParseOutcome {
        let inventory = self.world.scope_of(self.player);
        let area = self.area().and_then(|id| self.world.scope_of(id));

        let mut context = ParseContext::new(&self.world).with_actor(self.actor);
        if let Some(scope) = inventory.as_deref() {
            context = context.with_player(scope);
        }
        if let Some(scope) = area.as_deref() {
            context = context.with_area(scope);
        }
        self.parser.parse(input, &context)
    }
}
