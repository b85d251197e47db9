//! The main REPL implementation.
//!
//! Each line is parsed from the player's point of view. A handful of demo
//! commands are carried out against the world so that alias propagation can
//! be watched by hand; every other parse is printed as-is.

use mudlex_foundation::{Alias, ErrorKind, ObjectId, Result};
use mudlex_lexicon::{Placement, VerbTier};
use mudlex_parser::{Actor, Binding, ParseOutcome, ParseResult, ParseStatus};
use mudlex_world::{ContentVisibility, ObjectKind};
use tracing::{debug, warn};

use crate::demo;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (world, parser, player).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL in the demo world with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor or the demo world fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, demo::build()?))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor and session.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails, or if a command breaks an
    /// object-model invariant.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            self.refresh_keywords();
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => self.print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        if matches!(trimmed, "quit" | "exit") {
            return Ok(false);
        }

        self.editor.add_history(&input);
        let output = self.eval(trimmed)?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(true)
    }

    /// Parses and carries out one line, returning what to print.
    ///
    /// # Errors
    ///
    /// Returns an error if the world rejects a move.
    pub fn eval(&mut self, input: &str) -> Result<String> {
        match self.session.parse(input) {
            ParseOutcome::Resolved(result) => self.execute(&result),
            ParseOutcome::Ambiguous(results) => Ok(self.describe_ambiguity(&results)),
        }
    }

    fn execute(&mut self, result: &ParseResult) -> Result<String> {
        debug!(%result, "executing");
        if !result.is_valid() {
            return Ok(self.explain(result));
        }
        let Some(command) = result.command() else {
            return Ok(result.to_string());
        };

        match command.as_str() {
            "look" => self.look(),
            "examine" => self.examine(result),
            "take" => self.take(result),
            "drop" => self.drop_item(result),
            "put" => self.put(result),
            "go" => self.go(result),
            "inventory" => self.inventory(),
            "help" => Ok(self.help(result)),
            "builder" => Ok(self.toggle_builder()),
            "edit" => Ok(self.toggle_edit()),
            "create" => self.create(result),
            "destroy" => self.destroy(result),
            "summon" => self.summon(result),
            "stats" => Ok(self.session.world().registry().stats().to_string()),
            "alias" => self.alias(result),
            _ => Ok(result.to_string()),
        }
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    fn explain(&self, result: &ParseResult) -> String {
        let verb = result.verb().map_or("do that", |alias| alias.as_str());
        let unparsed = result.unparsed();
        match result.status() {
            ParseStatus::InvalidVerb => format!("I don't know how to \"{unparsed}\"."),
            ParseStatus::UnavailableVerb => format!("You can't {verb} here."),
            ParseStatus::InvalidDirect | ParseStatus::InvalidIndirect if unparsed.is_empty() => {
                format!("What do you want to {verb}?")
            }
            ParseStatus::InvalidDirect | ParseStatus::InvalidIndirect => {
                format!("There is no \"{unparsed}\" anywhere.")
            }
            ParseStatus::UnavailableDirect | ParseStatus::UnavailableIndirect => {
                format!("You don't see any \"{unparsed}\" here.")
            }
            ParseStatus::InvalidPreposition => {
                format!("I don't follow \"{unparsed}\" after {verb}.")
            }
            ParseStatus::Valid => result.to_string(),
        }
    }

    #[allow(clippy::unused_self)]
    fn describe_ambiguity(&self, results: &[ParseResult]) -> String {
        let mut out = String::from("That could mean several things:");
        for result in results {
            out.push_str(&format!("\n  {result}"));
        }
        out
    }

    fn name(&self, id: ObjectId) -> String {
        self.session
            .world()
            .get(id)
            .map_or_else(|_| id.to_string(), |object| object.name().to_string())
    }

    /// The single object a binding names, or a question asking which.
    fn single(&self, binding: Option<&Binding>) -> std::result::Result<ObjectId, String> {
        let Some(binding) = binding else {
            return Err("What do you mean?".to_string());
        };
        if let Some(id) = binding.objects.single() {
            return Ok(id);
        }
        let names: Vec<String> = binding.objects.iter().map(|id| self.name(id)).collect();
        Err(format!("Which {} do you mean: {}?", binding.text, names.join(", ")))
    }

    fn list(&self, ids: &[ObjectId], skip: ObjectId) -> Vec<String> {
        ids.iter()
            .filter(|&&id| id != skip)
            .map(|&id| self.name(id))
            .collect()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn look(&self) -> Result<String> {
        let world = self.session.world();
        let Some(area) = self.session.area() else {
            return Ok("You are nowhere.".to_string());
        };

        let mut things = Vec::new();
        let mut exits = Vec::new();
        for &id in world.contents(area)? {
            if id == self.session.player() {
                continue;
            }
            let object = world.get(id)?;
            if object.kind() == ObjectKind::Exit {
                exits.push(object.name().to_string());
                continue;
            }
            let mut line = object.name().to_string();
            if let Some(carrier) = object.as_carrier() {
                if carrier.content_visibility() == ContentVisibility::Propagate
                    && !carrier.contents().is_empty()
                {
                    line.push_str(&format!(
                        " (holding {})",
                        self.list(carrier.contents(), area).join(", ")
                    ));
                }
            }
            things.push(line);
        }

        let mut out = world.get(area)?.name().to_string();
        if !things.is_empty() {
            out.push_str(&format!("\nYou see: {}", things.join(", ")));
        }
        if !exits.is_empty() {
            out.push_str(&format!("\nExits: {}", exits.join(", ")));
        }
        Ok(out)
    }

    fn examine(&self, result: &ParseResult) -> Result<String> {
        let binding = result.indirect().or(result.direct());
        let id = match self.single(binding) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let world = self.session.world();
        let object = world.get(id)?;
        let mut out = format!("{} ({:?})", object.name(), object.kind());
        if let Some(carrier) = object.as_carrier() {
            if carrier.content_visibility() != ContentVisibility::Opaque {
                let contents = self.list(carrier.contents(), self.session.player());
                if !contents.is_empty() {
                    out.push_str(&format!(": {}", contents.join(", ")));
                }
            }
        }
        Ok(out)
    }

    fn take(&mut self, result: &ParseResult) -> Result<String> {
        let item = match self.single(result.direct()) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let player = self.session.player();
        let kind = self.session.world().get(item)?.kind();
        if !matches!(kind, ObjectKind::Item | ObjectKind::Container) {
            return Ok(format!("You can't take the {}.", self.name(item)));
        }
        if self.session.world().container(item)? == Some(player) {
            return Ok(format!("You already have the {}.", self.name(item)));
        }
        self.session.world_mut().move_into(item, player)?;
        Ok(format!("Taken: {}.", self.name(item)))
    }

    fn drop_item(&mut self, result: &ParseResult) -> Result<String> {
        let item = match self.single(result.direct()) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let player = self.session.player();
        if self.session.world().container(item)? != Some(player) {
            return Ok(format!("You aren't carrying the {}.", self.name(item)));
        }
        let Some(area) = self.session.area() else {
            return Ok("There is nowhere to drop it.".to_string());
        };
        self.session.world_mut().move_into(item, area)?;
        Ok(format!("Dropped: {}.", self.name(item)))
    }

    fn put(&mut self, result: &ParseResult) -> Result<String> {
        let item = match self.single(result.direct()) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let target = match self.single(result.indirect()) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let (item_name, target_name) = (self.name(item), self.name(target));

        if result.placement() == Some(Placement::Under) {
            return Ok(format!("You slide the {item_name} under the {target_name}."));
        }
        if self.session.world().get(target)?.as_carrier().is_none() {
            return Ok(format!("You can't put things in the {target_name}."));
        }
        match self.session.world_mut().move_into(item, target) {
            Ok(()) => {
                let preposition = result.preposition().unwrap_or("in");
                Ok(format!("You put the {item_name} {preposition} the {target_name}."))
            }
            Err(e) if matches!(e.kind, ErrorKind::ContainmentCycle { .. }) => {
                Ok(format!("The {item_name} won't fit inside itself."))
            }
            Err(e) => Err(e),
        }
    }

    fn go(&mut self, result: &ParseResult) -> Result<String> {
        let exit = match self.single(result.direct()) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let Some(destination) = self.session.exit_destination(exit) else {
            return Ok(format!("You can't go through the {}.", self.name(exit)));
        };
        let player = self.session.player();
        self.session.world_mut().move_into(player, destination)?;
        self.look()
    }

    fn inventory(&self) -> Result<String> {
        let world = self.session.world();
        let carried = self.list(world.contents(self.session.player())?, self.session.player());
        if carried.is_empty() {
            Ok("You are empty-handed.".to_string())
        } else {
            Ok(format!("You carry: {}", carried.join(", ")))
        }
    }

    fn help(&self, result: &ParseResult) -> String {
        let registry = self.session.world().registry();
        if let Some(topic) = result.direct() {
            let entries = registry.help(Alias::new(&topic.text).as_str());
            if entries.is_empty() {
                return format!("No help for \"{}\".", topic.text);
            }
            return entries
                .into_iter()
                .map(|(tier, text)| format!("{text} ({tier:?})"))
                .collect::<Vec<_>>()
                .join("\n");
        }

        let actor = self.session.actor();
        VerbTier::lookup_order()
            .into_iter()
            .filter(|&tier| actor.can_use(tier))
            .map(|tier| {
                let aliases: Vec<String> = registry
                    .tier_aliases(tier)
                    .into_iter()
                    .map(|alias| alias.as_str().to_string())
                    .collect();
                format!("{tier:?}: {}", aliases.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn toggle_builder(&mut self) -> String {
        let actor = self.session.actor();
        if actor.builder {
            self.session.set_actor(Actor::player());
            "Builder privileges dropped.".to_string()
        } else {
            self.session.set_actor(Actor::builder());
            "You are now a builder.".to_string()
        }
    }

    fn toggle_edit(&mut self) -> String {
        let actor = self.session.actor();
        self.session.set_actor(actor.with_edit_mode(!actor.edit_mode));
        if actor.edit_mode {
            "Edit mode off.".to_string()
        } else {
            "Edit mode on.".to_string()
        }
    }

    fn create(&mut self, result: &ParseResult) -> Result<String> {
        let Some(name) = result.direct().map(|binding| binding.text.clone()) else {
            return Ok("Create what?".to_string());
        };
        let Some(area) = self.session.area() else {
            return Ok("There is nowhere to put it.".to_string());
        };
        let world = self.session.world_mut();
        let id = world.spawn_with_aliases(ObjectKind::Item, &name, &[name.as_str()])?;
        world.move_into(id, area)?;
        Ok(format!("Created {name} ({id})."))
    }

    fn destroy(&mut self, result: &ParseResult) -> Result<String> {
        let id = match self.single(result.direct()) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let player = self.session.player();
        if id == player {
            return Ok("You can't destroy yourself.".to_string());
        }
        let mut holder = self.session.world().container(player)?;
        while let Some(carrier) = holder {
            if carrier == id {
                return Ok("You can't destroy something you are inside.".to_string());
            }
            holder = self.session.world().container(carrier)?;
        }
        let name = self.name(id);
        self.session.world_mut().destroy(id)?;
        Ok(format!("Destroyed {name}."))
    }

    fn summon(&mut self, result: &ParseResult) -> Result<String> {
        let id = match self.single(result.direct()) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let Some(area) = self.session.area() else {
            return Ok("There is nowhere to summon it.".to_string());
        };
        match self.session.world_mut().move_into(id, area) {
            Ok(()) => Ok(format!("The {} appears.", self.name(id))),
            Err(e) if !e.is_fatal() => {
                warn!(%id, error = %e, "summon refused");
                Ok(format!("The {} resists.", self.name(id)))
            }
            Err(e) => Err(e),
        }
    }

    fn alias(&mut self, result: &ParseResult) -> Result<String> {
        let id = match self.single(result.direct()) {
            Ok(id) => id,
            Err(question) => return Ok(question),
        };
        let Some(alias) = result.indirect().map(|binding| binding.text.clone()) else {
            return Ok("Alias it as what?".to_string());
        };
        self.session.world_mut().add_noun_alias(id, &alias)?;
        Ok(format!("The {} now answers to \"{alias}\".", self.name(id)))
    }

    // =========================================================================
    // Terminal
    // =========================================================================

    /// Offers every verb the actor could type for completion.
    fn refresh_keywords(&mut self) {
        let world = self.session.world();
        let actor = self.session.actor();
        let mut keywords: Vec<String> = VerbTier::lookup_order()
            .into_iter()
            .filter(|&tier| actor.can_use(tier))
            .flat_map(|tier| world.registry().tier_aliases(tier))
            .map(|alias| alias.as_str().to_string())
            .collect();
        if let Some(scope) = self.session.area().and_then(|area| world.scope_of(area)) {
            keywords.extend(scope.verb_aliases().iter().map(|alias| alias.as_str().to_string()));
        }
        keywords.sort();
        keywords.dedup();
        self.editor.set_keywords(keywords);
    }

    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &mudlex_foundation::Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1mmudlex\x1b[0m {}", env!("CARGO_PKG_VERSION"));
        println!("Type \"help\" for verbs, \"quit\" or Ctrl+D to exit.\n");
    }
}
