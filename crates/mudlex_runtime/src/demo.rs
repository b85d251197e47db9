//! A small world for exercising the parser by hand.
//!
//! Two areas joined by exits. The hall holds an oak chest with a brass key
//! inside, a table with a lamp on it, and two rings that share the alias
//! "ring". The garden holds a lever and a goblin carrying a gem the player
//! cannot see.

use std::sync::Arc;

use mudlex_foundation::{ObjectId, Result};
use mudlex_lexicon::{
    GrammarDescriptor, ObjectSupport, PrepositionRole, VerbDefinition, VerbTier, WordRegistry,
};
use mudlex_world::{ObjectKind, World};

use crate::session::Session;

fn bare(command: &str, help: &str) -> Result<VerbDefinition> {
    Ok(VerbDefinition::new(command, GrammarDescriptor::new())?.with_help(help))
}

fn object(command: &str, help: &str) -> Result<VerbDefinition> {
    let grammar = GrammarDescriptor::new().with_direct(ObjectSupport::Object);
    Ok(VerbDefinition::new(command, grammar)?.with_help(help))
}

fn text(command: &str, help: &str) -> Result<VerbDefinition> {
    let grammar = GrammarDescriptor::new().with_direct(ObjectSupport::Text);
    Ok(VerbDefinition::new(command, grammar)?.with_help(help))
}

/// Registers the global, builder and edit-mode verbs the demo understands.
///
/// # Errors
///
/// Returns an error if a definition is malformed.
pub fn register_verbs(registry: &WordRegistry) -> Result<()> {
    use VerbTier::{Builder, EditMode, Global};

    let put = GrammarDescriptor::new()
        .with_direct(ObjectSupport::Object)
        .with_indirect(ObjectSupport::Object)
        .with_preposition("in", PrepositionRole::In)
        .with_preposition("into", PrepositionRole::In)
        .with_preposition("on", PrepositionRole::On)
        .with_preposition("onto", PrepositionRole::On)
        .with_preposition("under", PrepositionRole::Under);
    let put = VerbDefinition::new("put", put)?.with_help("put <thing> in|on|under <thing>");

    let examine_part = GrammarDescriptor::new()
        .with_direct(ObjectSupport::Object)
        .with_indirect(ObjectSupport::Object)
        .with_preposition("of", PrepositionRole::Of);
    let examine_part =
        VerbDefinition::new("examine", examine_part)?.with_help("examine <part> of <thing>");

    let look_at = GrammarDescriptor::new()
        .with_indirect(ObjectSupport::Object)
        .with_preposition("at", PrepositionRole::None);
    let look_at = VerbDefinition::new("examine", look_at)?.with_help("look at <thing>");

    let unlock = GrammarDescriptor::new()
        .with_direct(ObjectSupport::Object)
        .with_indirect(ObjectSupport::Object)
        .with_preposition("with", PrepositionRole::With);
    let unlock = VerbDefinition::new("unlock", unlock)?.with_help("unlock <thing> with <key>");

    let ask = GrammarDescriptor::new()
        .with_direct(ObjectSupport::Object)
        .with_indirect(ObjectSupport::Text)
        .with_preposition("about", PrepositionRole::None);
    let ask = VerbDefinition::new("ask", ask)?.with_help("ask <someone> about <topic>");

    let alias = GrammarDescriptor::new()
        .with_direct(ObjectSupport::Object)
        .with_indirect(ObjectSupport::Text)
        .with_preposition("as", PrepositionRole::None);
    let alias = VerbDefinition::new("alias", alias)?.with_help("alias <thing> as <new name>");

    let look = bare("look", "look around")?;
    registry.register_verb(Global, "look", look.clone())?;
    registry.register_verb(Global, "l", look)?;
    registry.register_verb(Global, "look", look_at)?;
    let examine = object("examine", "examine <thing>")?;
    registry.register_verb(Global, "examine", examine.clone())?;
    registry.register_verb(Global, "x", examine)?;
    registry.register_verb(Global, "examine", examine_part)?;

    let take = object("take", "take <thing>")?;
    registry.register_verb(Global, "take", take.clone())?;
    registry.register_verb(Global, "get", take.clone())?;
    registry.register_verb(Global, "pick up", take)?;
    registry.register_verb(Global, "drop", object("drop", "drop <thing>")?)?;
    registry.register_verb(Global, "put", put)?;
    registry.register_verb(Global, "unlock", unlock)?;
    registry.register_verb(Global, "go", object("go", "go <exit>")?)?;
    let inventory = bare("inventory", "list what you carry")?;
    registry.register_verb(Global, "inventory", inventory.clone())?;
    registry.register_verb(Global, "i", inventory)?;
    registry.register_verb(Global, "say", text("say", "say <anything>")?)?;
    registry.register_verb(Global, "ask", ask)?;
    registry.register_verb(Global, "help", bare("help", "list verbs")?)?;
    registry.register_verb(Global, "help", text("help", "help <verb>")?)?;
    registry.register_verb(Global, "builder", bare("builder", "toggle builder privileges")?)?;

    registry.register_verb(Builder, "create", text("create", "create <name>")?)?;
    registry.register_verb(Builder, "destroy", object("destroy", "destroy <thing>")?)?;
    registry.register_verb(Builder, "summon", object("summon", "summon <thing>")?)?;
    registry.register_verb(Builder, "stats", bare("stats", "show registry statistics")?)?;
    registry.register_verb(Builder, "edit", bare("edit", "toggle edit mode")?)?;

    registry.register_verb(EditMode, "alias", alias)?;
    Ok(())
}

/// Handles of the notable demo objects.
#[derive(Clone, Copy, Debug)]
pub struct DemoObjects {
    /// The starting area.
    pub hall: ObjectId,
    /// The second area.
    pub garden: ObjectId,
    /// The player.
    pub player: ObjectId,
    /// A container in the hall.
    pub chest: ObjectId,
    /// Inside the chest.
    pub key: ObjectId,
    /// A feature in the hall.
    pub table: ObjectId,
    /// On the table.
    pub lamp: ObjectId,
    /// A creature in the garden.
    pub goblin: ObjectId,
    /// Carried by the goblin.
    pub gem: ObjectId,
}

/// Populates a world with the demo objects.
///
/// # Errors
///
/// Returns an error if any placement fails.
pub fn populate(world: &mut World) -> Result<DemoObjects> {
    let hall = world.spawn_with_aliases(ObjectKind::Area, "Great Hall", &["hall"])?;
    let garden = world.spawn_with_aliases(ObjectKind::Area, "Garden", &["garden"])?;

    let player = world.spawn_with_aliases(ObjectKind::Player, "you", &["me", "self"])?;
    world.move_into(player, hall)?;

    let chest = place(world, ObjectKind::Container, "oak chest", &["chest", "oak chest"], hall)?;
    world.add_verb_alias(chest, "open", object("open", "open the chest")?)?;
    world.add_verb_alias(chest, "close", object("close", "close the chest")?)?;
    let key = place(world, ObjectKind::Item, "brass key", &["key", "brass key"], chest)?;

    let table = place(world, ObjectKind::Feature, "table", &["table"], hall)?;
    let lamp = place(world, ObjectKind::Item, "brass lamp", &["lamp", "brass lamp"], table)?;
    world.add_verb_alias(lamp, "light", object("light", "light the lamp")?)?;
    world.add_verb_alias(lamp, "rub", object("rub", "rub the lamp")?)?;

    place(world, ObjectKind::Item, "silver ring", &["ring", "silver ring"], hall)?;
    place(world, ObjectKind::Item, "gold ring", &["ring", "gold ring"], hall)?;

    let lever = place(world, ObjectKind::Feature, "iron lever", &["lever", "iron lever"], garden)?;
    world.add_verb_alias(lever, "pull", object("pull", "pull the lever")?)?;
    let goblin = place(world, ObjectKind::Creature, "goblin", &["goblin"], garden)?;
    let talk = GrammarDescriptor::new()
        .with_indirect(ObjectSupport::Object)
        .with_preposition("to", PrepositionRole::To);
    world.add_verb_alias(goblin, "talk", VerbDefinition::new("talk", talk)?)?;
    let gem = place(world, ObjectKind::Item, "red gem", &["gem", "red gem"], goblin)?;

    Ok(DemoObjects {
        hall,
        garden,
        player,
        chest,
        key,
        table,
        lamp,
        goblin,
        gem,
    })
}

fn place(
    world: &mut World,
    kind: ObjectKind,
    name: &str,
    aliases: &[&str],
    destination: ObjectId,
) -> Result<ObjectId> {
    let id = world.spawn_with_aliases(kind, name, aliases)?;
    world.move_into(id, destination)?;
    Ok(id)
}

/// Builds a session in the demo world, standing in the hall.
///
/// # Errors
///
/// Returns an error if the world cannot be built.
pub fn build() -> Result<Session> {
    let registry = Arc::new(WordRegistry::new());
    register_verbs(&registry)?;
    let mut world = World::new(registry);
    let objects = populate(&mut world)?;

    let north = place(&mut world, ObjectKind::Exit, "north", &["north", "n"], objects.hall)?;
    let south = place(&mut world, ObjectKind::Exit, "south", &["south", "s"], objects.garden)?;

    let mut session = Session::with_world(world, objects.player);
    session.link_exit(north, objects.garden)?;
    session.link_exit(south, objects.hall)?;
    Ok(session)
}
