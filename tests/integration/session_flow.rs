//! A session's parses follow the world as it changes underneath

use mudlex::foundation::ObjectId;
use mudlex::lexicon::{GrammarDescriptor, ObjectSupport, VerbDefinition, VerbTier};
use mudlex::parser::{Actor, ParseStatus};
use mudlex::runtime::Session;
use mudlex::world::ObjectKind;

fn session() -> Session {
    let session = Session::new().unwrap();
    let registry = session.world().registry();
    for (tier, verb) in [
        (VerbTier::Global, "take"),
        (VerbTier::Global, "drop"),
        (VerbTier::Builder, "summon"),
    ] {
        let definition =
            VerbDefinition::new(verb, GrammarDescriptor::new().with_direct(ObjectSupport::Object))
                .unwrap();
        registry.register_verb(tier, verb, definition).unwrap();
    }
    session
}

fn status(session: &Session, input: &str) -> ParseStatus {
    session.parse(input).best().unwrap().status()
}

fn spawn_in(session: &mut Session, kind: ObjectKind, name: &str, place: ObjectId) -> ObjectId {
    let world = session.world_mut();
    let id = world.spawn_with_aliases(kind, name, &[name]).unwrap();
    world.move_into(id, place).unwrap();
    id
}

#[test]
fn carried_objects_travel_with_the_player() {
    let mut session = session();
    let void = session.area().unwrap();
    let player = session.player();
    let lantern = spawn_in(&mut session, ObjectKind::Item, "lantern", void);
    let attic = session.world_mut().spawn(ObjectKind::Area, "attic");

    assert_eq!(status(&session, "take lantern"), ParseStatus::Valid);
    session.world_mut().move_into(lantern, player).unwrap();
    session.world_mut().move_into(player, attic).unwrap();

    assert_eq!(session.area(), Some(attic));
    assert_eq!(status(&session, "drop the lantern"), ParseStatus::Valid);
    assert!(session.world().scope_of(attic).unwrap().has_noun("you"));
    assert!(!session.world().scope_of(void).unwrap().has_noun("you"));
}

#[test]
fn objects_left_behind_become_unavailable() {
    let mut session = session();
    let void = session.area().unwrap();
    let player = session.player();
    spawn_in(&mut session, ObjectKind::Item, "rug", void);
    let attic = session.world_mut().spawn(ObjectKind::Area, "attic");
    session.world_mut().move_into(player, attic).unwrap();

    assert_eq!(status(&session, "take rug"), ParseStatus::UnavailableDirect);

    session.world_mut().destroy(void).unwrap();
    assert_eq!(status(&session, "take rug"), ParseStatus::InvalidDirect);
    assert!(!session.world().registry().has_noun("rug"));
}

#[test]
fn builders_reach_across_areas() {
    let mut session = session();
    let player = session.player();
    let vault = session.world_mut().spawn(ObjectKind::Area, "vault");
    let crown = spawn_in(&mut session, ObjectKind::Item, "crown", vault);

    assert_eq!(status(&session, "summon crown"), ParseStatus::UnavailableVerb);

    session.set_actor(Actor::builder());
    let outcome = session.parse("summon crown");
    let result = outcome.resolved().unwrap();
    assert_eq!(result.status(), ParseStatus::Valid);
    assert_eq!(result.direct().unwrap().objects.single(), Some(crown));

    session.world_mut().move_into(crown, player).unwrap();
    assert_eq!(status(&session, "drop crown"), ParseStatus::Valid);
    assert_eq!(session.world().registry().noun_pair_count("crown", crown), 1);
}

#[test]
fn exits_link_areas_only() {
    let mut session = session();
    let void = session.area().unwrap();
    let door = spawn_in(&mut session, ObjectKind::Exit, "door", void);
    let cellar = session.world_mut().spawn(ObjectKind::Area, "cellar");

    assert!(session.link_exit(void, cellar).is_err());
    assert!(session.link_exit(door, door).is_err());
    session.link_exit(door, cellar).unwrap();
    assert_eq!(session.exit_destination(door), Some(cellar));
    assert_eq!(status(&session, "take door"), ParseStatus::Valid);
}
