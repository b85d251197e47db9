//! The world arena and alias propagation.
//!
//! Whenever an object enters or leaves a carrier, the world walks the
//! object's aliases (and, for carriers whose contents are in plain view, the
//! aliases of everything nested inside it) and registers or unregisters them
//! in the lexical scope of the top-level owner: the enclosing area or player.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use mudlex_foundation::{Alias, Error, ErrorContext, ErrorKind, ObjectId, Result, normalized};
use mudlex_lexicon::{LexicalScope, VerbCatalog, VerbDefinition, WordRegistry};

use crate::object::{
    Carrier, Containable, ContentVisibility, GameObject, LocalVerb, Nameable, ObjectKind,
};
use crate::store::ObjectStore;

/// Where the contents of a carrier end up registered.
enum Reach {
    /// In this owner's scope.
    Scope(Arc<LexicalScope>),
    /// Nowhere: an opaque carrier hides them.
    Hidden,
    /// Nowhere: the chain tops out at this carrier, which has no owner.
    Unplaced(ObjectId),
}

/// One alias registration an object contributes to a scope.
struct Registration {
    object: ObjectId,
    alias: Alias,
    verb: bool,
}

/// Owns every game object and keeps lexical scopes in step with containment.
#[derive(Debug)]
pub struct World {
    objects: ObjectStore,
    registry: Arc<WordRegistry>,
}

impl World {
    /// Creates an empty world whose scopes mirror into `registry`.
    #[must_use]
    pub fn new(registry: Arc<WordRegistry>) -> Self {
        Self {
            objects: ObjectStore::new(),
            registry,
        }
    }

    /// The shared word registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<WordRegistry> {
        &self.registry
    }

    /// Borrows an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not live.
    pub fn get(&self, id: ObjectId) -> Result<&GameObject> {
        self.objects.get(id)
    }

    /// Returns true if the handle names a live object.
    #[must_use]
    pub fn exists(&self, id: ObjectId) -> bool {
        self.objects.exists(id)
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the world holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates over live objects.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> + '_ {
        self.objects.iter()
    }

    /// Finds the first live object with the given display name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name().eq_ignore_ascii_case(name))
            .map(|(id, _)| id)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Creates an object. Areas and players get a fresh lexical scope.
    pub fn spawn(&mut self, kind: ObjectKind, name: &str) -> ObjectId {
        let id = self.objects.insert(GameObject::new(kind, name));
        if kind.owns_scope() {
            let scope = Arc::new(LexicalScope::new(id, Arc::clone(&self.registry)));
            if let Ok(object) = self.objects.get_mut(id) {
                object.scope = Some(scope);
            }
        }
        debug!(%id, ?kind, name, "spawned object");
        id
    }

    /// Creates an object and gives it noun aliases.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAlias` if any alias is blank.
    pub fn spawn_with_aliases(
        &mut self,
        kind: ObjectKind,
        name: &str,
        aliases: &[&str],
    ) -> Result<ObjectId> {
        let id = self.spawn(kind, name);
        for alias in aliases {
            self.add_noun_alias(id, alias)?;
        }
        Ok(id)
    }

    /// Destroys an object and, recursively, everything inside it.
    ///
    /// Players found inside are evicted rather than destroyed: they are
    /// detached with their inventory intact and left unplaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not live.
    pub fn destroy(&mut self, id: ObjectId) -> Result<()> {
        let children = self.objects.get(id)?.contents.clone();
        for child in children {
            if self.objects.get(child)?.kind() == ObjectKind::Player {
                warn!(player = %child, container = %id, "evicting player from destroyed object");
                self.detach(child)?;
            } else {
                self.destroy(child)?;
            }
        }

        self.detach(id)?;
        let object = self.objects.remove(id)?;
        if let Some(scope) = &object.scope {
            scope.release();
        }
        debug!(%id, name = object.name(), "destroyed object");
        Ok(())
    }

    // =========================================================================
    // Aliases
    // =========================================================================

    /// Adds a noun alias to an object and registers it where the object is seen.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAlias` for a blank alias, or an error for a dead handle.
    pub fn add_noun_alias(&mut self, id: ObjectId, alias: &str) -> Result<()> {
        let alias = parse_alias(alias)?;
        let scope = self.registration_scope(id)?;
        self.objects.get_mut(id)?.nouns.push(alias.clone());
        if let Some(scope) = scope {
            scope.add_noun(&alias, id);
        }
        Ok(())
    }

    /// Removes one registration of a noun alias from an object.
    ///
    /// # Errors
    ///
    /// Returns `AliasNotFound` if the object does not carry the alias.
    pub fn remove_noun_alias(&mut self, id: ObjectId, alias: &str) -> Result<()> {
        let alias = Alias::new(alias);
        let scope = self.registration_scope(id)?;
        let object = self.objects.get_mut(id)?;
        let Some(position) = object.nouns.iter().rposition(|held| *held == alias) else {
            return Err(alias_not_found(id, &alias));
        };
        object.nouns.remove(position);
        if let Some(scope) = scope {
            scope.remove_noun(alias.as_str(), id);
        }
        Ok(())
    }

    /// Adds a verb the object provides to players who can see it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAlias` for a blank alias, or an error for a dead handle.
    pub fn add_verb_alias(
        &mut self,
        id: ObjectId,
        alias: &str,
        definition: VerbDefinition,
    ) -> Result<()> {
        let alias = parse_alias(alias)?;
        let scope = self.registration_scope(id)?;
        self.objects.get_mut(id)?.verbs.push(LocalVerb {
            alias: alias.clone(),
            definition,
        });
        if let Some(scope) = scope {
            scope.add_verb(&alias, id);
        }
        Ok(())
    }

    /// Removes the most recently added definition of a verb alias.
    ///
    /// # Errors
    ///
    /// Returns `AliasNotFound` if the object does not provide the alias.
    pub fn remove_verb_alias(&mut self, id: ObjectId, alias: &str) -> Result<()> {
        let alias = Alias::new(alias);
        let scope = self.registration_scope(id)?;
        let object = self.objects.get_mut(id)?;
        let Some(position) = object.verbs.iter().rposition(|verb| verb.alias == alias) else {
            return Err(alias_not_found(id, &alias));
        };
        object.verbs.remove(position);
        if let Some(scope) = scope {
            scope.remove_verb(alias.as_str(), id);
        }
        Ok(())
    }

    // =========================================================================
    // Containment
    // =========================================================================

    /// Moves an object into a carrier, re-registering its aliases.
    ///
    /// Nothing is mutated unless the move is legal.
    ///
    /// # Errors
    ///
    /// - `NotContainable` if the object is an area
    /// - `NotACarrier` if the destination cannot hold things
    /// - `ContainmentCycle` if the destination is the object or inside it
    /// - `OwnerlessContainment` (fatal) if the destination's chain never
    ///   reaches an area or player
    pub fn move_into(&mut self, object: ObjectId, destination: ObjectId) -> Result<()> {
        if self.objects.get(object)?.as_containable().is_none() {
            return Err(Error::not_containable(object));
        }
        if self.objects.get(destination)?.as_carrier().is_none() {
            return Err(Error::not_a_carrier(destination));
        }
        self.check_cycle(object, destination)?;

        let reach = self.reach_from(destination)?;
        if let Reach::Unplaced(top) = reach {
            error!(
                %object,
                %destination,
                %top,
                "containment chain has no area or player at the top"
            );
            return Err(
                Error::ownerless_containment(top).with_context(
                    ErrorContext::new()
                        .with_operation("move_into")
                        .with_frame(format!("{object} into {destination}"))
                        .with_frame(format!("{top} has no container")),
                ),
            );
        }

        self.detach(object)?;
        self.objects.get_mut(object)?.container = Some(destination);
        self.objects.get_mut(destination)?.contents.push(object);

        if let Reach::Scope(scope) = reach {
            let registrations = self.collect_registrations(object)?;
            register(&scope, &registrations);
            debug!(
                %object,
                scope = %scope.owner(),
                aliases = registrations.len(),
                "registered aliases"
            );
        }
        info!(%object, %destination, "object moved");
        Ok(())
    }

    /// Takes an object out of its carrier, unregistering its aliases.
    ///
    /// Detaching an object that is not inside anything does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not live.
    pub fn detach(&mut self, object: ObjectId) -> Result<()> {
        let Some(parent) = self.objects.get(object)?.container() else {
            return Ok(());
        };

        if let Some(scope) = self.registration_scope(object)? {
            let registrations = self.collect_registrations(object)?;
            unregister(&scope, &registrations);
            debug!(
                %object,
                scope = %scope.owner(),
                aliases = registrations.len(),
                "unregistered aliases"
            );
        }

        self.objects.get_mut(object)?.container = None;
        self.objects
            .get_mut(parent)?
            .contents
            .retain(|&child| child != object);
        Ok(())
    }

    /// The carrier directly holding an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is not live.
    pub fn container(&self, object: ObjectId) -> Result<Option<ObjectId>> {
        Ok(self.objects.get(object)?.container())
    }

    /// Objects directly inside a carrier.
    ///
    /// # Errors
    ///
    /// `NotACarrier` if the object cannot hold things.
    pub fn contents(&self, id: ObjectId) -> Result<&[ObjectId]> {
        self.objects
            .get(id)?
            .as_carrier()
            .map(Carrier::contents)
            .ok_or_else(|| Error::not_a_carrier(id))
    }

    /// The nearest area enclosing an object.
    #[must_use]
    pub fn location(&self, object: ObjectId) -> Option<ObjectId> {
        let mut current = self.objects.get(object).ok()?.container();
        for _ in 0..self.objects.len() {
            let id = current?;
            let holder = self.objects.get(id).ok()?;
            if holder.kind() == ObjectKind::Area {
                return Some(id);
            }
            current = holder.container();
        }
        None
    }

    /// The scope an area or player owns.
    #[must_use]
    pub fn scope_of(&self, id: ObjectId) -> Option<Arc<LexicalScope>> {
        self.objects
            .get(id)
            .ok()
            .and_then(|object| object.owned_scope().cloned())
    }

    /// The scope an object's own aliases are registered in, if any.
    ///
    /// An area registers in its own scope. Anything else registers where
    /// its carrier chain leads: `None` if it is loose, hidden inside a
    /// creature, or inside a carrier chain that reaches no owner.
    ///
    /// # Errors
    ///
    /// Returns an error if a handle in the chain is not live.
    pub fn registration_scope(&self, id: ObjectId) -> Result<Option<Arc<LexicalScope>>> {
        let object = self.objects.get(id)?;
        if object.kind() == ObjectKind::Area {
            return Ok(object.owned_scope().cloned());
        }
        let Some(container) = object.container() else {
            return Ok(None);
        };
        Ok(match self.reach_from(container)? {
            Reach::Scope(scope) => Some(scope),
            Reach::Hidden | Reach::Unplaced(_) => None,
        })
    }

    // =========================================================================
    // Walks
    // =========================================================================

    /// Follows a carrier chain upward to where its contents are seen.
    fn reach_from(&self, carrier: ObjectId) -> Result<Reach> {
        let mut current = carrier;
        for _ in 0..=self.objects.len() {
            let object = self.objects.get(current)?;
            let Some(view) = object.as_carrier() else {
                return Err(Error::not_a_carrier(current));
            };
            match view.content_visibility() {
                ContentVisibility::Owner => {
                    return view.owned_scope().cloned().map(Reach::Scope).ok_or_else(|| {
                        Error::new(ErrorKind::Internal(format!("{current} owns no scope")))
                    });
                }
                ContentVisibility::Opaque => return Ok(Reach::Hidden),
                ContentVisibility::Propagate => match object.container() {
                    Some(next) => current = next,
                    None => return Ok(Reach::Unplaced(current)),
                },
            }
        }
        Err(Error::new(ErrorKind::Internal(format!(
            "carrier chain from {carrier} does not terminate"
        ))))
    }

    fn check_cycle(&self, object: ObjectId, destination: ObjectId) -> Result<()> {
        let cycle = || {
            Error::new(ErrorKind::ContainmentCycle {
                object,
                destination,
            })
        };
        let mut current = Some(destination);
        for _ in 0..=self.objects.len() {
            let Some(id) = current else {
                return Ok(());
            };
            if id == object {
                return Err(cycle());
            }
            current = self.objects.get(id)?.container();
        }
        Err(cycle())
    }

    /// Every alias an object brings into a scope: its own, plus those of
    /// anything nested in plain view inside it.
    fn collect_registrations(&self, id: ObjectId) -> Result<Vec<Registration>> {
        let mut out = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let object = self.objects.get(current)?;
            out.extend(object.noun_aliases().iter().map(|alias| Registration {
                object: current,
                alias: alias.clone(),
                verb: false,
            }));
            out.extend(object.verb_aliases().iter().map(|verb| Registration {
                object: current,
                alias: verb.alias.clone(),
                verb: true,
            }));
            if let Some(carrier) = object.as_carrier() {
                if carrier.content_visibility() == ContentVisibility::Propagate {
                    pending.extend_from_slice(carrier.contents());
                }
            }
        }
        Ok(out)
    }
}

impl VerbCatalog for World {
    fn definitions(&self, object: ObjectId, alias: &str) -> Vec<VerbDefinition> {
        let Ok(object) = self.objects.get(object) else {
            return Vec::new();
        };
        let alias = normalized(alias);
        let mut definitions: Vec<VerbDefinition> = Vec::new();
        for verb in object.verb_aliases() {
            if verb.alias.as_str() == alias && !definitions.contains(&verb.definition) {
                definitions.push(verb.definition.clone());
            }
        }
        definitions
    }
}

fn parse_alias(text: &str) -> Result<Alias> {
    let alias = Alias::new(text);
    if alias.is_empty() {
        return Err(Error::new(ErrorKind::InvalidAlias(text.to_string())));
    }
    Ok(alias)
}

fn alias_not_found(object: ObjectId, alias: &Alias) -> Error {
    Error::new(ErrorKind::AliasNotFound {
        object,
        alias: alias.to_string(),
    })
}

fn register(scope: &LexicalScope, registrations: &[Registration]) {
    for entry in registrations {
        if entry.verb {
            scope.add_verb(&entry.alias, entry.object);
        } else {
            scope.add_noun(&entry.alias, entry.object);
        }
    }
}

fn unregister(scope: &LexicalScope, registrations: &[Registration]) {
    for entry in registrations {
        if entry.verb {
            scope.remove_verb(entry.alias.as_str(), entry.object);
        } else {
            scope.remove_noun(entry.alias.as_str(), entry.object);
        }
    }
}
