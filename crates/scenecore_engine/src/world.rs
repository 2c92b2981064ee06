//! The world: entities, typed registries, and the labeled schedule.
//!
//! A single logical update thread drives [`World::startup`] and
//! [`World::update`]; systems within a label run strictly in registration
//! order and chained systems in chain order. Two independent reader-writer
//! locks guard shared state: one over the entity list and all component
//! storage, one over the label-to-system-set map. Queries take the entity
//! lock shared, so readers on other threads can overlap; structural
//! mutations take it exclusively.

use std::any::type_name;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use scenecore_foundation::{ComponentId, EntityId, Result, SystemId};
use scenecore_storage::{
    Component, ComponentBundle, ComponentsManager, Resource, ResourcesManager,
};

use crate::plugin::{Plugin, PluginsManager};
use crate::schedule::SchedulerLabel;
use crate::system::{IntoSystemChain, LabeledSystemSet};

/// A spawned entity: an opaque identity with no intrinsic data.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
}

impl Entity {
    /// Creates an entity with a fresh id from this thread's generator.
    ///
    /// # Errors
    ///
    /// Fails once this thread's entity id space is exhausted.
    pub fn new() -> Result<Self> {
        Ok(Self {
            id: EntityId::allocate()?,
        })
    }

    /// The id of this entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }
}

/// Entity list and component storage, guarded together by the entity lock.
struct WorldState {
    entities: Vec<(EntityId, Entity)>,
    components: ComponentsManager,
}

/// The aggregate owner of entities, component/resource/plugin registries,
/// and the labeled schedule.
///
/// Created behind an `Arc` so systems can hold a non-owning back-reference;
/// see [`World::new`].
pub struct World {
    state: RwLock<WorldState>,
    resources: RwLock<ResourcesManager>,
    plugins: Mutex<PluginsManager>,
    schedule: RwLock<HashMap<SchedulerLabel, LabeledSystemSet>>,
}

impl World {
    /// Creates an empty world behind the shared handle systems connect to.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(WorldState {
                entities: Vec::new(),
                components: ComponentsManager::new(),
            }),
            resources: RwLock::new(ResourcesManager::new()),
            plugins: Mutex::new(PluginsManager::new()),
            schedule: RwLock::new(HashMap::new()),
        })
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers the component type `T` so entities can carry it.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateRegistration` if `T` was already registered.
    pub fn register_component<T: Component>(&self) -> Result<ComponentId> {
        self.state.write().components.register::<T>()
    }

    /// Constructs and registers one instance of the plugin type `P`, to be
    /// built when the world starts up.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateRegistration` if `P` was already registered.
    pub fn register_plugin<P: Plugin + Default>(&self) -> Result<()> {
        self.plugins.lock().register::<P>()
    }

    // =========================================================================
    // Entities and components
    // =========================================================================

    /// Spawns a new entity carrying `bundle`'s components.
    ///
    /// Components attach left to right without rollback: if one fails, the
    /// entity stays registered with whichever components attached before
    /// the failing one.
    ///
    /// # Errors
    ///
    /// Fails with `IdSpaceExhausted`, `TypeNotRegistered`, or
    /// `DuplicateComponent`.
    pub fn spawn(&self, bundle: impl ComponentBundle) -> Result<EntityId> {
        let mut state = self.state.write();
        let entity = Entity::new()?;
        let id = entity.id();
        state.entities.push((id, entity));
        bundle.attach(&mut state.components, id)?;
        Ok(id)
    }

    /// Spawns a new entity with no components.
    ///
    /// # Errors
    ///
    /// Fails once this thread's entity id space is exhausted.
    pub fn spawn_empty(&self) -> Result<EntityId> {
        self.spawn(())
    }

    /// Destroys `entity`, purging its components from every registered set.
    ///
    /// Returns `false` if the id is unknown; "already removed" is a common,
    /// benign race and not an error.
    pub fn remove_entity(&self, entity: EntityId) -> bool {
        let mut state = self.state.write();
        let Some(position) = state.entities.iter().position(|(id, _)| *id == entity) else {
            return false;
        };
        state.components.on_entity_destroyed(entity);
        state.entities.remove(position);
        true
    }

    /// Returns true if `entity` is currently spawned.
    #[must_use]
    pub fn contains_entity(&self, entity: EntityId) -> bool {
        self.state
            .read()
            .entities
            .iter()
            .any(|(id, _)| *id == entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.state.read().entities.len()
    }

    /// Attaches `component` to `entity` and returns the stored handle.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` or `DuplicateComponent`.
    pub fn add_component<T: Component>(&self, entity: EntityId, component: T) -> Result<Arc<T>> {
        self.state.write().components.add_component(entity, component)
    }

    /// Detaches `entity`'s `T` component. With `ignore_missing`, an absent
    /// component is not an error and the call is idempotent.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered`, or `ComponentNotFound` unless
    /// `ignore_missing` is set.
    pub fn remove_component<T: Component>(
        &self,
        entity: EntityId,
        ignore_missing: bool,
    ) -> Result<()> {
        self.state
            .write()
            .components
            .remove_component::<T>(entity, ignore_missing)
    }

    /// Swaps `entity`'s `T` component for `component`; the handle identity
    /// and dense slot may change.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` or `ComponentNotFound`.
    pub fn replace_component<T: Component>(
        &self,
        entity: EntityId,
        component: T,
    ) -> Result<Arc<T>> {
        self.state
            .write()
            .components
            .replace_component(entity, component)
    }

    /// Looks up `entity`'s `T` component; `None` when absent.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Result<Option<Arc<T>>> {
        self.state.read().components.get_component(entity)
    }

    /// Like [`get_component`](Self::get_component), for call sites that have
    /// already established existence as an invariant.
    ///
    /// # Panics
    ///
    /// Panics if `T` is unregistered or `entity` has no `T` component.
    #[must_use]
    pub fn get_component_checked<T: Component>(&self, entity: EntityId) -> Arc<T> {
        match self.get_component::<T>(entity) {
            Ok(Some(component)) => component,
            Ok(None) => panic!("{entity} has no {} component", type_name::<T>()),
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns whether `entity` holds a `T` component.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn has_component<T: Component>(&self, entity: EntityId) -> Result<bool> {
        self.state.read().components.has_component::<T>(entity)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All entities carrying a `T` component, in entity-list order.
    ///
    /// The order is stable until the next structural mutation.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn query_entities<T: Component>(&self) -> Result<Vec<EntityId>> {
        let state = self.state.read();
        let set = state.components.component_set::<T>()?;
        Ok(state
            .entities
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| set.contains(*id))
            .collect())
    }

    /// All entities whose `T` component satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn query_entities_where<T: Component>(
        &self,
        predicate: impl Fn(&T) -> bool,
    ) -> Result<Vec<EntityId>> {
        let state = self.state.read();
        let set = state.components.component_set::<T>()?;
        let mut matches = Vec::new();
        for (id, _) in &state.entities {
            if let Some(component) = set.get(*id) {
                if predicate(component.as_ref()) {
                    matches.push(*id);
                }
            }
        }
        Ok(matches)
    }

    /// Entities carrying a `Q` component, returned with their `I` component:
    /// "entities with A, return their B". Entities lacking the `I` component
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if either type was never registered.
    pub fn query_entities_with<Q: Component, I: Component>(
        &self,
    ) -> Result<Vec<(EntityId, Arc<I>)>> {
        self.query_entities_with_where::<Q, I>(|_| true)
    }

    /// Like [`query_entities_with`](Self::query_entities_with), filtered on
    /// the `Q` component.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if either type was never registered.
    pub fn query_entities_with_where<Q: Component, I: Component>(
        &self,
        predicate: impl Fn(&Q) -> bool,
    ) -> Result<Vec<(EntityId, Arc<I>)>> {
        let state = self.state.read();
        let query_set = state.components.component_set::<Q>()?;
        let include_set = state.components.component_set::<I>()?;
        let mut matches = Vec::new();
        for (id, _) in &state.entities {
            let Some(queried) = query_set.get(*id) else {
                continue;
            };
            if !predicate(queried.as_ref()) {
                continue;
            }
            if let Some(included) = include_set.get(*id) {
                matches.push((*id, included));
            }
        }
        Ok(matches)
    }

    /// First entity carrying a `T` component, scanning in entity-list order.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn first_entity<T: Component>(&self) -> Result<Option<EntityId>> {
        let state = self.state.read();
        let set = state.components.component_set::<T>()?;
        Ok(state
            .entities
            .iter()
            .map(|(id, _)| *id)
            .find(|id| set.contains(*id)))
    }

    /// First entity whose `T` component satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn first_entity_where<T: Component>(
        &self,
        predicate: impl Fn(&T) -> bool,
    ) -> Result<Option<EntityId>> {
        let state = self.state.read();
        let set = state.components.component_set::<T>()?;
        for (id, _) in &state.entities {
            if let Some(component) = set.get(*id) {
                if predicate(component.as_ref()) {
                    return Ok(Some(*id));
                }
            }
        }
        Ok(None)
    }

    /// First entity carrying a `Q` component, returned with its `I`
    /// component.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if either type was never registered.
    pub fn first_entity_with<Q: Component, I: Component>(
        &self,
    ) -> Result<Option<(EntityId, Arc<I>)>> {
        self.first_entity_with_where::<Q, I>(|_| true)
    }

    /// Like [`first_entity_with`](Self::first_entity_with), filtered on the
    /// `Q` component.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if either type was never registered.
    pub fn first_entity_with_where<Q: Component, I: Component>(
        &self,
        predicate: impl Fn(&Q) -> bool,
    ) -> Result<Option<(EntityId, Arc<I>)>> {
        let state = self.state.read();
        let query_set = state.components.component_set::<Q>()?;
        let include_set = state.components.component_set::<I>()?;
        for (id, _) in &state.entities {
            let Some(queried) = query_set.get(*id) else {
                continue;
            };
            if !predicate(queried.as_ref()) {
                continue;
            }
            if let Some(included) = include_set.get(*id) {
                return Ok(Some((*id, included)));
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Resources
    // =========================================================================

    /// Adds `resource` as the one instance of its type.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateRegistration` if a resource of this type
    /// already exists.
    pub fn add_resource<T: Resource>(&self, resource: T) -> Result<Arc<T>> {
        self.resources.write().add(resource)
    }

    /// Drops the resource of type `T`.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if no such resource exists.
    pub fn remove_resource<T: Resource>(&self) -> Result<()> {
        self.resources.write().remove::<T>()
    }

    /// Returns the resource of type `T`, or `None` if it was never added.
    #[must_use]
    pub fn get_resource<T: Resource>(&self) -> Option<Arc<T>> {
        self.resources.read().get::<T>()
    }

    /// Returns true if a resource of type `T` exists.
    #[must_use]
    pub fn contains_resource<T: Resource>(&self) -> bool {
        self.resources.read().contains::<T>()
    }

    // =========================================================================
    // Systems and scheduling
    // =========================================================================

    /// Adds a system (or chain) under `label` and returns the head's id.
    ///
    /// The whole chain is connected to this world before it enters the
    /// label, so chaining must happen before this call.
    ///
    /// # Errors
    ///
    /// Fails with `EmptySystemChain` when `systems` holds nothing.
    pub fn add_system(
        self: &Arc<Self>,
        label: SchedulerLabel,
        systems: impl IntoSystemChain,
    ) -> Result<SystemId> {
        let mut chain = systems.into_chain()?;
        chain.connect(&Arc::downgrade(self));
        let mut schedule = self.schedule.write();
        let set = schedule
            .entry(label)
            .or_insert_with(|| LabeledSystemSet::new(label));
        Ok(set.add_system(chain))
    }

    /// Removes the system chain whose head has `id` from whichever label
    /// holds it. Returns `false` if no label does.
    pub fn remove_system(&self, id: SystemId) -> bool {
        let mut schedule = self.schedule.write();
        let mut removed = false;
        for set in schedule.values_mut() {
            removed |= set.remove_system(id);
        }
        removed
    }

    /// Builds every registered plugin, then runs the one-shot startup
    /// phases in their fixed order.
    ///
    /// The owning application calls this exactly once, before the first
    /// [`update`](Self::update).
    pub fn startup(self: &Arc<Self>) {
        let pending = self.plugins.lock().take_pending();
        if !pending.is_empty() {
            log::debug!("building {} plugins", pending.len());
        }
        for plugin in &pending {
            plugin.build(self);
        }

        for label in SchedulerLabel::STARTUP_ORDER {
            self.run_systems(label);
        }
    }

    /// Runs the repeating per-tick phases in their fixed order. Intended to
    /// be invoked once per external tick by the owning application loop.
    pub fn update(&self) {
        for label in SchedulerLabel::UPDATE_ORDER {
            self.run_systems(label);
        }
    }

    /// Runs every system registered under `label`, in registration order.
    /// A no-op if no system was ever registered there.
    pub fn run_systems(&self, label: SchedulerLabel) {
        let schedule = self.schedule.read();
        if let Some(set) = schedule.get(&label) {
            log::trace!("running {} systems under {label}", set.len());
            set.run();
        }
    }
}
