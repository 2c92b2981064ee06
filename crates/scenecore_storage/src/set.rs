//! Dense sparse-set storage for a single component type.
//!
//! A [`ComponentSet`] keeps all components of one concrete type in a dense
//! array with forward and inverse index maps, giving O(1) amortized insert
//! and remove. Removal swaps the last dense element into the freed slot, so
//! the relative order of the remaining components is not preserved and dense
//! indices are not stable across removals.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use scenecore_foundation::{EntityId, Error, Result};

/// Marker trait for component types.
///
/// A component is a plain value attached to at most one entity per concrete
/// type. While attached it is owned by its [`ComponentSet`] slot and shared
/// out to callers as `Arc<T>`.
pub trait Component: Any + Send + Sync {}

/// Dense storage for all components of type `T`, keyed by entity.
///
/// Invariant: `entity_to_index[e] == i` iff `index_to_entity[i] == e` iff
/// `components[i]` holds `e`'s component, and the dense array has no gaps.
pub struct ComponentSet<T: Component> {
    components: Vec<Arc<T>>,
    entity_to_index: HashMap<EntityId, usize>,
    index_to_entity: HashMap<usize, EntityId>,
    /// Weak per-entity lookup cache, repopulated lazily between structural
    /// changes and evicted when an entity's slot is removed.
    cache: Mutex<HashMap<EntityId, Weak<T>>>,
}

impl<T: Component> Default for ComponentSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            entity_to_index: HashMap::new(),
            index_to_entity: HashMap::new(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Attaches `component` to `entity` and returns the stored handle.
    ///
    /// O(1) amortized.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateComponent` if `entity` already has a component
    /// of this type.
    pub fn insert(&mut self, entity: EntityId, component: T) -> Result<Arc<T>> {
        if self.entity_to_index.contains_key(&entity) {
            return Err(Error::duplicate_component(
                entity,
                std::any::type_name::<T>(),
            ));
        }

        let index = self.components.len();
        let component = Arc::new(component);
        self.entity_to_index.insert(entity, index);
        self.index_to_entity.insert(index, entity);
        self.components.push(Arc::clone(&component));
        Ok(component)
    }

    /// Detaches `entity`'s component by swapping the last dense element into
    /// the freed slot. O(1); does not preserve the order of other entities'
    /// components.
    ///
    /// # Errors
    ///
    /// Fails with `ComponentNotFound` if `entity` has no component here.
    pub fn remove(&mut self, entity: EntityId) -> Result<()> {
        let Some(index) = self.entity_to_index.remove(&entity) else {
            return Err(Error::component_not_found(
                entity,
                std::any::type_name::<T>(),
            ));
        };

        let last = self.components.len() - 1;
        self.components.swap_remove(index);
        if index != last {
            let moved = self.index_to_entity[&last];
            self.entity_to_index.insert(moved, index);
            self.index_to_entity.insert(index, moved);
        }
        self.index_to_entity.remove(&last);
        self.cache.lock().remove(&entity);
        Ok(())
    }

    /// Looks up `entity`'s component, consulting the weak cache first.
    ///
    /// Absence is an ordinary, representable outcome, not an error.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<Arc<T>> {
        let mut cache = self.cache.lock();
        if let Some(hit) = cache.get(&entity).and_then(Weak::upgrade) {
            return Some(hit);
        }

        let index = *self.entity_to_index.get(&entity)?;
        let component = Arc::clone(&self.components[index]);
        cache.insert(entity, Arc::downgrade(&component));
        Some(component)
    }

    /// O(1) existence check.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    /// Removes then re-inserts, so the stored handle and dense slot change.
    ///
    /// # Errors
    ///
    /// Fails with `ComponentNotFound` if `entity` has no component here.
    pub fn replace(&mut self, entity: EntityId, component: T) -> Result<Arc<T>> {
        self.remove(entity)?;
        self.insert(entity, component)
    }

    /// Fan-out hook invoked by the components manager when an entity is
    /// destroyed; a no-op when the entity has no component here.
    pub fn on_entity_destroyed(&mut self, entity: EntityId) {
        if self.contains(entity) {
            let _ = self.remove(entity);
        }
    }

    /// Number of live components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if no components are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterates the entities currently holding a component, in dense order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.components.len()).map(|index| self.index_to_entity[&index])
    }
}
