//! Type-erased registry of component sets.
//!
//! The manager holds one [`ComponentSet<T>`] per registered component type
//! behind an object-safe interface, keyed by `TypeId`. Component kinds are
//! declared up front via [`ComponentsManager::register`]; using an
//! unregistered type is a setup error, never silent storage creation.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use scenecore_foundation::{ComponentId, EntityId, Error, ErrorKind, Result};

use crate::set::{Component, ComponentSet};

/// Object-safe view of a [`ComponentSet`] for heterogeneous storage.
trait AnyComponentSet: Any + Send + Sync {
    fn on_entity_destroyed(&mut self, entity: EntityId);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyComponentSet for ComponentSet<T> {
    fn on_entity_destroyed(&mut self, entity: EntityId) {
        ComponentSet::on_entity_destroyed(self, entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Registry mapping each registered component type to its [`ComponentSet`].
#[derive(Default)]
pub struct ComponentsManager {
    ids: HashMap<TypeId, ComponentId>,
    sets: HashMap<TypeId, Box<dyn AnyComponentSet>>,
    next_id: u32,
}

impl ComponentsManager {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T`, allocating its [`ComponentId`] and an empty set.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateRegistration` if `T` was already registered.
    pub fn register<T: Component>(&mut self) -> Result<ComponentId> {
        let key = TypeId::of::<T>();
        if self.ids.contains_key(&key) {
            return Err(Error::duplicate_registration(type_name::<T>()));
        }

        let id = ComponentId::new(self.next_id);
        self.next_id += 1;
        self.ids.insert(key, id);
        self.sets.insert(key, Box::new(ComponentSet::<T>::new()));
        Ok(id)
    }

    /// Returns the id allocated for `T` at registration.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn component_id<T: Component>(&self) -> Result<ComponentId> {
        self.ids
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or_else(|| Error::type_not_registered(type_name::<T>()))
    }

    /// Returns true if `T` has been registered.
    #[must_use]
    pub fn is_registered<T: Component>(&self) -> bool {
        self.ids.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered component types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if no component types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The typed set backing `T`. All component operations route through
    /// this accessor and share its failure mode for unregistered types.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn component_set<T: Component>(&self) -> Result<&ComponentSet<T>> {
        let set = self
            .sets
            .get(&TypeId::of::<T>())
            .ok_or_else(|| Error::type_not_registered(type_name::<T>()))?;
        set.as_any()
            .downcast_ref::<ComponentSet<T>>()
            .ok_or_else(|| mismatched_storage::<T>())
    }

    /// Mutable variant of [`component_set`](Self::component_set).
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn component_set_mut<T: Component>(&mut self) -> Result<&mut ComponentSet<T>> {
        let set = self
            .sets
            .get_mut(&TypeId::of::<T>())
            .ok_or_else(|| Error::type_not_registered(type_name::<T>()))?;
        set.as_any_mut()
            .downcast_mut::<ComponentSet<T>>()
            .ok_or_else(|| mismatched_storage::<T>())
    }

    /// Attaches `component` to `entity`.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` or `DuplicateComponent`.
    pub fn add_component<T: Component>(
        &mut self,
        entity: EntityId,
        component: T,
    ) -> Result<Arc<T>> {
        self.component_set_mut()?.insert(entity, component)
    }

    /// Detaches `entity`'s `T` component. With `ignore_missing`, an absent
    /// component is not an error.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered`, or `ComponentNotFound` unless
    /// `ignore_missing` is set.
    pub fn remove_component<T: Component>(
        &mut self,
        entity: EntityId,
        ignore_missing: bool,
    ) -> Result<()> {
        match self.component_set_mut::<T>()?.remove(entity) {
            Err(err)
                if ignore_missing && matches!(err.kind, ErrorKind::ComponentNotFound { .. }) =>
            {
                Ok(())
            }
            other => other,
        }
    }

    /// Swaps `entity`'s `T` component for `component`.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` or `ComponentNotFound`.
    pub fn replace_component<T: Component>(
        &mut self,
        entity: EntityId,
        component: T,
    ) -> Result<Arc<T>> {
        self.component_set_mut()?.replace(entity, component)
    }

    /// Looks up `entity`'s `T` component; `None` when absent.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Result<Option<Arc<T>>> {
        Ok(self.component_set::<T>()?.get(entity))
    }

    /// Returns whether `entity` holds a `T` component.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if `T` was never registered.
    pub fn has_component<T: Component>(&self, entity: EntityId) -> Result<bool> {
        Ok(self.component_set::<T>()?.contains(entity))
    }

    /// Fans entity destruction out to every registered set so no stale
    /// entries survive.
    pub fn on_entity_destroyed(&mut self, entity: EntityId) {
        for set in self.sets.values_mut() {
            set.on_entity_destroyed(entity);
        }
    }
}

fn mismatched_storage<T>() -> Error {
    Error::internal(format!(
        "component set for {} has mismatched storage type",
        type_name::<T>()
    ))
}
