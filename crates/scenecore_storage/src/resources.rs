//! One-instance-per-type world resources.
//!
//! A resource is a singleton keyed by its concrete type, independent of any
//! entity. Retrieval hands out `Arc<T>` shares; mutation after retrieval
//! goes through the resource's own interior mutability.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use scenecore_foundation::{Error, Result};

/// Marker trait for resource types.
pub trait Resource: Any + Send + Sync {}

/// Registry holding at most one instance of each resource type.
#[derive(Default)]
pub struct ResourcesManager {
    resources: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ResourcesManager {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `resource` as the one instance of its type and returns the
    /// stored handle.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateRegistration` if a resource of this type
    /// already exists.
    pub fn add<T: Resource>(&mut self, resource: T) -> Result<Arc<T>> {
        let key = TypeId::of::<T>();
        if self.resources.contains_key(&key) {
            return Err(Error::duplicate_registration(type_name::<T>()));
        }

        let resource = Arc::new(resource);
        self.resources
            .insert(key, Arc::clone(&resource) as Arc<dyn Any + Send + Sync>);
        Ok(resource)
    }

    /// Drops the resource of type `T`. Callers still holding an `Arc` keep
    /// their share alive.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` if no such resource exists.
    pub fn remove<T: Resource>(&mut self) -> Result<()> {
        self.resources
            .remove(&TypeId::of::<T>())
            .map(|_| ())
            .ok_or_else(|| Error::type_not_registered(type_name::<T>()))
    }

    /// Returns the resource of type `T`, or `None` if it was never added.
    ///
    /// Resources are optional dependencies by design; absence is not an
    /// error, so callers can defensively check before use.
    #[must_use]
    pub fn get<T: Resource>(&self) -> Option<Arc<T>> {
        let resource = Arc::clone(self.resources.get(&TypeId::of::<T>())?);
        resource.downcast::<T>().ok()
    }

    /// Returns true if a resource of type `T` exists.
    #[must_use]
    pub fn contains<T: Resource>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }

    /// Number of stored resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if no resources are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
