//! Composable configuration plugins.
//!
//! A plugin registers components, resources, and systems into the world.
//! Each plugin type is registered at most once, and every registered plugin
//! is built exactly once, in registration order, before any startup system
//! runs.

use std::any::{TypeId, type_name};
use std::collections::HashSet;
use std::sync::Arc;

use scenecore_foundation::{Error, Result};

use crate::world::World;

/// A one-shot configuration module.
pub trait Plugin: Send + Sync + 'static {
    /// Configures the world. Invoked exactly once by [`World::startup`];
    /// this is the only place a plugin may mutate the world's registries.
    fn build(&self, world: &Arc<World>);
}

/// Registry of plugins pending their one-shot build.
#[derive(Default)]
pub struct PluginsManager {
    registered: HashSet<TypeId>,
    pending: Vec<Box<dyn Plugin>>,
}

impl PluginsManager {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs and registers one instance of `P`.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateRegistration` if `P` was already registered.
    pub fn register<P: Plugin + Default>(&mut self) -> Result<()> {
        if !self.registered.insert(TypeId::of::<P>()) {
            return Err(Error::duplicate_registration(type_name::<P>()));
        }
        self.pending.push(Box::new(P::default()));
        Ok(())
    }

    /// Hands back the plugins awaiting their build, in registration order.
    /// Each plugin is handed out once; its type stays registered for
    /// duplicate detection.
    pub(crate) fn take_pending(&mut self) -> Vec<Box<dyn Plugin>> {
        std::mem::take(&mut self.pending)
    }

    /// Number of registered plugin types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Returns true if no plugins were ever registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}
