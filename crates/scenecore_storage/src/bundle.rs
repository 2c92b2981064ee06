//! Bundles of components attached together at spawn time.

use scenecore_foundation::{EntityId, Result};

use crate::components::ComponentsManager;
use crate::set::Component;

/// A tuple of component values attachable to a freshly spawned entity.
///
/// Components attach left to right; the first failure stops the walk and
/// leaves earlier attachments in place. Spawning is deliberately not
/// transactional, so a failing bundle leaves the entity registered with
/// whichever components succeeded before the failing one.
pub trait ComponentBundle {
    /// Attaches every component in the bundle to `entity`.
    ///
    /// # Errors
    ///
    /// Fails with `TypeNotRegistered` or `DuplicateComponent` from the
    /// first component that cannot be attached.
    fn attach(self, components: &mut ComponentsManager, entity: EntityId) -> Result<()>;
}

impl ComponentBundle for () {
    fn attach(self, _components: &mut ComponentsManager, _entity: EntityId) -> Result<()> {
        Ok(())
    }
}

macro_rules! tuple_bundle {
    ($($name:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($name: Component),+> ComponentBundle for ($($name,)+) {
            fn attach(self, components: &mut ComponentsManager, entity: EntityId) -> Result<()> {
                let ($($name,)+) = self;
                $(components.add_component(entity, $name)?;)+
                Ok(())
            }
        }
    };
}

tuple_bundle!(A);
tuple_bundle!(A, B);
tuple_bundle!(A, B, C);
tuple_bundle!(A, B, C, D);
tuple_bundle!(A, B, C, D, E);
tuple_bundle!(A, B, C, D, E, F);
tuple_bundle!(A, B, C, D, E, F, G);
tuple_bundle!(A, B, C, D, E, F, G, H);
