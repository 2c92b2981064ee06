//! Error types for the Scenecore system.
//!
//! Uses `thiserror` for ergonomic error definition. Structural-integrity
//! violations (duplicate registration, missing type, empty system chain)
//! abort the failing operation; absence-type outcomes are plain `Option`s
//! and never surface here.

use thiserror::Error;

use crate::id::{EntityId, IdSpace};

/// The main error type for Scenecore operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a duplicate registration error.
    #[must_use]
    pub fn duplicate_registration(type_name: &'static str) -> Self {
        Self::new(ErrorKind::DuplicateRegistration { type_name })
    }

    /// Creates a duplicate component error.
    #[must_use]
    pub fn duplicate_component(entity: EntityId, component: &'static str) -> Self {
        Self::new(ErrorKind::DuplicateComponent { entity, component })
    }

    /// Creates a type-not-registered error.
    #[must_use]
    pub fn type_not_registered(type_name: &'static str) -> Self {
        Self::new(ErrorKind::TypeNotRegistered { type_name })
    }

    /// Creates a component-not-found error.
    #[must_use]
    pub fn component_not_found(entity: EntityId, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, component })
    }

    /// Creates an empty system chain error.
    #[must_use]
    pub fn empty_system_chain() -> Self {
        Self::new(ErrorKind::EmptySystemChain)
    }

    /// Creates an id space exhausted error.
    #[must_use]
    pub fn id_space_exhausted(space: IdSpace, max: u32) -> Self {
        Self::new(ErrorKind::IdSpaceExhausted { space, max })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A component, resource, or plugin type was registered twice.
    #[error("duplicate registration: {type_name}")]
    DuplicateRegistration {
        /// Name of the type that was already registered.
        type_name: &'static str,
    },

    /// The entity already holds a component of this type.
    #[error("duplicate component: {component} on {entity}")]
    DuplicateComponent {
        /// The entity that was targeted.
        entity: EntityId,
        /// Name of the component type.
        component: &'static str,
    },

    /// A component or resource type was used before being registered.
    #[error("type not registered: {type_name}")]
    TypeNotRegistered {
        /// Name of the type that was never registered.
        type_name: &'static str,
    },

    /// The entity does not hold a component of the requested type.
    #[error("component not found: {component} on {entity}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: EntityId,
        /// Name of the component type.
        component: &'static str,
    },

    /// A system chain with no head was added to a schedule label.
    #[error("empty system chain")]
    EmptySystemChain,

    /// An id generator reached its configured bound.
    #[error("id space exhausted: no {space} ids left at or below {max}")]
    IdSpaceExhausted {
        /// Which id namespace ran out.
        space: IdSpace,
        /// The configured bound.
        max: u32,
    },

    /// Internal invariant violation (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience result alias used across all Scenecore crates.
pub type Result<T> = std::result::Result<T, Error>;
