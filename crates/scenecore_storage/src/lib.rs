//! Typed component and resource storage for Scenecore.
//!
//! This crate provides:
//! - [`ComponentSet`] - Dense swap-remove sparse set for one component type
//! - [`ComponentsManager`] - Type-erased registry of component sets
//! - [`ResourcesManager`] - One-instance-per-type world resources
//! - [`ComponentBundle`] - Tuples of components attachable in one spawn

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bundle;
mod components;
mod resources;
mod set;

pub use bundle::ComponentBundle;
pub use components::ComponentsManager;
pub use resources::{Resource, ResourcesManager};
pub use set::{Component, ComponentSet};
