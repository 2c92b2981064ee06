//! Identifier generation and error types for Scenecore.
//!
//! This crate provides:
//! - [`EntityId`], [`SystemId`], [`ComponentId`] - Opaque typed identifiers
//! - [`IdGenerator`] - Bounded, monotonic, per-thread id allocation
//! - [`Error`] - The error taxonomy shared by all layers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod id;

pub use error::{Error, ErrorKind, Result};
pub use id::{
    ComponentId, EntityId, IdGenerator, IdSpace, MAX_ENTITY_ID, MAX_SYSTEM_ID, SystemId,
};
