//! Scenecore - Sparse-set entity-component world core
//!
//! This crate re-exports all layers of the Scenecore system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: scenecore_engine     — World, systems, scheduling, plugins
//! Layer 1: scenecore_storage    — Sparse-set component and resource storage
//! Layer 0: scenecore_foundation — Core types (ids, Error)
//! ```

pub use scenecore_engine as engine;
pub use scenecore_foundation as foundation;
pub use scenecore_storage as storage;
