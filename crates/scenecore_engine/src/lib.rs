//! Schedule labels, systems, plugins, and the world for Scenecore.
//!
//! This crate provides:
//! - [`World`] - The aggregate owner of entities, registries, and the schedule
//! - [`System`] / [`SystemNode`] - Per-tick logic and execution chains
//! - [`SchedulerLabel`] - Fixed startup and per-tick phase orders
//! - [`Plugin`] - One-shot configuration modules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod plugin;
mod schedule;
mod system;
mod world;

pub use plugin::{Plugin, PluginsManager};
pub use schedule::SchedulerLabel;
pub use system::{IntoSystemChain, LabeledSystemSet, System, SystemNode};
pub use world::{Entity, World};
