//! Opaque identifiers and bounded per-thread id generation.
//!
//! Entity and system ids come from thread-local [`IdGenerator`] instances:
//! each thread that creates entities or systems owns an independent counter,
//! so uniqueness is guaranteed only among ids drawn from the same thread.
//! Spawning from several threads at once can therefore collide; the intended
//! usage is a single update thread creating all entities and systems.

use std::cell::RefCell;
use std::fmt;

use crate::error::{Error, Result};

/// Highest entity id the thread-local generator will hand out.
pub const MAX_ENTITY_ID: u32 = u32::MAX - 1;

/// Highest system id the thread-local generator will hand out.
pub const MAX_SYSTEM_ID: u32 = u32::MAX - 1;

thread_local! {
    static ENTITY_IDS: RefCell<IdGenerator> =
        const { RefCell::new(IdGenerator::new(IdSpace::Entity, 0, MAX_ENTITY_ID)) };
    static SYSTEM_IDS: RefCell<IdGenerator> =
        const { RefCell::new(IdGenerator::new(IdSpace::System, 0, MAX_SYSTEM_ID)) };
}

/// The id namespaces served by [`IdGenerator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdSpace {
    /// Entity ids, bounded by [`MAX_ENTITY_ID`].
    Entity,
    /// System ids, bounded by [`MAX_SYSTEM_ID`].
    System,
}

impl fmt::Display for IdSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => write!(f, "entity"),
            Self::System => write!(f, "system"),
        }
    }
}

/// Monotonic id allocator with an inclusive upper bound.
///
/// Ids start from a configured base and are never recycled; once the bound
/// is crossed every further allocation fails.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    space: IdSpace,
    next: u32,
    max: u32,
}

impl IdGenerator {
    /// Creates a generator handing out ids in `base..=max`.
    #[must_use]
    pub const fn new(space: IdSpace, base: u32, max: u32) -> Self {
        Self {
            space,
            next: base,
            max,
        }
    }

    /// Returns a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IdSpaceExhausted`](crate::ErrorKind::IdSpaceExhausted)
    /// once the configured bound has been passed.
    pub fn next_id(&mut self) -> Result<u32> {
        if self.next > self.max {
            return Err(Error::id_space_exhausted(self.space, self.max));
        }
        let id = self.next;
        self.next += 1;
        Ok(id)
    }

    /// Number of ids still available.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        if self.next > self.max {
            0
        } else {
            self.max - self.next + 1
        }
    }
}

/// Opaque identity of a spawned entity.
///
/// An entity id is a handle, not a container: it carries no data and is only
/// meaningful as a key into component storage.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Allocates a fresh id from this thread's entity generator.
    ///
    /// Freed ids are never reused. Uniqueness holds only among entities
    /// created on the same thread (see the module docs).
    ///
    /// # Errors
    ///
    /// Fails once this thread has allocated [`MAX_ENTITY_ID`] ids.
    pub fn allocate() -> Result<Self> {
        ENTITY_IDS.with_borrow_mut(|generator| generator.next_id().map(Self))
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Opaque identity of a scheduled system.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(u32);

impl SystemId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Allocates a fresh id from this thread's system generator.
    ///
    /// # Errors
    ///
    /// Fails once this thread has allocated [`MAX_SYSTEM_ID`] ids.
    pub fn allocate() -> Result<Self> {
        SYSTEM_IDS.with_borrow_mut(|generator| generator.next_id().map(Self))
    }
}

impl fmt::Debug for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemId({})", self.0)
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "System({})", self.0)
    }
}

/// Identity allocated for a component type at registration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u32);

impl ComponentId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({})", self.0)
    }
}
