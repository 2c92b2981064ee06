//! Systems, execution chains, and labeled system sets.
//!
//! A [`SystemNode`] wraps one [`System`] with its generated id, a non-owning
//! world back-reference, and an optional link to the next node, forming a
//! singly-linked chain that runs as one scheduling entry.

use std::sync::Weak;
use std::time::Instant;

use scenecore_foundation::{Error, Result, SystemId};

use crate::schedule::SchedulerLabel;
use crate::world::World;

/// A unit of per-tick logic executed against the [`World`].
///
/// Implementors receive the world only for the duration of
/// [`on_execute`](Self::on_execute) and must not stash a strong reference to
/// it. Systems mutate entities, components, and resources during execution,
/// never the schedule itself: the schedule lock is already held shared while
/// systems run, and adding or removing systems from inside `on_execute`
/// self-deadlocks on it.
pub trait System: Send + Sync + 'static {
    /// Informational name used in logs.
    fn name(&self) -> &str;

    /// Executes one step of this system's logic.
    fn on_execute(&self, world: &World);
}

/// A scheduled system together with its chain link and world back-reference.
///
/// Nodes start unconnected; [`World::add_system`] propagates the world
/// handle through the whole chain before the head enters its label, so
/// chaining must happen before the head is added.
pub struct SystemNode {
    id: SystemId,
    system: Box<dyn System>,
    world: Weak<World>,
    next: Option<Box<SystemNode>>,
}

impl std::fmt::Debug for SystemNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemNode")
            .field("id", &self.id)
            .field("name", &self.system.name())
            .field("next", &self.next)
            .finish()
    }
}

impl SystemNode {
    /// Wraps `system` with a freshly allocated id.
    ///
    /// # Errors
    ///
    /// Fails once this thread's system id space is exhausted.
    pub fn new(system: impl System) -> Result<Self> {
        Ok(Self {
            id: SystemId::allocate()?,
            system: Box::new(system),
            world: Weak::new(),
            next: None,
        })
    }

    /// The id of the head system.
    #[must_use]
    pub fn id(&self) -> SystemId {
        self.id
    }

    /// The name of the head system.
    #[must_use]
    pub fn name(&self) -> &str {
        self.system.name()
    }

    /// Appends `next` to the tail of this chain and returns the head, so
    /// `a.chain(b).chain(c)` executes A, then B, then C.
    #[must_use]
    pub fn chain(mut self, next: SystemNode) -> SystemNode {
        self.append(next);
        self
    }

    fn append(&mut self, next: SystemNode) {
        match &mut self.next {
            Some(node) => node.append(next),
            None => self.next = Some(Box::new(next)),
        }
    }

    /// Propagates the world back-reference through the whole chain.
    pub(crate) fn connect(&mut self, world: &Weak<World>) {
        self.world = Weak::clone(world);
        if let Some(next) = &mut self.next {
            next.connect(world);
        }
    }

    /// Runs this system once, then the rest of its chain.
    pub(crate) fn run_once(&self) {
        if let Some(world) = self.world.upgrade() {
            let started = Instant::now();
            self.system.on_execute(&world);
            log::trace!(
                "system {} ran in {:.3?}",
                self.system.name(),
                started.elapsed()
            );
        }
        if let Some(next) = &self.next {
            next.run_once();
        }
    }

    /// Number of systems in this chain, head included.
    #[must_use]
    pub fn chain_len(&self) -> usize {
        1 + self.next.as_ref().map_or(0, |next| next.chain_len())
    }
}

/// Conversion into a single scheduled chain entry.
pub trait IntoSystemChain {
    /// Builds the chain head.
    ///
    /// # Errors
    ///
    /// Fails with `EmptySystemChain` when there is nothing to schedule.
    fn into_chain(self) -> Result<SystemNode>;
}

impl IntoSystemChain for SystemNode {
    fn into_chain(self) -> Result<SystemNode> {
        Ok(self)
    }
}

impl IntoSystemChain for Vec<SystemNode> {
    fn into_chain(self) -> Result<SystemNode> {
        let mut nodes = self.into_iter();
        let Some(mut head) = nodes.next() else {
            return Err(Error::empty_system_chain());
        };
        for node in nodes {
            head.append(node);
        }
        Ok(head)
    }
}

/// Ordered systems (and chains) registered under one scheduling label.
pub struct LabeledSystemSet {
    label: SchedulerLabel,
    systems: Vec<SystemNode>,
}

impl LabeledSystemSet {
    /// Creates an empty set for `label`.
    #[must_use]
    pub(crate) fn new(label: SchedulerLabel) -> Self {
        Self {
            label,
            systems: Vec::new(),
        }
    }

    /// The label this set runs under.
    #[must_use]
    pub fn label(&self) -> SchedulerLabel {
        self.label
    }

    /// Number of scheduling entries (chains count once).
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns true if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub(crate) fn add_system(&mut self, node: SystemNode) -> SystemId {
        let id = node.id();
        self.systems.push(node);
        id
    }

    /// Removes the chain whose head has `id`; O(n) linear scan.
    pub(crate) fn remove_system(&mut self, id: SystemId) -> bool {
        if let Some(position) = self.systems.iter().position(|node| node.id() == id) {
            self.systems.remove(position);
            true
        } else {
            false
        }
    }

    /// Runs every head system once, in registration order.
    pub(crate) fn run(&self) {
        for node in &self.systems {
            node.run_once();
        }
    }
}
