//! Scheduling labels and their fixed phase orders.

use std::fmt;

/// Labels identifying the scheduling phases of the world.
///
/// The one-shot startup group runs once, in order, when the world starts:
///
/// 1. [`PreStartup`](Self::PreStartup)
/// 2. [`Startup`](Self::Startup)
/// 3. [`PostStartup`](Self::PostStartup)
///
/// Every tick thereafter runs the repeating group:
///
/// 1. [`First`](Self::First)
/// 2. [`PreUpdate`](Self::PreUpdate)
/// 3. [`StateTransition`](Self::StateTransition)
/// 4. [`Update`](Self::Update)
/// 5. [`PostUpdate`](Self::PostUpdate)
/// 6. [`Last`](Self::Last)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SchedulerLabel {
    /// Runs once, before `Startup`.
    PreStartup,
    /// Runs once, when the world starts up.
    Startup,
    /// Runs once, after `Startup`.
    PostStartup,
    /// First phase of every tick.
    First,
    /// Runs before `Update` each tick.
    PreUpdate,
    /// Dedicated phase for state-machine transitions each tick.
    StateTransition,
    /// Main per-tick phase.
    Update,
    /// Runs after `Update` each tick.
    PostUpdate,
    /// Last phase of every tick.
    Last,
}

impl SchedulerLabel {
    /// The one-shot startup phases, in execution order.
    pub const STARTUP_ORDER: [Self; 3] = [Self::PreStartup, Self::Startup, Self::PostStartup];

    /// The repeating per-tick phases, in execution order.
    pub const UPDATE_ORDER: [Self; 6] = [
        Self::First,
        Self::PreUpdate,
        Self::StateTransition,
        Self::Update,
        Self::PostUpdate,
        Self::Last,
    ];

    /// Returns true for labels in the one-shot startup group.
    #[must_use]
    pub fn is_startup(self) -> bool {
        matches!(self, Self::PreStartup | Self::Startup | Self::PostStartup)
    }
}

impl fmt::Display for SchedulerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PreStartup => "pre-startup",
            Self::Startup => "startup",
            Self::PostStartup => "post-startup",
            Self::First => "first",
            Self::PreUpdate => "pre-update",
            Self::StateTransition => "state-transition",
            Self::Update => "update",
            Self::PostUpdate => "post-update",
            Self::Last => "last",
        };
        write!(f, "{name}")
    }
}
