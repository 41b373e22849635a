use core::fmt;

/// Result of a `register` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// A new reservoir was created holding `count` idle instances.
    Created {
        /// Number of instances created.
        count: usize,
    },
    /// The template's reservoir existed but was empty and has been grown.
    Expanded {
        /// Number of instances added.
        count: usize,
    },
    /// The template already had idle instances; nothing was created.
    AlreadyPopulated {
        /// Number of idle instances found in the reservoir.
        idle: usize,
    },
}

impl Registration {
    /// Number of instances this call created.
    pub fn created(&self) -> usize {
        match *self {
            Registration::Created { count } | Registration::Expanded { count } => count,
            Registration::AlreadyPopulated { .. } => 0,
        }
    }
}

/// Result of a successful `deregister` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deregistration {
    /// Idle instances that were scheduled for destruction.
    pub destroyed: usize,
    /// Active instances that lost their reservoir. They stay valid until
    /// despawned, at which point they are handled as orphans.
    pub detached: usize,
}

/// What happens to an instance that is despawned outside pool tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposal {
    /// The instance was physically destroyed.
    Destroyed,
    /// The instance was deactivated and abandoned.
    Deactivated,
}

impl fmt::Display for Disposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Disposal::Destroyed => "destroyed",
            Disposal::Deactivated => "deactivated",
        })
    }
}

/// Result of a `despawn` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Despawned {
    /// The instance is idle again, at the back of its reservoir.
    Reclaimed,
    /// The instance had no reservoir to return to.
    Orphaned(Disposal),
    /// The instance was already idle; nothing happened.
    AlreadyIdle,
}

/// Where a tracked instance currently is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstanceState<T> {
    /// Waiting in the reservoir of template `T`.
    Idle(T),
    /// Handed out by a spawn of template `T`.
    Active(T),
    /// Handed out, but template `T` has since been deregistered.
    Detached(T),
}

impl<T: Copy> InstanceState<T> {
    /// Template the instance was created from.
    pub fn template(&self) -> T {
        match *self {
            InstanceState::Idle(t) | InstanceState::Active(t) | InstanceState::Detached(t) => t,
        }
    }
}
