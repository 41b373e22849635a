//! Non-fatal diagnostics raised when a registry is misused.
//!
//! None of these interrupt control flow. The registry degrades gracefully
//! and reports what happened through `tracing`.

use crate::{Disposal, InstanceId};
use core::fmt::Debug;
use thiserror::Error;

/// A misuse of the registry that was absorbed instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Diagnostic<T: Debug> {
    /// Register was called for a template whose reservoir still has idle
    /// instances.
    #[error("template {template:?} already has a reservoir with {idle} idle instances, registration ignored")]
    DuplicateRegistration {
        /// Template that was registered again.
        template: T,
        /// Idle instances found in its reservoir.
        idle: usize,
    },

    /// Register was called for a template whose reservoir is empty.
    #[error("template {template:?} already has a reservoir, expanding it by {count}")]
    ReservoirExpanded {
        /// Template whose reservoir is grown.
        template: T,
        /// Number of instances added.
        count: usize,
    },

    /// Register was called with a count of zero.
    #[error("instance count for template {template:?} must be at least one, clamping {requested} to 1")]
    InvalidCount {
        /// Template being registered.
        template: T,
        /// Count the caller asked for.
        requested: usize,
    },

    /// Deregister was called for a template with no reservoir.
    #[error("template {template:?} has no reservoir to deregister")]
    UnknownTemplateOnDeregister {
        /// Template that was not found.
        template: T,
    },

    /// Spawn was called for a template with no reservoir.
    #[error("template {template:?} has no reservoir, provisioning one with {count} instances")]
    UnknownTemplateOnSpawn {
        /// Template that was not found.
        template: T,
        /// Size of the reservoir created for it.
        count: usize,
    },

    /// Despawn was called for a handle no reservoir ever tracked.
    #[error("instance {instance} is not a member of any reservoir, it will be {disposal}")]
    UnknownInstanceOnDespawn {
        /// Handle that was not found.
        instance: InstanceId,
        /// What is done with it instead.
        disposal: Disposal,
    },

    /// Despawn was called for an instance whose template was deregistered
    /// while it was active.
    #[error("instance {instance} outlived the reservoir of template {template:?}, it will be {disposal}")]
    OrphanedOnDespawn {
        /// Handle of the orphan.
        instance: InstanceId,
        /// Template it was created from.
        template: T,
        /// What is done with it instead.
        disposal: Disposal,
    },

    /// Despawn was called for an instance that is already idle.
    #[error("instance {instance} is already idle in the reservoir of template {template:?}")]
    AlreadyIdle {
        /// Handle that was despawned twice.
        instance: InstanceId,
        /// Template whose reservoir holds it.
        template: T,
    },
}

impl<T: Debug> Diagnostic<T> {
    /// Whether this diagnostic points at a likely caller mistake, as
    /// opposed to routine bookkeeping worth a debug line.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::ReservoirExpanded { .. })
    }

    pub(crate) fn emit(&self) {
        if self.is_warning() {
            tracing::warn!("{self}");
        } else {
            tracing::debug!("{self}");
        }
    }
}
