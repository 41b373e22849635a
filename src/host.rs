use crate::{InstanceId, Spawnable};
use core::{fmt::Debug, hash::Hash};

/// A trait defining the interface between a registry and the environment
/// that physically owns the pooled instances.
///
/// The registry only ever deals in [`InstanceId`] handles. Everything that
/// touches the instance itself (cloning it out of a template, toggling it,
/// moving it around the scene, destroying it) is delegated to the host.
pub trait InstanceHost {
    /// Identity of a template. Derived from the template's identity, not
    /// its contents.
    type Template: Copy + Eq + Hash + Debug;

    /// Opaque position/orientation/containment context applied on spawn.
    type Placement;

    /// Lifecycle hooks an instance may carry.
    ///
    /// Hosts whose instances never carry hooks can use
    /// [`core::convert::Infallible`].
    type Hooks: Spawnable;

    /// Creates a new instance from `template` and binds it to `instance`.
    ///
    /// The returned value is the instance's spawnable capability. It is
    /// queried once here and cached by the registry for the instance's
    /// whole tracked lifetime; return `None` if the instance has none.
    fn instantiate(&self, template: Self::Template, instance: InstanceId) -> Option<Self::Hooks>;

    /// Physically disposes of an instance. Irreversible.
    fn destroy(&self, instance: InstanceId);

    /// Activates or deactivates an instance.
    fn set_active(&self, instance: InstanceId, active: bool);

    /// Positions an instance as it leaves its reservoir.
    ///
    /// By default, this method does nothing.
    #[inline(always)]
    fn apply_placement(&self, _instance: InstanceId, _placement: Option<Self::Placement>) {}

    /// Returns an instance to the neutral holding state it waits in while
    /// idle.
    ///
    /// By default, this method does nothing.
    #[inline(always)]
    fn clear_placement(&self, _instance: InstanceId) {}
}
