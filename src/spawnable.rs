use core::convert::Infallible;

/// Lifecycle notifications delivered to a pooled instance.
///
/// Both methods do nothing by default, so an implementation only needs to
/// override the side it cares about.
///
/// Hooks run inside the registry operation that triggered them, and in
/// [`crate::Registry`] while its lock is held. They must not spawn or despawn
/// through the same registry.
pub trait Spawnable {
    /// Called once per spawn, after placement has been applied and the
    /// instance activated.
    #[inline(always)]
    fn on_spawn(&mut self) {}

    /// Called once per despawn, before the instance is deactivated and
    /// stripped of its placement.
    #[inline(always)]
    fn on_despawn(&mut self) {}
}

impl<S: Spawnable + ?Sized> Spawnable for Box<S> {
    fn on_spawn(&mut self) {
        (**self).on_spawn();
    }

    fn on_despawn(&mut self) {
        (**self).on_despawn();
    }
}

/// An instance made of several hook-carrying parts notifies each of them,
/// in order.
impl<S: Spawnable> Spawnable for Vec<S> {
    fn on_spawn(&mut self) {
        for part in self.iter_mut() {
            part.on_spawn();
        }
    }

    fn on_despawn(&mut self) {
        for part in self.iter_mut() {
            part.on_despawn();
        }
    }
}

impl Spawnable for Infallible {
    fn on_spawn(&mut self) {
        match *self {}
    }

    fn on_despawn(&mut self) {
        match *self {}
    }
}
