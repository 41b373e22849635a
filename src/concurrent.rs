use crate::{
    bookkeeping::Bookkeeping, Deregistration, Despawned, InstanceHost, InstanceId, InstanceState,
    Registration, RegistryConfig,
};
use core::fmt;
use crossbeam_queue::SegQueue;
use parking_lot::Mutex;
use std::sync::Arc;

/// A registry of template reservoirs that can be shared between threads.
///
/// A single lock covers the whole body of every operation, so two threads
/// spawning from the same exhausted template never both provision it.
/// Instances scheduled for destruction are queued while the lock is held and
/// handed to [`InstanceHost::destroy`] after it is released. Each call
/// destroys exactly what it scheduled before returning.
///
/// Host methods other than `destroy`, and [`crate::Spawnable`] hooks, run
/// while the lock is held. They must not call back into the same registry;
/// doing so deadlocks.
pub struct Registry<H: InstanceHost> {
    host: H,
    book: Mutex<Bookkeeping<H>>,
}

/// Instances scheduled for destruction by a single call.
struct Graveyard(SegQueue<InstanceId>);

impl Graveyard {
    fn new() -> Self {
        Graveyard(SegQueue::new())
    }

    // Must be called without holding the lock.
    fn bury<H: InstanceHost>(self, host: &H) {
        while let Some(instance) = self.0.pop() {
            host.destroy(instance);
        }
    }
}

impl Extend<InstanceId> for Graveyard {
    fn extend<I: IntoIterator<Item = InstanceId>>(&mut self, iter: I) {
        for instance in iter {
            self.0.push(instance);
        }
    }
}

impl<H: InstanceHost> Registry<H> {
    /// Creates an empty registry with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, RegistryConfig::default())
    }

    /// Creates an empty registry with a given configuration.
    pub fn with_config(host: H, config: RegistryConfig) -> Self {
        Registry {
            host,
            book: Mutex::new(Bookkeeping::new(config)),
        }
    }

    /// Wraps the registry with an atomic reference counter so it can be
    /// handed to several owners.
    pub fn to_rc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns the host this registry delegates to.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the configuration this registry was built with.
    pub fn config(&self) -> RegistryConfig {
        *self.book.lock().config()
    }

    /// Creates `count` idle instances of `template`.
    ///
    /// If the template already has a reservoir, it is only grown when it is
    /// empty; a reservoir holding idle instances is left alone. A count of
    /// zero is clamped to one.
    pub fn register(&self, template: H::Template, count: usize) -> Registration {
        self.book.lock().register(&self.host, template, count)
    }

    /// Registers `template` with the configured default count.
    pub fn register_default(&self, template: H::Template) -> Registration {
        let mut book = self.book.lock();
        let count = book.config().batch_size();
        book.register(&self.host, template, count)
    }

    /// Tears down the reservoir of `template`, destroying its idle
    /// instances.
    ///
    /// Instances that are currently spawned out are left alone and become
    /// orphans once despawned. Returns `None` if the template had no
    /// reservoir.
    pub fn deregister(&self, template: H::Template) -> Option<Deregistration> {
        let mut graveyard = Graveyard::new();
        let removed = self.book.lock().deregister(template, &mut graveyard);
        graveyard.bury(&self.host);
        removed
    }

    /// Deregisters every template. Returns how many were removed.
    pub fn deregister_all(&self) -> usize {
        let mut graveyard = Graveyard::new();
        let removed = self.book.lock().deregister_all(&mut graveyard);
        graveyard.bury(&self.host);
        removed
    }

    /// Takes the oldest idle instance of `template` out of its reservoir and
    /// activates it.
    ///
    /// An unknown or exhausted template is provisioned with the configured
    /// default count first.
    pub fn spawn(&self, template: H::Template) -> InstanceId {
        self.book.lock().spawn(&self.host, template, None)
    }

    /// Like [`Self::spawn`], applying `placement` before the instance is
    /// notified.
    pub fn spawn_at(&self, template: H::Template, placement: H::Placement) -> InstanceId {
        self.book.lock().spawn(&self.host, template, Some(placement))
    }

    /// Deactivates `instance` and returns it to the back of its reservoir.
    ///
    /// Handles that no reservoir can take back are destroyed or deactivated
    /// according to [`RegistryConfig::destroy_unpooled`].
    pub fn despawn(&self, instance: InstanceId) -> Despawned {
        let mut graveyard = Graveyard::new();
        let despawned = self
            .book
            .lock()
            .despawn(&self.host, instance, &mut graveyard);
        graveyard.bury(&self.host);
        despawned
    }

    /// Checks whether `template` has a reservoir.
    pub fn is_registered(&self, template: H::Template) -> bool {
        self.book.lock().is_registered(template)
    }

    /// Gets the number of idle instances waiting in the reservoir of
    /// `template`.
    pub fn idle_count(&self, template: H::Template) -> Option<usize> {
        self.book.lock().idle_count(template)
    }

    /// Gets the number of instances of `template` currently spawned out.
    pub fn active_count(&self, template: H::Template) -> Option<usize> {
        self.book.lock().active_count(template)
    }

    /// Looks up where a tracked instance is in its lifecycle.
    ///
    /// Returns `None` for handles the registry does not track: destroyed,
    /// orphaned or foreign ones.
    pub fn state(&self, instance: InstanceId) -> Option<InstanceState<H::Template>> {
        self.book.lock().state(instance)
    }

    /// Gets the number of instances tracked, idle and active.
    pub fn tracked_len(&self) -> usize {
        self.book.lock().tracked_len()
    }

    /// Lists the templates that currently have a reservoir.
    pub fn templates(&self) -> Vec<H::Template> {
        self.book.lock().templates()
    }
}

impl<H: InstanceHost + fmt::Debug> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let book = self.book.lock();
        f.debug_struct("Registry")
            .field("host", &self.host)
            .field("config", book.config())
            .field("templates", &book.templates().len())
            .field("tracked", &book.tracked_len())
            .finish()
    }
}
