use crate::{
    bookkeeping::Bookkeeping, Deregistration, Despawned, InstanceHost, InstanceId, InstanceState,
    Registration, RegistryConfig,
};
use core::fmt;

/// A registry of template reservoirs for a single owner.
///
/// Every operation takes `&mut self`; share it by passing it down from
/// whatever owns the session rather than reaching for a global. Use
/// [`crate::Registry`] when several threads need to spawn and despawn.
pub struct LocalRegistry<H: InstanceHost> {
    host: H,
    book: Bookkeeping<H>,
}

impl<H: InstanceHost> LocalRegistry<H> {
    /// Creates an empty registry with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, RegistryConfig::default())
    }

    /// Creates an empty registry with a given configuration.
    pub fn with_config(host: H, config: RegistryConfig) -> Self {
        LocalRegistry {
            host,
            book: Bookkeeping::new(config),
        }
    }

    /// Returns the host this registry delegates to.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        self.book.config()
    }

    /// Creates `count` idle instances of `template`.
    ///
    /// If the template already has a reservoir, it is only grown when it is
    /// empty; a reservoir holding idle instances is left alone. A count of
    /// zero is clamped to one.
    pub fn register(&mut self, template: H::Template, count: usize) -> Registration {
        self.book.register(&self.host, template, count)
    }

    /// Registers `template` with the configured default count.
    pub fn register_default(&mut self, template: H::Template) -> Registration {
        let count = self.book.config().batch_size();
        self.register(template, count)
    }

    /// Tears down the reservoir of `template`, destroying its idle
    /// instances.
    ///
    /// Instances that are currently spawned out are left alone and become
    /// orphans once despawned. Returns `None` if the template had no
    /// reservoir.
    pub fn deregister(&mut self, template: H::Template) -> Option<Deregistration> {
        let mut graveyard = Vec::new();
        let removed = self.book.deregister(template, &mut graveyard);
        self.bury(graveyard);
        removed
    }

    /// Deregisters every template. Returns how many were removed.
    pub fn deregister_all(&mut self) -> usize {
        let mut graveyard = Vec::new();
        let removed = self.book.deregister_all(&mut graveyard);
        self.bury(graveyard);
        removed
    }

    /// Takes the oldest idle instance of `template` out of its reservoir and
    /// activates it.
    ///
    /// An unknown or exhausted template is provisioned with the configured
    /// default count first.
    pub fn spawn(&mut self, template: H::Template) -> InstanceId {
        self.book.spawn(&self.host, template, None)
    }

    /// Like [`Self::spawn`], applying `placement` before the instance is
    /// notified.
    pub fn spawn_at(&mut self, template: H::Template, placement: H::Placement) -> InstanceId {
        self.book.spawn(&self.host, template, Some(placement))
    }

    /// Deactivates `instance` and returns it to the back of its reservoir.
    ///
    /// Handles that no reservoir can take back are destroyed or deactivated
    /// according to [`RegistryConfig::destroy_unpooled`].
    pub fn despawn(&mut self, instance: InstanceId) -> Despawned {
        let mut graveyard = Vec::new();
        let despawned = self.book.despawn(&self.host, instance, &mut graveyard);
        self.bury(graveyard);
        despawned
    }

    fn bury(&self, graveyard: Vec<InstanceId>) {
        for instance in graveyard {
            self.host.destroy(instance);
        }
    }

    /// Checks whether `template` has a reservoir.
    pub fn is_registered(&self, template: H::Template) -> bool {
        self.book.is_registered(template)
    }

    /// Gets the number of idle instances waiting in the reservoir of
    /// `template`.
    pub fn idle_count(&self, template: H::Template) -> Option<usize> {
        self.book.idle_count(template)
    }

    /// Gets the number of instances of `template` currently spawned out.
    pub fn active_count(&self, template: H::Template) -> Option<usize> {
        self.book.active_count(template)
    }

    /// Looks up where a tracked instance is in its lifecycle.
    ///
    /// Returns `None` for handles the registry does not track: destroyed,
    /// orphaned or foreign ones.
    pub fn state(&self, instance: InstanceId) -> Option<InstanceState<H::Template>> {
        self.book.state(instance)
    }

    /// Gets the number of instances tracked, idle and active.
    pub fn tracked_len(&self) -> usize {
        self.book.tracked_len()
    }

    /// Lists the templates that currently have a reservoir.
    pub fn templates(&self) -> Vec<H::Template> {
        self.book.templates()
    }
}

impl<H: InstanceHost + fmt::Debug> fmt::Debug for LocalRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalRegistry")
            .field("host", &self.host)
            .field("config", self.book.config())
            .field("templates", &self.book.templates().len())
            .field("tracked", &self.book.tracked_len())
            .finish()
    }
}
