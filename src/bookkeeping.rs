//! The bookkeeping engine shared by [`crate::LocalRegistry`] and
//! [`crate::Registry`].
//!
//! Two maps make up the whole registry state: idle reservoirs keyed by
//! template, and an ownership map from every live instance handle to the
//! template it was created from. Every handle in a reservoir is idle and is
//! tracked in the ownership map under that reservoir's template. A handle
//! is never in two reservoirs, and never in a reservoir while active.

use crate::{
    Deregistration, Despawned, Diagnostic, Disposal, InstanceHost, InstanceId, InstanceState,
    Registration, RegistryConfig, Spawnable,
};
use std::collections::{HashMap, VecDeque};

struct Reservoir {
    idle: VecDeque<InstanceId>,
    active: usize,
}

impl Reservoir {
    fn new() -> Self {
        Reservoir {
            idle: VecDeque::new(),
            active: 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
    // Active, but the reservoir it came from was deregistered.
    Detached,
}

struct Tracked<H: InstanceHost> {
    template: H::Template,
    phase: Phase,
    hooks: Option<H::Hooks>,
}

pub(crate) struct Bookkeeping<H: InstanceHost> {
    config: RegistryConfig,
    reservoirs: HashMap<H::Template, Reservoir>,
    owners: HashMap<InstanceId, Tracked<H>>,
}

impl<H: InstanceHost> Bookkeeping<H> {
    pub(crate) fn new(config: RegistryConfig) -> Self {
        Bookkeeping {
            config,
            reservoirs: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    pub(crate) fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub(crate) fn register(&mut self, host: &H, template: H::Template, count: usize) -> Registration {
        let expanding = match self.reservoirs.get(&template) {
            None => false,
            Some(reservoir) if reservoir.idle.is_empty() => true,
            Some(reservoir) => {
                let idle = reservoir.idle.len();
                Diagnostic::DuplicateRegistration { template, idle }.emit();
                return Registration::AlreadyPopulated { idle };
            }
        };

        let count = if count == 0 {
            Diagnostic::InvalidCount {
                template,
                requested: count,
            }
            .emit();
            1
        } else {
            count
        };

        if expanding {
            Diagnostic::ReservoirExpanded { template, count }.emit();
        }
        self.fill(host, template, count);

        tracing::debug!(?template, count, "registered template");
        if expanding {
            Registration::Expanded { count }
        } else {
            Registration::Created { count }
        }
    }

    /// Creates one idle, tracked instance of `template` without enqueueing
    /// it.
    fn create(&mut self, host: &H, template: H::Template) -> InstanceId {
        let instance = InstanceId::next();
        let hooks = host.instantiate(template, instance);
        host.set_active(instance, false);
        host.clear_placement(instance);
        self.owners.insert(
            instance,
            Tracked {
                template,
                phase: Phase::Idle,
                hooks,
            },
        );
        instance
    }

    /// Creates `count` instances and enqueues them in creation order.
    fn fill(&mut self, host: &H, template: H::Template, count: usize) {
        let mut batch = VecDeque::with_capacity(count);
        for _ in 0..count {
            batch.push_back(self.create(host, template));
        }
        self.reservoirs
            .entry(template)
            .or_insert_with(Reservoir::new)
            .idle
            .append(&mut batch);
    }

    /// Removes the reservoir of `template`, pushing every idle instance it
    /// held into `graveyard` for destruction.
    pub(crate) fn deregister(
        &mut self,
        template: H::Template,
        graveyard: &mut impl Extend<InstanceId>,
    ) -> Option<Deregistration> {
        let Some(reservoir) = self.reservoirs.remove(&template) else {
            Diagnostic::UnknownTemplateOnDeregister { template }.emit();
            return None;
        };

        for instance in &reservoir.idle {
            self.owners.remove(instance);
        }

        let mut detached = 0;
        if reservoir.active > 0 {
            for tracked in self.owners.values_mut() {
                if tracked.template == template && tracked.phase == Phase::Active {
                    tracked.phase = Phase::Detached;
                    detached += 1;
                }
            }
        }

        let destroyed = reservoir.idle.len();
        graveyard.extend(reservoir.idle);

        tracing::debug!(?template, destroyed, detached, "deregistered template");
        Some(Deregistration {
            destroyed,
            detached,
        })
    }

    pub(crate) fn deregister_all(&mut self, graveyard: &mut impl Extend<InstanceId>) -> usize {
        let mut removed = 0;
        for template in self.templates() {
            if self.deregister(template, &mut *graveyard).is_some() {
                removed += 1;
            }
        }
        removed
    }

    pub(crate) fn spawn(
        &mut self,
        host: &H,
        template: H::Template,
        placement: Option<H::Placement>,
    ) -> InstanceId {
        let instance = match self
            .reservoirs
            .get_mut(&template)
            .and_then(|reservoir| reservoir.idle.pop_front())
        {
            Some(instance) => instance,
            None => self.provision(host, template),
        };

        host.apply_placement(instance, placement);
        host.set_active(instance, true);

        if let Some(reservoir) = self.reservoirs.get_mut(&template) {
            reservoir.active += 1;
        }
        if let Some(tracked) = self.owners.get_mut(&instance) {
            tracked.phase = Phase::Active;
            if let Some(hooks) = tracked.hooks.as_mut() {
                hooks.on_spawn();
            }
        }

        tracing::trace!(?template, %instance, "spawned");
        instance
    }

    /// Grows an unknown or exhausted reservoir by the default batch and
    /// takes the oldest instance of the new batch out of it.
    fn provision(&mut self, host: &H, template: H::Template) -> InstanceId {
        let count = self.config.batch_size();
        match self.reservoirs.get(&template) {
            None => Diagnostic::UnknownTemplateOnSpawn { template, count }.emit(),
            Some(_) => Diagnostic::ReservoirExpanded { template, count }.emit(),
        }

        let first = self.create(host, template);
        self.fill(host, template, count - 1);
        first
    }

    pub(crate) fn despawn(
        &mut self,
        host: &H,
        instance: InstanceId,
        graveyard: &mut impl Extend<InstanceId>,
    ) -> Despawned {
        let Some(tracked) = self.owners.get_mut(&instance) else {
            let disposal = self.disposal();
            Diagnostic::<H::Template>::UnknownInstanceOnDespawn { instance, disposal }.emit();
            return self.abandon(host, instance, graveyard);
        };
        let template = tracked.template;

        match tracked.phase {
            Phase::Idle => {
                Diagnostic::AlreadyIdle { instance, template }.emit();
                return Despawned::AlreadyIdle;
            }
            Phase::Detached => {
                if let Some(mut tracked) = self.owners.remove(&instance) {
                    if let Some(hooks) = tracked.hooks.as_mut() {
                        hooks.on_despawn();
                    }
                }
                let disposal = self.disposal();
                Diagnostic::OrphanedOnDespawn {
                    instance,
                    template,
                    disposal,
                }
                .emit();
                return self.abandon(host, instance, graveyard);
            }
            Phase::Active => {}
        }

        if let Some(hooks) = tracked.hooks.as_mut() {
            hooks.on_despawn();
        }
        tracked.phase = Phase::Idle;
        host.set_active(instance, false);
        host.clear_placement(instance);

        match self.reservoirs.get_mut(&template) {
            Some(reservoir) => {
                reservoir.active = reservoir.active.saturating_sub(1);
                reservoir.idle.push_back(instance);
                tracing::trace!(?template, %instance, "despawned");
                Despawned::Reclaimed
            }
            // Active instances are detached when their reservoir goes away,
            // so this only happens if that bookkeeping was skipped.
            None => {
                self.owners.remove(&instance);
                self.abandon(host, instance, graveyard)
            }
        }
    }

    fn disposal(&self) -> Disposal {
        if self.config.destroy_unpooled {
            Disposal::Destroyed
        } else {
            Disposal::Deactivated
        }
    }

    fn abandon(
        &self,
        host: &H,
        instance: InstanceId,
        graveyard: &mut impl Extend<InstanceId>,
    ) -> Despawned {
        let disposal = self.disposal();
        match disposal {
            Disposal::Destroyed => graveyard.extend(Some(instance)),
            Disposal::Deactivated => host.set_active(instance, false),
        }
        Despawned::Orphaned(disposal)
    }

    pub(crate) fn is_registered(&self, template: H::Template) -> bool {
        self.reservoirs.contains_key(&template)
    }

    pub(crate) fn idle_count(&self, template: H::Template) -> Option<usize> {
        self.reservoirs.get(&template).map(|r| r.idle.len())
    }

    pub(crate) fn active_count(&self, template: H::Template) -> Option<usize> {
        self.reservoirs.get(&template).map(|r| r.active)
    }

    pub(crate) fn state(&self, instance: InstanceId) -> Option<InstanceState<H::Template>> {
        self.owners.get(&instance).map(|tracked| match tracked.phase {
            Phase::Idle => InstanceState::Idle(tracked.template),
            Phase::Active => InstanceState::Active(tracked.template),
            Phase::Detached => InstanceState::Detached(tracked.template),
        })
    }

    pub(crate) fn tracked_len(&self) -> usize {
        self.owners.len()
    }

    pub(crate) fn templates(&self) -> Vec<H::Template> {
        self.reservoirs.keys().copied().collect()
    }
}
