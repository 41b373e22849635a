#![allow(dead_code)]

use parking_lot::Mutex;
use spawnpool::{InstanceHost, InstanceId, Spawnable};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Instantiated(&'static str, InstanceId),
    Destroyed(InstanceId),
    Activated(InstanceId),
    Deactivated(InstanceId),
    Placed(InstanceId, Option<(i32, i32)>),
    Cleared(InstanceId),
    Spawned(InstanceId),
    Despawned(InstanceId),
}

impl Event {
    fn instance(&self) -> InstanceId {
        match *self {
            Event::Instantiated(_, i)
            | Event::Destroyed(i)
            | Event::Activated(i)
            | Event::Deactivated(i)
            | Event::Placed(i, _)
            | Event::Cleared(i)
            | Event::Spawned(i)
            | Event::Despawned(i) => i,
        }
    }
}

type Log = Arc<Mutex<Vec<Event>>>;

#[derive(Debug)]
pub struct Hooks {
    instance: InstanceId,
    log: Log,
}

impl Spawnable for Hooks {
    fn on_spawn(&mut self) {
        self.log.lock().push(Event::Spawned(self.instance));
    }

    fn on_despawn(&mut self) {
        self.log.lock().push(Event::Despawned(self.instance));
    }
}

/// Host that records every call the registry makes into it.
#[derive(Debug, Default)]
pub struct RecordingHost {
    log: Log,
    inert: Vec<&'static str>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances of these templates carry no hooks.
    pub fn with_inert(templates: &[&'static str]) -> Self {
        RecordingHost {
            log: Log::default(),
            inert: templates.to_vec(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.lock().clone()
    }

    pub fn clear_events(&self) {
        self.log.lock().clear();
    }

    pub fn events_for(&self, instance: InstanceId) -> Vec<Event> {
        self.log
            .lock()
            .iter()
            .copied()
            .filter(|e| e.instance() == instance)
            .collect()
    }

    pub fn instantiated(&self) -> Vec<InstanceId> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| match *e {
                Event::Instantiated(_, i) => Some(i),
                _ => None,
            })
            .collect()
    }

    pub fn destroyed(&self) -> Vec<InstanceId> {
        self.log
            .lock()
            .iter()
            .filter_map(|e| match *e {
                Event::Destroyed(i) => Some(i),
                _ => None,
            })
            .collect()
    }
}

impl InstanceHost for RecordingHost {
    type Template = &'static str;
    type Placement = (i32, i32);
    type Hooks = Hooks;

    fn instantiate(&self, template: &'static str, instance: InstanceId) -> Option<Hooks> {
        self.log.lock().push(Event::Instantiated(template, instance));
        if self.inert.contains(&template) {
            None
        } else {
            Some(Hooks {
                instance,
                log: Arc::clone(&self.log),
            })
        }
    }

    fn destroy(&self, instance: InstanceId) {
        self.log.lock().push(Event::Destroyed(instance));
    }

    fn set_active(&self, instance: InstanceId, active: bool) {
        self.log.lock().push(if active {
            Event::Activated(instance)
        } else {
            Event::Deactivated(instance)
        });
    }

    fn apply_placement(&self, instance: InstanceId, placement: Option<(i32, i32)>) {
        self.log.lock().push(Event::Placed(instance, placement));
    }

    fn clear_placement(&self, instance: InstanceId) {
        self.log.lock().push(Event::Cleared(instance));
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
