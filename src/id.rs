use core::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Handle to an instance created by a registry.
///
/// Handles are minted from a single process-wide atomic counter, so no two
/// instances created by any registry in the process ever share one. That
/// counter is the only state shared between registries; reservoirs and
/// ownership stay inside each registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(u64);

impl InstanceId {
    pub(crate) fn next() -> Self {
        InstanceId(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw handle value.
    ///
    /// This is meant for naming handles that did not come out of a
    /// registry. A raw value that happens to match a minted handle refers
    /// to that instance.
    pub const fn from_raw(raw: u64) -> Self {
        InstanceId(raw)
    }

    /// Returns the raw handle value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
