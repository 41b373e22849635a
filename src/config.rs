/// Number of instances created when a template is registered without an
/// explicit count, or provisioned implicitly by a spawn.
pub const DEFAULT_POOL_SIZE: usize = 8;

/// Configuration for a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    /// Batch size used by `register_default` and by implicit provisioning
    /// on spawn. Zero is treated as one.
    pub default_count: usize,
    /// What happens to an instance despawned while no reservoir tracks it:
    /// `true` destroys it, `false` only deactivates it and lets it go.
    pub destroy_unpooled: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_POOL_SIZE,
            destroy_unpooled: false,
        }
    }
}

impl RegistryConfig {
    /// Sets the default batch size.
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    /// Sets the policy for instances despawned outside pool tracking.
    pub fn with_destroy_unpooled(mut self, destroy: bool) -> Self {
        self.destroy_unpooled = destroy;
        self
    }

    pub(crate) fn batch_size(&self) -> usize {
        self.default_count.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.default_count, 8);
        assert!(!config.destroy_unpooled);
    }

    #[test]
    fn zero_default_count_still_provisions_one() {
        let config = RegistryConfig::default().with_default_count(0);
        assert_eq!(config.batch_size(), 1);
    }

    #[test]
    fn builder_sets_fields() {
        let config = RegistryConfig::default()
            .with_default_count(3)
            .with_destroy_unpooled(true);
        assert_eq!(config.batch_size(), 3);
        assert!(config.destroy_unpooled);
    }
}
