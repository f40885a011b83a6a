//! Store configuration

use serde::Deserialize;

/// What `set_expire` does with a TTL of zero or less
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtlPolicy {
    /// Refuse the write with `StoreError::InvalidTtl`
    #[default]
    Reject,
    /// Accept the write as already expired: the key ends up absent
    ExpireImmediately,
}

/// Store configuration
///
/// Deserializable so an embedding application can keep it in its own
/// configuration file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Initial capacity of the entry map
    pub initial_capacity: usize,
    /// Handling of non-positive TTLs
    pub ttl_policy: TtlPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            initial_capacity: 1024,
            ttl_policy: TtlPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial capacity of the entry map
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the policy for non-positive TTLs
    pub fn with_ttl_policy(mut self, policy: TtlPolicy) -> Self {
        self.ttl_policy = policy;
        self
    }
}
