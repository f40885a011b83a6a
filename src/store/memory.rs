//! In-memory storage implementation

use super::entry::Entry;
use super::value::Value;
use crate::config::{StoreConfig, TtlPolicy};
use crate::error::StoreError;
use parking_lot::RwLock;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Type alias for our hash map with SipHasher
type StoreMap = HashMap<String, Entry, BuildHasherDefault<SipHasher13>>;

/// Thread-safe in-memory key-value store
///
/// A single reader/writer lock guards the entry map. Reads share the lock,
/// writes take it exclusively, and every lock is held only for the map access
/// itself.
///
/// Expired entries are removed lazily: `get` and `ttl` evict what they find
/// expired, and `cleanup_expired` sweeps on demand. Nothing runs in the
/// background.
///
/// Share a store between threads by wrapping it in an `Arc`.
pub struct Store {
    /// The main storage map
    entries: RwLock<StoreMap>,

    pub(crate) config: StoreConfig,
}

impl Store {
    /// Create a new store with default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a new store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(StoreConfig::default().with_initial_capacity(capacity))
    }

    /// Create a new store with custom configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Store {
            entries: RwLock::new(HashMap::with_capacity_and_hasher(
                config.initial_capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            )),
            config,
        }
    }

    /// Get the store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Set a key-value pair with no expiration, overwriting any previous entry
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), StoreError> {
        self.insert(key.into(), Entry::new(value.into()));
        Ok(())
    }

    /// Set a key-value pair that expires `ttl_seconds` from now
    ///
    /// A TTL of zero or less is handled according to the configured
    /// [`TtlPolicy`]: rejected with [`StoreError::InvalidTtl`] by default, or
    /// stored as an already expired entry, which reads as absent and is
    /// evicted lazily. A TTL too large to represent never expires.
    pub fn set_expire(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
        ttl_seconds: i64,
    ) -> Result<(), StoreError> {
        let key = key.into();

        if ttl_seconds <= 0 {
            return match self.config.ttl_policy {
                TtlPolicy::Reject => {
                    warn!(key = %key, ttl_seconds, "rejected non-positive TTL");
                    Err(StoreError::InvalidTtl { key, ttl_seconds })
                }
                TtlPolicy::ExpireImmediately => {
                    self.insert(key, Entry::expired(value.into()));
                    Ok(())
                }
            };
        }

        let entry = Entry::with_expiration(value.into(), Duration::from_secs(ttl_seconds as u64));
        self.insert(key, entry);
        Ok(())
    }

    /// Set a key to a text mapping with no expiration
    pub fn set_map(
        &self,
        key: impl Into<String>,
        map: HashMap<String, String>,
    ) -> Result<(), StoreError> {
        self.insert(key.into(), Entry::new(Value::Map(map)));
        Ok(())
    }

    fn insert(&self, key: String, entry: Entry) {
        self.entries.write().insert(key, entry);
    }

    /// Get a value by key, returns None if not found or expired
    ///
    /// An expired entry found here is removed from the store.
    pub fn get(&self, key: &str) -> Option<Value> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        self.evict_if_expired(key);
        None
    }

    /// Remove `key` if it is still expired once the write lock is held
    ///
    /// The entry may have been replaced between the caller's read and this
    /// write, so expiration is checked again before removing.
    fn evict_if_expired(&self, key: &str) -> bool {
        let mut entries = self.entries.write();
        let now = Instant::now();

        if entries.get(key).is_some_and(|entry| entry.is_expired_at(now)) {
            entries.remove(key);
            trace!(key, "evicted expired entry");
            true
        } else {
            false
        }
    }

    /// Delete a key, no-op if absent
    pub fn delete(&self, key: &str) {
        self.entries.write().remove(key);
    }

    /// Check if a key exists (and is not expired)
    ///
    /// Unlike `get`, an expired entry is left in place.
    pub fn exists(&self, key: &str) -> bool {
        self.entries
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Get TTL for a key in seconds
    ///
    /// Returns:
    /// - n >= 0: remaining TTL in seconds
    /// - -1: key exists but has no expiration
    /// - -2: key does not exist or is expired
    pub fn ttl(&self, key: &str) -> i64 {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return -2,
                Some(entry) if !entry.is_expired() => return entry.ttl_seconds(),
                Some(_) => {}
            }
        }

        self.evict_if_expired(key);
        -2
    }

    /// Copy every entry of `other` into this store
    ///
    /// Entries from `other` win on key collision. There is no conflict
    /// detection: a key changed here since `other` was populated is silently
    /// overwritten.
    pub fn merge(&self, other: &Store) {
        if std::ptr::eq(self, other) {
            return;
        }

        // Snapshot first so the two locks are never held together
        let snapshot: Vec<(String, Entry)> = other
            .entries
            .read()
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect();

        let merged = snapshot.len();
        self.entries.write().extend(snapshot);
        debug!(merged, "merged entries");
    }

    /// Get the number of stored entries, including expired ones not yet evicted
    pub fn key_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store holds no entries (expired ones included)
    pub fn is_empty(&self) -> bool {
        self.key_count() == 0
    }

    /// Get all live keys (expensive operation, no ordering guarantee)
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .read()
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Remove all keys
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Cleanup expired keys (proactive expiration)
    /// Returns the number of keys removed
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();

        entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "cleaned up expired entries");
        }
        removed
    }

    /// Get statistics about the store
    pub fn stats(&self) -> StoreStats {
        let now = Instant::now();
        let entries = self.entries.read();

        let mut active_keys = 0;
        let mut used_memory_bytes = 0;
        for (key, entry) in entries.iter() {
            if !entry.is_expired_at(now) {
                active_keys += 1;
                used_memory_bytes += key.len() + entry.memory_usage();
            }
        }

        StoreStats {
            total_keys: entries.len(),
            expired_keys: entries.len() - active_keys,
            active_keys,
            used_memory_bytes,
        }
    }

    /// Insert an entry that has already expired
    #[cfg(test)]
    pub(crate) fn set_expired(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.insert(key.into(), Entry::expired(value.into()));
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the store
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    pub total_keys: usize,
    pub expired_keys: usize,
    pub active_keys: usize,
    pub used_memory_bytes: usize,
}
