//! Staging overlay used by `Store::handle_transaction`

use crate::error::StoreError;
use crate::store::{Store, Value};
use std::collections::HashMap;

/// A write overlay over a parent store
///
/// Writes land in a private local store. Reads check the local store first and
/// fall through to the live parent, so a transaction reads its own writes on
/// top of whatever the parent holds right now (no snapshot).
///
/// `delete` and `exists` only see the local overlay: deleting a key that was
/// never staged does not remove it from the parent at commit.
pub struct Transaction<'a> {
    local: Store,
    parent: &'a Store,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(parent: &'a Store) -> Self {
        Transaction {
            local: Store::with_config(parent.config.clone().with_initial_capacity(0)),
            parent,
        }
    }

    pub(crate) fn local(&self) -> &Store {
        &self.local
    }

    /// Stage a key-value pair with no expiration
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), StoreError> {
        self.local.set(key, value)
    }

    /// Stage a key-value pair expiring `ttl_seconds` from now
    pub fn set_expire(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
        ttl_seconds: i64,
    ) -> Result<(), StoreError> {
        self.local.set_expire(key, value, ttl_seconds)
    }

    /// Stage a text mapping with no expiration
    pub fn set_map(
        &self,
        key: impl Into<String>,
        map: HashMap<String, String>,
    ) -> Result<(), StoreError> {
        self.local.set_map(key, map)
    }

    /// Get a value, preferring staged writes over the parent
    pub fn get(&self, key: &str) -> Option<Value> {
        self.local.get(key).or_else(|| self.parent.get(key))
    }

    /// Remove a staged key
    pub fn delete(&self, key: &str) {
        self.local.delete(key);
    }

    /// Check if a live key is staged in this transaction
    pub fn exists(&self, key: &str) -> bool {
        self.local.exists(key)
    }

    /// Get TTL for a key, preferring staged writes over the parent
    pub fn ttl(&self, key: &str) -> i64 {
        match self.local.ttl(key) {
            -2 => self.parent.ttl(key),
            ttl => ttl,
        }
    }

    /// Number of entries staged so far
    pub fn staged_count(&self) -> usize {
        self.local.key_count()
    }
}
