//! Entry structure for stored values

use super::value::Value;
use std::time::{Duration, Instant};

/// Represents a single entry in the store
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The value
    pub value: Value,

    /// Optional expiration time (absolute). `None` never expires.
    pub expires_at: Option<Instant>,
}

impl Entry {
    /// Create a new entry without expiration
    pub fn new(value: Value) -> Self {
        Entry {
            value,
            expires_at: None,
        }
    }

    /// Create a new entry expiring `ttl` from now
    ///
    /// A TTL too large to represent as an instant never expires.
    pub fn with_expiration(value: Value, ttl: Duration) -> Self {
        Entry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    /// Create an entry that is already expired
    pub fn expired(value: Value) -> Self {
        Entry {
            value,
            expires_at: Some(Instant::now()),
        }
    }

    /// Check if the entry has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Get remaining TTL in seconds
    ///
    /// Returns -1 when the entry never expires and -2 once it has expired.
    pub fn ttl_seconds(&self) -> i64 {
        match self.expires_at {
            Some(expires_at) => {
                let now = Instant::now();
                if expires_at > now {
                    expires_at.duration_since(now).as_secs() as i64
                } else {
                    -2 // Expired
                }
            }
            None => -1, // No expiration
        }
    }

    /// Calculate approximate memory usage of this entry in bytes
    pub fn memory_usage(&self) -> usize {
        self.value.memory_usage() + std::mem::size_of::<Option<Instant>>()
    }
}
