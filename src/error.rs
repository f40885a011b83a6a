//! Store errors

use std::fmt;

/// Errors returned by store write operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// TTL was zero or negative and the store is configured to reject it
    InvalidTtl {
        /// Key the write targeted
        key: String,
        /// TTL supplied by the caller
        ttl_seconds: i64,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidTtl { key, ttl_seconds } => write!(
                f,
                "Invalid TTL for key '{}': {} (must be a positive number of seconds)",
                key, ttl_seconds
            ),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ttl_display() {
        let err = StoreError::InvalidTtl {
            key: "foo".to_string(),
            ttl_seconds: -3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid TTL for key 'foo': -3 (must be a positive number of seconds)"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = StoreError::InvalidTtl {
            key: "foo".to_string(),
            ttl_seconds: 0,
        }
        .into();
        assert!(err.downcast_ref::<StoreError>().is_some());
    }
}
