//! JinxDB - An embeddable in-memory key-value store
//!
//! Values can carry a per-key expiration, evaluated lazily when the key is
//! next read. Writes can be batched in a transaction: they are staged in a
//! private overlay and merged into the store only if the handler succeeds.
//!
//! ```
//! use jinxdb::{Store, Value};
//!
//! let store = Store::new();
//! store.set("foo", "bar").unwrap();
//!
//! let result: anyhow::Result<()> = store.handle_transaction(|tx| {
//!     tx.set("foo", "baz")?;
//!     anyhow::bail!("changed my mind")
//! });
//!
//! assert!(result.is_err());
//! assert_eq!(store.get("foo"), Some(Value::text("bar")));
//! ```

pub mod config;
pub mod error;
pub mod store;
pub mod txn;

/// Re-export commonly used types
pub use config::{StoreConfig, TtlPolicy};
pub use error::StoreError;
pub use store::{Entry, Store, StoreStats, Value};
pub use txn::Transaction;

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
