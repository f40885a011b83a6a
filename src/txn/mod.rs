//! Transaction module
//!
//! A transaction stages writes in a private overlay store and merges them into
//! the parent store only if the handler succeeds.

mod transaction;

pub use transaction::Transaction;

use crate::store::Store;
use tracing::debug;

impl Store {
    /// Run `handler` against a fresh transaction on this store
    ///
    /// Writes made through the transaction are staged in a private overlay.
    /// If the handler returns `Ok`, every staged entry is merged into this
    /// store; if it returns `Err`, the overlay is dropped, this store is left
    /// untouched and the handler's error is returned unchanged.
    ///
    /// Commit is a last-writer-wins bulk copy: concurrent transactions staging
    /// the same key overwrite each other without any conflict detection.
    pub fn handle_transaction<T, F>(&self, handler: F) -> anyhow::Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> anyhow::Result<T>,
    {
        let tx = Transaction::new(self);

        match handler(&tx) {
            Ok(output) => {
                let staged = tx.staged_count();
                self.merge(tx.local());
                debug!(staged, "transaction committed");
                Ok(output)
            }
            Err(e) => {
                debug!(staged = tx.staged_count(), error = %e, "transaction aborted");
                Err(e)
            }
        }
    }
}
