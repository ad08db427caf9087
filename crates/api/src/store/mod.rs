//! Persistence of sealed transaction records.
//!
//! The store only ever sees ciphertext: records arrive fully formed from the
//! envelope core and are returned unchanged. A `put` replaces the whole record
//! under its id; fields are never updated individually.

pub mod memory;

pub use memory::InMemoryTxStore;

use async_trait::async_trait;
use envelope::TxSecureRecord;
use thiserror::Error;

/// Errors produced by a record store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not serve the request.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// A keyed store of [`TxSecureRecord`]s.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TxStore: Send + Sync {
    /// Insert `record`, replacing any existing record with the same id.
    async fn put(&self, record: TxSecureRecord) -> Result<(), StoreError>;

    /// Fetch the record stored under `id`.
    async fn get(&self, id: &str) -> Result<Option<TxSecureRecord>, StoreError>;

    /// Number of records currently stored.
    async fn count(&self) -> Result<usize, StoreError>;
}
