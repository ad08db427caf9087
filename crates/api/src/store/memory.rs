//! [`InMemoryTxStore`]: process-local record store.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use envelope::TxSecureRecord;
use tokio::sync::RwLock;

use super::{StoreError, TxStore};

/// Thread-safe in-memory store keyed by record id.
///
/// Wraps an `Arc<RwLock<HashMap<_, _>>>`, so clones share the same records.
/// Contents are lost when the process exits.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTxStore {
    inner: Arc<RwLock<HashMap<String, TxSecureRecord>>>,
}

impl InMemoryTxStore {
    /// Create a new, empty [`InMemoryTxStore`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TxStore for InMemoryTxStore {
    async fn put(&self, record: TxSecureRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        map.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<TxSecureRecord>, StoreError> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envelope::{RecordFields, ALG};

    fn record(id: &str, party_id: &str) -> TxSecureRecord {
        TxSecureRecord::new(
            id,
            "2026-01-01T00:00:00.000Z",
            RecordFields {
                party_id: party_id.into(),
                payload_nonce: "00".repeat(12),
                payload_ct: "ab".into(),
                payload_tag: "11".repeat(16),
                dek_wrap_nonce: "22".repeat(12),
                dek_wrapped: "33".repeat(32),
                dek_wrap_tag: "44".repeat(16),
                alg: ALG.into(),
                mk_version: 1,
            },
        )
    }

    #[tokio::test]
    async fn initially_empty() {
        let store = InMemoryTxStore::new();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.get("tx_1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_and_get() {
        let store = InMemoryTxStore::new();
        let r = record("tx_1", "party_a");
        store.put(r.clone()).await.unwrap();
        assert_eq!(store.get("tx_1").await.unwrap(), Some(r));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn put_replaces_whole_record() {
        let store = InMemoryTxStore::new();
        store.put(record("tx_1", "party_a")).await.unwrap();
        let replacement = record("tx_1", "party_b");
        store.put(replacement.clone()).await.unwrap();
        assert_eq!(store.get("tx_1").await.unwrap(), Some(replacement));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clones_share_records() {
        let store = InMemoryTxStore::new();
        let other = store.clone();
        store.put(record("tx_1", "party_a")).await.unwrap();
        assert!(other.get("tx_1").await.unwrap().is_some());
    }
}
