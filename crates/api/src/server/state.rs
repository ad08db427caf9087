//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use envelope::MasterKey;

use crate::store::TxStore;

/// Application state shared across all request handlers.
///
/// Both fields are `Arc`-wrapped so Axum can clone the state per request
/// without copying key material or the store.
#[derive(Clone)]
pub struct AppState {
    /// Read-only master key used to wrap and unwrap every DEK.
    pub master_key: Arc<MasterKey>,
    /// Backend holding sealed records.
    pub store: Arc<dyn TxStore>,
}

impl AppState {
    /// Create a new [`AppState`] from the startup master key and a store.
    pub fn new(master_key: MasterKey, store: Arc<dyn TxStore>) -> Self {
        Self {
            master_key: Arc::new(master_key),
            store,
        }
    }
}
