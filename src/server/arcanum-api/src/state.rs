//! Shared application state.

use std::sync::Arc;

use arcanum_hash::HashEngine;
use arcanum_keystore::MemoryKeyStore;
use arcanum_kms::KmsEngine;
use arcanum_transit::TransitEngine;

/// Engines and the key store they share, one instance per server.
#[derive(Clone)]
pub struct AppState {
    /// In-memory key store.
    pub store: Arc<MemoryKeyStore>,
    /// Key generator.
    pub kms: KmsEngine,
    /// Cipher engine.
    pub transit: TransitEngine,
    /// Digest engine.
    pub hash: HashEngine,
}

impl AppState {
    /// Creates a state with an empty key store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryKeyStore::new()))
    }

    /// Creates a state around an existing store.
    pub fn with_store(store: Arc<MemoryKeyStore>) -> Self {
        Self {
            kms: KmsEngine::new(store.clone()),
            transit: TransitEngine::new(store.clone()),
            hash: HashEngine::new(),
            store,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
