//! In-memory key store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::KeyStoreError;
use crate::record::{KeyId, KeyRecord};
use crate::store::KeyStore;

/// Process-scoped key store backed by a concurrent map.
///
/// Identifiers are decimal strings from a monotonically increasing counter
/// starting at `"1"`. They are never reused, but they are enumerable.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    last_id: AtomicU64,
    records: DashMap<KeyId, Arc<KeyRecord>>,
}

impl MemoryKeyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> KeyId {
        let n = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        KeyId::new(n.to_string())
    }
}

impl KeyStore for MemoryKeyStore {
    fn put(&self, record: KeyRecord) -> KeyId {
        let id = self.next_id();
        debug!(key_id = %id, kind = %record.kind(), "Key record stored");
        self.records.insert(id.clone(), Arc::new(record));
        id
    }

    fn get(&self, id: &KeyId) -> Result<Arc<KeyRecord>, KeyStoreError> {
        self.records
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| KeyStoreError::NotFound(id.to_string()))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
