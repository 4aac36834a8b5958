//! Key store trait definition.

use std::sync::Arc;

use crate::error::KeyStoreError;
use crate::record::{KeyId, KeyRecord};

/// Registry of generated keys.
///
/// Implementations must be safe to share across request handlers: two
/// concurrent `put` calls never receive the same identifier.
pub trait KeyStore: Send + Sync {
    /// Stores a record under a freshly assigned identifier and returns it.
    fn put(&self, record: KeyRecord) -> KeyId;

    /// Looks up the record registered under `id`.
    fn get(&self, id: &KeyId) -> Result<Arc<KeyRecord>, KeyStoreError>;

    /// Number of stored records.
    fn len(&self) -> usize;

    /// Whether the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a record exists.
    fn contains(&self, id: &KeyId) -> bool {
        self.get(id).is_ok()
    }
}
