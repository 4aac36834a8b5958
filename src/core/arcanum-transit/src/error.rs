//! Transit engine error types.

use thiserror::Error;

use arcanum_crypto::CipherAlgorithm;
use arcanum_keystore::KeyKind;

/// Errors that can occur in the Transit Engine.
#[derive(Debug, Error)]
pub enum TransitError {
    /// Key not found.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// The key exists but belongs to the other cipher family.
    #[error("key {key_id} is {kind} and cannot be used with {algorithm}")]
    KeyTypeMismatch {
        /// Key identifier.
        key_id: String,
        /// Kind of the stored key.
        kind: KeyKind,
        /// Requested algorithm.
        algorithm: CipherAlgorithm,
    },

    /// Plaintext does not fit in a single RSA-OAEP block.
    #[error("plaintext too large for RSA key: maximum is {max} bytes, got {actual} bytes")]
    PlaintextTooLarge {
        /// Maximum plaintext size in bytes.
        max: usize,
        /// Actual plaintext size in bytes.
        actual: usize,
    },

    /// Decryption failed. Carries a short description only.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Encryption failed for a reason other than the input size.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

impl From<arcanum_keystore::KeyStoreError> for TransitError {
    fn from(err: arcanum_keystore::KeyStoreError) -> Self {
        match err {
            arcanum_keystore::KeyStoreError::NotFound(id) => Self::KeyNotFound(id),
        }
    }
}
