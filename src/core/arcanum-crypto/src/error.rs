//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Invalid key format or size.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Invalid input data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Message exceeds what the padding scheme can carry for this key.
    #[error("message too large: maximum is {max} bytes, got {actual} bytes")]
    MessageTooLarge {
        /// Largest message the key accepts.
        max: usize,
        /// Size of the rejected message.
        actual: usize,
    },

    /// Algorithm name is not one this crate implements.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key serialization failed.
    #[error("key encoding failed: {0}")]
    Encoding(String),
}
