//! KMS engine error types.

use thiserror::Error;

use arcanum_crypto::CipherAlgorithm;

/// Errors that can occur in the KMS Engine.
#[derive(Debug, Error)]
pub enum KmsError {
    /// Requested key size is not allowed for the key type.
    #[error("invalid key size for {key_type}: {size} (allowed: {allowed})")]
    InvalidKeySize {
        /// Key type.
        key_type: CipherAlgorithm,
        /// Rejected size in bits.
        size: u32,
        /// Comma-separated allowed sizes.
        allowed: String,
    },

    /// Cryptographic error.
    #[error("crypto error: {0}")]
    Crypto(#[from] arcanum_crypto::CryptoError),
}
