//! # Arcanum Transit Engine
//!
//! Encryption as a Service - clients encrypt and decrypt text under keys
//! they reference by identifier.
//!
//! ## Algorithms
//!
//! - `AES`: AES-CBC with PKCS#7 padding and a random IV per message
//! - `RSA`: RSA-OAEP with SHA-512 and MGF1-SHA512, no label
//!
//! ## Ciphertext Format
//!
//! AES ciphertexts are encoded as `base64(iv || ciphertext)`; RSA ciphertexts
//! as `base64(ciphertext)`. On decrypt, base64 input with its trailing `=`
//! padding stripped is accepted.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;

pub use error::TransitError;

use std::sync::Arc;

use tracing::{debug, info};

use arcanum_crypto::{aes_cbc, encoding, oaep, CipherAlgorithm, CryptoError};
use arcanum_keystore::{KeyId, KeyRecord, KeyStore};

/// The Transit Engine performs encryption and decryption with stored keys.
#[derive(Clone)]
pub struct TransitEngine {
    store: Arc<dyn KeyStore>,
}

impl TransitEngine {
    /// Creates a new TransitEngine on top of the given store.
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self { store }
    }

    /// Fetches a record and checks it can be used with `algorithm`.
    fn resolve_key(
        &self,
        key_id: &KeyId,
        algorithm: CipherAlgorithm,
    ) -> Result<Arc<KeyRecord>, TransitError> {
        let record = self.store.get(key_id)?;

        let kind = record.kind();
        if kind.algorithm() != algorithm {
            return Err(TransitError::KeyTypeMismatch {
                key_id: key_id.to_string(),
                kind,
                algorithm,
            });
        }

        Ok(record)
    }

    // ========================================================================
    // Encryption/Decryption Operations
    // ========================================================================

    /// Encrypts UTF-8 text and returns the base64 ciphertext token.
    pub fn encrypt(
        &self,
        key_id: &KeyId,
        algorithm: CipherAlgorithm,
        plaintext: &str,
    ) -> Result<String, TransitError> {
        let record = self.resolve_key(key_id, algorithm)?;

        let ciphertext = match &*record {
            KeyRecord::Symmetric(key) => aes_cbc::encrypt(key.as_bytes(), plaintext.as_bytes())
                .map_err(|e| TransitError::EncryptionFailed(e.to_string()))?,
            KeyRecord::Asymmetric(pair) => {
                oaep::encrypt(pair, plaintext.as_bytes()).map_err(|e| match e {
                    CryptoError::MessageTooLarge { max, actual } => {
                        TransitError::PlaintextTooLarge { max, actual }
                    },
                    other => TransitError::EncryptionFailed(other.to_string()),
                })?
            },
        };

        info!(key_id = %key_id, algorithm = %algorithm, "Message encrypted");

        Ok(encoding::encode(&ciphertext))
    }

    /// Decrypts a base64 ciphertext token back to UTF-8 text.
    ///
    /// Malformed base64, truncated input, a wrong key, bad padding and
    /// non-UTF-8 plaintext all surface as [`TransitError::DecryptionFailed`].
    pub fn decrypt(
        &self,
        key_id: &KeyId,
        algorithm: CipherAlgorithm,
        ciphertext: &str,
    ) -> Result<String, TransitError> {
        let record = self.resolve_key(key_id, algorithm)?;

        let data = encoding::decode_lenient(ciphertext)
            .map_err(|_| TransitError::DecryptionFailed("invalid base64".to_string()))?;

        let plaintext = match &*record {
            KeyRecord::Symmetric(key) => aes_cbc::decrypt(key.as_bytes(), &data),
            KeyRecord::Asymmetric(pair) => oaep::decrypt(pair, &data),
        }
        .map_err(|e| {
            debug!(key_id = %key_id, error = %e, "Decryption rejected");
            match e {
                CryptoError::DecryptionFailed(reason) => TransitError::DecryptionFailed(reason),
                _ => TransitError::DecryptionFailed("invalid ciphertext".to_string()),
            }
        })?;

        let text = String::from_utf8(plaintext.to_vec()).map_err(|_| {
            TransitError::DecryptionFailed("plaintext is not valid UTF-8".to_string())
        })?;

        info!(key_id = %key_id, algorithm = %algorithm, "Message decrypted");

        Ok(text)
    }
}

// ============================================================================
// Tests
// ============================================================================
