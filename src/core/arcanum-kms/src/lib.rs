//! # Arcanum KMS Engine
//!
//! Key generation for the cryptographic service.
//!
//! ## Features
//!
//! - AES-128/192/256 key generation
//! - RSA-2048/3072/4096 keypair generation (public exponent 65537)
//! - Registration of every generated key in the key store
//! - Export of the generated material as base64 (raw AES key, PKCS#8
//!   private key, SubjectPublicKeyInfo public key)
//!
//! Exported private keys are not encrypted.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;

pub use error::KmsError;

use std::sync::Arc;

use tracing::info;

use arcanum_crypto::{encoding, CipherAlgorithm, RsaKeyPair, SymmetricKey};
use arcanum_keystore::{KeyId, KeyRecord, KeyStore};

/// Allowed AES key sizes in bits.
pub const AES_KEY_SIZES: [u32; 3] = [128, 192, 256];

/// Allowed RSA modulus sizes in bits.
pub const RSA_KEY_SIZES: [u32; 3] = [2048, 3072, 4096];

/// Key material returned to the caller after generation.
#[derive(Clone, PartialEq, Eq)]
pub enum ExportedKey {
    /// Base64 of the raw AES key.
    Symmetric {
        /// Base64 key bytes.
        key_value: String,
    },
    /// Base64 DER encodings of an RSA keypair.
    Asymmetric {
        /// Base64 of the unencrypted PKCS#8 private key.
        private_key: String,
        /// Base64 of the SubjectPublicKeyInfo public key.
        public_key: String,
    },
}

impl std::fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symmetric { .. } => f
                .debug_struct("Symmetric")
                .field("key_value", &"[REDACTED]")
                .finish(),
            Self::Asymmetric { public_key, .. } => f
                .debug_struct("Asymmetric")
                .field("private_key", &"[REDACTED]")
                .field("public_key", public_key)
                .finish(),
        }
    }
}

/// Result of a key generation.
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    /// Identifier the key was registered under.
    pub key_id: KeyId,
    /// Exported key material.
    pub material: ExportedKey,
}

/// The KMS Engine generates keys and registers them in the key store.
#[derive(Clone)]
pub struct KmsEngine {
    store: Arc<dyn KeyStore>,
}

impl KmsEngine {
    /// Creates a new KmsEngine on top of the given store.
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self { store }
    }

    /// Validates a key size against the allowed set for the key type.
    pub fn validate_key_size(key_type: CipherAlgorithm, key_size: u32) -> Result<(), KmsError> {
        let allowed: &[u32] = match key_type {
            CipherAlgorithm::Aes => &AES_KEY_SIZES,
            CipherAlgorithm::Rsa => &RSA_KEY_SIZES,
        };

        if allowed.contains(&key_size) {
            return Ok(());
        }

        Err(KmsError::InvalidKeySize {
            key_type,
            size: key_size,
            allowed: allowed
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Generates a key, stores it and returns its identifier and material.
    ///
    /// The record is only inserted once the material has been generated and
    /// exported, so a failure leaves the store untouched.
    pub fn generate(
        &self,
        key_type: CipherAlgorithm,
        key_size: u32,
    ) -> Result<GeneratedKey, KmsError> {
        Self::validate_key_size(key_type, key_size)?;

        let (record, material) = match key_type {
            CipherAlgorithm::Aes => {
                let key = SymmetricKey::generate(key_size as usize / 8)?;
                let material = ExportedKey::Symmetric {
                    key_value: encoding::encode(key.as_bytes()),
                };
                (KeyRecord::Symmetric(key), material)
            },
            CipherAlgorithm::Rsa => {
                let pair = RsaKeyPair::generate(key_size as usize)?;
                let private_der = pair.to_pkcs8_der()?;
                let public_der = pair.to_public_key_der()?;
                let material = ExportedKey::Asymmetric {
                    private_key: encoding::encode(&private_der),
                    public_key: encoding::encode(&public_der),
                };
                (KeyRecord::Asymmetric(pair), material)
            },
        };

        let key_id = self.store.put(record);

        info!(key_id = %key_id, key_type = %key_type, key_size, "Key generated");

        Ok(GeneratedKey { key_id, material })
    }
}

// ============================================================================
// Tests
// ============================================================================
