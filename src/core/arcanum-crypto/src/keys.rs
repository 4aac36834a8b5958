//! Key types held by the service.
//!
//! Symmetric keys implement `Zeroize` and `ZeroizeOnDrop`; RSA private keys
//! are zeroized by the `rsa` crate itself. Neither type prints its material
//! through `Debug`.

use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::aes_cbc::KEY_SIZES;
use crate::error::CryptoError;
use crate::random::generate_key;

/// Public exponent used for every generated RSA key.
pub const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// An AES key of 128, 192 or 256 bits with automatic zeroization.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: Vec<u8>,
}

impl SymmetricKey {
    /// Generates a new random key of `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `len` is not 16, 24 or 32.
    pub fn generate(len: usize) -> Result<Self, CryptoError> {
        Self::check_len(len)?;
        let key = generate_key(len);
        Ok(Self { bytes: key.to_vec() })
    }

    /// Returns the raw key bytes.
    ///
    /// Use with caution - the returned slice is not zeroized automatically.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key size in bits.
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    fn check_len(len: usize) -> Result<(), CryptoError> {
        if KEY_SIZES.contains(&len) {
            Ok(())
        } else {
            Err(CryptoError::InvalidKey(format!(
                "expected 16, 24 or 32 bytes, got {}",
                len
            )))
        }
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bits", &self.bits())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// An RSA private key. The public half is derived on demand.
#[derive(Clone)]
pub struct RsaKeyPair {
    private_key: RsaPrivateKey,
}

impl RsaKeyPair {
    /// Generates a new keypair with public exponent 65537.
    ///
    /// This is CPU-bound and takes noticeably long for 4096-bit keys.
    pub fn generate(bits: usize) -> Result<Self, CryptoError> {
        let exponent = BigUint::from(RSA_PUBLIC_EXPONENT);
        let private_key = RsaPrivateKey::new_with_exp(&mut OsRng, bits, &exponent)
            .map_err(|e| CryptoError::KeyGenerationFailed(e.to_string()))?;
        Ok(Self { private_key })
    }

    /// The private key.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Derives the public key.
    pub fn public_key(&self) -> RsaPublicKey {
        self.private_key.to_public_key()
    }

    /// Modulus size in bytes.
    pub fn size(&self) -> usize {
        self.private_key.size()
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.size() * 8
    }

    /// Exports the private key as unencrypted PKCS#8 DER.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let document = self
            .private_key
            .to_pkcs8_der()
            .map_err(|e| CryptoError::Encoding(e.to_string()))?;
        Ok(Zeroizing::new(document.as_bytes().to_vec()))
    }

    /// Exports the public key as SubjectPublicKeyInfo DER.
    pub fn to_public_key_der(&self) -> Result<Vec<u8>, CryptoError> {
        let document = self
            .public_key()
            .to_public_key_der()
            .map_err(|e| CryptoError::Encoding(e.to_string()))?;
        Ok(document.as_bytes().to_vec())
    }
}

impl std::fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("bits", &self.bits())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};

    #[test]
    fn test_symmetric_key_generate() {
        for len in [16, 24, 32] {
            let key = SymmetricKey::generate(len).unwrap();
            assert_eq!(key.as_bytes().len(), len);
            assert_eq!(key.bits(), len * 8);
        }
    }

    #[test]
    fn test_symmetric_key_invalid_length() {
        for len in [0, 8, 12, 20, 64] {
            let result = SymmetricKey::generate(len);
            assert!(matches!(result, Err(CryptoError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_symmetric_key_debug_redacted() {
        let key = SymmetricKey::generate(16).unwrap();
        let debug_str = format!("{:?}", key);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains(&format!("{:?}", key.as_bytes())));
    }

    #[test]
    fn test_keys_are_unique() {
        let key1 = SymmetricKey::generate(32).unwrap();
        let key2 = SymmetricKey::generate(32).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_rsa_keypair_generate() {
        let pair = RsaKeyPair::generate(2048).unwrap();
        assert_eq!(pair.bits(), 2048);
        assert_eq!(pair.size(), 256);
        assert_eq!(pair.public_key().e(), &BigUint::from(RSA_PUBLIC_EXPONENT));
    }

    #[test]
    fn test_rsa_export_reimports() {
        let pair = RsaKeyPair::generate(2048).unwrap();

        let private_der = pair.to_pkcs8_der().unwrap();
        let restored = RsaPrivateKey::from_pkcs8_der(&private_der).unwrap();
        assert_eq!(&restored, pair.private_key());

        let public_der = pair.to_public_key_der().unwrap();
        let public = RsaPublicKey::from_public_key_der(&public_der).unwrap();
        assert_eq!(public, pair.public_key());
    }

    #[test]
    fn test_rsa_debug_redacted() {
        let pair = RsaKeyPair::generate(2048).unwrap();
        let debug_str = format!("{:?}", pair);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("2048"));
    }
}
