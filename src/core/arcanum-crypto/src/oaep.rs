//! RSA-OAEP encryption with SHA-512.
//!
//! Both the OAEP hash and the MGF1 hash are SHA-512, and no label is used.

use rand::rngs::OsRng;
use rsa::Oaep;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::keys::RsaKeyPair;

/// Size of a SHA-512 digest in bytes.
const HASH_SIZE: usize = 64;

/// Bytes of every OAEP block consumed by padding: two digests plus two.
pub const OAEP_OVERHEAD: usize = 2 * HASH_SIZE + 2;

fn padding() -> Oaep {
    Oaep::new::<Sha512>()
}

/// Largest plaintext a key with a `modulus_bytes`-byte modulus can encrypt.
pub fn max_message_len(modulus_bytes: usize) -> usize {
    modulus_bytes.saturating_sub(OAEP_OVERHEAD)
}

/// Encrypts `plaintext` to the public half of `key`.
///
/// # Errors
///
/// Returns [`CryptoError::MessageTooLarge`] when the plaintext does not fit
/// in a single OAEP block.
pub fn encrypt(key: &RsaKeyPair, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let max = max_message_len(key.size());
    if plaintext.len() > max {
        return Err(CryptoError::MessageTooLarge {
            max,
            actual: plaintext.len(),
        });
    }

    key.public_key()
        .encrypt(&mut OsRng, padding(), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}

/// Decrypts an OAEP ciphertext with the private key.
///
/// The underlying error is not surfaced, so callers cannot distinguish a
/// wrong key from corrupted data.
pub fn decrypt(key: &RsaKeyPair, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    key.private_key()
        .decrypt(padding(), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::DecryptionFailed("oaep decoding failed".to_string()))
}
