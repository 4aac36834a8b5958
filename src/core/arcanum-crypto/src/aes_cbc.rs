//! AES in CBC mode with PKCS#7 padding.
//!
//! The key length selects the variant: 16, 24 or 32 bytes for AES-128,
//! AES-192 or AES-256. A fresh random IV is generated for every message and
//! prepended to the ciphertext.
//!
//! Format: `iv (16 bytes) || ciphertext`

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::random::generate_iv;

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of a CBC initialization vector in bytes.
pub const IV_SIZE: usize = 16;

/// Key lengths accepted by AES, in bytes.
pub const KEY_SIZES: [usize; 3] = [16, 24, 32];

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypts plaintext with AES-CBC under a freshly generated IV.
///
/// # Arguments
///
/// * `key` - 16, 24 or 32-byte AES key
/// * `plaintext` - Data to encrypt, padded with PKCS#7 before encryption
///
/// # Returns
///
/// The IV followed by the ciphertext.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let iv = generate_iv();
    encrypt_with_iv(key, &iv, plaintext)
}

/// Encrypts plaintext with AES-CBC under the supplied IV.
///
/// Only use this with an IV that is never reused for the same key.
pub fn encrypt_with_iv(
    key: &[u8],
    iv: &[u8; IV_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let ciphertext = match key.len() {
        16 => encrypt_padded::<Aes128CbcEnc>(key, iv, plaintext)?,
        24 => encrypt_padded::<Aes192CbcEnc>(key, iv, plaintext)?,
        32 => encrypt_padded::<Aes256CbcEnc>(key, iv, plaintext)?,
        n => return Err(invalid_key_length(n)),
    };

    let mut result = Vec::with_capacity(IV_SIZE + ciphertext.len());
    result.extend_from_slice(iv);
    result.extend_from_slice(&ciphertext);

    Ok(result)
}

/// Decrypts data produced by [`encrypt`].
///
/// Expects the IV to be prepended to the ciphertext. Every failure (short
/// input, partial block, wrong key, bad padding) is reported as
/// [`CryptoError::DecryptionFailed`].
///
/// # Returns
///
/// Decrypted plaintext wrapped in `Zeroizing` for automatic memory cleanup.
pub fn decrypt(key: &[u8], data: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if !KEY_SIZES.contains(&key.len()) {
        return Err(invalid_key_length(key.len()));
    }

    if data.len() < IV_SIZE + BLOCK_SIZE {
        return Err(CryptoError::DecryptionFailed(
            "ciphertext too short".to_string(),
        ));
    }

    let (iv, ciphertext) = data.split_at(IV_SIZE);
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::DecryptionFailed(
            "ciphertext is not a whole number of blocks".to_string(),
        ));
    }

    let plaintext = match key.len() {
        16 => decrypt_padded::<Aes128CbcDec>(key, iv, ciphertext)?,
        24 => decrypt_padded::<Aes192CbcDec>(key, iv, ciphertext)?,
        _ => decrypt_padded::<Aes256CbcDec>(key, iv, ciphertext)?,
    };

    Ok(Zeroizing::new(plaintext))
}

fn encrypt_padded<E>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>
where
    E: KeyIvInit + BlockEncryptMut,
{
    let cipher =
        E::new_from_slices(key, iv).map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_padded<D>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>
where
    D: KeyIvInit + BlockDecryptMut,
{
    let cipher =
        D::new_from_slices(key, iv).map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed("invalid padding".to_string()))
}

fn invalid_key_length(len: usize) -> CryptoError {
    CryptoError::InvalidKey(format!("expected 16, 24 or 32 bytes, got {}", len))
}
