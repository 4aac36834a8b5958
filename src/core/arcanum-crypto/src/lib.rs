//! # Arcanum Crypto
//!
//! Core cryptographic primitives for Arcanum.
//!
//! This crate provides the low-level operations the engines dispatch to:
//! - Symmetric encryption (AES-128/192/256 in CBC mode with PKCS#7 padding)
//! - Asymmetric encryption (RSA-OAEP with SHA-512 and MGF1-SHA512)
//! - Message digests (SHA-256, SHA-512)
//! - Base64 text encoding for binary material
//! - Secure random generation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aes_cbc;
pub mod algorithm;
pub mod digest;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod oaep;
pub mod random;

pub use algorithm::{CipherAlgorithm, HashAlgorithm};
pub use error::CryptoError;
pub use keys::{RsaKeyPair, SymmetricKey};
