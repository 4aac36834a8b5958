//! # Arcanum Digest Engine
//!
//! Computes and verifies base64-encoded SHA-256 / SHA-512 digests of text.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use subtle::ConstantTimeEq;
use tracing::info;

use arcanum_crypto::{digest, encoding, HashAlgorithm};

/// Verdict message for a matching digest.
pub const MATCH_MESSAGE: &str = "Hash matches the data.";

/// Verdict message for a mismatching digest.
pub const MISMATCH_MESSAGE: &str = "Hash does not match the data.";

/// Outcome of a digest verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Whether the supplied digest matches the data.
    pub is_valid: bool,
    /// Human-readable verdict.
    pub message: &'static str,
}

/// The Digest Engine. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashEngine;

impl HashEngine {
    /// Creates a new HashEngine.
    pub fn new() -> Self {
        Self
    }

    /// Hashes the UTF-8 bytes of `data` and returns the base64 digest.
    pub fn hash(&self, data: &str, algorithm: HashAlgorithm) -> String {
        let out = digest::digest(algorithm, data.as_bytes());
        info!(algorithm = %algorithm, "Hash generated");
        encoding::encode(&out)
    }

    /// Checks `expected` against the digest of `data`.
    ///
    /// Both digests are compared as base64 strings, in constant time.
    pub fn verify(&self, data: &str, expected: &str, algorithm: HashAlgorithm) -> Verification {
        let computed = encoding::encode(&digest::digest(algorithm, data.as_bytes()));
        let is_valid: bool = computed.as_bytes().ct_eq(expected.as_bytes()).into();

        info!(algorithm = %algorithm, is_valid, "Hash verified");

        Verification {
            is_valid,
            message: if is_valid {
                MATCH_MESSAGE
            } else {
                MISMATCH_MESSAGE
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
