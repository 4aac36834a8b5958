//! Base64 text encoding for binary material.
//!
//! All keys, ciphertexts and digests cross the API boundary as standard
//! (RFC 4648, padded) base64.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD as BASE64};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::CryptoError;

/// Standard alphabet, decoding with or without trailing `=` padding.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes bytes as standard padded base64.
pub fn encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Decodes standard padded base64.
pub fn decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    BASE64
        .decode(text)
        .map_err(|e| CryptoError::InvalidInput(format!("invalid base64: {}", e)))
}

/// Decodes base64 whose trailing `=` padding may have been stripped.
pub fn decode_lenient(text: &str) -> Result<Vec<u8>, CryptoError> {
    BASE64_LENIENT
        .decode(text)
        .map_err(|e| CryptoError::InvalidInput(format!("invalid base64: {}", e)))
}
