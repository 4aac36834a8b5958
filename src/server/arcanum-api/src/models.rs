//! Request and response bodies.

use serde::{Deserialize, Deserializer, Serialize};

/// `POST /generate-key` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateKeyRequest {
    /// `"AES"` or `"RSA"`.
    pub key_type: String,
    /// Key size in bits.
    pub key_size: u32,
}

/// `POST /generate-key` response.
///
/// AES keys carry `key_value`; RSA keys carry `private_key` and `public_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateKeyResponse {
    /// Identifier of the stored key.
    pub key_id: String,
    /// Base64 of the raw AES key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_value: Option<String>,
    /// Base64 of the PKCS#8 DER private key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Base64 of the SubjectPublicKeyInfo DER public key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// `POST /encrypt` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Key identifier, as a string or a bare number.
    #[serde(deserialize_with = "key_id_from_json")]
    pub key_id: String,
    /// UTF-8 text to encrypt.
    pub plaintext: String,
    /// `"AES"` or `"RSA"`.
    pub algorithm: String,
}

/// `POST /encrypt` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Base64 ciphertext token.
    pub ciphertext: String,
}

/// `POST /decrypt` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptRequest {
    /// Key identifier, as a string or a bare number.
    #[serde(deserialize_with = "key_id_from_json")]
    pub key_id: String,
    /// Base64 ciphertext token.
    pub ciphertext: String,
    /// `"AES"` or `"RSA"`.
    pub algorithm: String,
}

/// `POST /decrypt` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    /// Recovered text.
    pub plaintext: String,
}

/// `POST /generate-hash` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashRequest {
    /// Text to hash.
    pub data: String,
    /// `"SHA-256"` or `"SHA-512"`.
    pub algorithm: String,
}

/// `POST /generate-hash` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResponse {
    /// Base64 digest.
    pub hash_value: String,
    /// Echo of the algorithm name.
    pub algorithm: String,
}

/// `POST /verify-hash` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyHashRequest {
    /// Text to check.
    pub data: String,
    /// Expected base64 digest.
    pub hash_value: String,
    /// `"SHA-256"` or `"SHA-512"`.
    pub algorithm: String,
}

/// `POST /verify-hash` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyHashResponse {
    /// Whether the digest matches.
    pub is_valid: bool,
    /// Human-readable verdict.
    pub message: String,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Number of keys held in memory.
    pub keys: usize,
}

fn key_id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKeyId {
        Text(String),
        Number(u64),
    }

    Ok(match RawKeyId::deserialize(deserializer)? {
        RawKeyId::Text(s) => s,
        RawKeyId::Number(n) => n.to_string(),
    })
}
