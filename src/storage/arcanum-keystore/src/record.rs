//! Key identifiers and stored key records.

use std::fmt;

use arcanum_crypto::{CipherAlgorithm, RsaKeyPair, SymmetricKey};

/// Opaque handle clients use to reference a stored key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(String);

impl KeyId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for KeyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind of a stored key, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// AES key.
    Symmetric,
    /// RSA keypair.
    Asymmetric,
}

impl KeyKind {
    /// The cipher family a key of this kind can be used with.
    pub fn algorithm(&self) -> CipherAlgorithm {
        match self {
            Self::Symmetric => CipherAlgorithm::Aes,
            Self::Asymmetric => CipherAlgorithm::Rsa,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric => write!(f, "symmetric"),
            Self::Asymmetric => write!(f, "asymmetric"),
        }
    }
}

/// Key material held by the store.
#[derive(Debug, Clone)]
pub enum KeyRecord {
    /// AES-128/192/256 key.
    Symmetric(SymmetricKey),
    /// RSA keypair; the public key is derived from the private key.
    Asymmetric(RsaKeyPair),
}

impl KeyRecord {
    /// Kind of this record.
    pub fn kind(&self) -> KeyKind {
        match self {
            Self::Symmetric(_) => KeyKind::Symmetric,
            Self::Asymmetric(_) => KeyKind::Asymmetric,
        }
    }

    /// Key size in bits.
    pub fn bits(&self) -> usize {
        match self {
            Self::Symmetric(key) => key.bits(),
            Self::Asymmetric(pair) => pair.bits(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_key_id_roundtrips_as_plain_string() {
        let id = KeyId::new("42");
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(KeyId::from("42"), id);
    }

    #[test]
    fn test_record_kind_maps_to_algorithm() {
        let record = KeyRecord::Symmetric(SymmetricKey::generate(16).unwrap());
        assert_eq!(record.kind(), KeyKind::Symmetric);
        assert_eq!(record.kind().algorithm(), CipherAlgorithm::Aes);
        assert_eq!(record.bits(), 128);
        assert_eq!(KeyKind::Asymmetric.algorithm(), CipherAlgorithm::Rsa);
    }
}
