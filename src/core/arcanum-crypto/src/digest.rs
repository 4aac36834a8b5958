//! SHA-2 message digests.

use sha2::{Digest, Sha256, Sha512};

use crate::algorithm::HashAlgorithm;

/// Computes the digest of `data` with the given algorithm.
pub fn digest(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_answer() {
        let out = digest(HashAlgorithm::Sha256, b"abc");
        assert_eq!(
            hex::encode(out),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha512_known_answer() {
        let out = digest(HashAlgorithm::Sha512, b"abc");
        assert_eq!(
            hex::encode(out),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_output_sizes() {
        for alg in [HashAlgorithm::Sha256, HashAlgorithm::Sha512] {
            assert_eq!(digest(alg, b"").len(), alg.output_size());
        }
    }
}
