//! Incremental hash-chain abstraction.
//!
//! A [`Hasher`] accumulates ordered byte segments and hashes their
//! concatenation on demand. The observable contract is "hash of the full
//! concatenation": segment boundaries never influence the result, and
//! [`Hasher::digest`] can be called repeatedly without re-supplying input.

use digest::Digest;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Hash primitive selected by a group parameter set.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha1 => Sha1::output_size(),
            Self::Sha256 => Sha256::output_size(),
            Self::Sha512 => Sha512::output_size(),
        }
    }
}

/// Accumulates ordered byte segments for a deferred digest.
#[derive(Debug, Clone)]
pub struct Hasher {
    algorithm: HashAlgorithm,
    segments: Vec<Vec<u8>>,
}

impl Hasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            segments: Vec::new(),
        }
    }

    /// Append a segment, consuming and returning the hasher so updates
    /// chain into a single expression.
    #[must_use]
    pub fn update(mut self, segment: impl AsRef<[u8]>) -> Self {
        self.segments.push(segment.as_ref().to_vec());
        self
    }

    /// Hash of the concatenation of all segments in append order.
    pub fn digest(&self) -> Vec<u8> {
        fn run<D: Digest>(segments: &[Vec<u8>]) -> Vec<u8> {
            let mut d = D::new();
            for segment in segments {
                d.update(segment);
            }
            d.finalize().to_vec()
        }

        match self.algorithm {
            HashAlgorithm::Sha1 => run::<Sha1>(&self.segments),
            HashAlgorithm::Sha256 => run::<Sha256>(&self.segments),
            HashAlgorithm::Sha512 => run::<Sha512>(&self.segments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn chunking_never_changes_the_digest() {
        let split = Hasher::new(HashAlgorithm::Sha256)
            .update(b"ab")
            .update(b"c")
            .update(b"");
        let whole = Hasher::new(HashAlgorithm::Sha256).update(b"abc");
        assert_eq!(split.digest(), whole.digest());
    }

    #[test]
    fn digest_is_idempotent() {
        let h = Hasher::new(HashAlgorithm::Sha512)
            .update(b"alpha")
            .update(b"beta");
        assert_eq!(h.digest(), h.digest());
    }

    #[test]
    fn known_vectors() {
        assert_eq!(
            Hasher::new(HashAlgorithm::Sha1).update(b"abc").digest(),
            hex!("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
        assert_eq!(
            Hasher::new(HashAlgorithm::Sha256).update(b"abc").digest(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(
            Hasher::new(HashAlgorithm::Sha512).update(b"abc").digest(),
            hex!(
                "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a"
                "2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
            )
        );
    }

    #[test]
    fn empty_input_matches_primitive() {
        assert_eq!(
            Hasher::new(HashAlgorithm::Sha256).digest(),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn output_lengths() {
        assert_eq!(HashAlgorithm::Sha1.output_len(), 20);
        assert_eq!(HashAlgorithm::Sha256.output_len(), 32);
        assert_eq!(HashAlgorithm::Sha512.output_len(), 64);
    }
}
