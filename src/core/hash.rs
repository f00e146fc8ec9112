// src/core/hash.rs

use sha3::{Digest, Sha3_256};

/// A 32-byte SHA3-256 digest.
pub type Digest32 = [u8; 32];

/// Computes the SHA3-256 hash of the given data.
pub fn sha3_256(data: &[u8]) -> Digest32 {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes the SHA3-256 hash of a list of byte slices concatenated together.
pub fn sha3_256_concat(data_slices: &[&[u8]]) -> Digest32 {
    let mut hasher = Sha3_256::new();
    for slice in data_slices {
        hasher.update(slice);
    }
    hasher.finalize().into()
}

/// Computes the content digest of a normalized unit: the SHA3-256 hash of
/// its UTF-8 bytes.
pub fn unit_digest(normalized: &str) -> Digest32 {
    sha3_256(normalized.as_bytes())
}
