// src/core/seal.rs

//! Nonce-search sealing of a chapter root.
//!
//! The published commitment for a chapter is not the raw merkle root but a
//! sealed digest `SHA3-256(root || nonce)` whose value, read as a
//! big-endian unsigned integer, is divisible by [`SEAL_MODULUS`]. The
//! nonce is the smallest non-negative integer with that property, encoded
//! as exactly 8 big-endian bytes (`u64-be`), which makes the search result
//! unique and auditable. Under a uniform-hash assumption 1 in 19 nonces
//! succeeds, so the expected search length is 19 trials; the search is
//! deliberately uncapped, since any cap would make a seal non-reproducible
//! on a system with a different limit.

use crate::core::hash::{sha3_256_concat, Digest32};
use crate::SEAL_MODULUS;

/// The result of sealing one chapter root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealedChapterRoot {
    /// Smallest nonce satisfying the congruence.
    pub nonce: u64,
    /// `SHA3-256(chapter_root || nonce.to_be_bytes())`.
    pub sealed_root: Digest32,
}

/// Residue of a digest's big-endian integer value modulo 19.
///
/// Folds the bytes left to right; `(acc * 256 + byte) % 19` keeps the
/// accumulator small, so no big-integer arithmetic is needed.
pub fn residue_mod19(digest: &Digest32) -> u8 {
    let m = SEAL_MODULUS as u32;
    digest
        .iter()
        .fold(0u32, |acc, &b| (acc * 256 + b as u32) % m) as u8
}

/// Computes the sealed digest for a given root and nonce.
pub fn seal_candidate(root: &Digest32, nonce: u64) -> Digest32 {
    sha3_256_concat(&[root, &nonce.to_be_bytes()])
}

/// Searches nonces `0, 1, 2, …` in order and returns the first whose
/// sealed digest is ≡ 0 (mod 19), together with that digest.
///
/// Total over its (practically unbounded) search space; termination is
/// guaranteed with probability 1 and in practice within a few dozen
/// trials.
pub fn seal(root: &Digest32) -> SealedChapterRoot {
    let mut nonce: u64 = 0;
    loop {
        let candidate = seal_candidate(root, nonce);
        if residue_mod19(&candidate) == 0 {
            return SealedChapterRoot {
                nonce,
                sealed_root: candidate,
            };
        }
        nonce += 1;
    }
}
