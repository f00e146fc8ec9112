// src/core/mod.rs

/// Unicode NFC canonicalization of raw text units.
pub mod normalize;
/// Utility functions for cryptographic hashing (SHA3-256).
pub mod hash;
/// Merkle root construction over a chapter's ordered unit digests.
pub mod merkle;
/// Minimal-nonce search sealing a chapter root under the mod-19 constraint.
pub mod seal;
/// Per-chapter pipeline composing the four stages above.
pub mod pipeline;

pub use pipeline::seal_chapter;
pub use seal::SealedChapterRoot;
