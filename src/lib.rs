// src/lib.rs

//! Tamper-evident manifest builder for canonical scripture text.
//!
//! A work (e.g. one edition of a scripture) is an ordered sequence of
//! chapters, each an ordered sequence of text units (verses). For every
//! chapter the pipeline NFC-normalizes the units, digests each with
//! SHA3-256, builds a merkle root over the ordered digests, and seals the
//! root by searching for the smallest nonce `n` such that
//! `SHA3-256(root || n.to_be_bytes())`, read as a big-endian unsigned
//! integer, is divisible by 19. The sealed roots, unit digests, nonces and
//! provenance are aggregated into a single JSON manifest that any third
//! party can re-verify with no out-of-band knowledge.

pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod manifest;
pub mod verify;
pub mod cli;

pub use corpus::{Chapter, TextUnit, Work};
pub use error::{Result, SealError};
pub use manifest::{ChapterSeal, Manifest, Provenance};

/// Modulus the sealed root's integer value must be divisible by. A fixed
/// public parameter of the commitment scheme, not configurable per run.
pub const SEAL_MODULUS: u64 = 19;

/// Identifier of the hash algorithm used for leaves, internal nodes and
/// seals, as recorded in every manifest.
pub const HASH_ALGORITHM: &str = "sha3-256";

/// Identifier of the Unicode normalization form applied to every unit
/// before hashing.
pub const NORMALIZATION_FORM: &str = "NFC";

/// Identifier of the canonical nonce encoding: exactly 8 big-endian bytes.
pub const NONCE_ENCODING: &str = "u64-be";
