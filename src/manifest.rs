// src/manifest.rs

//! The manifest: the top-level persisted artifact.
//!
//! A manifest is an ordered ledger of per-chapter commitments plus the
//! provenance block a third party needs to re-derive every seal with no
//! out-of-band knowledge. Chapter order matches the work's canonical
//! chapter order, so the serialized form uses an array, not a map.
//! Digests are fixed-length lowercase hex for interoperability and human
//! auditability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::hash::Digest32;
use crate::core::seal::SealedChapterRoot;
use crate::error::{Result, SealError};
use crate::{HASH_ALGORITHM, NONCE_ENCODING, NORMALIZATION_FORM, SEAL_MODULUS};

/// Work-level provenance embedded in every manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provenance {
    /// Where the text came from (e.g. "Tanzil").
    pub source: String,
    /// Edition/version tag of the text (e.g. "Uthmani (UTF-8)").
    pub edition: String,
    /// Hash algorithm identifier, fixed across the whole manifest.
    pub hash_algorithm: String,
    /// Unicode normalization form applied before hashing.
    pub normalization_form: String,
    /// Canonical nonce byte encoding used in seal hashing.
    pub nonce_encoding: String,
    /// The public modulus the sealed roots satisfy.
    pub modulus: u64,
    /// When the manifest was assembled. Informational only; no seal byte
    /// depends on it.
    pub generated_at: DateTime<Utc>,
}

impl Provenance {
    /// Provenance for this crate's fixed parameters and the given source.
    pub fn new<S: Into<String>, E: Into<String>>(
        source: S,
        edition: E,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            edition: edition.into(),
            hash_algorithm: HASH_ALGORITHM.to_string(),
            normalization_form: NORMALIZATION_FORM.to_string(),
            nonce_encoding: NONCE_ENCODING.to_string(),
            modulus: SEAL_MODULUS,
            generated_at,
        }
    }
}

/// One chapter's published commitment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterSeal {
    /// Chapter/section identifier.
    pub id: String,
    /// Number of units committed.
    pub unit_count: usize,
    /// Per-unit content digests, hex, in unit order.
    pub unit_digests: Vec<String>,
    /// Merkle root over the unit digests, hex.
    pub chapter_root: String,
    /// Smallest nonce whose seal satisfies the congruence.
    pub nonce: u64,
    /// `SHA3-256(chapter_root || nonce)`, hex. The published seal.
    pub sealed_root: String,
}

impl ChapterSeal {
    /// Builds the record from the pipeline's binary outputs.
    pub fn new(
        id: String,
        unit_digests: &[Digest32],
        chapter_root: &Digest32,
        sealed: SealedChapterRoot,
    ) -> Self {
        Self {
            id,
            unit_count: unit_digests.len(),
            unit_digests: unit_digests.iter().map(hex::encode).collect(),
            chapter_root: hex::encode(chapter_root),
            nonce: sealed.nonce,
            sealed_root: hex::encode(sealed.sealed_root),
        }
    }

    /// Decodes the chapter root back to bytes.
    pub fn chapter_root_bytes(&self) -> Result<Digest32> {
        decode_digest(&self.id, "chapter_root", &self.chapter_root)
    }

    /// Decodes the sealed root back to bytes.
    pub fn sealed_root_bytes(&self) -> Result<Digest32> {
        decode_digest(&self.id, "sealed_root", &self.sealed_root)
    }

    /// Decodes every unit digest back to bytes, in unit order.
    pub fn unit_digest_bytes(&self) -> Result<Vec<Digest32>> {
        self.unit_digests
            .iter()
            .enumerate()
            .map(|(i, d)| decode_digest(&self.id, &format!("unit_digests[{}]", i), d))
            .collect()
    }
}

/// The top-level artifact: provenance plus ordered chapter seals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    /// Work-level provenance.
    pub provenance: Provenance,
    /// Chapter seals in the work's canonical chapter order.
    pub chapters: Vec<ChapterSeal>,
}

impl Manifest {
    /// Pure ordered aggregation of chapter seals under one provenance
    /// block. Never reorders and never drops a chapter; a caller that
    /// failed to seal a chapter has no `ChapterSeal` to pass in, so a
    /// partial chapter cannot appear here by construction.
    pub fn assemble(provenance: Provenance, chapters: Vec<ChapterSeal>) -> Self {
        Self {
            provenance,
            chapters,
        }
    }

    /// Looks up a chapter seal by identifier.
    pub fn chapter(&self, id: &str) -> Option<&ChapterSeal> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the manifest as JSON to `path`.
    pub fn write_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads a manifest from a JSON file.
    pub fn read_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn decode_digest(chapter: &str, field: &str, value: &str) -> Result<Digest32> {
    let bytes = hex::decode(value)
        .map_err(|e| SealError::corrupt_digest(chapter, format!("{}: {}", field, e)))?;
    bytes.as_slice().try_into().map_err(|_| {
        SealError::corrupt_digest(
            chapter,
            format!("{}: expected 32 bytes, got {}", field, bytes.len()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn sample_seal() -> ChapterSeal {
        let d = crate::core::hash::sha3_256(b"unit");
        ChapterSeal::new(
            "Sura 1".to_string(),
            &[d],
            &d,
            SealedChapterRoot {
                nonce: 7,
                sealed_root: crate::core::hash::sha3_256(b"sealed"),
            },
        )
    }

    #[test]
    fn test_provenance_carries_fixed_parameters() {
        let p = Provenance::new("Tanzil", "Uthmani (UTF-8)", fixed_time());
        assert_eq!(p.hash_algorithm, "sha3-256");
        assert_eq!(p.normalization_form, "NFC");
        assert_eq!(p.nonce_encoding, "u64-be");
        assert_eq!(p.modulus, 19);
    }

    #[test]
    fn test_assemble_preserves_order() {
        let mut a = sample_seal();
        a.id = "Sura 2".to_string();
        let b = sample_seal();
        let m = Manifest::assemble(
            Provenance::new("s", "e", fixed_time()),
            vec![a.clone(), b.clone()],
        );
        assert_eq!(m.chapters[0].id, "Sura 2");
        assert_eq!(m.chapters[1].id, "Sura 1");
        assert_eq!(m.chapter("Sura 1"), Some(&b));
    }

    #[test]
    fn test_json_round_trip() {
        let m = Manifest::assemble(Provenance::new("s", "e", fixed_time()), vec![sample_seal()]);
        let parsed = Manifest::from_json(&m.to_json().unwrap()).unwrap();
        assert_eq!(parsed, m);
    }

    #[test]
    fn test_digest_fields_decode() {
        let seal = sample_seal();
        assert_eq!(seal.chapter_root_bytes().unwrap().len(), 32);
        assert_eq!(seal.unit_digest_bytes().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_digest_is_rejected_with_context() {
        let mut seal = sample_seal();
        seal.chapter_root = "zz".to_string();
        assert_matches!(
            seal.chapter_root_bytes(),
            Err(SealError::CorruptDigest { ref chapter, .. }) if chapter == "Sura 1"
        );
        let mut short = sample_seal();
        short.sealed_root = "abcd".to_string();
        assert_matches!(
            short.sealed_root_bytes(),
            Err(SealError::CorruptDigest { .. })
        );
    }
}
