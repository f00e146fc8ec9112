// src/core/pipeline.rs

//! Per-chapter sealing pipeline: normalize → hash → merkle → seal.
//!
//! Chapters are independent of one another; each call is a pure function
//! of one chapter's ordered units. A failure anywhere in the chapter
//! aborts the whole chapter — no partial `ChapterSeal` is ever produced.

use log::debug;

use crate::core::hash::{unit_digest, Digest32};
use crate::core::merkle::chapter_root;
use crate::core::normalize;
use crate::core::seal::seal;
use crate::corpus::Chapter;
use crate::error::Result;
use crate::manifest::ChapterSeal;

/// Seals one chapter: NFC-normalizes every unit in order, digests each,
/// derives the merkle chapter root, and searches for the minimal sealing
/// nonce. Errors carry `work_id` and the chapter identifier.
pub fn seal_chapter(work_id: &str, chapter: &Chapter) -> Result<ChapterSeal> {
    let unit_digests: Vec<Digest32> = chapter
        .units
        .iter()
        .map(|unit| unit_digest(&normalize::nfc(&unit.raw)))
        .collect();

    let root = chapter_root(work_id, &chapter.id, &unit_digests)?;
    let sealed = seal(&root);
    debug!(
        "sealed chapter '{}' of '{}': {} units, nonce {}",
        chapter.id,
        work_id,
        unit_digests.len(),
        sealed.nonce
    );

    Ok(ChapterSeal::new(
        chapter.id.clone(),
        &unit_digests,
        &root,
        sealed,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::{sha3_256_concat, unit_digest};
    use crate::core::seal::residue_mod19;
    use crate::corpus::TextUnit;
    use crate::error::SealError;
    use assert_matches::assert_matches;

    fn chapter(id: &str, texts: &[&str]) -> Chapter {
        Chapter::new(
            id,
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| TextUnit {
                    unit_index: i as u32 + 1,
                    raw: t.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_single_unit_chapter_root_equals_unit_digest() {
        let sealed = seal_chapter("W", &chapter("Ch 1", &["u3"])).unwrap();
        assert_eq!(sealed.chapter_root, sealed.unit_digests[0]);
    }

    #[test]
    fn test_empty_chapter_fails() {
        let err = seal_chapter("W", &chapter("Ch 0", &[])).unwrap_err();
        assert_matches!(err, SealError::EmptyChapter { ref work, ref chapter }
            if work == "W" && chapter == "Ch 0");
    }

    #[test]
    fn test_pipeline_normalizes_before_hashing() {
        // Composed and decomposed spellings commit to the same seal.
        let composed = seal_chapter("W", &chapter("Ch 1", &["caf\u{00E9}"])).unwrap();
        let decomposed = seal_chapter("W", &chapter("Ch 1", &["cafe\u{0301}"])).unwrap();
        assert_eq!(composed, decomposed);
    }

    #[test]
    fn test_seal_residue_holds() {
        let sealed = seal_chapter("W", &chapter("Ch 1", &["u1", "u2"])).unwrap();
        let root = sealed.chapter_root_bytes().unwrap();
        let published = sealed.sealed_root_bytes().unwrap();
        assert_eq!(residue_mod19(&published), 0);
        assert_eq!(
            published,
            sha3_256_concat(&[&root, &sealed.nonce.to_be_bytes()])
        );
    }

    #[test]
    fn test_sensitivity_to_single_character() {
        let a = seal_chapter("W", &chapter("Ch 1", &["u1", "u2", "u3"])).unwrap();
        let b = seal_chapter("W", &chapter("Ch 1", &["u1", "u2", "u4"])).unwrap();
        assert_ne!(a.chapter_root, b.chapter_root);
        assert_ne!(a.sealed_root, b.sealed_root);
    }

    #[test]
    fn test_unit_digests_preserve_order() {
        let sealed = seal_chapter("W", &chapter("Ch 1", &["first", "second"])).unwrap();
        assert_eq!(
            sealed.unit_digests,
            vec![
                hex::encode(unit_digest("first")),
                hex::encode(unit_digest("second")),
            ]
        );
    }
}
