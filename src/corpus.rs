// src/corpus.rs

//! In-memory corpus model and the verse-per-line corpus loader.
//!
//! A work arrives as an ordered sequence of chapters, each an ordered
//! sequence of text units. How the bytes got onto disk (remote fetch,
//! cache, hand edit) is the fetching collaborator's business; this module
//! only materializes them. Unit order within a chapter is fixed at
//! construction and never reordered — it is part of what gets committed.

use serde::{Deserialize, Serialize};

use crate::core::normalize;
use crate::error::{Result, SealError};

/// A single ordered textual item (one verse) within a chapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextUnit {
    /// Position of the unit within its chapter, as given by the source.
    pub unit_index: u32,
    /// Text content as decoded from the source. Loaders may hand this
    /// over pre-composed; the sealing pipeline normalizes regardless.
    pub raw: String,
}

/// An ordered sequence of text units sealed as one commitment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
    /// Chapter/section identifier (e.g. "Sura 1", "Bereshit").
    pub id: String,
    /// Units in source order.
    pub units: Vec<TextUnit>,
}

/// A whole work: ordered chapters plus the work identifier used in error
/// context and provenance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Work {
    /// Work identifier (e.g. "QURAN").
    pub id: String,
    /// Chapters in canonical order.
    pub chapters: Vec<Chapter>,
}

impl Chapter {
    /// Creates a chapter from already-decoded units.
    pub fn new<S: Into<String>>(id: S, units: Vec<TextUnit>) -> Self {
        Self {
            id: id.into(),
            units,
        }
    }
}

impl Work {
    /// Creates a work from already-assembled chapters.
    pub fn new<S: Into<String>>(id: S, chapters: Vec<Chapter>) -> Self {
        Self {
            id: id.into(),
            chapters,
        }
    }

    /// Parses a verse-per-line corpus of the form `CHAPTER:UNIT|TEXT`
    /// (the Tanzil text-format convention) from raw bytes.
    ///
    /// Chapters appear in the manifest in first-seen order; units keep
    /// file order within their chapter. Blank lines and lines without a
    /// `|` delimiter are skipped. Each unit's text is decoded
    /// individually so an undecodable verse is reported with its chapter,
    /// not just a file offset; a malformed reference before the delimiter
    /// is a [`SealError::CorpusParse`].
    pub fn parse_verse_lines(work_id: &str, bytes: &[u8], chapter_prefix: &str) -> Result<Self> {
        let mut chapter_order: Vec<String> = Vec::new();
        let mut chapters: std::collections::HashMap<String, Vec<TextUnit>> =
            std::collections::HashMap::new();

        for (line_no, line) in bytes.split(|&b| b == b'\n').enumerate() {
            let line = trim_ascii(line);
            if line.is_empty() {
                continue;
            }
            let Some(pipe) = line.iter().position(|&b| b == b'|') else {
                continue;
            };
            let (reference, text) = (&line[..pipe], &line[pipe + 1..]);

            // The reference part is expected to be ASCII "C:V".
            let reference = std::str::from_utf8(reference).map_err(|_| SealError::CorpusParse {
                work: work_id.to_string(),
                line: line_no + 1,
                detail: "unit reference is not valid UTF-8".to_string(),
            })?;
            let (chapter_no, unit_no) =
                reference
                    .split_once(':')
                    .ok_or_else(|| SealError::CorpusParse {
                        work: work_id.to_string(),
                        line: line_no + 1,
                        detail: format!("unit reference '{}' is missing ':'", reference),
                    })?;
            let unit_index: u32 = unit_no.trim().parse().map_err(|_| SealError::CorpusParse {
                work: work_id.to_string(),
                line: line_no + 1,
                detail: format!("unit number '{}' is not an integer", unit_no),
            })?;

            let chapter_id = format!("{}{}", chapter_prefix, chapter_no.trim());
            let raw = normalize::nfc_bytes(text)
                .map_err(|detail| SealError::encoding(work_id, &chapter_id, detail))?;

            if !chapters.contains_key(&chapter_id) {
                chapter_order.push(chapter_id.clone());
            }
            chapters
                .entry(chapter_id)
                .or_default()
                .push(TextUnit { unit_index, raw });
        }

        let chapters = chapter_order
            .into_iter()
            .map(|id| {
                let units = chapters.remove(&id).unwrap_or_default();
                Chapter { id, units }
            })
            .collect();
        Ok(Self {
            id: work_id.to_string(),
            chapters,
        })
    }

    /// Reads and parses a verse-per-line corpus file.
    pub fn load_verse_file<P: AsRef<std::path::Path>>(
        work_id: &str,
        path: P,
        chapter_prefix: &str,
    ) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse_verse_lines(work_id, &bytes, chapter_prefix)
    }
}

/// Trims ASCII whitespace (and a stray `\r`) from both ends of a line.
fn trim_ascii(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}
