//! Error types for the scripture-seal system
//!
//! This module defines the error types used throughout the manifest builder.
//! The main error type is `SealError`, which covers every failure mode of
//! corpus loading, chapter sealing, and manifest verification. Every variant
//! that concerns a chapter carries the work and chapter identifiers so the
//! offending input can be located without a debugger.

use thiserror::Error;

/// Main error type for the scripture-seal system
#[derive(Error, Debug)]
pub enum SealError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error (JSON): {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A text unit is not valid Unicode. The whole chapter is aborted; a
    /// manifest must never contain a chapter built from partially
    /// normalized units.
    #[error("Encoding error in work '{work}', chapter '{chapter}': {detail}")]
    Encoding {
        /// The work the undecodable unit belongs to.
        work: String,
        /// The chapter the undecodable unit belongs to.
        chapter: String,
        /// What failed to decode.
        detail: String,
    },

    /// A chapter contains zero units; a merkle root cannot be derived.
    #[error("Empty chapter '{chapter}' in work '{work}': chapters must contain at least one unit")]
    EmptyChapter {
        /// The work the empty chapter belongs to.
        work: String,
        /// The identifier of the empty chapter.
        chapter: String,
    },

    /// A corpus line could not be parsed into a unit reference.
    #[error("Corpus parse error in work '{work}' at line {line}: {detail}")]
    CorpusParse {
        /// The work being loaded.
        work: String,
        /// 1-based line number in the corpus file.
        line: usize,
        /// What was wrong with the line.
        detail: String,
    },

    /// A manifest digest field is not a well-formed 32-byte hex string.
    #[error("Corrupt digest in chapter '{chapter}': {detail}")]
    CorruptDigest {
        /// The chapter whose entry holds the bad digest.
        chapter: String,
        /// Which field, and how it is malformed.
        detail: String,
    },

    /// Re-verification recomputed a value that disagrees with the manifest.
    #[error("Seal mismatch in chapter '{chapter}': {detail}")]
    SealMismatch {
        /// The chapter whose entry failed re-verification.
        chapter: String,
        /// Which recomputed value disagreed, and how.
        detail: String,
    },

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for operations that can fail with a [SealError]
pub type Result<T> = std::result::Result<T, SealError>;

impl SealError {
    /// Create a new encoding error with work/chapter context.
    pub fn encoding<W, C, D>(work: W, chapter: C, detail: D) -> Self
    where
        W: Into<String>,
        C: Into<String>,
        D: Into<String>,
    {
        SealError::Encoding {
            work: work.into(),
            chapter: chapter.into(),
            detail: detail.into(),
        }
    }

    /// Create a new empty chapter error.
    pub fn empty_chapter<W: Into<String>, C: Into<String>>(work: W, chapter: C) -> Self {
        SealError::EmptyChapter {
            work: work.into(),
            chapter: chapter.into(),
        }
    }

    /// Create a new corrupt digest error.
    pub fn corrupt_digest<C: Into<String>, D: Into<String>>(chapter: C, detail: D) -> Self {
        SealError::CorruptDigest {
            chapter: chapter.into(),
            detail: detail.into(),
        }
    }

    /// Create a new seal mismatch error.
    pub fn seal_mismatch<C: Into<String>, D: Into<String>>(chapter: C, detail: D) -> Self {
        SealError::SealMismatch {
            chapter: chapter.into(),
            detail: detail.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        SealError::InvalidInput(msg.into())
    }
}

impl From<&str> for SealError {
    fn from(s: &str) -> Self {
        SealError::InvalidInput(s.to_string())
    }
}

impl From<String> for SealError {
    fn from(s: String) -> Self {
        SealError::InvalidInput(s)
    }
}
