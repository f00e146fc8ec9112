// src/core/normalize.rs

//! Unicode canonicalization of raw text units.
//!
//! Every unit is hashed in NFC (canonical composition) form so that two
//! editions differing only in combining-character order commit to the same
//! bytes. Normalization is pure and deterministic; the only failure mode is
//! input that is not valid UTF-8, which surfaces at the byte boundary in
//! [`nfc_bytes`].

use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Returns the NFC (canonical composed) form of `raw`.
///
/// Skips the allocation when the input is already composed, which is the
/// common case for published corpus files.
pub fn nfc(raw: &str) -> String {
    if is_nfc(raw) {
        raw.to_string()
    } else {
        raw.nfc().collect()
    }
}

/// Decodes `bytes` as UTF-8 and returns the NFC form.
///
/// This is where the encoding failure mode of the pipeline lives: Rust
/// guarantees `&str` is valid Unicode, so undecodable input can only enter
/// through raw bytes. The error message carries the byte offset; callers
/// attach work/chapter context.
pub fn nfc_bytes(bytes: &[u8]) -> Result<String, String> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(nfc(s)),
        Err(e) => Err(format!("invalid UTF-8 at byte {}", e.valid_up_to())),
    }
}
