//! ISO-8859-1 (Latin-1) encoding for content stream text.
//!
//! Helvetica is referenced as a standard Type1 font with no embedded
//! encoding, so each character has to become exactly one byte. Latin-1
//! maps U+0000..=U+00FF onto the byte of the same value; anything above
//! has no code and is handled per [`EncodingPolicy`].

use crate::config::EncodingPolicy;
use crate::error::{Error, Result};

/// Byte written in place of an unencodable character under
/// [`EncodingPolicy::Replace`].
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Encode one line. `line_no` is 1-based and only used for error reporting.
pub fn encode_latin1(text: &str, line_no: usize, policy: EncodingPolicy) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    let mut replaced = 0usize;

    for (idx, ch) in text.chars().enumerate() {
        match u8::try_from(u32::from(ch)) {
            Ok(byte) => out.push(byte),
            Err(_) => match policy {
                EncodingPolicy::Strict => {
                    return Err(Error::Encoding {
                        character: ch,
                        line: line_no,
                        column: idx + 1,
                    });
                },
                EncodingPolicy::Replace => {
                    out.push(REPLACEMENT_BYTE);
                    replaced += 1;
                },
            },
        }
    }

    if replaced > 0 {
        log::warn!(
            "Line {}: replaced {} character(s) outside Latin-1 with '?'",
            line_no,
            replaced
        );
    }

    Ok(out)
}

/// Encode every prepared line, failing on the first unencodable character
/// under the strict policy.
pub fn encode_lines(lines: &[String], policy: EncodingPolicy) -> Result<Vec<Vec<u8>>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| encode_latin1(line, i + 1, policy))
        .collect()
}
