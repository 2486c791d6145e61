//! Line splitting and word wrapping.
//!
//! Widths are measured in characters, not font units: the layout uses a
//! fixed column count instead of glyph metrics.
//!
//! # Rules
//!
//! - Source lines end at `\n`, `\r\n`, a lone `\r`, and the other
//!   Unicode line boundaries (VT, FF, FS, GS, RS, NEL, LS, PS). A final
//!   terminator does not start an extra empty line.
//! - Blank and whitespace-only source lines become a single empty line so
//!   paragraph spacing survives.
//! - A line that already fits is kept verbatim, inner spacing included.
//! - Longer lines are split on single spaces and packed greedily.
//! - A word longer than the column limit is never broken; it gets a line of
//!   its own.

use crate::error::{Error, Result};

/// Split `text` into wrapped lines no wider than `max_chars` columns
/// (except for single overlong words).
pub fn prepare_lines(text: &str, max_chars: usize) -> Result<Vec<String>> {
    if max_chars == 0 {
        return Err(Error::Configuration("max_chars must be at least 1".to_string()));
    }

    let mut lines = Vec::new();
    let mut source_count = 0usize;
    for line in source_lines(text) {
        source_count += 1;
        if line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(wrap_line(line, max_chars));
    }

    log::debug!(
        "Prepared {} source lines into {} wrapped lines (max {} columns)",
        source_count,
        lines.len(),
        max_chars
    );
    Ok(lines)
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every line boundary, treating `\r\n` as one.
fn source_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Wrap a single logical line.
///
/// Words are the pieces between single spaces, so runs of spaces yield
/// empty words; those are packed like any other word.
pub fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
