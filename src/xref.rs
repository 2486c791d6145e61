//! Cross-reference table checker.
//!
//! Reads back a finished document and confirms that its classic xref table
//! really indexes the body: `startxref` points at the `xref` keyword, and
//! every in-use entry points at the matching `"<id> <gen> obj"` header.
//!
//! Only what the writer produces is understood: one xref section with a
//! single subsection and a plain trailer dictionary. Cross-reference
//! streams and incremental updates are reported as invalid.

use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::writer::XrefEntry;
use std::path::Path;

/// Every classic xref entry is exactly this long, end-of-line included.
const ENTRY_LEN: usize = 20;
const STARTXREF: &[u8] = b"startxref";

/// Parsed and verified file structure.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStructure {
    /// Offset of the `xref` keyword, as declared after `startxref`
    pub startxref: usize,
    /// `/Size` from the trailer
    pub size: u32,
    /// `/Root` from the trailer
    pub root: ObjectRef,
    /// Entries in table order, paired with their object number
    pub entries: Vec<(u32, XrefEntry)>,
}

impl DocumentStructure {
    /// Number of in-use objects.
    pub fn object_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, e)| matches!(e, XrefEntry::InUse { .. }))
            .count()
    }

    /// Offset of an in-use object.
    pub fn offset(&self, id: u32) -> Option<usize> {
        self.entries.iter().find_map(|(n, e)| match e {
            XrefEntry::InUse { offset, .. } if *n == id => Some(*offset),
            _ => None,
        })
    }
}

/// Find the byte offset declared after the last `startxref` keyword.
pub fn find_xref_offset(data: &[u8]) -> Result<usize> {
    let pos = data
        .windows(STARTXREF.len())
        .rposition(|w| w == STARTXREF)
        .ok_or_else(|| Error::InvalidXref("startxref keyword not found".to_string()))?;

    let after = &data[pos + STARTXREF.len()..];
    let digits: Vec<u8> = after
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take_while(|b| b.is_ascii_digit())
        .copied()
        .collect();

    parse_number(&digits).ok_or_else(|| Error::ParseError {
        offset: pos + STARTXREF.len(),
        reason: "startxref is not followed by an offset".to_string(),
    })
}

/// Parse and verify the xref table and trailer of a complete document.
pub fn parse_document_structure(data: &[u8]) -> Result<DocumentStructure> {
    let startxref = find_xref_offset(data)?;
    if !data.get(startxref..).is_some_and(|rest| rest.starts_with(b"xref")) {
        return Err(Error::InvalidXref(format!(
            "startxref points at byte {} which is not an xref keyword",
            startxref
        )));
    }

    let mut pos = startxref;
    let keyword = next_line(data, &mut pos);
    if keyword.map(trim_ascii) != Some(b"xref".as_slice()) {
        return Err(Error::InvalidXref("xref keyword not on its own line".to_string()));
    }

    let header_pos = pos;
    let header = next_line(data, &mut pos)
        .ok_or_else(|| Error::InvalidXref("missing subsection header".to_string()))?;
    let (first, count) = parse_subsection_header(header).ok_or_else(|| Error::ParseError {
        offset: header_pos,
        reason: "malformed subsection header".to_string(),
    })?;

    let mut entries = Vec::with_capacity(count as usize);
    for i in 0..count {
        let raw = data.get(pos..pos + ENTRY_LEN).ok_or_else(|| Error::ParseError {
            offset: pos,
            reason: "xref table truncated".to_string(),
        })?;
        let entry = parse_entry(raw).ok_or_else(|| Error::ParseError {
            offset: pos,
            reason: format!("malformed xref entry for object {}", first + i),
        })?;
        entries.push((first + i, entry));
        pos += ENTRY_LEN;
    }

    let trailer_pos = pos;
    if next_line(data, &mut pos).map(trim_ascii) != Some(b"trailer".as_slice()) {
        return Err(Error::ParseError {
            offset: trailer_pos,
            reason: "expected trailer after xref entries".to_string(),
        });
    }
    let (size, root) = parse_trailer(&data[pos..]).ok_or_else(|| Error::ParseError {
        offset: pos,
        reason: "trailer lacks /Size or /Root".to_string(),
    })?;

    if first != 0 || size != count {
        return Err(Error::InvalidXref(format!(
            "subsection {} {} does not cover /Size {}",
            first, count, size
        )));
    }

    for (id, entry) in &entries {
        if let XrefEntry::InUse { offset, gen } = entry {
            let header = format!("{} {} obj", id, gen);
            if !data.get(*offset..).is_some_and(|rest| rest.starts_with(header.as_bytes())) {
                return Err(Error::InvalidXref(format!(
                    "entry for object {} points at byte {} which does not start \"{}\"",
                    id, offset, header
                )));
            }
        }
    }

    let structure = DocumentStructure {
        startxref,
        size,
        root,
        entries,
    };
    if structure.offset(root.id).is_none() {
        return Err(Error::InvalidXref(format!("root {} is not an in-use object", root)));
    }

    log::debug!(
        "Verified xref at {}: {} entries, {} in use, root {}",
        structure.startxref,
        structure.entries.len(),
        structure.object_count(),
        structure.root
    );
    Ok(structure)
}

/// Read a file and verify its structure.
pub fn check_file(path: impl AsRef<Path>) -> Result<DocumentStructure> {
    let data = std::fs::read(path)?;
    parse_document_structure(&data)
}

fn next_line<'a>(data: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    let rest = data.get(*pos..)?;
    if rest.is_empty() {
        return None;
    }
    let end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
    *pos += (end + 1).min(rest.len());
    Some(&rest[..end])
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &bytes[start..end]
}

fn parse_number<T: std::str::FromStr>(bytes: &[u8]) -> Option<T> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

fn parse_subsection_header(line: &[u8]) -> Option<(u32, u32)> {
    let mut parts = trim_ascii(line).split(|b| *b == b' ').filter(|p| !p.is_empty());
    let first = parse_number(parts.next()?)?;
    let count = parse_number(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, count))
}

/// `nnnnnnnnnn ggggg n` followed by a two-byte end of line.
fn parse_entry(raw: &[u8]) -> Option<XrefEntry> {
    if raw[10] != b' ' || raw[16] != b' ' {
        return None;
    }
    if !matches!(&raw[18..20], b" \n" | b" \r" | b"\r\n") {
        return None;
    }
    let field: usize = parse_number(&raw[0..10])?;
    let gen: u16 = parse_number(&raw[11..16])?;
    match raw[17] {
        b'n' => Some(XrefEntry::InUse { offset: field, gen }),
        b'f' => Some(XrefEntry::Free {
            next: u32::try_from(field).ok()?,
            gen,
        }),
        _ => None,
    }
}

fn parse_trailer(data: &[u8]) -> Option<(u32, ObjectRef)> {
    let text = std::str::from_utf8(data).ok()?;
    let start = text.find("<<")?;
    let end = start + text[start..].find(">>")?;
    let tokens: Vec<&str> = text[start + 2..end].split_whitespace().collect();

    let mut size = None;
    let mut root = None;
    for (i, token) in tokens.iter().enumerate() {
        match *token {
            "/Size" => size = tokens.get(i + 1)?.parse().ok(),
            "/Root" => {
                let id = tokens.get(i + 1)?.parse().ok()?;
                let gen = tokens.get(i + 2)?.parse().ok()?;
                if *tokens.get(i + 3)? != "R" {
                    return None;
                }
                root = Some(ObjectRef::new(id, gen));
            },
            _ => {},
        }
    }
    Some((size?, root?))
}
