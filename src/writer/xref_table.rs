//! Cross-reference table and trailer writer.
//!
//! Offsets are collected keyed by object id while objects are emitted, then
//! read back in ascending id order. The emission order of the body never
//! leaks into the table.

use crate::error::{Error, Result};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::Write;

/// Generation number written for the head of the free list.
const FREE_HEAD_GENERATION: u16 = 65535;

/// One 20-byte xref entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrefEntry {
    /// In-use object at a byte offset
    InUse {
        /// Byte offset of `"<id> <gen> obj"`
        offset: usize,
        /// Generation number
        gen: u16,
    },
    /// Free object, linked to the next free object number
    Free {
        /// Next free object number (0 terminates the list)
        next: u32,
        /// Generation number
        gen: u16,
    },
}

impl XrefEntry {
    /// Write the entry as exactly 20 bytes: `nnnnnnnnnn ggggg n \n`.
    pub fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match self {
            XrefEntry::InUse { offset, gen } => writeln!(w, "{:010} {:05} n ", offset, gen),
            XrefEntry::Free { next, gen } => writeln!(w, "{:010} {:05} f ", next, gen),
        }
    }
}

/// Offsets of emitted objects, keyed by id.
#[derive(Debug, Default, Clone)]
pub struct XrefTable {
    offsets: BTreeMap<u32, usize>,
}

impl XrefTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where object `id` starts. Each id may be recorded once.
    pub fn record(&mut self, id: u32, offset: usize) -> Result<()> {
        if id == 0 {
            return Err(Error::InvalidXref("object number 0 is reserved".to_string()));
        }
        match self.offsets.entry(id) {
            Entry::Occupied(_) => Err(Error::DuplicateObject(id)),
            Entry::Vacant(slot) => {
                slot.insert(offset);
                Ok(())
            },
        }
    }

    /// Offset recorded for `id`, if any.
    pub fn offset(&self, id: u32) -> Option<usize> {
        self.offsets.get(&id).copied()
    }

    /// Number of in-use objects.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// `/Size` of the trailer: highest object number plus one.
    pub fn size(&self) -> u32 {
        self.offsets.keys().next_back().map_or(1, |max| max + 1)
    }

    /// Entries for ids `0..size`, in ascending id order.
    ///
    /// Ids without an object are free entries chained from entry 0, so a
    /// table with gaps still forms a valid free list.
    pub fn entries(&self) -> Vec<XrefEntry> {
        let size = self.size();
        let free: Vec<u32> = (1..size).filter(|id| !self.offsets.contains_key(id)).collect();

        let mut entries = Vec::with_capacity(size as usize);
        entries.push(XrefEntry::Free {
            next: free.first().copied().unwrap_or(0),
            gen: FREE_HEAD_GENERATION,
        });

        let mut free_iter = free.iter().skip(1);
        for id in 1..size {
            match self.offsets.get(&id) {
                Some(&offset) => entries.push(XrefEntry::InUse { offset, gen: 0 }),
                None => entries.push(XrefEntry::Free {
                    next: free_iter.next().copied().unwrap_or(0),
                    gen: 0,
                }),
            }
        }
        entries
    }

    /// Write the `xref` section, the trailer, `startxref` and `%%EOF`.
    ///
    /// `xref_offset` is the byte position at which the `xref` keyword starts.
    pub fn write_with_trailer<W: Write>(
        &self,
        w: &mut W,
        root: u32,
        xref_offset: usize,
    ) -> std::io::Result<()> {
        let size = self.size();
        writeln!(w, "xref")?;
        writeln!(w, "0 {}", size)?;
        for entry in self.entries() {
            entry.write(w)?;
        }
        writeln!(w, "trailer")?;
        writeln!(w, "<< /Size {} /Root {} 0 R >>", size, root)?;
        writeln!(w, "startxref")?;
        writeln!(w, "{}", xref_offset)?;
        writeln!(w, "%%EOF")
    }
}
