//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! Objects live in an arena in generation order and refer to each other by
//! id only. Catalog and Pages carry the lowest ids but are emitted last, so
//! the xref table is keyed by id rather than by emission sequence.

use super::content_stream::{page_content, FONT_RESOURCE};
use super::object_serializer::ObjectSerializer;
use super::xref_table::XrefTable;
use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};
use std::collections::HashMap;
use std::io::Write;

/// File header. Counted in offsets, but not an object.
pub const PDF_HEADER: &[u8] = b"%PDF-1.4\n";

/// Id of the document catalog.
pub const CATALOG_ID: u32 = 1;
/// Id of the page tree root.
pub const PAGES_ID: u32 = 2;
/// Id of the shared Helvetica font.
pub const FONT_ID: u32 = 5;

const RESERVED_IDS: [u32; 3] = [CATALOG_ID, PAGES_ID, FONT_ID];
const FIRST_PAGE_OBJECT_ID: u32 = 3;

/// Role of an object in the document graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Shared Type1 font resource
    Font,
    /// Page content stream
    Content,
    /// Page dictionary
    Page,
    /// Page tree root
    Pages,
    /// Document catalog
    Catalog,
}

impl ObjectKind {
    fn describe(self) -> &'static str {
        match self {
            ObjectKind::Font => "font",
            ObjectKind::Content => "content stream",
            ObjectKind::Page => "page",
            ObjectKind::Pages => "page tree",
            ObjectKind::Catalog => "catalog",
        }
    }
}

/// A numbered object awaiting emission.
#[derive(Debug, Clone)]
pub struct IndirectObject {
    /// Object number
    pub id: u32,
    /// Role in the document
    pub kind: ObjectKind,
    /// Object body
    pub object: Object,
}

/// Hands out per-page object ids, skipping the fixed ids.
#[derive(Debug)]
struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn new() -> Self {
        Self {
            next: FIRST_PAGE_OBJECT_ID,
        }
    }

    fn alloc(&mut self) -> u32 {
        while RESERVED_IDS.contains(&self.next) {
            self.next += 1;
        }
        let id = self.next;
        self.next += 1;
        id
    }
}

/// References whose target role is fixed by the key holding them.
fn typed_edges(object: &Object) -> Vec<(&'static str, ObjectRef, ObjectKind)> {
    let mut edges = Vec::new();
    let Some(dict) = object.as_dict() else {
        return edges;
    };

    for (key, kind) in [
        ("Parent", ObjectKind::Pages),
        ("Pages", ObjectKind::Pages),
        ("Contents", ObjectKind::Content),
    ] {
        if let Some(target) = dict.get(key).and_then(Object::as_reference) {
            edges.push((key, target, kind));
        }
    }
    if let Some(Object::Array(kids)) = dict.get("Kids") {
        edges.extend(
            kids.iter()
                .filter_map(Object::as_reference)
                .map(|target| ("Kids", target, ObjectKind::Page)),
        );
    }
    if let Some(fonts) = dict
        .get("Resources")
        .and_then(Object::as_dict)
        .and_then(|resources| resources.get("Font"))
        .and_then(Object::as_dict)
    {
        edges.extend(
            fonts
                .values()
                .filter_map(Object::as_reference)
                .map(|target| ("Font", target, ObjectKind::Font)),
        );
    }
    edges
}

/// Writer adapter that tracks how many bytes have gone through it.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> CountingWriter<W> {
    /// Wrap a writer, starting the count at zero.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.written
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Counts reported once a document has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    /// Pages in the page tree
    pub pages: usize,
    /// Indirect objects written
    pub objects: usize,
    /// Total bytes written, header through `%%EOF`
    pub bytes: usize,
}

/// PDF document writer.
///
/// ```ignore
/// let mut writer = PdfWriter::new(LayoutConfig::default())?;
/// writer.add_page(&[b"Hello world".to_vec()])?;
/// let bytes = writer.finish()?;
/// ```
pub struct PdfWriter {
    config: LayoutConfig,
    lines_per_page: usize,
    objects: Vec<IndirectObject>,
    page_ids: Vec<u32>,
    ids: IdAllocator,
}

impl PdfWriter {
    /// Create a writer. The font object is generated immediately so it is
    /// the first object in the file.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        let lines_per_page = config.lines_per_page()?;

        let font = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Font")),
            ("Subtype", ObjectSerializer::name("Type1")),
            ("BaseFont", ObjectSerializer::name("Helvetica")),
        ]);

        Ok(Self {
            config,
            lines_per_page,
            objects: vec![IndirectObject {
                id: FONT_ID,
                kind: ObjectKind::Font,
                object: font,
            }],
            page_ids: Vec::new(),
            ids: IdAllocator::new(),
        })
    }

    /// Layout configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Add a page of already-encoded lines. Generates its content stream
    /// and page dictionary, in that order.
    pub fn add_page<L: AsRef<[u8]>>(&mut self, lines: &[L]) -> Result<ObjectRef> {
        if lines.len() > self.lines_per_page {
            return Err(Error::Configuration(format!(
                "page has {} lines but only {} fit",
                lines.len(),
                self.lines_per_page
            )));
        }

        let content = page_content(lines, &self.config)?;
        let content_id = self.ids.alloc();
        let page_id = self.ids.alloc();

        self.objects.push(IndirectObject {
            id: content_id,
            kind: ObjectKind::Content,
            object: Object::Stream {
                dict: ObjectSerializer::dict_entries(vec![(
                    "Length",
                    ObjectSerializer::integer(content.len() as i64),
                )]),
                data: bytes::Bytes::from(content),
            },
        });

        let page = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Page")),
            ("Parent", ObjectSerializer::reference(PAGES_ID, 0)),
            (
                "MediaBox",
                ObjectSerializer::rect(0.0, 0.0, self.config.page_width, self.config.page_height),
            ),
            (
                "Resources",
                ObjectSerializer::dict(vec![(
                    "Font",
                    ObjectSerializer::dict(vec![(
                        FONT_RESOURCE,
                        ObjectSerializer::reference(FONT_ID, 0),
                    )]),
                )]),
            ),
            ("Contents", ObjectSerializer::reference(content_id, 0)),
        ]);
        self.objects.push(IndirectObject {
            id: page_id,
            kind: ObjectKind::Page,
            object: page,
        });
        self.page_ids.push(page_id);

        log::debug!(
            "Page {}: {} lines, content {} 0 R, page {} 0 R",
            self.page_ids.len(),
            lines.len(),
            content_id,
            page_id
        );
        Ok(ObjectRef::new(page_id, 0))
    }

    /// Generate the page tree and catalog, which close the object graph.
    fn close_graph(&mut self) {
        let kids = self
            .page_ids
            .iter()
            .map(|&id| ObjectSerializer::reference(id, 0))
            .collect();

        self.objects.push(IndirectObject {
            id: PAGES_ID,
            kind: ObjectKind::Pages,
            object: ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Count", ObjectSerializer::integer(self.page_ids.len() as i64)),
                ("Kids", ObjectSerializer::array(kids)),
            ]),
        });

        self.objects.push(IndirectObject {
            id: CATALOG_ID,
            kind: ObjectKind::Catalog,
            object: ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(PAGES_ID, 0)),
            ]),
        });
    }

    /// Check that ids are unique, every reference resolves, and the keys
    /// with a fixed target role point at an object of that role.
    fn validate_graph(&self) -> Result<()> {
        let mut kinds = HashMap::with_capacity(self.objects.len());
        for obj in &self.objects {
            if kinds.insert(obj.id, obj.kind).is_some() {
                return Err(Error::DuplicateObject(obj.id));
            }
        }
        for obj in &self.objects {
            if let Some(missing) = obj.object.references().iter().find(|r| !kinds.contains_key(&r.id)) {
                return Err(Error::DanglingReference {
                    from: obj.id,
                    to: missing.id,
                });
            }
            for (key, target, expected) in typed_edges(&obj.object) {
                if kinds.get(&target.id) != Some(&expected) {
                    return Err(Error::WrongTarget {
                        from: obj.id,
                        key: key.to_string(),
                        to: target.id,
                        expected: expected.describe().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Write the complete document to `sink`.
    ///
    /// Each object's offset is taken from the running byte count right
    /// before its bytes go out.
    pub fn write_to<W: Write>(mut self, sink: W) -> Result<WriteSummary> {
        self.close_graph();
        self.validate_graph()?;

        let serializer = ObjectSerializer::new();
        let mut out = CountingWriter::new(sink);
        let mut xref = XrefTable::new();

        out.write_all(PDF_HEADER)?;

        for obj in &self.objects {
            xref.record(obj.id, out.position())?;
            serializer.write_indirect(&mut out, obj.id, 0, &obj.object)?;
        }

        let xref_offset = out.position();
        xref.write_with_trailer(&mut out, CATALOG_ID, xref_offset)?;
        out.flush()?;

        let summary = WriteSummary {
            pages: self.page_ids.len(),
            objects: self.objects.len(),
            bytes: out.position(),
        };
        log::info!(
            "Wrote PDF: {} pages, {} objects, {} bytes (xref at {})",
            summary.pages,
            summary.objects,
            summary.bytes,
            xref_offset
        );
        Ok(summary)
    }

    /// Build the complete PDF document in memory.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_to(&mut output)?;
        Ok(output)
    }
}
