//! PDF writing module for generating PDF files.
//!
//! This module turns prepared, encoded lines into a complete PDF 1.4 file.
//!
//! ## Architecture
//!
//! ```text
//! lines
//!     ↓
//! [paginate] (fixed number of lines per page)
//!     ↓
//! [ContentStreamBuilder] (one text content stream per page)
//!     ↓
//! [PdfWriter] (object graph, emission with offsets)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! [XrefTable] (xref by ascending id, trailer)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use plainpdf::config::LayoutConfig;
//! use plainpdf::writer::{paginate_with, PdfWriter};
//!
//! let config = LayoutConfig::default();
//! let lines = vec![b"Hello, World!".to_vec()];
//! let mut writer = PdfWriter::new(config.clone())?;
//! for page in paginate_with(&lines, &config)? {
//!     writer.add_page(page.lines)?;
//! }
//! let bytes = writer.finish()?;
//! ```

mod content_stream;
mod object_serializer;
mod paginator;
mod pdf_writer;
mod xref_table;

pub use content_stream::{page_content, ContentStreamBuilder, ContentStreamOp, FONT_RESOURCE};
pub use object_serializer::{escape_literal, format_real, ObjectSerializer};
pub use paginator::{paginate, paginate_with, Page};
pub use pdf_writer::{
    CountingWriter, IndirectObject, ObjectKind, PdfWriter, WriteSummary, CATALOG_ID, FONT_ID,
    PAGES_ID, PDF_HEADER,
};
pub use xref_table::{XrefEntry, XrefTable};
