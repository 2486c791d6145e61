// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::should_implement_trait)]

//! # plainpdf
//!
//! Plain text to PDF, with nothing in between: no rendering engine, no font
//! files, no compression. Text is wrapped at a fixed column, paginated on a
//! fixed line pitch and shown in the standard Helvetica font.
//!
//! ## Core Features
//!
//! - **Byte-exact output**: PDF 1.4 header, indirect objects, one text
//!   content stream per page, classic xref table and trailer
//! - **Stable object numbering**: catalog 1, page tree 2, font 5, page
//!   content/page pairs from 3 upwards; the xref table is always in
//!   ascending id order
//! - **Strict encoding**: text is written as Latin-1; characters outside it
//!   fail the conversion unless replacement is requested
//! - **Self check**: [`xref::parse_document_structure`] re-reads a document
//!   and verifies every xref offset
//!
//! ## Architecture
//!
//! ```text
//! text ─► text::prepare_lines ─► text::encode_lines ─► writer::paginate
//!      ─► writer::PdfWriter (objects + offsets) ─► writer::XrefTable ─► bytes
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use plainpdf::api::{convert_file, Pdf};
//! use plainpdf::config::LayoutConfig;
//!
//! let pdf = Pdf::from_text("Hello world")?;
//! pdf.save("hello.pdf")?;
//!
//! let summary = convert_file("notes.md", "notes.pdf", &LayoutConfig::default())?;
//! println!("{} pages", summary.pages);
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Object model and structure checking
pub mod object;
pub mod xref;

// Text preparation
pub mod text;

// PDF writing
pub mod writer;

// High-level API
pub mod api;

// Re-exports
pub use api::{convert_file, render_text, ConversionSummary, Pdf, PdfBuilder};
pub use config::{EncodingPolicy, LayoutConfig, PageSize};
pub use error::{Error, Result};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
