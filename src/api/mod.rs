//! High-level API for converting plain text to PDF.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plainpdf::api::Pdf;
//!
//! let pdf = Pdf::from_text("Hello world")?;
//! pdf.save("hello.pdf")?;
//! ```
//!
//! ## Builder Pattern
//!
//! ```ignore
//! use plainpdf::api::PdfBuilder;
//! use plainpdf::config::PageSize;
//!
//! let pdf = PdfBuilder::new()
//!     .page_size(PageSize::A4)
//!     .margin(54.0)
//!     .max_chars(80)
//!     .from_text("Plain text content")?;
//! ```
//!
//! ## Files
//!
//! [`convert_file`] reads a UTF-8 text file and renders the whole document
//! in memory before the output file is created.

mod pdf_builder;

pub use pdf_builder::{convert_file, render_text, ConversionSummary, Pdf, PdfBuilder};
