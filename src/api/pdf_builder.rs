//! Text-to-PDF conversion entry points.

use crate::config::{EncodingPolicy, LayoutConfig, PageSize};
use crate::error::Result;
use crate::text::{encode_lines, prepare_lines};
use crate::writer::{paginate_with, PdfWriter, WriteSummary};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// What a conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Wrapped lines laid out
    pub lines: usize,
    /// Pages in the document
    pub pages: usize,
    /// Indirect objects in the document
    pub objects: usize,
    /// Size of the document in bytes
    pub bytes: usize,
}

/// A rendered PDF document.
#[derive(Debug, Clone)]
pub struct Pdf {
    bytes: Vec<u8>,
    summary: ConversionSummary,
}

impl Pdf {
    /// Render plain text with the default layout.
    pub fn from_text(content: &str) -> Result<Self> {
        PdfBuilder::new().from_text(content)
    }

    /// Get the PDF bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the PDF bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Counts describing the document.
    pub fn summary(&self) -> ConversionSummary {
        self.summary
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.summary.pages
    }

    /// Save the PDF to a file.
    ///
    /// The file handle is scoped to this call. If writing fails part way the
    /// incomplete file is removed before the error is returned.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Err(e) = write_file(path, &self.bytes) {
            if let Err(cleanup) = fs::remove_file(path) {
                log::warn!("Could not remove incomplete {}: {}", path.display(), cleanup);
            }
            return Err(e.into());
        }
        log::debug!("Saved {} bytes to {}", self.bytes.len(), path.display());
        Ok(())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(bytes)?;
    out.flush()?;
    out.into_inner().map_err(|e| e.into_error())?.sync_all()
}

/// Builder for creating PDFs with custom layout.
///
/// # Example
///
/// ```ignore
/// use plainpdf::api::PdfBuilder;
/// use plainpdf::config::PageSize;
///
/// let pdf = PdfBuilder::new()
///     .page_size(PageSize::Legal)
///     .font_size(10.0)
///     .line_height(12.0)
///     .from_text("Hello")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfBuilder {
    config: LayoutConfig,
}

impl PdfBuilder {
    /// Create a new builder with default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing layout configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Set the page size.
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config = self.config.with_page_size(size);
        self
    }

    /// Set all margins.
    pub fn margin(mut self, margin: f64) -> Self {
        self.config = self.config.with_margin(margin);
        self
    }

    /// Set the font size.
    pub fn font_size(mut self, size: f64) -> Self {
        self.config = self.config.with_font_size(size);
        self
    }

    /// Set the line height.
    pub fn line_height(mut self, height: f64) -> Self {
        self.config = self.config.with_line_height(height);
        self
    }

    /// Set the wrap column.
    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.config = self.config.with_max_chars(max_chars);
        self
    }

    /// Set the handling of characters outside Latin-1.
    pub fn encoding(mut self, policy: EncodingPolicy) -> Self {
        self.config = self.config.with_encoding(policy);
        self
    }

    /// Layout configuration that will be used.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Render plain text.
    pub fn from_text(self, content: &str) -> Result<Pdf> {
        let mut bytes = Vec::new();
        let summary = render_into(content, &self.config, &mut bytes)?;
        Ok(Pdf { bytes, summary })
    }
}

/// Render plain text to PDF bytes.
pub fn render_text(content: &str, config: &LayoutConfig) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    render_into(content, config, &mut bytes)?;
    Ok(bytes)
}

/// Whole pipeline: validate, wrap, encode, paginate, assemble.
///
/// Every fallible step that depends on the input runs before the first
/// byte reaches `sink`.
fn render_into<W: Write>(content: &str, config: &LayoutConfig, sink: W) -> Result<ConversionSummary> {
    config.validate()?;

    let lines = prepare_lines(content, config.max_chars)?;
    let encoded = encode_lines(&lines, config.encoding)?;
    let pages = paginate_with(&encoded, config)?;

    let mut writer = PdfWriter::new(config.clone())?;
    for page in &pages {
        writer.add_page(page.lines)?;
    }
    let WriteSummary {
        pages,
        objects,
        bytes,
    } = writer.write_to(sink)?;

    Ok(ConversionSummary {
        lines: lines.len(),
        pages,
        objects,
        bytes,
    })
}

/// Convert a UTF-8 text file into a PDF file.
///
/// Nothing is created at `output` unless the whole document rendered.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &LayoutConfig,
) -> Result<ConversionSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    let content = fs::read_to_string(input)?;
    log::info!("Read {} bytes from {}", content.len(), input.display());

    let pdf = PdfBuilder::with_config(config.clone()).from_text(&content)?;
    pdf.save(output)?;
    Ok(pdf.summary())
}
