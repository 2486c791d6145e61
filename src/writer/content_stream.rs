//! PDF content stream builder.
//!
//! Builds PDF content streams containing text operators according to
//! PDF specification ISO 32000-1:2008 Section 9.4.

use super::object_serializer::{escape_literal, format_real};
use crate::config::LayoutConfig;
use std::io::Write;

/// Resource name under which every page exposes the shared font.
pub const FONT_RESOURCE: &str = "F1";

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f64),
    /// Move text position relative to the start of the current line (Td)
    MoveText(f64, f64),
    /// Show text (Tj). Holds already-encoded bytes; escaping happens on write.
    ShowText(Vec<u8>),
}

/// Builder for content streams.
///
/// Operators are written one per line, separated by `\n`, with no trailing
/// newline after the last one.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font resource name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f64,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Select a font resource and size.
    pub fn set_font(&mut self, resource: &str, size: f64) -> &mut Self {
        if self.current_font.as_deref() != Some(resource) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(resource.to_string(), size));
            self.current_font = Some(resource.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Move the text cursor.
    pub fn move_text(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.op(ContentStreamOp::MoveText(tx, ty))
    }

    /// Show encoded text at the current position.
    pub fn show_text(&mut self, encoded: &[u8]) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::ShowText(encoded.to_vec()))
    }

    /// Number of operations queued.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operation has been queued.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Build the content stream bytes.
    pub fn build(&self) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();

        for (i, op) in self.operations.iter().enumerate() {
            if i > 0 {
                buf.push(b'\n');
            }
            self.write_op(&mut buf, op)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => {
                write!(w, "/{} {} Tf", name, format_real(*size))
            },
            ContentStreamOp::MoveText(tx, ty) => {
                write!(w, "{} {} Td", format_real(*tx), format_real(*ty))
            },
            ContentStreamOp::ShowText(bytes) => {
                w.write_all(b"(")?;
                w.write_all(&escape_literal(bytes))?;
                w.write_all(b") Tj")
            },
        }
    }
}

/// Build the text content stream for one page of encoded lines.
///
/// The cursor starts at the top-left corner of the text area and moves down
/// one line height after every line.
pub fn page_content<L: AsRef<[u8]>>(lines: &[L], config: &LayoutConfig) -> std::io::Result<Vec<u8>> {
    let mut builder = ContentStreamBuilder::new();
    builder
        .begin_text()
        .set_font(FONT_RESOURCE, config.font_size)
        .move_text(config.margin_left, config.page_height - config.margin_top);

    for line in lines {
        builder
            .show_text(line.as_ref())
            .move_text(0.0, -config.line_height);
    }

    builder.end_text();
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("F1", 12.0)
            .move_text(72.0, 720.0)
            .show_text(b"Hello, World!")
            .end_text();

        let bytes = builder.build().unwrap();
        assert_eq!(
            String::from_utf8_lossy(&bytes),
            "BT\n/F1 12 Tf\n72 720 Td\n(Hello, World!) Tj\nET"
        );
    }

    #[test]
    fn test_begin_end_are_idempotent() {
        let mut builder = ContentStreamBuilder::new();
        builder.begin_text().begin_text().end_text().end_text();
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_repeated_font_not_reemitted() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 11.0).set_font("F1", 11.0).set_font("F1", 12.0);
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_show_text_escapes() {
        let mut builder = ContentStreamBuilder::new();
        builder.show_text(b"f(x) = \\y").end_text();
        let bytes = builder.build().unwrap();
        assert_eq!(String::from_utf8_lossy(&bytes), "BT\n(f\\(x\\) = \\\\y) Tj\nET");
    }

    #[test]
    fn test_page_content_layout() {
        let config = LayoutConfig::default();
        let lines: Vec<Vec<u8>> = vec![b"first".to_vec(), Vec::new(), b"third".to_vec()];
        let bytes = page_content(&lines, &config).unwrap();
        assert_eq!(
            String::from_utf8_lossy(&bytes),
            "BT\n/F1 11 Tf\n72 720 Td\n(first) Tj\n0 -14 Td\n() Tj\n0 -14 Td\n(third) Tj\n0 -14 Td\nET"
        );
    }

    #[test]
    fn test_page_content_keeps_high_bytes() {
        let config = LayoutConfig::default();
        let bytes = page_content(&[vec![0xE9u8]], &config).unwrap();
        assert!(bytes.windows(5).any(|w| w == [b'(', 0xE9, b')', b' ', b'T']));
    }

    #[test]
    fn test_fractional_metrics() {
        let config = LayoutConfig::default().with_font_size(10.5).with_line_height(12.25);
        let bytes = page_content(&[b"x"], &config).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/F1 10.5 Tf"));
        assert!(text.contains("0 -12.25 Td"));
    }
}
