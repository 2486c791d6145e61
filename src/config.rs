//! Layout configuration for text-to-PDF conversion.
//!
//! The defaults reproduce the classic letter-size listing: 72pt margins,
//! 11pt Helvetica on a 14pt line pitch, wrapped at 90 columns.

use crate::error::{Error, Result};

/// Largest page side, margin, font size or line height accepted, in
/// points. PDF 1.4 viewers cap page sides at 200 inches.
pub const MAX_PAGE_DIMENSION: f64 = 14_400.0;

/// Standard page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    #[default]
    Letter,
    /// A4 (210mm x 297mm)
    A4,
    /// Legal (8.5" x 14")
    Legal,
    /// Custom dimensions in points
    Custom(f64, f64),
}

impl PageSize {
    /// Get dimensions in points (1 inch = 72 points).
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

/// What to do with characters that have no single-byte (Latin-1) code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingPolicy {
    /// Fail the conversion with [`Error::Encoding`].
    #[default]
    Strict,
    /// Substitute `?` and keep going.
    Replace,
}

/// Layout configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Page width in points
    pub page_width: f64,
    /// Page height in points
    pub page_height: f64,
    /// Top margin in points
    pub margin_top: f64,
    /// Bottom margin in points
    pub margin_bottom: f64,
    /// Left margin in points
    pub margin_left: f64,
    /// Font size in points
    pub font_size: f64,
    /// Baseline-to-baseline distance in points
    pub line_height: f64,
    /// Wrap column, counted in characters
    pub max_chars: usize,
    /// Handling of characters outside Latin-1
    pub encoding: EncodingPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let (page_width, page_height) = PageSize::Letter.dimensions();
        Self {
            page_width,
            page_height,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            font_size: 11.0,
            line_height: 14.0,
            max_chars: 90,
            encoding: EncodingPolicy::Strict,
        }
    }
}

impl LayoutConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        let (w, h) = size.dimensions();
        self.page_width = w;
        self.page_height = h;
        self
    }

    /// Set the same margin on the top, bottom and left edges.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin_top = margin;
        self.margin_bottom = margin;
        self.margin_left = margin;
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the line height.
    pub fn with_line_height(mut self, height: f64) -> Self {
        self.line_height = height;
        self
    }

    /// Set the wrap column.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Set the encoding policy.
    pub fn with_encoding(mut self, policy: EncodingPolicy) -> Self {
        self.encoding = policy;
        self
    }

    /// Vertical space available for text.
    pub fn usable_height(&self) -> f64 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Number of lines that fit on one page.
    ///
    /// Fails when the configuration leaves no room for a single line, so
    /// pagination never has to deal with an empty page size.
    pub fn lines_per_page(&self) -> Result<usize> {
        if !(self.line_height > 0.0) {
            return Err(Error::Configuration(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        let lines = (self.usable_height() / self.line_height).floor();
        if !(lines >= 1.0) {
            return Err(Error::Configuration(format!(
                "no line fits between margins: usable height {} with line height {}",
                self.usable_height(),
                self.line_height
            )));
        }
        Ok(lines as usize)
    }

    /// Check every field; called before any text is processed.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("page width", self.page_width),
            ("page height", self.page_height),
            ("top margin", self.margin_top),
            ("bottom margin", self.margin_bottom),
            ("left margin", self.margin_left),
            ("font size", self.font_size),
            ("line height", self.line_height),
        ];
        for (what, value) in lengths {
            if !value.is_finite() || value > MAX_PAGE_DIMENSION {
                return Err(Error::Configuration(format!(
                    "{} must be a finite number of at most {} points, got {}",
                    what, MAX_PAGE_DIMENSION, value
                )));
            }
        }

        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return Err(Error::Configuration(format!(
                "page dimensions must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if self.margin_top < 0.0 || self.margin_bottom < 0.0 || self.margin_left < 0.0 {
            return Err(Error::Configuration(format!(
                "margins must not be negative, got top {} bottom {} left {}",
                self.margin_top, self.margin_bottom, self.margin_left
            )));
        }
        if self.margin_left >= self.page_width {
            return Err(Error::Configuration(format!(
                "left margin {} leaves no room on a page {} wide",
                self.margin_left, self.page_width
            )));
        }
        if !(self.font_size > 0.0) {
            return Err(Error::Configuration(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if self.max_chars == 0 {
            return Err(Error::Configuration("max_chars must be at least 1".to_string()));
        }
        self.lines_per_page()?;
        Ok(())
    }
}
