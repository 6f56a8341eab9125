//! Configuration for presentation conversion.

use crate::geometry::Emu;

/// Default vertical tolerance for grouping text boxes into one row.
///
/// 100,000 EMU is roughly 2.8 mm.
pub const BAND_TOLERANCE: Emu = 100_000;

/// Default combined cell length below which a single aligned row is
/// rendered as plain text instead of a table.
pub const SHORT_TEXT_THRESHOLD: usize = 50;

/// Default name of the asset directory written next to the Markdown file.
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Thresholds used by the layout reconstruction heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Two text boxes share a row while their tops differ by less than this.
    pub band_tolerance: Emu,

    /// Single-row table candidates shorter than this (in characters) stay plain text.
    pub short_text_threshold: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create configuration with the default thresholds.
    pub fn new() -> Self {
        Self {
            band_tolerance: BAND_TOLERANCE,
            short_text_threshold: SHORT_TEXT_THRESHOLD,
        }
    }

    /// Set the row banding tolerance.
    pub fn with_band_tolerance(mut self, tolerance: Emu) -> Self {
        self.band_tolerance = tolerance;
        self
    }

    /// Set the short-text threshold.
    pub fn with_short_text_threshold(mut self, threshold: usize) -> Self {
        self.short_text_threshold = threshold;
        self
    }
}

/// Options for converting a presentation to Markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOptions {
    /// Layout reconstruction thresholds.
    pub layout: LayoutConfig,

    /// Extract pictures as image assets.
    ///
    /// When false, picture shapes are dropped from the output.
    pub extract_images: bool,

    /// Directory (relative to the Markdown file) that receives image assets.
    pub image_dir: String,

    /// Emit a `# title` line at the top of the document.
    pub include_document_title: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            extract_images: true,
            image_dir: DEFAULT_IMAGE_DIR.to_string(),
            include_document_title: true,
        }
    }
}

impl ConversionOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout thresholds.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, enable: bool) -> Self {
        self.extract_images = enable;
        self
    }

    /// Set the image asset directory name.
    pub fn with_image_dir(mut self, dir: impl Into<String>) -> Self {
        self.image_dir = dir.into();
        self
    }

    /// Enable or disable the document title heading.
    pub fn with_document_title(mut self, enable: bool) -> Self {
        self.include_document_title = enable;
        self
    }
}
