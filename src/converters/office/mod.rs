//! Office presentation to Markdown conversion.
//!
//! This module converts PowerPoint presentations (PPTX) to Markdown using
//! native Rust parsing of the Open XML package.
//!
//! # Overview
//!
//! A conversion runs in three steps:
//! - [`PptxReader`] extracts positioned content blocks from every slide
//!   (pictures become image assets, native tables are pre-rendered)
//! - [`LayoutReconstructor`] turns each slide's blocks into Markdown
//!   fragments, rebuilding grid-aligned text boxes as tables
//! - [`MarkdownDocument`] assembles the fragments under per-slide headings
//!   and writes the file plus its image assets
//!
//! # Example
//!
//! ```no_run
//! use pptx_oxide::converters::office::PptxConverter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = PptxConverter::new();
//! let document = converter.convert("deck.pptx")?;
//! document.write_to("out/deck.md")?;
//! # Ok(())
//! # }
//! ```

pub mod package;
pub mod placeholders;
mod pptx;
pub mod shapes;

pub use pptx::{ImageAsset, Presentation, PptxReader, Slide};

use crate::config::ConversionOptions;
use crate::error::{Error, Result};
use crate::layout::LayoutReconstructor;
use crate::writer::{MarkdownDocument, SlideMarkdown};
use std::path::Path;

/// Main converter for presentations to Markdown.
#[derive(Debug, Clone, Default)]
pub struct PptxConverter {
    options: ConversionOptions,
}

impl PptxConverter {
    /// Create a new converter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options.
    pub fn with_options(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// Get the current options.
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert a presentation file.
    ///
    /// The document title is the file stem of `path`. Only `.pptx` input is
    /// accepted.
    pub fn convert(&self, path: impl AsRef<Path>) -> Result<MarkdownDocument> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if extension != "pptx" {
            return Err(Error::UnsupportedFormat(if extension.is_empty() {
                path.display().to_string()
            } else {
                extension
            }));
        }

        log::info!("Converting {}", path.display());
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut reader = PptxReader::open(path, self.options.clone())?;
        let presentation = reader.read_presentation()?;
        Ok(self.assemble(stem, presentation))
    }

    /// Convert presentation bytes, using `title` as the document title.
    pub fn convert_bytes(&self, bytes: Vec<u8>, title: impl Into<String>) -> Result<MarkdownDocument> {
        let mut reader = PptxReader::from_bytes(bytes, self.options.clone())?;
        let presentation = reader.read_presentation()?;
        Ok(self.assemble(title.into(), presentation))
    }

    /// Convert `input` and write Markdown to `output`, with images in the
    /// configured directory next to it.
    pub fn convert_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<MarkdownDocument> {
        let document = self.convert(input)?;
        document.write_to(output.as_ref())?;
        log::info!("Conversion complete: {}", output.as_ref().display());
        Ok(document)
    }

    fn assemble(&self, title: String, presentation: Presentation) -> MarkdownDocument {
        let reconstructor = LayoutReconstructor::with_config(self.options.layout);
        let mut document = MarkdownDocument::new(self.options.image_dir.clone());
        if self.options.include_document_title {
            document.title = Some(title);
        }
        document.metadata_title = presentation.title;

        for slide in presentation.slides {
            let fragments = reconstructor.reconstruct(slide.blocks);
            log::debug!("Slide {}: {} fragments", slide.number, fragments.len());
            document.slides.push(SlideMarkdown {
                number: slide.number,
                fragments,
            });
            document.assets.extend(slide.images);
        }

        log::info!("Converted {} slides", document.slides.len());
        document
    }
}
