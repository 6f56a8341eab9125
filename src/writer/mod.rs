//! Markdown document assembly and output.
//!
//! The document layout is:
//!
//! ```text
//! # <title>
//!
//! ---
//!
//! ## Slide 1
//!
//! <fragment>
//!
//! <fragment>
//!
//! ---
//!
//! ## Slide 2
//! ...
//! ```
//!
//! Image assets are written to a directory next to the Markdown file so the
//! relative references inside the fragments resolve.

use crate::converters::office::ImageAsset;
use crate::converters::whitespace::normalize_whitespace;
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Markdown fragments of one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideMarkdown {
    /// 1-based slide number
    pub number: usize,
    /// Rendered fragments in output order
    pub fragments: Vec<String>,
}

/// A converted presentation, ready to be written.
#[derive(Debug, Clone, Serialize)]
pub struct MarkdownDocument {
    /// Heading written at the top of the document
    pub title: Option<String>,
    /// Title stored in the presentation's core properties
    pub metadata_title: Option<String>,
    /// Slides in order
    pub slides: Vec<SlideMarkdown>,
    /// Image directory, relative to the Markdown file
    pub image_dir: String,
    /// Images to write into `image_dir`
    #[serde(skip)]
    pub assets: Vec<ImageAsset>,
}

impl MarkdownDocument {
    /// Create an empty document whose images go to `image_dir`.
    pub fn new(image_dir: impl Into<String>) -> Self {
        Self {
            title: None,
            metadata_title: None,
            slides: Vec::new(),
            image_dir: image_dir.into(),
            assets: Vec::new(),
        }
    }

    /// Render the whole document.
    ///
    /// # Examples
    ///
    /// ```
    /// use pptx_oxide::writer::{MarkdownDocument, SlideMarkdown};
    ///
    /// let mut doc = MarkdownDocument::new("images");
    /// doc.title = Some("deck".to_string());
    /// doc.slides.push(SlideMarkdown { number: 1, fragments: vec!["Hello".to_string()] });
    /// assert_eq!(doc.render(), "# deck\n\n---\n\n## Slide 1\n\nHello\n\n");
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(&format!("# {}\n\n", title));
        }
        for slide in &self.slides {
            out.push_str(&format!("---\n\n## Slide {}\n\n", slide.number));
            for fragment in &slide.fragments {
                out.push_str(fragment);
                out.push_str("\n\n");
            }
        }
        normalize_whitespace(&out)
    }

    /// Serialize titles and slide fragments as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Directory that receives the assets for a Markdown file at `output`.
    pub fn asset_dir_for(&self, output: &Path) -> PathBuf {
        let parent = output.parent().unwrap_or_else(|| Path::new(""));
        parent.join(&self.image_dir)
    }

    /// Write the image assets and the Markdown file.
    ///
    /// Parent directories are created as needed.
    pub fn write_to(&self, output: impl AsRef<Path>) -> Result<()> {
        let output = output.as_ref();
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        if !self.assets.is_empty() {
            let dir = self.asset_dir_for(output);
            fs::create_dir_all(&dir)?;
            for asset in &self.assets {
                fs::write(dir.join(&asset.file_name), &asset.data)?;
            }
            log::debug!("Wrote {} images to {}", self.assets.len(), dir.display());
        }

        fs::write(output, self.render())?;
        Ok(())
    }
}
