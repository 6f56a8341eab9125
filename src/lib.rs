//! # PPTX Oxide
//!
//! PowerPoint to Markdown conversion that recovers layout.
//!
//! ## Core Features
//!
//! - **Native OOXML reading**: slides in presentation order, text boxes,
//!   pictures and native tables straight from the zip package
//! - **Placeholder inheritance**: shapes without geometry take their frame
//!   from the slide layout or slide master
//! - **Layout reconstruction**: text boxes arranged in rows and columns are
//!   rebuilt as Markdown tables; short single-row groups become `a | b` lines
//! - **Image extraction**: pictures are written next to the Markdown file and
//!   referenced relatively
//!
//! ## Quick Start
//!
//! ```no_run
//! use pptx_oxide::PptxConverter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = PptxConverter::new();
//! let document = converter.convert_file("deck.pptx", "deck.md")?;
//! println!("{} slides", document.slides.len());
//! # Ok(())
//! # }
//! ```
//!
//! The layout stage is usable on its own:
//!
//! ```
//! use pptx_oxide::{ContentBlock, LayoutReconstructor};
//!
//! let blocks = vec![
//!     ContentBlock::text(0, 0, "Name"),
//!     ContentBlock::text(0, 2_000_000, "Role"),
//!     ContentBlock::text(500_000, 0, "Ada"),
//!     ContentBlock::text(500_000, 2_000_000, "Engineer"),
//! ];
//! let fragments = LayoutReconstructor::new().reconstruct(blocks);
//! assert_eq!(fragments, vec!["| Name | Role |\n| :--- | :--- |\n| Ada | Engineer |"]);
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Layout analysis
pub mod geometry;
pub mod layout;

// Format converters
pub mod converters;

// Markdown output
pub mod writer;

// Re-exports
pub use config::{ConversionOptions, LayoutConfig};
pub use converters::office::PptxConverter;
pub use error::{Error, Result};
pub use layout::{ContentBlock, LayoutReconstructor};
pub use writer::MarkdownDocument;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pptx_oxide");
    }
}
