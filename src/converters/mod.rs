//! Format converters for presentations.
//!
//! This module provides functionality to convert slides to Markdown:
//! - **Office**: PPTX package reading and shape extraction
//! - **Markdown**: Pipe tables and fragment rendering
//! - **Whitespace**: Cell text cleaning and blank-line normalization
//!
//! # Examples
//!
//! ```no_run
//! use pptx_oxide::converters::PptxConverter;
//! use pptx_oxide::config::ConversionOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ConversionOptions::new().with_images(false);
//! let converter = PptxConverter::with_options(options);
//! let document = converter.convert("quarterly.pptx")?;
//! println!("{}", document.render());
//! # Ok(())
//! # }
//! ```

pub mod markdown;
pub mod office;
pub mod whitespace;

// Re-export main types
pub use markdown::{Fragment, MarkdownTable, image_reference};
pub use office::{PptxConverter, PptxReader};
pub use whitespace::{clean_text, normalize_whitespace, text_len};
