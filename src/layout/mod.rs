//! Layout reconstruction for slides.
//!
//! This module infers document structure from shape geometry:
//! - Reading order (top to bottom, left to right)
//! - Row banding of free-floating text boxes
//! - Grid detection that rebuilds aligned text boxes as tables

pub mod banding;
pub mod content_block;
pub mod reading_order;
pub mod reconstructor;
pub mod table_detector;

// Re-export main types
pub use banding::{LogicalRow, RowItem, band_blocks};
pub use content_block::{BlockContent, BlockKind, ContentBlock};
pub use reconstructor::{LayoutReconstructor, reconstruct};
pub use table_detector::{TableCandidate, coalesce_rows, detect_table_candidates};
