//! Reading order for slide content.
//!
//! Blocks are read top row first, then left to right within a row. The sort
//! is stable, so blocks at identical positions keep their document order.

use crate::layout::content_block::ContentBlock;

/// Return the blocks sorted by `(top, left)` ascending.
///
/// # Examples
///
/// ```
/// use pptx_oxide::layout::{ContentBlock, reading_order::sort_reading_order};
///
/// let blocks = vec![
///     ContentBlock::text(200, 0, "second row"),
///     ContentBlock::text(100, 500, "first row, right"),
///     ContentBlock::text(100, 0, "first row, left"),
/// ];
/// let sorted = sort_reading_order(blocks);
/// assert_eq!(sorted[0].payload(), "first row, left");
/// assert_eq!(sorted[2].payload(), "second row");
/// ```
pub fn sort_reading_order(mut blocks: Vec<ContentBlock>) -> Vec<ContentBlock> {
    blocks.sort_by_key(|block| block.position);
    blocks
}
