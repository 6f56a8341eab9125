//! Row banding: grouping text boxes that sit on the same horizontal band.
//!
//! This is the first pass of layout reconstruction. It walks blocks in
//! reading order and produces a stream of [`RowItem`]s, where consecutive
//! text boxes whose tops lie within the band tolerance of the row anchor
//! form one [`LogicalRow`]. Pictures and native tables pass through as
//! their own items and always close the row in progress.

use crate::geometry::Emu;
use crate::layout::content_block::ContentBlock;
use serde::Serialize;

/// An inferred row of visually aligned text boxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogicalRow {
    /// Text blocks in the row, ordered by `left`
    pub elements: Vec<ContentBlock>,
    /// Top of the first block that opened the row
    pub top: Emu,
}

impl LogicalRow {
    /// Build a row from the blocks collected for one band.
    ///
    /// `blocks` must be non-empty. The row's `top` is the first block's top;
    /// elements are then ordered left to right.
    fn from_band(mut blocks: Vec<ContentBlock>) -> Self {
        let top = blocks.first().map(ContentBlock::top).unwrap_or_default();
        blocks.sort_by_key(ContentBlock::left);
        Self {
            elements: blocks,
            top,
        }
    }

    /// Number of text boxes (the inferred column count).
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Raw payloads of the row's elements.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(ContentBlock::payload)
    }
}

/// One item of the banded stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowItem {
    /// One or more text boxes on the same band
    Row(LogicalRow),
    /// A picture or native table, carried through unchanged
    Passthrough(ContentBlock),
}

impl RowItem {
    /// Top of the item, used for diagnostics.
    pub fn top(&self) -> Emu {
        match self {
            RowItem::Row(row) => row.top,
            RowItem::Passthrough(block) => block.top(),
        }
    }

    /// The logical row, if this item is one.
    pub fn as_row(&self) -> Option<&LogicalRow> {
        match self {
            RowItem::Row(row) => Some(row),
            RowItem::Passthrough(_) => None,
        }
    }
}

/// `|top - anchor| < tolerance`, without overflowing on extreme coordinates.
/// A negative tolerance never matches.
fn within_band(top: Emu, anchor: Emu, tolerance: Emu) -> bool {
    u64::try_from(tolerance).is_ok_and(|tolerance| top.abs_diff(anchor) < tolerance)
}

/// Fold state for the banding pass.
#[derive(Debug, Default)]
struct BandState {
    items: Vec<RowItem>,
    pending: Vec<ContentBlock>,
    /// Top of the block that opened the current band. `None` before the
    /// first text block, which always opens a new band.
    anchor: Option<Emu>,
}

impl BandState {
    fn push(mut self, block: &ContentBlock, tolerance: Emu) -> Self {
        if block.is_text() {
            let same_band = self
                .anchor
                .is_some_and(|anchor| within_band(block.top(), anchor, tolerance));
            if same_band {
                self.pending.push(block.clone());
            } else {
                self = self.flush();
                self.pending.push(block.clone());
                self.anchor = Some(block.top());
            }
        } else {
            // The anchor survives the flush: a text box after a picture is
            // still compared against the band that was open before it.
            self = self.flush();
            self.items.push(RowItem::Passthrough(block.clone()));
        }
        self
    }

    fn flush(mut self) -> Self {
        if !self.pending.is_empty() {
            let band = std::mem::take(&mut self.pending);
            self.items.push(RowItem::Row(LogicalRow::from_band(band)));
        }
        self
    }

    fn finish(self) -> Vec<RowItem> {
        self.flush().items
    }
}

/// Group blocks (already in reading order) into row-level items.
///
/// # Examples
///
/// ```
/// use pptx_oxide::layout::{ContentBlock, banding::{band_blocks, RowItem}};
///
/// let blocks = vec![
///     ContentBlock::text(100, 0, "Name"),
///     ContentBlock::text(105, 500, "Score"),
///     ContentBlock::text(900_000, 0, "Footer"),
/// ];
/// let items = band_blocks(&blocks, 100_000);
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[0].as_row().unwrap().element_count(), 2);
/// ```
pub fn band_blocks(sorted: &[ContentBlock], tolerance: Emu) -> Vec<RowItem> {
    let items = sorted
        .iter()
        .fold(BandState::default(), |state, block| state.push(block, tolerance))
        .finish();
    log::debug!("Banded {} blocks into {} row items", sorted.len(), items.len());
    items
}
