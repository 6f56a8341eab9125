//! Slide layout reconstruction.
//!
//! Turns the positioned blocks of one slide into ordered Markdown fragments
//! in three independent stages:
//!
//! 1. sort blocks into reading order ([`sort_reading_order`])
//! 2. band text boxes into logical rows ([`band_blocks`])
//! 3. coalesce equal-width rows into tables ([`coalesce_rows`])
//!
//! Each stage is a pure function of the previous stage's output. Nothing is
//! shared between slides, so slides may be reconstructed in any order.

use crate::config::LayoutConfig;
use crate::converters::markdown::Fragment;
use crate::layout::banding::{band_blocks, RowItem};
use crate::layout::content_block::ContentBlock;
use crate::layout::reading_order::sort_reading_order;
use crate::layout::table_detector::coalesce_rows;

/// Rebuilds Markdown structure from slide geometry.
///
/// # Examples
///
/// ```
/// use pptx_oxide::layout::{ContentBlock, LayoutReconstructor};
///
/// let reconstructor = LayoutReconstructor::new();
/// let fragments = reconstructor.reconstruct(vec![
///     ContentBlock::text(0, 0, "Agenda"),
///     ContentBlock::text(1_000_000, 0, "Mon"),
///     ContentBlock::text(1_000_000, 2_000_000, "Tue"),
/// ]);
/// assert_eq!(fragments, vec!["Agenda", "Mon | Tue"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutReconstructor {
    config: LayoutConfig,
}

impl LayoutReconstructor {
    /// Create a reconstructor with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor with custom thresholds.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Reconstruct one slide into rendered Markdown fragments.
    ///
    /// An empty block list yields an empty fragment list.
    pub fn reconstruct(&self, blocks: Vec<ContentBlock>) -> Vec<String> {
        self.reconstruct_fragments(blocks)
            .iter()
            .map(Fragment::render)
            .collect()
    }

    /// Reconstruct one slide into typed fragments.
    pub fn reconstruct_fragments(&self, blocks: Vec<ContentBlock>) -> Vec<Fragment> {
        let items = self.row_items(blocks);
        let fragments = coalesce_rows(&items, self.config.short_text_threshold);
        log::debug!(
            "Reconstructed {} row items into {} fragments",
            items.len(),
            fragments.len()
        );
        fragments
    }

    /// Run only the sorting and banding stages.
    pub fn row_items(&self, blocks: Vec<ContentBlock>) -> Vec<RowItem> {
        let sorted = sort_reading_order(blocks);
        band_blocks(&sorted, self.config.band_tolerance)
    }
}

/// Reconstruct one slide with the given thresholds.
pub fn reconstruct(blocks: Vec<ContentBlock>, config: &LayoutConfig) -> Vec<String> {
    LayoutReconstructor::with_config(*config).reconstruct(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slide() {
        assert!(LayoutReconstructor::new().reconstruct(vec![]).is_empty());
    }

    #[test]
    fn test_input_order_irrelevant() {
        let blocks = vec![
            ContentBlock::text(1_000_000, 0, "body"),
            ContentBlock::text(0, 0, "title"),
        ];
        let fragments = LayoutReconstructor::new().reconstruct(blocks);
        assert_eq!(fragments, vec!["title", "body"]);
    }

    #[test]
    fn test_custom_tolerance() {
        let blocks = vec![
            ContentBlock::text(0, 0, "a"),
            ContentBlock::text(150_000, 500, "b"),
        ];
        let strict = LayoutReconstructor::new().reconstruct(blocks.clone());
        assert_eq!(strict, vec!["a", "b"]);

        let loose = LayoutConfig::new().with_band_tolerance(200_000);
        assert_eq!(reconstruct(blocks, &loose), vec!["a | b"]);
    }

    #[test]
    fn test_custom_short_threshold() {
        let blocks = vec![ContentBlock::text(0, 0, "a"), ContentBlock::text(0, 500, "b")];
        let config = LayoutConfig::new().with_short_text_threshold(0);
        let fragments = reconstruct(blocks, &config);
        assert_eq!(fragments, vec!["| Item 1 | Item 2 |\n| :--- | :--- |\n| a | b |"]);
    }

    #[test]
    fn test_native_table_unchanged() {
        let table = "| H |\n| :--- |\n| v |";
        let blocks = vec![
            ContentBlock::text(0, 0, "above"),
            ContentBlock::native_table(0, 500, table),
        ];
        let fragments = LayoutReconstructor::new().reconstruct(blocks);
        assert_eq!(fragments, vec!["above", table]);
    }
}
