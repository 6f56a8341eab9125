//! Grid detection over banded rows.
//!
//! Slides often fake a table with separate text boxes laid out on a grid.
//! After banding, each grid row shows up as a [`LogicalRow`] with one
//! element per column. This pass coalesces runs of consecutive rows with
//! the same element count into a [`TableCandidate`] and decides how each
//! candidate is rendered.
//!
//! The rule is purely structural: equal column counts are enough, even when
//! the aligned boxes are semantically unrelated.

use crate::converters::markdown::{Fragment, MarkdownTable};
use crate::converters::whitespace::{clean_text, text_len};
use crate::layout::banding::{LogicalRow, RowItem};
use serde::Serialize;

/// A contiguous run of logical rows sharing one column count (> 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCandidate {
    /// Element count shared by every row of the run
    pub column_count: usize,
    /// Cleaned cell text, one entry per row
    pub rows: Vec<Vec<String>>,
}

impl TableCandidate {
    fn start(row: &LogicalRow) -> Self {
        Self {
            column_count: row.element_count(),
            rows: vec![cleaned_cells(row)],
        }
    }

    /// Whether `row` continues this run.
    pub fn accepts(&self, row: &LogicalRow) -> bool {
        row.element_count() == self.column_count
    }

    fn push(&mut self, row: &LogicalRow) {
        self.rows.push(cleaned_cells(row));
    }

    /// Number of rows collected.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Turn the candidate into a fragment.
    ///
    /// - one row shorter than `short_text_threshold` characters: plain `a | b` line
    /// - one longer row: table with `Item N` headers and that row as the body
    /// - two or more rows: first row is the header
    pub fn resolve(mut self, short_text_threshold: usize) -> Fragment {
        if self.rows.len() == 1 {
            let length: usize = self.rows[0].iter().map(|cell| text_len(cell)).sum();
            if length < short_text_threshold {
                return Fragment::PlainRow(self.rows.remove(0));
            }
            return Fragment::Table(MarkdownTable::with_item_headers(self.column_count, self.rows));
        }
        let headers = self.rows.remove(0);
        Fragment::Table(MarkdownTable::new(headers, self.rows))
    }
}

fn cleaned_cells(row: &LogicalRow) -> Vec<String> {
    row.texts().map(clean_text).collect()
}

/// Fold state for the coalescing pass.
#[derive(Debug, Default)]
struct GridState {
    fragments: Vec<Fragment>,
    open: Option<TableCandidate>,
}

impl GridState {
    fn push(mut self, item: &RowItem, short_text_threshold: usize) -> Self {
        match item {
            RowItem::Row(row) if row.element_count() > 1 => {
                match self.open.as_mut() {
                    Some(candidate) if candidate.accepts(row) => candidate.push(row),
                    _ => {
                        self = self.close(short_text_threshold);
                        self.open = Some(TableCandidate::start(row));
                    },
                }
            },
            RowItem::Row(row) => {
                self = self.close(short_text_threshold);
                let text = row.texts().next().unwrap_or_default().to_string();
                self.fragments.push(Fragment::Paragraph(text));
            },
            RowItem::Passthrough(block) => {
                self = self.close(short_text_threshold);
                self.fragments
                    .push(Fragment::Passthrough(block.payload().to_string()));
            },
        }
        self
    }

    fn close(mut self, short_text_threshold: usize) -> Self {
        if let Some(candidate) = self.open.take() {
            log::debug!(
                "Resolving table candidate: {} rows x {} columns",
                candidate.row_count(),
                candidate.column_count
            );
            self.fragments.push(candidate.resolve(short_text_threshold));
        }
        self
    }

    fn finish(self, short_text_threshold: usize) -> Vec<Fragment> {
        self.close(short_text_threshold).fragments
    }
}

/// Coalesce row-level items into Markdown fragments, preserving item order.
///
/// # Examples
///
/// ```
/// use pptx_oxide::layout::{ContentBlock, banding::band_blocks, table_detector::coalesce_rows};
///
/// let blocks = vec![
///     ContentBlock::text(0, 0, "Store"),
///     ContentBlock::text(0, 500, "City"),
///     ContentBlock::text(500_000, 0, "Gangnam"),
///     ContentBlock::text(500_000, 500, "Seoul"),
/// ];
/// let fragments = coalesce_rows(&band_blocks(&blocks, 100_000), 50);
/// assert_eq!(fragments.len(), 1);
/// assert_eq!(
///     fragments[0].render(),
///     "| Store | City |\n| :--- | :--- |\n| Gangnam | Seoul |"
/// );
/// ```
pub fn coalesce_rows(items: &[RowItem], short_text_threshold: usize) -> Vec<Fragment> {
    items
        .iter()
        .fold(GridState::default(), |state, item| state.push(item, short_text_threshold))
        .finish(short_text_threshold)
}

/// Collect the table candidates a stream of row items would produce.
///
/// Useful for diagnostics; [`coalesce_rows`] applies the same grouping.
pub fn detect_table_candidates(items: &[RowItem]) -> Vec<TableCandidate> {
    let mut candidates: Vec<TableCandidate> = Vec::new();
    let mut open: Option<TableCandidate> = None;
    for item in items {
        match item.as_row() {
            Some(row) if row.element_count() > 1 => match open.as_mut() {
                Some(candidate) if candidate.accepts(row) => candidate.push(row),
                _ => {
                    candidates.extend(open.take());
                    open = Some(TableCandidate::start(row));
                },
            },
            _ => candidates.extend(open.take()),
        }
    }
    candidates.extend(open);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::banding::band_blocks;
    use crate::layout::content_block::ContentBlock;

    fn row_at(top: i64, cells: &[&str]) -> Vec<ContentBlock> {
        cells
            .iter()
            .enumerate()
            .map(|(i, text)| ContentBlock::text(top, i as i64 * 1_000_000, *text))
            .collect()
    }

    fn fragments_for(blocks: Vec<ContentBlock>) -> Vec<Fragment> {
        coalesce_rows(&band_blocks(&blocks, 100_000), 50)
    }

    #[test]
    fn test_empty() {
        assert!(coalesce_rows(&[], 50).is_empty());
    }

    #[test]
    fn test_single_text_is_paragraph() {
        let fragments = fragments_for(row_at(0, &["Quarterly results"]));
        assert_eq!(fragments, vec![Fragment::Paragraph("Quarterly results".to_string())]);
    }

    #[test]
    fn test_paragraph_keeps_raw_text() {
        let fragments = fragments_for(row_at(0, &["line one\nline | two"]));
        assert_eq!(fragments[0].render(), "line one\nline | two");
    }

    #[test]
    fn test_short_single_row_is_plain() {
        let fragments = fragments_for(row_at(0, &["Home", "About"]));
        assert_eq!(
            fragments,
            vec![Fragment::PlainRow(vec!["Home".to_string(), "About".to_string()])]
        );
    }

    #[test]
    fn test_long_single_row_is_item_table() {
        let long = "x".repeat(30);
        let fragments = fragments_for(row_at(0, &[&long, &long]));
        match &fragments[0] {
            Fragment::Table(table) => {
                assert_eq!(table.headers, vec!["Item 1", "Item 2"]);
                assert_eq!(table.rows.len(), 1);
            },
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_threshold_boundary() {
        let short = fragments_for(row_at(0, &[&"a".repeat(24), &"b".repeat(25)]));
        assert!(matches!(short[0], Fragment::PlainRow(_)));

        let exact = fragments_for(row_at(0, &[&"a".repeat(25), &"b".repeat(25)]));
        assert!(matches!(exact[0], Fragment::Table(_)));
    }

    #[test]
    fn test_escaped_pipe_counts_toward_length() {
        // 47 + escaped pipe (2) + 1 = 50
        let text = format!("{}|", "a".repeat(47));
        let fragments = fragments_for(row_at(0, &[&text, "b"]));
        assert!(matches!(fragments[0], Fragment::Table(_)));
    }

    #[test]
    fn test_multi_row_first_row_header() {
        let mut blocks = row_at(0, &["A", "B", "C"]);
        blocks.extend(row_at(2_000_000, &["1", "2", "3"]));
        let fragments = fragments_for(blocks);
        assert_eq!(fragments.len(), 1);
        assert_eq!(
            fragments[0].render(),
            "| A | B | C |\n| :--- | :--- | :--- |\n| 1 | 2 | 3 |"
        );
    }

    #[test]
    fn test_short_rule_not_applied_to_multi_row() {
        let mut blocks = row_at(0, &["a", "b"]);
        blocks.extend(row_at(500_000, &["c", "d"]));
        let fragments = fragments_for(blocks);
        assert!(matches!(fragments[0], Fragment::Table(_)));
    }

    #[test]
    fn test_column_change_breaks_run() {
        let mut blocks = row_at(0, &["a", "b", "c"]);
        blocks.extend(row_at(500_000, &["d", "e"]));
        let fragments = fragments_for(blocks);
        assert_eq!(
            fragments,
            vec![
                Fragment::PlainRow(vec!["a".into(), "b".into(), "c".into()]),
                Fragment::PlainRow(vec!["d".into(), "e".into()]),
            ]
        );
    }

    #[test]
    fn test_single_element_row_breaks_run() {
        let mut blocks = row_at(0, &["a", "b"]);
        blocks.extend(row_at(500_000, &["heading"]));
        blocks.extend(row_at(1_000_000, &["c", "d"]));
        let fragments = fragments_for(blocks);
        assert_eq!(fragments.len(), 3);
        assert!(matches!(fragments[1], Fragment::Paragraph(_)));
    }

    #[test]
    fn test_passthrough_breaks_run() {
        let mut blocks = row_at(0, &["a", "b"]);
        blocks.push(ContentBlock::image(500_000, 0, "![Image](images/x.png)"));
        blocks.extend(row_at(1_000_000, &["c", "d"]));
        let fragments = fragments_for(blocks);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[1].render(), "![Image](images/x.png)");
    }

    #[test]
    fn test_detect_candidates() {
        let mut blocks = row_at(0, &["a", "b"]);
        blocks.extend(row_at(500_000, &["c", "d"]));
        blocks.extend(row_at(1_000_000, &["e", "f", "g"]));
        blocks.extend(row_at(1_500_000, &["only"]));
        let candidates = detect_table_candidates(&band_blocks(&blocks, 100_000));
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].row_count(), 2);
        assert_eq!(candidates[1].column_count, 3);
    }
}
