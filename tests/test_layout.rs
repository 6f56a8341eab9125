//! Integration tests for slide layout reconstruction.
//!
//! These tests drive the full sort → band → coalesce pipeline with mock
//! blocks simulating realistic slide arrangements.

use pptx_oxide::config::LayoutConfig;
use pptx_oxide::layout::{
    ContentBlock, LayoutReconstructor, RowItem, detect_table_candidates, reconstruct,
};
use proptest::prelude::*;

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

const COLUMN_GAP: i64 = 1_500_000;
const ROW_GAP: i64 = 1_000_000;

/// Text boxes side by side at one `top`.
fn mock_row(top: i64, cells: &[&str]) -> Vec<ContentBlock> {
    cells
        .iter()
        .enumerate()
        .map(|(i, text)| ContentBlock::text(top, i as i64 * COLUMN_GAP, *text))
        .collect()
}

/// `count` text boxes with long cell text, so single rows always render as tables.
fn mock_wide_row(top: i64, count: usize) -> Vec<ContentBlock> {
    (0..count)
        .map(|i| {
            ContentBlock::text(
                top,
                i as i64 * COLUMN_GAP,
                format!("cell {} with enough text to be long", i),
            )
        })
        .collect()
}

fn run(blocks: Vec<ContentBlock>) -> Vec<String> {
    LayoutReconstructor::new().reconstruct(blocks)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_jittered_boxes_form_one_short_row() {
    let blocks = vec![
        ContentBlock::text(100, 0, "Plan"),
        ContentBlock::text(105, 500, "Build"),
        ContentBlock::text(110, 1000, "Ship"),
    ];
    assert_eq!(run(blocks), vec!["Plan | Build | Ship"]);
}

#[test]
fn test_jittered_boxes_form_one_long_row() {
    let blocks = vec![
        ContentBlock::text(100, 0, "Collect customer interviews"),
        ContentBlock::text(105, 500, "Prototype the onboarding flow"),
        ContentBlock::text(110, 1000, "Ship the beta"),
    ];
    assert_eq!(
        run(blocks),
        vec![
            "| Item 1 | Item 2 | Item 3 |\n\
             | :--- | :--- | :--- |\n\
             | Collect customer interviews | Prototype the onboarding flow | Ship the beta |"
        ]
    );
}

#[test]
fn test_equal_width_rows_become_table() {
    let mut blocks = mock_row(0, &["Region", "Q1", "Q2"]);
    blocks.extend(mock_row(2_000_000, &["North", "12", "15"]));
    assert_eq!(
        run(blocks),
        vec!["| Region | Q1 | Q2 |\n| :--- | :--- | :--- |\n| North | 12 | 15 |"]
    );
}

#[test]
fn test_column_change_stops_table() {
    let mut blocks = mock_row(0, &["Region", "Q1", "Q2"]);
    blocks.extend(mock_row(ROW_GAP, &["Total", "27"]));
    assert_eq!(run(blocks), vec!["Region | Q1 | Q2", "Total | 27"]);
}

#[test]
fn test_native_table_passes_through() {
    let table = "| A | B |\n| :--- | :--- |\n| 1 | 2 |";
    let blocks = vec![
        ContentBlock::text(0, 0, "Before"),
        ContentBlock::native_table(0, 2_000_000, table),
        ContentBlock::text(ROW_GAP, 0, "After"),
    ];
    assert_eq!(run(blocks), vec!["Before", table, "After"]);
}

#[test]
fn test_empty_slide() {
    assert!(run(vec![]).is_empty());
}

// ============================================================================
// Realistic slides
// ============================================================================

#[test]
fn test_title_then_grid_then_footer() {
    let mut blocks = vec![ContentBlock::text(300_000, 400_000, "Team Directory")];
    blocks.extend(mock_row(1_500_000, &["Name", "Role", "Office"]));
    blocks.extend(mock_row(2_000_000, &["Ada", "Engineer", "London"]));
    blocks.extend(mock_row(2_500_000, &["Grace", "Admiral", "Arlington"]));
    blocks.push(ContentBlock::text(6_000_000, 400_000, "Confidential"));

    // Reverse to show input order does not matter
    blocks.reverse();

    assert_eq!(
        run(blocks),
        vec![
            "Team Directory".to_string(),
            "| Name | Role | Office |\n\
             | :--- | :--- | :--- |\n\
             | Ada | Engineer | London |\n\
             | Grace | Admiral | Arlington |"
                .to_string(),
            "Confidential".to_string(),
        ]
    );
}

#[test]
fn test_image_between_grids_splits_tables() {
    let mut blocks = mock_row(0, &["A", "B"]);
    blocks.push(ContentBlock::image(ROW_GAP, 0, "![Image](images/slide1_3.png)"));
    blocks.extend(mock_row(2 * ROW_GAP, &["C", "D"]));
    assert_eq!(
        run(blocks),
        vec!["A | B", "![Image](images/slide1_3.png)", "C | D"]
    );
}

#[test]
fn test_cells_are_cleaned_paragraphs_are_not() {
    let mut blocks = vec![ContentBlock::text(0, 0, "Line one\nLine two")];
    blocks.extend(mock_row(ROW_GAP, &["a|b", "c\nd"]));
    assert_eq!(run(blocks), vec!["Line one\nLine two", "a\\|b | c d"]);
}

#[test]
fn test_custom_thresholds() {
    let config = LayoutConfig::new()
        .with_band_tolerance(500_000)
        .with_short_text_threshold(0);
    let blocks = vec![
        ContentBlock::text(0, 0, "x"),
        ContentBlock::text(400_000, 1_000_000, "y"),
    ];
    assert_eq!(
        reconstruct(blocks, &config),
        vec!["| Item 1 | Item 2 |\n| :--- | :--- |\n| x | y |"]
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_shortness_boundary() {
    let short = vec![
        ContentBlock::text(0, 0, "a".repeat(24)),
        ContentBlock::text(0, COLUMN_GAP, "b".repeat(25)),
    ];
    assert_eq!(run(short), vec![format!("{} | {}", "a".repeat(24), "b".repeat(25))]);

    let long = vec![
        ContentBlock::text(0, 0, "a".repeat(25)),
        ContentBlock::text(0, COLUMN_GAP, "b".repeat(25)),
    ];
    assert_eq!(
        run(long),
        vec![format!(
            "| Item 1 | Item 2 |\n| :--- | :--- |\n| {} | {} |",
            "a".repeat(25),
            "b".repeat(25)
        )]
    );
}

#[test]
fn test_shortness_ignored_for_multi_row_tables() {
    let mut blocks = mock_row(0, &["a", "b"]);
    blocks.extend(mock_row(ROW_GAP, &["c", "d"]));
    assert_eq!(run(blocks), vec!["| a | b |\n| :--- | :--- |\n| c | d |"]);
}

#[test]
fn test_non_text_breaks_band() {
    for passthrough in [
        ContentBlock::image(0, 500, "![Image](images/slide1_2.png)"),
        ContentBlock::native_table(0, 500, "| T |\n| :--- |"),
    ] {
        let blocks = vec![
            ContentBlock::text(0, 0, "Left"),
            passthrough.clone(),
            ContentBlock::text(0, 1000, "Right"),
        ];
        let items = LayoutReconstructor::new().row_items(blocks);
        assert_eq!(items.len(), 3);
        assert!(matches!(items[1], RowItem::Passthrough(_)));
        assert_eq!(
            run(vec![
                ContentBlock::text(0, 0, "Left"),
                passthrough.clone(),
                ContentBlock::text(0, 1000, "Right"),
            ]),
            vec!["Left", passthrough.payload(), "Right"]
        );
    }
}

#[test]
fn test_band_anchor_survives_picture() {
    let blocks = vec![
        ContentBlock::text(0, 0, "A"),
        ContentBlock::image(40_000, 0, "IMG"),
        ContentBlock::text(50_000, 0, "B"),
        ContentBlock::text(120_000, 0, "C"),
    ];
    assert_eq!(run(blocks), vec!["A", "IMG", "B", "C"]);
}

#[test]
fn test_extreme_coordinates() {
    let blocks = vec![
        ContentBlock::text(i64::MAX, 0, "B"),
        ContentBlock::text(i64::MIN, 0, "A"),
    ];
    assert_eq!(run(blocks), vec!["A", "B"]);
}

#[test]
fn proptest_equal_column_counts_coalesce() {
    proptest!(|(first in 2usize..7, second in 2usize..7)| {
        let mut blocks = mock_wide_row(0, first);
        blocks.extend(mock_wide_row(ROW_GAP, second));

        let items = LayoutReconstructor::new().row_items(blocks);
        let candidates = detect_table_candidates(&items);

        if first == second {
            prop_assert_eq!(candidates.len(), 1);
            prop_assert_eq!(candidates[0].row_count(), 2);
        } else {
            prop_assert_eq!(candidates.len(), 2);
            prop_assert!(candidates.iter().all(|c| c.row_count() == 1));
        }
    });
}

#[test]
fn proptest_fragment_order_follows_top() {
    proptest!(|(kinds in prop::collection::vec(any::<bool>(), 0..12))| {
        // One block per row, so each block yields exactly one fragment
        let blocks: Vec<ContentBlock> = kinds
            .iter()
            .enumerate()
            .map(|(i, is_text)| {
                let top = i as i64 * ROW_GAP;
                if *is_text {
                    ContentBlock::text(top, 0, format!("text {}", i))
                } else {
                    ContentBlock::image(top, 0, format!("![Image](images/slide1_{}.png)", i))
                }
            })
            .collect();
        let expected: Vec<String> = blocks.iter().map(|b| b.payload().to_string()).collect();

        let mut shuffled = blocks;
        shuffled.reverse();
        prop_assert_eq!(run(shuffled), expected);
    });
}
