//! Markdown rendering for reconstructed slide content.
//!
//! Tables are written by hand as pipe tables with left-aligned columns
//! (`:---`) so the output renders the same in every Markdown flavour.

use serde::Serialize;
use std::fmt;

/// Alignment marker used in every separator cell.
const LEFT_ALIGN: &str = ":---";

/// A Markdown pipe table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownTable {
    /// Header cells
    pub headers: Vec<String>,
    /// Body rows
    pub rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// Create a table from explicit headers and body rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Create a table whose first row is the header.
    ///
    /// Returns `None` when `rows` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use pptx_oxide::converters::markdown::MarkdownTable;
    ///
    /// let table = MarkdownTable::from_rows(vec![
    ///     vec!["Name".to_string(), "Qty".to_string()],
    ///     vec!["Latte".to_string(), "3".to_string()],
    /// ])
    /// .unwrap();
    /// assert_eq!(table.render(), "| Name | Qty |\n| :--- | :--- |\n| Latte | 3 |");
    /// ```
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        let headers = rows.remove(0);
        Some(Self::new(headers, rows))
    }

    /// Create a table with synthesized `Item N` headers over the given rows.
    pub fn with_item_headers(column_count: usize, rows: Vec<Vec<String>>) -> Self {
        let headers = (1..=column_count).map(|i| format!("Item {}", i)).collect();
        Self::new(headers, rows)
    }

    /// Number of header columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Render header, separator and body rows, one per line.
    pub fn render(&self) -> String {
        let separator = vec![LEFT_ALIGN; self.headers.len()];
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(render_row(&self.headers));
        lines.push(render_row(&separator));
        lines.extend(self.rows.iter().map(|row| render_row(row)));
        lines.join("\n")
    }
}

impl fmt::Display for MarkdownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_row<S: AsRef<str>>(cells: &[S]) -> String {
    let joined = cells.iter().map(|c| c.as_ref()).collect::<Vec<&str>>().join(" | ");
    format!("| {} |", joined)
}

/// One Markdown block produced for a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Fragment {
    /// A standalone text box
    Paragraph(String),
    /// A short single aligned row, written as `a | b | c`
    PlainRow(Vec<String>),
    /// Aligned text boxes rebuilt as a table
    Table(MarkdownTable),
    /// Pre-rendered picture or native table Markdown
    Passthrough(String),
}

impl Fragment {
    /// Render the fragment as Markdown, without trailing blank line.
    pub fn render(&self) -> String {
        match self {
            Fragment::Paragraph(text) | Fragment::Passthrough(text) => text.clone(),
            Fragment::PlainRow(cells) => cells.join(" | "),
            Fragment::Table(table) => table.render(),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Markdown image reference for an asset stored under `image_dir`.
///
/// Paths always use `/` so the document is portable across platforms.
///
/// ```
/// use pptx_oxide::converters::markdown::image_reference;
///
/// assert_eq!(image_reference("images", "slide1_4.png"), "![Image](images/slide1_4.png)");
/// ```
pub fn image_reference(image_dir: &str, file_name: &str) -> String {
    let dir = image_dir.trim_end_matches(|c: char| c == '/' || c == '\\');
    if dir.is_empty() {
        format!("![Image]({})", file_name)
    } else {
        format!("![Image]({}/{})", dir, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_rows_empty() {
        assert!(MarkdownTable::from_rows(vec![]).is_none());
    }

    #[test]
    fn test_header_only_table() {
        let table = MarkdownTable::from_rows(vec![strings(&["a", "b", "c"])]).unwrap();
        assert_eq!(table.render(), "| a | b | c |\n| :--- | :--- | :--- |");
    }

    #[test]
    fn test_item_headers() {
        let table = MarkdownTable::with_item_headers(2, vec![strings(&["x", "y"])]);
        assert_eq!(table.render(), "| Item 1 | Item 2 |\n| :--- | :--- |\n| x | y |");
    }

    #[test]
    fn test_empty_cells_render() {
        let table = MarkdownTable::from_rows(vec![strings(&["", "b"]), strings(&["", ""])]).unwrap();
        assert_eq!(table.render(), "|  | b |\n| :--- | :--- |\n|  |  |");
    }

    #[test]
    fn test_plain_row_fragment() {
        let fragment = Fragment::PlainRow(strings(&["Home", "About", "Contact"]));
        assert_eq!(fragment.render(), "Home | About | Contact");
    }

    #[test]
    fn test_passthrough_unchanged() {
        let fragment = Fragment::Passthrough("![Image](images/a.png)".to_string());
        assert_eq!(fragment.to_string(), "![Image](images/a.png)");
    }

    #[test]
    fn test_image_reference_trailing_slash() {
        assert_eq!(image_reference("assets/", "a.jpg"), "![Image](assets/a.jpg)");
        assert_eq!(image_reference("", "a.jpg"), "![Image](a.jpg)");
    }
}
