//! Text cleanup for Markdown output.
//!
//! Table cells must fit on one line and must not contain a bare `|`, and the
//! assembled document should not carry long runs of blank lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Line breaks inside a text frame: newlines, carriage returns and the
    /// vertical tab used for soft breaks
    static ref RE_LINE_BREAK: Regex = Regex::new(r"\r\n|[\r\n\x0B]").unwrap();

    /// Regex for normalizing 3+ consecutive newlines
    static ref RE_MULTI_NEWLINE: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Clean text for use inside a Markdown table row.
///
/// Line breaks become spaces, pipe characters are escaped and surrounding
/// whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use pptx_oxide::converters::whitespace::clean_text;
///
/// assert_eq!(clean_text("  Q1 | Q2\nTotal "), r"Q1 \| Q2 Total");
/// assert_eq!(clean_text(""), "");
/// ```
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    RE_LINE_BREAK
        .replace_all(text, " ")
        .replace('|', r"\|")
        .trim()
        .to_string()
}

/// Number of characters in a cleaned cell, as counted for the short-text rule.
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Normalize whitespace in markdown text by limiting consecutive blank lines.
///
/// Three or more consecutive newlines collapse to exactly two, so fragments
/// are always separated by a single blank line.
///
/// # Examples
///
/// ```
/// use pptx_oxide::converters::whitespace::normalize_whitespace;
///
/// let input = "Line 1\n\n\n\n\nLine 2";
/// assert_eq!(normalize_whitespace(input), "Line 1\n\nLine 2");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    RE_MULTI_NEWLINE.replace_all(text, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_newlines() {
        assert_eq!(clean_text("a\nb\r\nc\rd"), "a b c d");
    }

    #[test]
    fn test_clean_text_soft_break() {
        assert_eq!(clean_text("line\u{000B}break"), "line break");
    }

    #[test]
    fn test_clean_text_escapes_pipes() {
        assert_eq!(clean_text("a|b"), r"a\|b");
    }

    #[test]
    fn test_clean_text_trims() {
        assert_eq!(clean_text("\n  padded  \n"), "padded");
    }

    #[test]
    fn test_text_len_counts_chars() {
        assert_eq!(text_len("매출"), 2);
        assert_eq!(text_len(r"\|"), 2);
    }

    #[test]
    fn test_normalize_keeps_single_blank_line() {
        assert_eq!(normalize_whitespace("a\n\nb"), "a\n\nb");
        assert_eq!(normalize_whitespace("a\n\n\nb"), "a\n\nb");
    }
}
