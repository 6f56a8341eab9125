//! Positioned content extracted from a slide.

use crate::geometry::{Emu, Position, Size};
use serde::{Deserialize, Serialize};

/// The kind of a [`ContentBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// A picture
    Image,
    /// A table authored as a real table
    NativeTable,
    /// A free-floating text box
    Text,
}

/// Payload of a [`ContentBlock`].
///
/// Image and table payloads are already rendered Markdown. Text payloads are
/// the shape's trimmed text; cell cleaning happens when rows become tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum BlockContent {
    /// Markdown image reference, e.g. `![Image](images/slide1_4.png)`
    Image(String),
    /// Markdown pipe table built from the table's literal cells
    NativeTable(String),
    /// Raw text of a text box
    Text(String),
}

/// One visual element on a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Top-left corner in EMU
    pub position: Position,
    /// Extent in EMU
    pub size: Size,
    /// What the block holds
    #[serde(flatten)]
    pub content: BlockContent,
}

impl ContentBlock {
    /// Create a block at the given position with zero size.
    pub fn new(position: Position, content: BlockContent) -> Self {
        Self {
            position,
            size: Size::default(),
            content,
        }
    }

    /// Create a text block.
    ///
    /// # Examples
    ///
    /// ```
    /// use pptx_oxide::layout::{BlockKind, ContentBlock};
    ///
    /// let block = ContentBlock::text(100, 0, "Revenue");
    /// assert_eq!(block.kind(), BlockKind::Text);
    /// assert_eq!(block.top(), 100);
    /// ```
    pub fn text(top: Emu, left: Emu, text: impl Into<String>) -> Self {
        Self::new(Position::new(top, left), BlockContent::Text(text.into()))
    }

    /// Create an image block from a rendered Markdown reference.
    pub fn image(top: Emu, left: Emu, markdown: impl Into<String>) -> Self {
        Self::new(Position::new(top, left), BlockContent::Image(markdown.into()))
    }

    /// Create a native table block from a rendered Markdown table.
    pub fn native_table(top: Emu, left: Emu, markdown: impl Into<String>) -> Self {
        Self::new(Position::new(top, left), BlockContent::NativeTable(markdown.into()))
    }

    /// Attach a size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Block kind.
    pub fn kind(&self) -> BlockKind {
        match self.content {
            BlockContent::Image(_) => BlockKind::Image,
            BlockContent::NativeTable(_) => BlockKind::NativeTable,
            BlockContent::Text(_) => BlockKind::Text,
        }
    }

    /// True for text boxes.
    pub fn is_text(&self) -> bool {
        matches!(self.content, BlockContent::Text(_))
    }

    /// Top edge.
    pub fn top(&self) -> Emu {
        self.position.top
    }

    /// Left edge.
    pub fn left(&self) -> Emu {
        self.position.left
    }

    /// The payload string, whatever the kind.
    pub fn payload(&self) -> &str {
        match &self.content {
            BlockContent::Image(s) | BlockContent::NativeTable(s) | BlockContent::Text(s) => s,
        }
    }
}
