//! Geometric primitives for slide layout.
//!
//! Slide coordinates are integer English Metric Units (EMU, 914,400 per inch)
//! with the origin at the top-left corner and y increasing downward.

use serde::{Deserialize, Serialize};

/// Slide-native length unit.
pub type Emu = i64;

/// Top-left corner of a shape.
///
/// Field order matters: the derived `Ord` compares `top` first and `left`
/// second, which is reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Distance from the top edge of the slide
    pub top: Emu,
    /// Distance from the left edge of the slide
    pub left: Emu,
}

impl Position {
    /// Create a new position.
    ///
    /// # Examples
    ///
    /// ```
    /// use pptx_oxide::geometry::Position;
    ///
    /// let a = Position::new(100, 500);
    /// let b = Position::new(100, 0);
    /// assert!(b < a);
    /// ```
    pub fn new(top: Emu, left: Emu) -> Self {
        Self { top, left }
    }
}

/// Extent of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    pub width: Emu,
    /// Vertical extent
    pub height: Emu,
}

impl Size {
    /// Create a new size.
    pub fn new(width: Emu, height: Emu) -> Self {
        Self { width, height }
    }
}

/// Position and size of a shape, as read from an `xfrm` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Top-left corner
    pub position: Position,
    /// Extent
    pub size: Size,
}

impl Frame {
    /// Create a frame from offset and extent values in `xfrm` order.
    pub fn from_xfrm(x: Emu, y: Emu, cx: Emu, cy: Emu) -> Self {
        Self {
            position: Position::new(y, x),
            size: Size::new(cx, cy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_reading_order() {
        let mut positions = vec![
            Position::new(200, 0),
            Position::new(100, 900),
            Position::new(100, 10),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Position::new(100, 10),
                Position::new(100, 900),
                Position::new(200, 0)
            ]
        );
    }

    #[test]
    fn test_frame_from_xfrm() {
        let frame = Frame::from_xfrm(10, 20, 300, 40);
        assert_eq!(frame.position, Position::new(20, 10));
        assert_eq!(frame.size, Size::new(300, 40));
    }
}
