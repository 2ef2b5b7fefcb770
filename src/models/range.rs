//! Document ranges and screen anchors
//!
//! Positions are in the document's native addressing scheme: every block
//! contributes an opening and a closing token and every character of text is
//! one position.

use serde::{Deserialize, Serialize};

/// A range of the document from `from` (inclusive) to `to` (exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocRange {
    pub from: usize,
    pub to: usize,
}

impl DocRange {
    /// Create a range, ordering the endpoints so that `from <= to`
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            from: a.min(b),
            to: a.max(b),
        }
    }

    /// Create a collapsed range (caret only)
    pub fn caret(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }
}

/// Live selection (anchor + head), as reported by the document model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started
    pub anchor: usize,
    /// Where the caret currently is
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn collapsed(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Ordered range covered by this selection
    pub fn range(&self) -> DocRange {
        DocRange::new(self.anchor, self.head)
    }
}

impl From<DocRange> for Selection {
    fn from(range: DocRange) -> Self {
        Selection::new(range.from, range.to)
    }
}

/// Screen rectangle of a single glyph position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// 2D screen coordinate used to position floating UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f32,
    pub y: f32,
}

impl AnchorPoint {
    /// Left edge of the first glyph, bottom edge of the last glyph
    pub fn from_glyphs(start: GlyphRect, end: GlyphRect) -> Self {
        Self {
            x: start.left,
            y: end.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_orders_endpoints() {
        let range = DocRange::new(9, 3);
        assert_eq!(range.from, 3);
        assert_eq!(range.to, 9);
        assert_eq!(range.len(), 6);
    }

    #[test]
    fn test_backward_selection_range() {
        let sel = Selection::new(12, 4);
        assert_eq!(sel.range(), DocRange::new(4, 12));
        assert!(!sel.is_collapsed());
        assert!(Selection::collapsed(7).is_collapsed());
    }

    #[test]
    fn test_anchor_from_glyphs() {
        let start = GlyphRect { left: 10.0, right: 18.0, top: 0.0, bottom: 20.0 };
        let end = GlyphRect { left: 90.0, right: 98.0, top: 24.0, bottom: 44.0 };
        assert_eq!(AnchorPoint::from_glyphs(start, end), AnchorPoint { x: 10.0, y: 44.0 });
    }
}
