//! Fixed-pitch layout metrics for the in-memory document
//!
//! The host view owns real glyph geometry; this approximation is what the
//! WASM-owned document reports when no view is attached, and what the tests
//! position floating UI against.

use serde::{Deserialize, Serialize};

use crate::models::GlyphRect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutMetrics {
    pub origin_x: f32,
    pub origin_y: f32,
    pub char_width: f32,
    pub line_height: f32,
    /// Vertical space between two blocks
    pub block_gap: f32,
    /// Characters per visual line before wrapping
    pub wrap_columns: usize,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            char_width: 8.0,
            line_height: 20.0,
            block_gap: 12.0,
            wrap_columns: 80,
        }
    }
}

impl LayoutMetrics {
    /// Number of visual lines a block of `len` characters occupies
    pub fn lines_for(&self, len: usize) -> usize {
        let cols = self.wrap_columns.max(1);
        len.div_ceil(cols).max(1)
    }

    /// Rectangle of the glyph at character `offset` of a block whose first
    /// line starts at `block_top`
    pub fn glyph_rect(&self, block_top: f32, offset: usize, len: usize) -> GlyphRect {
        let cols = self.wrap_columns.max(1);
        // A caret after the last character of a full line stays on that line
        let (row, col) = if offset > 0 && offset == len && offset % cols == 0 {
            (offset / cols - 1, cols)
        } else {
            (offset / cols, offset % cols)
        };

        let left = self.origin_x + col as f32 * self.char_width;
        let top = block_top + row as f32 * self.line_height;
        GlyphRect {
            left,
            right: left + self.char_width,
            top,
            bottom: top + self.line_height,
        }
    }

    /// Top edge of the block at `index`, given the lengths of all blocks
    pub fn block_top(&self, lengths: &[usize], index: usize) -> f32 {
        let lines: usize = lengths[..index].iter().map(|len| self.lines_for(*len)).sum();
        self.origin_y + lines as f32 * self.line_height + index as f32 * self.block_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_rect_wraps() {
        let metrics = LayoutMetrics {
            wrap_columns: 10,
            ..Default::default()
        };
        let rect = metrics.glyph_rect(0.0, 12, 30);
        assert_eq!(rect.left, 16.0);
        assert_eq!(rect.top, 20.0);
        assert_eq!(rect.bottom, 40.0);
    }

    #[test]
    fn test_caret_at_end_of_full_line() {
        let metrics = LayoutMetrics {
            wrap_columns: 10,
            ..Default::default()
        };
        let rect = metrics.glyph_rect(0.0, 10, 10);
        assert_eq!(rect.top, 0.0);
        assert_eq!(rect.left, 80.0);
    }

    #[test]
    fn test_block_top_accounts_for_wrapped_lines() {
        let metrics = LayoutMetrics {
            wrap_columns: 10,
            ..Default::default()
        };
        // 25 chars -> 3 lines, empty block -> 1 line
        let top = metrics.block_top(&[25, 0, 4], 2);
        assert_eq!(top, 4.0 * 20.0 + 2.0 * 12.0);
    }
}
