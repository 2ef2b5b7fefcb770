//! Document model contract
//!
//! The rich document engine is an external collaborator. The assist core
//! only needs the handful of queries and the one atomic mutation below.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{DocRange, GlyphRect, Selection};

/// One step of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Delete `range` and insert `text` at `range.from`
    ReplaceRange { range: DocRange, text: String },
    /// Apply a link mark to `range`
    AddLink { range: DocRange, href: String },
}

/// A group of steps applied as a single undoable edit.
///
/// Either every step applies or the document is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub steps: Vec<Step>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_range(mut self, range: DocRange, text: impl Into<String>) -> Self {
        self.steps.push(Step::ReplaceRange {
            range,
            text: text.into(),
        });
        self
    }

    pub fn add_link(mut self, range: DocRange, href: impl Into<String>) -> Self {
        self.steps.push(Step::AddLink {
            range,
            href: href.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// The textblock holding a position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlockSpan {
    /// Position of the first character of the block
    pub content_start: usize,
    pub text: String,
}

/// Plain text of the blocks adjacent to a range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContext {
    pub before: String,
    pub after: String,
}

/// Queries and the atomic mutation the assist core needs from a document
pub trait DocumentModel {
    /// Live selection
    fn selection(&self) -> Selection;

    /// Make `range` the live selection
    fn set_selection(&mut self, range: DocRange) -> Result<()>;

    /// Total size of the document in positions
    fn content_size(&self) -> usize;

    /// Plain text of `range`, blocks separated by a single space
    fn text_between(&self, range: DocRange) -> Result<String>;

    /// The textblock containing `pos`
    fn textblock_at(&self, pos: usize) -> Result<TextBlockSpan>;

    /// Sibling block text around the blocks holding `range.from` / `range.to`
    fn sibling_context(&self, range: DocRange) -> Result<BlockContext>;

    /// Screen rectangle of the glyph at `pos`
    fn coords_at_pos(&self, pos: usize) -> Result<GlyphRect>;

    /// Position reached by walking `offset` characters of the plain text
    /// rendering of `range` (as produced by `text_between`)
    fn pos_at_text_offset(&self, range: DocRange, offset: usize) -> Result<usize>;

    /// Apply a transaction atomically as one undoable step
    fn dispatch(&mut self, tr: Transaction) -> Result<()>;
}
