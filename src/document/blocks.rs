//! In-memory block document
//!
//! A flat list of paragraph blocks carrying link marks. Positions follow the
//! structured-document convention: a block opens at `p`, its text occupies
//! `p + 1 ..= p + 1 + len`, and the next block opens at `p + len + 2`.
//! Character offsets count Unicode scalar values.

use serde::{Deserialize, Serialize};

use super::history::{History, HistoryEntry};
use super::layout::LayoutMetrics;
use super::model::{BlockContext, DocumentModel, Step, TextBlockSpan, Transaction};
use crate::error::{EditorError, Result};
use crate::models::{DocRange, GlyphRect, Selection};

/// A link mark over `start..end` character offsets of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMark {
    pub start: usize,
    pub end: usize,
    pub href: String,
}

impl LinkMark {
    /// The part of this mark inside `lo..hi`, if any
    fn clipped(&self, lo: usize, hi: usize) -> Option<(usize, usize)> {
        let start = self.start.max(lo);
        let end = self.end.min(hi);
        (start < end).then_some((start, end))
    }
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub text: String,
    pub links: Vec<LinkMark>,
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            links: Vec::new(),
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text between two character offsets
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let s = byte_offset(&self.text, start);
        let e = byte_offset(&self.text, end);
        &self.text[s..e.max(s)]
    }

    /// Text covered by a link mark
    pub fn link_text(&self, mark: &LinkMark) -> &str {
        self.slice(mark.start, mark.end)
    }

    /// Mark `start..end` as a link, replacing any link marks it overlaps
    fn set_link(&mut self, start: usize, end: usize, href: &str) {
        let mut links = Vec::with_capacity(self.links.len() + 1);
        for mark in self.links.drain(..) {
            if mark.end <= start || mark.start >= end {
                links.push(mark);
                continue;
            }
            if mark.start < start {
                links.push(LinkMark { start: mark.start, end: start, href: mark.href.clone() });
            }
            if mark.end > end {
                links.push(LinkMark { start: end, end: mark.end, href: mark.href });
            }
        }
        links.push(LinkMark {
            start,
            end,
            href: href.to_string(),
        });
        links.sort_by_key(|m| m.start);
        self.links = links;
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(b, _)| b).unwrap_or(s.len())
}

/// Position of the first character of every block
fn content_starts(blocks: &[Block]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(blocks.len());
    let mut pos = 0;
    for block in blocks {
        starts.push(pos + 1);
        pos += block.len() + 2;
    }
    starts
}

fn content_size_of(blocks: &[Block]) -> usize {
    blocks.iter().map(|b| b.len() + 2).sum()
}

/// Resolve a position to (block index, character offset)
fn resolve_in(blocks: &[Block], pos: usize) -> Option<(usize, usize)> {
    let mut start = 1;
    for (i, block) in blocks.iter().enumerate() {
        let end = start + block.len();
        if pos < start {
            return None;
        }
        if pos <= end {
            return Some((i, pos - start));
        }
        start = end + 2;
    }
    None
}

fn stale(blocks: &[Block], range: DocRange) -> EditorError {
    EditorError::StaleRange {
        from: range.from,
        to: range.to,
        size: content_size_of(blocks),
    }
}

fn resolve_range_in(blocks: &[Block], range: DocRange) -> Result<((usize, usize), (usize, usize))> {
    if range.from > range.to {
        return Err(stale(blocks, range));
    }
    match (resolve_in(blocks, range.from), resolve_in(blocks, range.to)) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(stale(blocks, range)),
    }
}

/// Apply one step to `blocks`, returning the selection after the step
fn apply_step(blocks: &mut Vec<Block>, step: &Step, selection: Selection) -> Result<Selection> {
    match step {
        Step::ReplaceRange { range, text } => {
            let ((ba, oa), (bb, ob)) = resolve_range_in(blocks, *range)?;
            let inserted = text.chars().count();
            let tail = blocks[bb].clone();

            let head = &blocks[ba];
            let mut links: Vec<LinkMark> = head
                .links
                .iter()
                .filter_map(|m| {
                    m.clipped(0, oa)
                        .map(|(start, end)| LinkMark { start, end, href: m.href.clone() })
                })
                .collect();
            links.extend(tail.links.iter().filter_map(|m| {
                m.clipped(ob, tail.len()).map(|(start, end)| LinkMark {
                    start: start - ob + oa + inserted,
                    end: end - ob + oa + inserted,
                    href: m.href.clone(),
                })
            }));

            let merged = format!("{}{}{}", head.slice(0, oa), text, tail.slice(ob, tail.len()));
            blocks[ba] = Block { text: merged, links };
            if bb > ba {
                blocks.drain(ba + 1..=bb);
            }

            Ok(Selection::collapsed(range.from + inserted))
        }
        Step::AddLink { range, href } => {
            let ((ba, oa), (bb, ob)) = resolve_range_in(blocks, *range)?;
            for (i, block) in blocks.iter_mut().enumerate().take(bb + 1).skip(ba) {
                let lo = if i == ba { oa } else { 0 };
                let hi = if i == bb { ob } else { block.len() };
                if lo < hi {
                    block.set_link(lo, hi, href);
                }
            }
            Ok(selection)
        }
    }
}

/// Serializable rendering of the document for the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub blocks: Vec<BlockView>,
    pub selection: Selection,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    pub text: String,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub text: String,
    pub href: String,
    pub range: DocRange,
}

/// WASM-owned paragraph document implementing the document contract
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDocument {
    blocks: Vec<Block>,
    selection: Selection,
    history: History,
    layout: LayoutMetrics,
}

impl Default for BlockDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDocument {
    /// A document with a single empty paragraph
    pub fn new() -> Self {
        Self::from_paragraphs(Vec::<String>::new())
    }

    pub fn from_paragraphs<S: Into<String>>(paragraphs: impl IntoIterator<Item = S>) -> Self {
        let mut blocks: Vec<Block> = paragraphs.into_iter().map(Block::paragraph).collect();
        if blocks.is_empty() {
            blocks.push(Block::paragraph(""));
        }
        Self {
            blocks,
            selection: Selection::collapsed(1),
            history: History::default(),
            layout: LayoutMetrics::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutMetrics) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = History::new(limit);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.text.as_str()).collect()
    }

    /// Position of the first character of block `index`
    pub fn block_content_start(&self, index: usize) -> Option<usize> {
        content_starts(&self.blocks).get(index).copied()
    }

    /// Every link in the document as (linked text, href, range)
    pub fn links(&self) -> Vec<LinkView> {
        let starts = content_starts(&self.blocks);
        self.blocks
            .iter()
            .zip(starts)
            .flat_map(|(block, start)| {
                block.links.iter().map(move |mark| LinkView {
                    text: block.link_text(mark).to_string(),
                    href: mark.href.clone(),
                    range: DocRange::new(start + mark.start, start + mark.end),
                })
            })
            .collect()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the last transaction
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.entry()) {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone transaction
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.entry()) {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    pub fn to_view(&self) -> DocumentView {
        let starts = content_starts(&self.blocks);
        let blocks = self
            .blocks
            .iter()
            .zip(starts)
            .map(|(block, start)| BlockView {
                text: block.text.clone(),
                links: block
                    .links
                    .iter()
                    .map(|mark| LinkView {
                        text: block.link_text(mark).to_string(),
                        href: mark.href.clone(),
                        range: DocRange::new(start + mark.start, start + mark.end),
                    })
                    .collect(),
            })
            .collect();

        DocumentView {
            blocks,
            selection: self.selection,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    fn entry(&self) -> HistoryEntry {
        HistoryEntry {
            blocks: self.blocks.clone(),
            selection: self.selection,
        }
    }

    fn restore(&mut self, entry: HistoryEntry) {
        self.blocks = entry.blocks;
        self.selection = entry.selection;
    }

    /// Move the document edges (0 and the content size) onto the first and
    /// last text positions, so a select-all resolves
    fn clamp_to_text(&self, range: DocRange) -> DocRange {
        let size = self.content_size();
        let clamp = |pos: usize| match pos {
            0 => 1,
            p if p == size => size - 1,
            p => p,
        };
        DocRange::new(clamp(range.from), clamp(range.to))
    }

    fn resolve(&self, pos: usize) -> Result<(usize, usize)> {
        resolve_in(&self.blocks, pos).ok_or_else(|| stale(&self.blocks, DocRange::caret(pos)))
    }
}

impl DocumentModel for BlockDocument {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, range: DocRange) -> Result<()> {
        let range = self.clamp_to_text(range);
        resolve_range_in(&self.blocks, range)?;
        self.selection = range.into();
        Ok(())
    }

    fn content_size(&self) -> usize {
        content_size_of(&self.blocks)
    }

    fn text_between(&self, range: DocRange) -> Result<String> {
        let ((ba, oa), (bb, ob)) = resolve_range_in(&self.blocks, range)?;
        if ba == bb {
            return Ok(self.blocks[ba].slice(oa, ob).to_string());
        }

        let mut parts = Vec::with_capacity(bb - ba + 1);
        parts.push(self.blocks[ba].slice(oa, self.blocks[ba].len()));
        for block in &self.blocks[ba + 1..bb] {
            parts.push(block.text.as_str());
        }
        parts.push(self.blocks[bb].slice(0, ob));
        Ok(parts.join(" "))
    }

    fn textblock_at(&self, pos: usize) -> Result<TextBlockSpan> {
        let (index, _) = self.resolve(pos)?;
        Ok(TextBlockSpan {
            content_start: content_starts(&self.blocks)[index],
            text: self.blocks[index].text.clone(),
        })
    }

    fn sibling_context(&self, range: DocRange) -> Result<BlockContext> {
        let ((ba, _), (bb, _)) = resolve_range_in(&self.blocks, range)?;
        let before = ba
            .checked_sub(1)
            .and_then(|i| self.blocks.get(i))
            .map(|b| b.text.clone())
            .unwrap_or_default();
        let after = self
            .blocks
            .get(bb + 1)
            .map(|b| b.text.clone())
            .unwrap_or_default();
        Ok(BlockContext { before, after })
    }

    fn coords_at_pos(&self, pos: usize) -> Result<GlyphRect> {
        let (index, offset) = self.resolve(pos)?;
        let lengths: Vec<usize> = self.blocks.iter().map(Block::len).collect();
        let top = self.layout.block_top(&lengths, index);
        Ok(self.layout.glyph_rect(top, offset, lengths[index]))
    }

    fn pos_at_text_offset(&self, range: DocRange, offset: usize) -> Result<usize> {
        let ((ba, oa), (bb, ob)) = resolve_range_in(&self.blocks, range)?;
        let starts = content_starts(&self.blocks);

        let mut block = ba;
        let mut block_offset = oa;
        let mut remaining = offset;
        loop {
            let end = if block == bb { ob } else { self.blocks[block].len() };
            let available = end - block_offset;
            if remaining <= available {
                return Ok(starts[block] + block_offset + remaining);
            }
            // one separator character stands for the block boundary
            remaining -= available + 1;
            block += 1;
            block_offset = 0;
            if block > bb {
                return Err(EditorError::invalid(format!(
                    "text offset {} beyond range {}..{}",
                    offset, range.from, range.to
                )));
            }
        }
    }

    fn dispatch(&mut self, tr: Transaction) -> Result<()> {
        if tr.is_empty() {
            return Ok(());
        }

        let mut staged = self.blocks.clone();
        let mut selection = self.selection;
        for step in &tr.steps {
            selection = apply_step(&mut staged, step, selection)?;
        }

        let before = HistoryEntry {
            blocks: std::mem::replace(&mut self.blocks, staged),
            selection: self.selection,
        };
        self.history.record(before);
        self.selection = selection;
        log::debug!("dispatched transaction with {} step(s)", tr.steps.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> BlockDocument {
        // positions: "Hello world" 1..=12, "Second one" 14..=24, "Third" 26..=31
        BlockDocument::from_paragraphs(["Hello world", "Second one", "Third"])
    }

    #[test]
    fn test_positions_and_size() {
        let doc = doc();
        assert_eq!(doc.content_size(), 13 + 12 + 7);
        assert_eq!(doc.block_content_start(1), Some(14));
        assert_eq!(doc.text_between(DocRange::new(1, 6)).unwrap(), "Hello");
        assert_eq!(doc.text_between(DocRange::new(14, 20)).unwrap(), "Second");
    }

    #[test]
    fn test_text_between_across_blocks() {
        let doc = doc();
        let text = doc.text_between(DocRange::new(7, 20)).unwrap();
        assert_eq!(text, "world Second");
    }

    #[test]
    fn test_position_between_blocks_is_stale() {
        let doc = doc();
        let err = doc.text_between(DocRange::new(13, 16)).unwrap_err();
        assert!(matches!(err, EditorError::StaleRange { from: 13, to: 16, .. }));
        assert!(doc.text_between(DocRange::new(1, 500)).is_err());
    }

    #[test]
    fn test_select_all_clamps_to_text() {
        let mut doc = doc();
        let size = doc.content_size();
        doc.set_selection(DocRange::new(0, size)).unwrap();
        assert_eq!(doc.selection().range(), DocRange::new(1, size - 1));
        assert_eq!(
            doc.text_between(doc.selection().range()).unwrap(),
            "Hello world Second one Third"
        );
        assert!(doc.set_selection(DocRange::new(0, size + 1)).is_err());
    }

    #[test]
    fn test_sibling_context() {
        let doc = doc();
        let ctx = doc.sibling_context(DocRange::new(14, 20)).unwrap();
        assert_eq!(ctx.before, "Hello world");
        assert_eq!(ctx.after, "Third");

        let first = doc.sibling_context(DocRange::new(1, 6)).unwrap();
        assert_eq!(first.before, "");
        assert_eq!(first.after, "Second one");

        let last = doc.sibling_context(DocRange::new(26, 31)).unwrap();
        assert_eq!(last.after, "");
    }

    #[test]
    fn test_replace_within_block() {
        let mut doc = doc();
        doc.dispatch(Transaction::new().replace_range(DocRange::new(7, 12), "there"))
            .unwrap();
        assert_eq!(doc.paragraphs()[0], "Hello there");
        assert_eq!(doc.selection(), Selection::collapsed(12));
    }

    #[test]
    fn test_replace_across_blocks_joins() {
        let mut doc = doc();
        doc.dispatch(Transaction::new().replace_range(DocRange::new(7, 21), "new"))
            .unwrap();
        assert_eq!(doc.paragraphs(), vec!["Hello newone", "Third"]);
    }

    #[test]
    fn test_failed_transaction_leaves_document_untouched() {
        let mut doc = doc();
        let tr = Transaction::new()
            .replace_range(DocRange::new(1, 6), "Howdy")
            .replace_range(DocRange::new(90, 95), "x");
        assert!(doc.dispatch(tr).is_err());
        assert_eq!(doc.paragraphs()[0], "Hello world");
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_links_survive_replacement_elsewhere() {
        let mut doc = doc();
        doc.dispatch(Transaction::new().add_link(DocRange::new(7, 12), "https://w.test"))
            .unwrap();
        doc.dispatch(Transaction::new().replace_range(DocRange::new(1, 6), "Hi"))
            .unwrap();
        let links = doc.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "world");
        assert_eq!(links[0].range, DocRange::new(4, 9));
    }

    #[test]
    fn test_link_replaces_overlapping_link() {
        let mut doc = doc();
        doc.dispatch(Transaction::new().add_link(DocRange::new(1, 12), "https://old.test"))
            .unwrap();
        doc.dispatch(Transaction::new().add_link(DocRange::new(3, 6), "https://new.test"))
            .unwrap();
        let links: Vec<(String, String)> =
            doc.links().into_iter().map(|l| (l.text, l.href)).collect();
        assert_eq!(
            links,
            vec![
                ("He".to_string(), "https://old.test".to_string()),
                ("llo".to_string(), "https://new.test".to_string()),
                (" world".to_string(), "https://old.test".to_string()),
            ]
        );
    }

    #[test]
    fn test_undo_is_one_step_per_transaction() {
        let mut doc = doc();
        let tr = Transaction::new()
            .replace_range(DocRange::new(1, 6), "Howdy")
            .add_link(DocRange::new(1, 6), "https://h.test");
        doc.dispatch(tr).unwrap();
        assert!(doc.undo());
        assert_eq!(doc.paragraphs()[0], "Hello world");
        assert!(doc.links().is_empty());
        assert!(doc.redo());
        assert_eq!(doc.paragraphs()[0], "Howdy world");
    }

    #[test]
    fn test_pos_at_text_offset_skips_separator() {
        let doc = doc();
        let range = DocRange::new(7, 20);
        // "world Second": 'S' is at text offset 6
        assert_eq!(doc.pos_at_text_offset(range, 6).unwrap(), 14);
        assert_eq!(doc.pos_at_text_offset(range, 2).unwrap(), 9);
    }

    #[test]
    fn test_unicode_offsets() {
        let doc = BlockDocument::from_paragraphs(["café au lait"]);
        assert_eq!(doc.text_between(DocRange::new(1, 5)).unwrap(), "café");
        assert_eq!(doc.text_between(DocRange::new(6, 8)).unwrap(), "au");
    }

    #[test]
    fn test_coords_follow_layout() {
        let doc = doc();
        let rect = doc.coords_at_pos(14).unwrap();
        assert_eq!(rect.left, 0.0);
        assert_eq!(rect.top, 20.0 + 12.0);
    }
}
