//! Undo/redo history for the in-memory document
//!
//! Each dispatched transaction is one entry, so a replaced suggestion or an
//! applied link is undone in a single step.

use std::collections::VecDeque;

use super::blocks::Block;
use crate::models::Selection;

/// Document state captured around a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub blocks: Vec<Block>,
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct History {
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    /// Maximum number of undoable steps
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Record the state before a new edit; clears redo history
    pub fn record(&mut self, before: HistoryEntry) {
        self.redo.clear();
        self.undo.push_back(before);
        if self.undo.len() > self.max_size {
            self.undo.pop_front();
        }
    }

    /// Swap `current` for the previous state, if any
    pub fn undo(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Swap `current` for the next state, if any
    pub fn redo(&mut self, current: HistoryEntry) -> Option<HistoryEntry> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> HistoryEntry {
        HistoryEntry {
            blocks: vec![Block::paragraph(text)],
            selection: Selection::collapsed(1),
        }
    }

    #[test]
    fn test_undo_redo_swaps_states() {
        let mut history = History::new(10);
        history.record(entry("a"));

        let restored = history.undo(entry("b")).unwrap();
        assert_eq!(restored.blocks[0].text, "a");
        assert!(history.can_redo());

        let redone = history.redo(entry("a")).unwrap();
        assert_eq!(redone.blocks[0].text, "b");
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new(10);
        history.record(entry("a"));
        history.undo(entry("b"));
        history.record(entry("c"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut history = History::new(2);
        history.record(entry("1"));
        history.record(entry("2"));
        history.record(entry("3"));
        assert_eq!(history.undo(entry("4")).unwrap().blocks[0].text, "3");
        assert_eq!(history.undo(entry("3")).unwrap().blocks[0].text, "2");
        assert!(history.undo(entry("2")).is_none());
    }
}
