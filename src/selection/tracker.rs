//! Selection Tracker
//!
//! Turns selection-change notifications into snapshots and debounced
//! show/hide transitions. The crate runs on the host's event loop, so time
//! is passed in by the caller and `poll` fires whatever is due.

use serde::{Deserialize, Serialize};

use crate::document::DocumentModel;
use crate::error::Result;
use crate::models::{AnchorPoint, DocRange, SelectionSnapshot};

/// A visible change the tracker asks the UI to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Show the action menu for the last snapshot
    Show,
    /// Hide the action menu and the kind chooser
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    due_at_ms: u64,
    transition: Transition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTracker {
    last_snapshot: Option<SelectionSnapshot>,
    pending: Option<Pending>,
    debounce_ms: u64,
}

impl SelectionTracker {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            last_snapshot: None,
            pending: None,
            debounce_ms,
        }
    }

    pub fn last_snapshot(&self) -> Option<&SelectionSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// The transition waiting to fire, if any
    pub fn pending_transition(&self) -> Option<Transition> {
        self.pending.map(|p| p.transition)
    }

    /// When the pending transition becomes due
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.map(|p| p.due_at_ms)
    }

    /// Handle a selection change reported by the document model.
    ///
    /// Any pending transition is canceled first, so only the most recent
    /// selection within a debounce window drives the UI.
    pub fn on_selection_change<D: DocumentModel>(&mut self, doc: &D, now_ms: u64) -> Result<()> {
        self.pending = None;

        let range = doc.selection().range();
        let transition = if range.is_empty() {
            Transition::Hide
        } else {
            let snapshot = capture(doc, range)?;
            log::debug!(
                "captured selection {}..{} ({} chars)",
                range.from,
                range.to,
                snapshot.selected_text.chars().count()
            );
            self.last_snapshot = Some(snapshot);
            Transition::Show
        };

        self.pending = Some(Pending {
            due_at_ms: now_ms.saturating_add(self.debounce_ms),
            transition,
        });
        Ok(())
    }

    /// Fire the pending transition if it is due
    pub fn poll(&mut self, now_ms: u64) -> Option<Transition> {
        let pending = self.pending?;
        if now_ms < pending.due_at_ms {
            return None;
        }

        self.pending = None;
        if pending.transition == Transition::Hide {
            self.last_snapshot = None;
        }
        Some(pending.transition)
    }

    /// Drop any pending transition and the last snapshot
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_snapshot = None;
    }
}

/// Build a snapshot of `range` from the live document
pub fn capture<D: DocumentModel>(doc: &D, range: DocRange) -> Result<SelectionSnapshot> {
    let selected_text = doc.text_between(range)?;
    let context = doc.sibling_context(range)?;
    let anchor = AnchorPoint::from_glyphs(doc.coords_at_pos(range.from)?, doc.coords_at_pos(range.to)?);

    Ok(SelectionSnapshot {
        range,
        selected_text,
        context_before: context.before,
        context_after: context.after,
        anchor,
    })
}
