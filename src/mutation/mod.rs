//! Document Mutation Adapter
//!
//! The only code that writes to the document. Both operations first re-apply
//! the frozen range as the live selection (the caret may have moved while a
//! request was in flight), then dispatch a single atomic transaction.

pub mod words;

pub use words::{expand_to_word_boundaries, is_word_char};

use serde::{Deserialize, Serialize};

use crate::document::{DocumentModel, Transaction};
use crate::error::Result;
use crate::models::DocRange;

/// What an accepted link ended up marking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkTarget {
    /// The anchor text was found; only that sub-range was marked
    Anchor(DocRange),
    /// The anchor text was not found; the whole range was marked
    WholeRange(DocRange),
}

impl LinkTarget {
    pub fn range(&self) -> DocRange {
        match self {
            LinkTarget::Anchor(range) | LinkTarget::WholeRange(range) => *range,
        }
    }
}

/// Delete `range` and insert `text` at its start, as one undoable step
pub fn replace_range<D: DocumentModel>(doc: &mut D, range: DocRange, text: &str) -> Result<()> {
    doc.set_selection(range)?;
    doc.dispatch(Transaction::new().replace_range(range, text))?;
    log::info!(
        "replaced {}..{} with {} chars",
        range.from,
        range.to,
        text.chars().count()
    );
    Ok(())
}

/// Link `anchor_text` inside `range` to `url`, or the whole range if the
/// anchor text does not occur verbatim in it
pub fn apply_link<D: DocumentModel>(
    doc: &mut D,
    range: DocRange,
    anchor_text: &str,
    url: &str,
) -> Result<LinkTarget> {
    doc.set_selection(range)?;
    let text = doc.text_between(range)?;

    let target = match text.find(anchor_text).filter(|_| !anchor_text.is_empty()) {
        Some(byte_idx) => {
            let offset = text[..byte_idx].chars().count();
            let len = anchor_text.chars().count();
            let from = doc.pos_at_text_offset(range, offset)?;
            let to = doc.pos_at_text_offset(range, offset + len)?;
            LinkTarget::Anchor(DocRange::new(from, to))
        }
        None => LinkTarget::WholeRange(range),
    };

    doc.dispatch(Transaction::new().add_link(target.range(), url))?;
    log::info!("linked {:?} to {}", target, url);
    Ok(target)
}
