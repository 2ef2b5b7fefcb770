//! Selection snapshots
//!
//! A snapshot is captured once per non-empty selection event and never
//! mutated afterwards. The snapshot bound to an open menu is the frozen
//! mutation target for the whole asynchronous action.

use serde::{Deserialize, Serialize};

use super::range::{AnchorPoint, DocRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub range: DocRange,
    /// Plain text of the range at capture time
    pub selected_text: String,
    /// Text of the block before the one holding the range start ("" if none)
    pub context_before: String,
    /// Text of the block after the one holding the range end ("" if none)
    pub context_after: String,
    pub anchor: AnchorPoint,
}

impl SelectionSnapshot {
    /// A copy of this snapshot re-targeted at a wider range.
    ///
    /// Context and anchor are kept: word expansion never leaves the
    /// containing blocks.
    pub fn retargeted(&self, range: DocRange, selected_text: String) -> Self {
        Self {
            range,
            selected_text,
            context_before: self.context_before.clone(),
            context_after: self.context_after.clone(),
            anchor: self.anchor,
        }
    }

    pub fn context_before(&self) -> Option<&str> {
        non_empty(&self.context_before)
    }

    pub fn context_after(&self) -> Option<&str> {
        non_empty(&self.context_after)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
