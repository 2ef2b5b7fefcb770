//! UI state machine values
//!
//! One `UiState` per editor instance. Because it is a single enum, at most
//! one floating surface can be visible at any time.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::models::{
    DocRange, LinkList, LinkSuggestion, SelectionSnapshot, TransformKind, TransformRequest,
    TransformResult,
};
use crate::mutation::LinkTarget;

/// Identifies one outstanding backend request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket(pub u64);

/// The transform request a freshly opened suggestion panel needs run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformTicket {
    pub ticket: Ticket,
    pub request: TransformRequest,
}

/// The link search a link panel needs run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTicket {
    pub ticket: Ticket,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionStatus {
    Pending,
    Ready(TransformResult),
    /// The request failed; a local substitute keeps Accept available
    Failed { message: String, fallback: TransformResult },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionPanel {
    pub ticket: Ticket,
    pub kind: TransformKind,
    /// Frozen, word-expanded snapshot; the mutation target on accept
    pub snapshot: SelectionSnapshot,
    pub status: SuggestionStatus,
}

impl SuggestionPanel {
    pub fn is_pending(&self) -> bool {
        matches!(self.status, SuggestionStatus::Pending)
    }

    pub fn result(&self) -> Option<&TransformResult> {
        match &self.status {
            SuggestionStatus::Pending => None,
            SuggestionStatus::Ready(result) => Some(result),
            SuggestionStatus::Failed { fallback, .. } => Some(fallback),
        }
    }

    /// Text Accept would write, if Accept is possible
    pub fn suggestion(&self) -> Option<&str> {
        self.result()
            .map(|r| r.transformed_text.as_str())
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkSearch {
    NotSearched,
    Pending(Ticket),
    Results { list: LinkList, is_fallback: bool },
    NoMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkPanel {
    /// Frozen snapshot; the mutation target on accept
    pub snapshot: SelectionSnapshot,
    pub keyword: String,
    pub search: LinkSearch,
}

impl LinkPanel {
    pub fn new(snapshot: SelectionSnapshot) -> Self {
        let keyword = default_keyword(&snapshot.selected_text);
        Self {
            snapshot,
            keyword,
            search: LinkSearch::NotSearched,
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.search, LinkSearch::Pending(_))
    }

    pub fn can_search(&self) -> bool {
        !self.is_searching() && !self.keyword.trim().is_empty()
    }

    pub fn selected(&self) -> Option<&LinkSuggestion> {
        match &self.search {
            LinkSearch::Results { list, .. } => list.selected(),
            _ => None,
        }
    }
}

/// First word longer than three characters, or empty
pub fn default_keyword(text: &str) -> String {
    text.split_whitespace()
        .find(|word| word.chars().count() > 3)
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    MenuOpen { snapshot: SelectionSnapshot },
    KindChooserOpen { snapshot: SelectionSnapshot },
    SuggestionPanelOpen(SuggestionPanel),
    LinkPanelOpen(LinkPanel),
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::MenuOpen { .. } => "menuOpen",
            UiState::KindChooserOpen { .. } => "kindChooserOpen",
            UiState::SuggestionPanelOpen(_) => "suggestionPanelOpen",
            UiState::LinkPanelOpen(_) => "linkPanelOpen",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, UiState::Idle)
    }

    /// Whether a panel owning an asynchronous operation is open
    pub fn has_panel(&self) -> bool {
        matches!(self, UiState::SuggestionPanelOpen(_) | UiState::LinkPanelOpen(_))
    }

    /// The snapshot the visible surface is bound to
    pub fn snapshot(&self) -> Option<&SelectionSnapshot> {
        match self {
            UiState::Idle => None,
            UiState::MenuOpen { snapshot } | UiState::KindChooserOpen { snapshot } => Some(snapshot),
            UiState::SuggestionPanelOpen(panel) => Some(&panel.snapshot),
            UiState::LinkPanelOpen(panel) => Some(&panel.snapshot),
        }
    }
}

/// What accepting a panel did to the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum MutationOutcome {
    Replaced { range: DocRange, inserted: String },
    Linked { target: LinkTarget, url: String },
    /// The mutation could not be applied; the panel closed anyway
    Dropped { reason: String },
}

impl MutationOutcome {
    pub fn dropped(err: &EditorError) -> Self {
        MutationOutcome::Dropped {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keyword() {
        assert_eq!(default_keyword("add labels to the metadata"), "labels");
        assert_eq!(default_keyword("a an the"), "");
        assert_eq!(default_keyword("  café au lait "), "café");
        assert_eq!(default_keyword("tea for two"), "");
        assert_eq!(default_keyword("set a focus keyword"), "focus");
    }
}
