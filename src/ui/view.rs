//! Serializable rendering of the UI state for the host

use serde::Serialize;

use super::placement::{
    chooser_position, menu_position, panel_position, ContainerRect, FloatingPosition,
};
use super::state::{LinkPanel, LinkSearch, SuggestionPanel, SuggestionStatus, UiState};
use crate::config::PlacementConfig;
use crate::models::TransformKind;

pub const LINKS_PROMPT: &str = "Enter a keyword and click Search to find relevant links.";
pub const LINKS_EMPTY: &str = "No links found. Try a different keyword.";
pub const LINKS_FALLBACK_NOTICE: &str = "Link service unavailable. Showing demo links instead.";
pub const SUGGESTION_FALLBACK_NOTICE: &str = "AI service unavailable. Showing an offline suggestion.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
}

const MENU_ITEMS: [MenuItem; 2] = [
    MenuItem { id: "rewrite", label: "Rewrite" },
    MenuItem { id: "links", label: "Add links" },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionPanelView {
    pub position: FloatingPosition,
    pub title: &'static str,
    pub kind: TransformKind,
    /// "pending", "ready" or "failed"
    pub status: &'static str,
    pub original_text: String,
    pub suggestion: Option<String>,
    pub error: Option<String>,
    pub notice: Option<&'static str>,
    pub ai_generated: bool,
    pub is_fallback: bool,
    pub synthetic: bool,
    pub can_accept: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRowView {
    pub anchor_text: String,
    pub url: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPanelView {
    pub position: FloatingPosition,
    pub keyword: String,
    pub searching: bool,
    pub can_search: bool,
    pub links: Vec<LinkRowView>,
    pub message: Option<&'static str>,
    pub is_fallback: bool,
    pub can_accept: bool,
}

/// Everything the host needs to draw the floating surfaces
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "surface", rename_all = "camelCase")]
pub enum UiView {
    Idle,
    Menu {
        position: FloatingPosition,
        items: Vec<MenuItem>,
    },
    KindChooser {
        position: FloatingPosition,
        kinds: Vec<MenuItem>,
    },
    SuggestionPanel(SuggestionPanelView),
    LinkPanel(LinkPanelView),
}

pub fn render(
    state: &UiState,
    placement: &PlacementConfig,
    container: Option<ContainerRect>,
) -> UiView {
    let gap = placement.gap_px;
    match state {
        UiState::Idle => UiView::Idle,
        UiState::MenuOpen { snapshot } => UiView::Menu {
            position: menu_position(snapshot.anchor, gap),
            items: MENU_ITEMS.to_vec(),
        },
        UiState::KindChooserOpen { snapshot } => UiView::KindChooser {
            position: chooser_position(snapshot.anchor, gap),
            kinds: TransformKind::ALL
                .iter()
                .map(|kind| MenuItem {
                    id: kind.as_str(),
                    label: kind.label(),
                })
                .collect(),
        },
        UiState::SuggestionPanelOpen(panel) => {
            let position = panel_position(
                panel.snapshot.anchor,
                container,
                placement.suggestion_panel_width,
                gap,
            );
            UiView::SuggestionPanel(suggestion_view(panel, position))
        }
        UiState::LinkPanelOpen(panel) => {
            let position =
                panel_position(panel.snapshot.anchor, container, placement.link_panel_width, gap);
            UiView::LinkPanel(link_view(panel, position))
        }
    }
}

fn suggestion_view(panel: &SuggestionPanel, position: FloatingPosition) -> SuggestionPanelView {
    let (status, error) = match &panel.status {
        SuggestionStatus::Pending => ("pending", None),
        SuggestionStatus::Ready(_) => ("ready", None),
        SuggestionStatus::Failed { message, .. } => ("failed", Some(message.clone())),
    };
    let result = panel.result();
    let is_fallback = result.map_or(false, |r| r.is_fallback);

    SuggestionPanelView {
        position,
        title: panel.kind.title(),
        kind: panel.kind,
        status,
        original_text: panel.snapshot.selected_text.clone(),
        suggestion: result.map(|r| r.transformed_text.clone()),
        error,
        notice: is_fallback.then_some(SUGGESTION_FALLBACK_NOTICE),
        ai_generated: result.map_or(false, |r| r.is_ai_generated()),
        is_fallback,
        synthetic: result.map_or(false, |r| r.synthetic),
        can_accept: panel.suggestion().is_some(),
    }
}

fn link_view(panel: &LinkPanel, position: FloatingPosition) -> LinkPanelView {
    let (links, message, is_fallback) = match &panel.search {
        LinkSearch::NotSearched => (Vec::new(), Some(LINKS_PROMPT), false),
        LinkSearch::Pending(_) => (Vec::new(), None, false),
        LinkSearch::NoMatch => (Vec::new(), Some(LINKS_EMPTY), false),
        LinkSearch::Results { list, is_fallback } => {
            let rows = list
                .links()
                .iter()
                .enumerate()
                .map(|(i, link)| LinkRowView {
                    anchor_text: link.anchor_text.clone(),
                    url: link.url.clone(),
                    selected: list.is_selected(i),
                })
                .collect();
            let notice = is_fallback.then_some(LINKS_FALLBACK_NOTICE);
            (rows, notice, *is_fallback)
        }
    };

    LinkPanelView {
        position,
        keyword: panel.keyword.clone(),
        searching: panel.is_searching(),
        can_search: panel.can_search(),
        links,
        message,
        is_fallback,
        can_accept: panel.selected().is_some(),
    }
}
