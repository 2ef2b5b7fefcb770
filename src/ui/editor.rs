//! Article editor controller
//!
//! Owns the document, the selection tracker and the UI state machine, and
//! exposes every user action as a synchronous method. Backend calls are not
//! made here: opening a panel hands out a ticket describing the request, and
//! the host feeds the outcome back through `complete_transform` or
//! `complete_links`. Completions for a ticket that is no longer pending are
//! dropped.

use crate::config::{EditorConfig, PlacementConfig};
use crate::document::{BlockDocument, DocumentModel, Transaction};
use crate::error::{EditorError, Result};
use crate::gateway::fallback::panel_substitute;
use crate::gateway::links::fallback_links;
use crate::models::{
    DocRange, LinkList, LinkSuggestions, TransformKind, TransformRequest, TransformResult,
};
use crate::mutation::{self, expand_to_word_boundaries};
use crate::selection::{SelectionTracker, Transition};

use super::placement::ContainerRect;
use super::state::{
    LinkPanel, LinkSearch, LinkTicket, MutationOutcome, SuggestionPanel, SuggestionStatus, Ticket,
    TransformTicket, UiState,
};
use super::view::{self, UiView};

pub const SUGGESTION_FAILED: &str = "Failed to generate suggestion.";

pub struct ArticleEditor<D = BlockDocument> {
    doc: D,
    tracker: SelectionTracker,
    state: UiState,
    placement: PlacementConfig,
    container: Option<ContainerRect>,
    next_ticket: u64,
}

impl ArticleEditor<BlockDocument> {
    /// Editor over an in-memory document built from plain paragraphs
    pub fn from_paragraphs<S: Into<String>>(
        paragraphs: impl IntoIterator<Item = S>,
        config: &EditorConfig,
    ) -> Self {
        let doc = BlockDocument::from_paragraphs(paragraphs).with_history_limit(config.history_limit);
        Self::new(doc, config)
    }
}

impl<D: DocumentModel> ArticleEditor<D> {
    pub fn new(doc: D, config: &EditorConfig) -> Self {
        Self {
            doc,
            tracker: SelectionTracker::new(config.debounce_ms),
            state: UiState::Idle,
            placement: config.placement.clone(),
            container: None,
            next_ticket: 0,
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    pub fn set_container(&mut self, container: Option<ContainerRect>) {
        self.container = container;
    }

    pub fn view(&self) -> UiView {
        view::render(&self.state, &self.placement, self.container)
    }

    /// Apply an edit made by the user in the host. Open surfaces stay as
    /// they are; a panel whose range no longer fits is dropped on accept.
    pub fn apply_edit(&mut self, range: DocRange, text: &str) -> Result<()> {
        self.doc.dispatch(Transaction::new().replace_range(range, text))?;
        log::debug!(
            "host edit {}..{} while {}",
            range.from,
            range.to,
            self.state.name()
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Set the live selection and report the change
    pub fn select(&mut self, range: DocRange, now_ms: u64) -> Result<()> {
        self.doc.set_selection(range)?;
        self.selection_changed(now_ms)
    }

    /// Report that the live selection changed
    pub fn selection_changed(&mut self, now_ms: u64) -> Result<()> {
        self.tracker.on_selection_change(&self.doc, now_ms)
    }

    /// Fire any debounced transition that is due. Returns true if the
    /// visible state changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.tracker.poll(now_ms) {
            Some(transition) => self.apply_transition(transition),
            None => false,
        }
    }

    fn apply_transition(&mut self, transition: Transition) -> bool {
        match transition {
            Transition::Show => {
                if self.state.has_panel() {
                    log::debug!("ignoring menu show while {} is open", self.state.name());
                    return false;
                }
                let Some(snapshot) = self.tracker.last_snapshot() else {
                    return false;
                };
                self.state = UiState::MenuOpen {
                    snapshot: snapshot.clone(),
                };
                true
            }
            Transition::Hide => match self.state {
                UiState::MenuOpen { .. } | UiState::KindChooserOpen { .. } => {
                    self.state = UiState::Idle;
                    true
                }
                _ => false,
            },
        }
    }

    fn next_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    // ------------------------------------------------------------------
    // Rewrite
    // ------------------------------------------------------------------

    pub fn open_rewrite(&mut self) -> Result<()> {
        match std::mem::take(&mut self.state) {
            UiState::MenuOpen { snapshot } => {
                self.state = UiState::KindChooserOpen { snapshot };
                Ok(())
            }
            other => {
                let err = EditorError::invalid(format!("cannot open rewrite from {}", other.name()));
                self.state = other;
                Err(err)
            }
        }
    }

    /// Pick a transform kind: widen the frozen range to whole words and open
    /// the suggestion panel in its pending state
    pub fn choose_kind(&mut self, kind: TransformKind) -> Result<TransformTicket> {
        let UiState::KindChooserOpen { snapshot } = &self.state else {
            return Err(EditorError::invalid(format!(
                "cannot choose a rewrite kind from {}",
                self.state.name()
            )));
        };

        let snapshot = match self.expanded(snapshot.range) {
            Ok((range, text)) if range != snapshot.range => {
                log::debug!(
                    "expanded {}..{} to {}..{}",
                    snapshot.range.from,
                    snapshot.range.to,
                    range.from,
                    range.to
                );
                snapshot.retargeted(range, text)
            }
            Ok(_) => snapshot.clone(),
            Err(err) => {
                log::warn!("keeping unexpanded selection: {}", err);
                snapshot.clone()
            }
        };

        if snapshot.selected_text.trim().is_empty() {
            return Err(EditorError::invalid("selection has no text to rewrite"));
        }

        if let Err(err) = self.doc.set_selection(snapshot.range) {
            log::warn!("could not reselect expanded range: {}", err);
        }

        let request = TransformRequest::new(snapshot.selected_text.clone(), kind)
            .with_context(snapshot.context_before(), snapshot.context_after());
        let ticket = self.next_ticket();
        self.state = UiState::SuggestionPanelOpen(SuggestionPanel {
            ticket,
            kind,
            snapshot,
            status: SuggestionStatus::Pending,
        });
        log::info!("requested {} ({:?})", kind, ticket);

        Ok(TransformTicket { ticket, request })
    }

    fn expanded(&self, range: DocRange) -> Result<(DocRange, String)> {
        let range = expand_to_word_boundaries(&self.doc, range)?;
        let text = self.doc.text_between(range)?;
        Ok((range, text))
    }

    /// Deliver the outcome of a transform request. Returns false if the
    /// ticket is no longer the pending one.
    pub fn complete_transform(
        &mut self,
        ticket: Ticket,
        outcome: Result<TransformResult>,
    ) -> bool {
        let panel = match &mut self.state {
            UiState::SuggestionPanelOpen(panel) if panel.ticket == ticket && panel.is_pending() => {
                panel
            }
            _ => {
                log::debug!("dropping transform result for {:?}", ticket);
                return false;
            }
        };

        panel.status = match outcome {
            Ok(result) => SuggestionStatus::Ready(result),
            Err(err) => {
                log::error!("{} failed: {}", panel.kind, err);
                let text = panel_substitute(panel.kind, &panel.snapshot.selected_text);
                SuggestionStatus::Failed {
                    message: SUGGESTION_FAILED.to_string(),
                    fallback: TransformResult::fallback(text),
                }
            }
        };
        true
    }

    /// Write the suggestion over the frozen range and close the panel
    pub fn accept_suggestion(&mut self) -> Result<MutationOutcome> {
        let text = match &self.state {
            UiState::SuggestionPanelOpen(panel) => match panel.suggestion() {
                Some(text) => text.to_string(),
                None if panel.is_pending() => {
                    return Err(EditorError::invalid("suggestion is still pending"))
                }
                None => return Err(EditorError::invalid("suggestion is empty")),
            },
            other => {
                return Err(EditorError::invalid(format!(
                    "no suggestion to accept in {}",
                    other.name()
                )))
            }
        };

        let UiState::SuggestionPanelOpen(panel) = std::mem::take(&mut self.state) else {
            return Err(EditorError::invalid("no suggestion to accept"));
        };
        let range = panel.snapshot.range;

        Ok(match mutation::replace_range(&mut self.doc, range, &text) {
            Ok(()) => MutationOutcome::Replaced {
                range,
                inserted: text,
            },
            Err(err) => {
                log::error!("suggestion not applied: {}", err);
                MutationOutcome::dropped(&err)
            }
        })
    }

    // ------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------

    pub fn open_links(&mut self) -> Result<()> {
        match std::mem::take(&mut self.state) {
            UiState::MenuOpen { snapshot } | UiState::KindChooserOpen { snapshot } => {
                let panel = LinkPanel::new(snapshot);
                log::debug!("link panel opened with keyword '{}'", panel.keyword);
                self.state = UiState::LinkPanelOpen(panel);
                Ok(())
            }
            other => {
                let err = EditorError::invalid(format!("cannot open links from {}", other.name()));
                self.state = other;
                Err(err)
            }
        }
    }

    fn link_panel_mut(&mut self) -> Result<&mut LinkPanel> {
        match &mut self.state {
            UiState::LinkPanelOpen(panel) => Ok(panel),
            other => Err(EditorError::invalid(format!(
                "link panel is not open ({})",
                other.name()
            ))),
        }
    }

    pub fn set_keyword(&mut self, keyword: &str) -> Result<()> {
        self.link_panel_mut()?.keyword = keyword.to_string();
        Ok(())
    }

    /// Start a link search for the current keyword
    pub fn search_links(&mut self) -> Result<LinkTicket> {
        let ticket = Ticket(self.next_ticket + 1);
        let panel = self.link_panel_mut()?;
        if panel.is_searching() {
            return Err(EditorError::invalid("a link search is already running"));
        }
        let keyword = panel.keyword.trim().to_string();
        if keyword.is_empty() {
            return Err(EditorError::invalid("keyword is required"));
        }

        panel.search = LinkSearch::Pending(ticket);
        self.next_ticket = ticket.0;
        log::info!("searching links for '{}' ({:?})", keyword, ticket);
        Ok(LinkTicket { ticket, keyword })
    }

    /// Deliver the outcome of a link search. Returns false if the ticket is
    /// no longer the pending one.
    pub fn complete_links(&mut self, ticket: Ticket, outcome: Result<LinkSuggestions>) -> bool {
        let panel = match &mut self.state {
            UiState::LinkPanelOpen(panel) if panel.search == LinkSearch::Pending(ticket) => panel,
            _ => {
                log::debug!("dropping link results for {:?}", ticket);
                return false;
            }
        };

        panel.search = match outcome {
            Ok(found) if found.links.is_empty() => LinkSearch::NoMatch,
            Ok(found) => LinkSearch::Results {
                list: LinkList::new(found.links),
                is_fallback: found.is_fallback,
            },
            Err(err) => {
                log::error!("link search failed: {}", err);
                LinkSearch::Results {
                    list: LinkList::new(fallback_links()),
                    is_fallback: true,
                }
            }
        };
        true
    }

    pub fn toggle_link(&mut self, index: usize) -> Result<()> {
        let panel = self.link_panel_mut()?;
        match &mut panel.search {
            LinkSearch::Results { list, .. } => {
                list.toggle(index);
                Ok(())
            }
            LinkSearch::NoMatch => Err(EditorError::NoMatch(panel.keyword.clone())),
            _ => Err(EditorError::invalid("no link results to select from")),
        }
    }

    /// Apply the selected link to the frozen range and close the panel
    pub fn accept_link(&mut self) -> Result<MutationOutcome> {
        let link = match &self.state {
            UiState::LinkPanelOpen(panel) => panel
                .selected()
                .cloned()
                .ok_or_else(|| EditorError::invalid("select exactly one link"))?,
            other => {
                return Err(EditorError::invalid(format!(
                    "no link to accept in {}",
                    other.name()
                )))
            }
        };

        let range = match std::mem::take(&mut self.state) {
            UiState::LinkPanelOpen(panel) => panel.snapshot.range,
            _ => return Err(EditorError::invalid("no link to accept")),
        };

        Ok(
            match mutation::apply_link(&mut self.doc, range, &link.anchor_text, &link.url) {
                Ok(target) => MutationOutcome::Linked {
                    target,
                    url: link.url,
                },
                Err(err) => {
                    log::error!("link not applied: {}", err);
                    MutationOutcome::dropped(&err)
                }
            },
        )
    }

    // ------------------------------------------------------------------
    // Dismissal
    // ------------------------------------------------------------------

    /// Close whatever is open. Returns true if something was open.
    pub fn discard(&mut self) -> bool {
        let was = std::mem::take(&mut self.state);
        if !was.is_idle() {
            log::debug!("closed {}", was.name());
        }
        !was.is_idle()
    }

    pub fn outside_click(&mut self) -> bool {
        self.discard()
    }
}
