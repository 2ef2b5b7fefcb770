// End-to-end assist flows: selection -> menu -> backend -> accept -> document

use article_assist_wasm::config::{EditorConfig, GatewayConfig};
use article_assist_wasm::document::{BlockDocument, DocumentModel};
use article_assist_wasm::error::{EditorError, Result};
use article_assist_wasm::gateway::{Gateway, HttpRequest, HttpResponse, HttpTransport};
use article_assist_wasm::models::{DocRange, TransformKind};
use article_assist_wasm::mutation::LinkTarget;
use article_assist_wasm::ui::{ArticleEditor, MutationOutcome, UiView};
use async_trait::async_trait;
use pollster::block_on;

const HEAD_OFF: &str =
    "No one wants to approach someone who looks like they're about to bite their head off.";
const SIDEBAR: &str =
    "Use the sidebar to add tags, set a focus keyword, and customize your article's metadata.";
const SHORT_LIST: &str = "One. Two! Three?";

// Block content ranges for the three paragraphs above
const HEAD_OFF_RANGE: (usize, usize) = (1, 86);
const SIDEBAR_RANGE: (usize, usize) = (88, 176);
const SHORT_LIST_RANGE: (usize, usize) = (178, 194);

/// Every request fails as if the network were down
struct Offline;

#[async_trait(?Send)]
impl HttpTransport for Offline {
    async fn post_json(&self, _request: HttpRequest) -> Result<HttpResponse> {
        Err(EditorError::remote("network unreachable"))
    }
}

fn editor() -> ArticleEditor {
    ArticleEditor::from_paragraphs([HEAD_OFF, SIDEBAR, SHORT_LIST], &EditorConfig::default())
}

fn gateway() -> Gateway<Offline> {
    Gateway::new(Offline, GatewayConfig::default()).with_picker(|_| 0)
}

fn open_menu(ed: &mut ArticleEditor, (from, to): (usize, usize)) {
    ed.select(DocRange::new(from, to), 0).unwrap();
    assert!(ed.tick(200), "menu should open after the debounce");
}

fn run_transform(ed: &mut ArticleEditor, kind: TransformKind) -> String {
    ed.open_rewrite().unwrap();
    let ticket = ed.choose_kind(kind).unwrap();
    let outcome = block_on(gateway().transform(&ticket.request));
    assert!(ed.complete_transform(ticket.ticket, outcome));
    match ed.view() {
        UiView::SuggestionPanel(panel) => panel.suggestion.expect("suggestion text"),
        other => panic!("expected suggestion panel, got {:?}", other),
    }
}

#[test]
fn test_shorter_then_accept_and_undo() {
    let mut ed = editor();
    open_menu(&mut ed, HEAD_OFF_RANGE);

    let suggestion = run_transform(&mut ed, TransformKind::Shorter);
    assert_eq!(suggestion, "No one wants to approach someone who looks...");

    let outcome = ed.accept_suggestion().unwrap();
    assert!(matches!(outcome, MutationOutcome::Replaced { .. }));
    assert_eq!(ed.document().paragraphs()[0], suggestion);

    assert!(ed.document_mut().undo());
    assert_eq!(ed.document().paragraphs()[0], HEAD_OFF);
}

#[test]
fn test_list_offline() {
    let mut ed = editor();
    open_menu(&mut ed, SHORT_LIST_RANGE);

    let suggestion = run_transform(&mut ed, TransformKind::List);
    assert_eq!(suggestion, "• One.\n• Two!\n• Three?");
}

#[test]
fn test_simplify_offline_is_flagged_fallback() {
    let mut ed = editor();
    open_menu(&mut ed, SIDEBAR_RANGE);
    run_transform(&mut ed, TransformKind::Simplify);

    match ed.view() {
        UiView::SuggestionPanel(panel) => {
            assert_eq!(
                panel.suggestion.as_deref(),
                Some("Use the sidebar to add tags and settings.")
            );
            assert!(panel.is_fallback);
            assert!(!panel.synthetic);
            assert!(!panel.ai_generated);
            assert!(panel.notice.is_some());
        }
        other => panic!("expected suggestion panel, got {:?}", other),
    }
}

#[test]
fn test_partial_word_selection_is_expanded() {
    let mut ed = editor();
    // "pro" inside "approach"
    open_menu(&mut ed, (19, 22));
    ed.open_rewrite().unwrap();
    let ticket = ed.choose_kind(TransformKind::Rewrite).unwrap();
    assert_eq!(ticket.request.text, "approach");
    assert_eq!(ticket.request.context_before, None);
    assert_eq!(ticket.request.context_after.as_deref(), Some(SIDEBAR));
}

#[test]
fn test_offline_link_suggestions_and_accept() {
    let mut ed = editor();
    open_menu(&mut ed, SIDEBAR_RANGE);
    ed.open_links().unwrap();
    ed.set_keyword("metadata").unwrap();

    let ticket = ed.search_links().unwrap();
    let found = block_on(gateway().suggest_links(&ticket.keyword)).unwrap();
    assert!(found.is_fallback);
    assert_eq!(found.links.len(), 3);
    assert!(ed.complete_links(ticket.ticket, Ok(found)));

    ed.toggle_link(0).unwrap();
    ed.toggle_link(2).unwrap();
    match ed.view() {
        UiView::LinkPanel(panel) => {
            let selected: Vec<bool> = panel.links.iter().map(|l| l.selected).collect();
            assert_eq!(selected, vec![false, false, true]);
            assert!(panel.is_fallback);
            assert!(panel.can_accept);
        }
        other => panic!("expected link panel, got {:?}", other),
    }

    let outcome = ed.accept_link().unwrap();
    match outcome {
        MutationOutcome::Linked { target, .. } => {
            assert_eq!(target, LinkTarget::Anchor(DocRange::new(142, 166)));
        }
        other => panic!("expected a link, got {:?}", other),
    }
    let links = ed.document().links();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].text, "customize your article's");
    assert!(ed.state().is_idle());
}

#[test]
fn test_discard_never_touches_document() {
    let mut ed = editor();
    let before: BlockDocument = ed.document().clone();
    open_menu(&mut ed, SHORT_LIST_RANGE);
    ed.open_rewrite().unwrap();
    let ticket = ed.choose_kind(TransformKind::Table).unwrap();

    assert!(ed.discard());
    // the result arrives after the panel closed
    let outcome = block_on(gateway().transform(&ticket.request));
    assert!(!ed.complete_transform(ticket.ticket, outcome));
    assert!(!ed.discard());

    assert_eq!(ed.document().paragraphs(), before.paragraphs());
    assert!(!ed.document().can_undo());
    assert_eq!(ed.document().selection().range(), DocRange::new(178, 194));
}
