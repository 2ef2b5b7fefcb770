//! WASM API for the article editor
//!
//! The editor lives in WASM-owned storage. Every exported call locks it,
//! performs one action and returns the resulting `UiView`. Backend requests
//! run on the JS event loop via `spawn_local`; when one finishes the editor
//! is locked again to deliver the result, and the host's `onUiChange`
//! callback receives the new view.

use std::cell::RefCell;
use std::sync::Mutex;

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::helpers::{deserialize, deserialize_or_default, editor_error, millis, serialize};
use crate::config::{EditorConfig, GatewayConfig};
use crate::document::DocumentModel;
use crate::gateway::{FetchTransport, Gateway};
use crate::models::{DocRange, TransformKind};
use crate::ui::{ArticleEditor, ContainerRect, UiView};
use crate::{wasm_info, wasm_log, wasm_warn};

struct EditorSession {
    editor: ArticleEditor,
    gateway: GatewayConfig,
}

// WASM-owned editor storage (canonical source of truth)
lazy_static! {
    static ref EDITOR: Mutex<Option<EditorSession>> = Mutex::new(None);
}

thread_local! {
    static UI_LISTENER: RefCell<Option<js_sys::Function>> = RefCell::new(None);
}

fn with_session<R>(f: impl FnOnce(&mut EditorSession) -> Result<R, JsValue>) -> Result<R, JsValue> {
    let mut guard = EDITOR
        .lock()
        .map_err(|_| JsValue::from_str("Editor state is poisoned"))?;
    let session = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("No editor loaded"))?;
    f(session)
}

/// Gateway settings of the loaded editor, or the defaults
pub(crate) fn gateway_config() -> GatewayConfig {
    match EDITOR.lock() {
        Ok(guard) => guard
            .as_ref()
            .map(|session| session.gateway.clone())
            .unwrap_or_default(),
        Err(_) => GatewayConfig::default(),
    }
}

fn view_of(session: &EditorSession) -> Result<JsValue, JsValue> {
    serialize(&session.editor.view(), "UiView serialization error")
}

fn notify_ui(view: &UiView) {
    UI_LISTENER.with(|listener| {
        let listener = listener.borrow();
        let Some(callback) = listener.as_ref() else {
            return;
        };
        match serialize(view, "UiView serialization error") {
            Ok(value) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    wasm_warn!("onUiChange callback threw: {:?}", e);
                }
            }
            Err(_) => wasm_warn!("skipping onUiChange notification"),
        }
    });
}

/// Lock the editor, deliver a completion, and tell the host if it landed
fn deliver(complete: impl FnOnce(&mut ArticleEditor) -> bool) {
    let view = with_session(|session| {
        Ok(complete(&mut session.editor).then(|| session.editor.view()))
    });
    match view {
        Ok(Some(view)) => notify_ui(&view),
        Ok(None) => wasm_log!("completion arrived for a closed panel"),
        Err(e) => wasm_warn!("completion dropped: {:?}", e),
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Create the editor from plain paragraphs, replacing any previous one
///
/// # Parameters
/// * `paragraphs` - array of strings
/// * `config` - partial `EditorConfig` object, or undefined for defaults
#[wasm_bindgen(js_name = createEditor)]
pub fn create_editor(paragraphs: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let paragraphs: Vec<String> = deserialize(paragraphs, "Invalid paragraphs")?;
    let config: EditorConfig = deserialize_or_default(config, "Invalid editor config")?;
    wasm_info!("createEditor: {} paragraph(s)", paragraphs.len());

    let editor = ArticleEditor::from_paragraphs(paragraphs, &config);
    let view = serialize(&editor.document().to_view(), "Document serialization error")?;

    let mut guard = EDITOR
        .lock()
        .map_err(|_| JsValue::from_str("Editor state is poisoned"))?;
    *guard = Some(EditorSession {
        editor,
        gateway: config.gateway,
    });
    Ok(view)
}

/// Register the callback receiving the `UiView` after async completions
#[wasm_bindgen(js_name = onUiChange)]
pub fn on_ui_change(callback: js_sys::Function) {
    UI_LISTENER.with(|listener| *listener.borrow_mut() = Some(callback));
}

/// Container bounds used to place panels; undefined removes them
#[wasm_bindgen(js_name = setContainer)]
pub fn set_container(rect: JsValue) -> Result<(), JsValue> {
    let rect: Option<ContainerRect> = deserialize_or_default(rect, "Invalid container rect")?;
    with_session(|session| {
        session.editor.set_container(rect);
        Ok(())
    })
}

/// Mirror a user edit from the host: replace `from..to` with `text`
///
/// Open panels are kept; their frozen range is checked again on accept.
#[wasm_bindgen(js_name = applyEdit)]
pub fn apply_edit(from: usize, to: usize, text: &str) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session
            .editor
            .apply_edit(DocRange::new(from, to), text)
            .map_err(editor_error)?;
        serialize(
            &session.editor.document().to_view(),
            "Document serialization error",
        )
    })
}

// ============================================================================
// Selection
// ============================================================================

/// Report the live selection (positions as in `getDocument`)
#[wasm_bindgen(js_name = selectionChanged)]
pub fn selection_changed(from: usize, to: usize, now_ms: f64) -> Result<(), JsValue> {
    let now = millis(now_ms)?;
    with_session(|session| {
        session
            .editor
            .select(DocRange::new(from, to), now)
            .map_err(editor_error)
    })
}

/// Fire the debounced menu transition if due; true when the view changed
#[wasm_bindgen(js_name = tick)]
pub fn tick(now_ms: f64) -> Result<bool, JsValue> {
    let now = millis(now_ms)?;
    with_session(|session| Ok(session.editor.tick(now)))
}

/// When `tick` should next be called, if anything is pending
#[wasm_bindgen(js_name = nextDeadline)]
pub fn next_deadline() -> Result<Option<f64>, JsValue> {
    with_session(|session| Ok(session.editor.tracker().next_deadline().map(|ms| ms as f64)))
}

// ============================================================================
// Rewrite
// ============================================================================

#[wasm_bindgen(js_name = openRewrite)]
pub fn open_rewrite() -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.editor.open_rewrite().map_err(editor_error)?;
        view_of(session)
    })
}

/// Pick a kind and start the transform; the panel opens pending
#[wasm_bindgen(js_name = chooseRewriteKind)]
pub fn choose_rewrite_kind(kind: &str) -> Result<JsValue, JsValue> {
    let kind: TransformKind = kind.parse().map_err(editor_error)?;

    let (ticket, gateway, view) = with_session(|session| {
        let ticket = session.editor.choose_kind(kind).map_err(editor_error)?;
        Ok((ticket, session.gateway.clone(), view_of(session)?))
    })?;

    wasm_info!("chooseRewriteKind: {} ({} chars)", kind, ticket.request.text.len());
    spawn_local(async move {
        let gateway = Gateway::new(FetchTransport, gateway);
        let outcome = gateway.transform(&ticket.request).await;
        deliver(|editor| editor.complete_transform(ticket.ticket, outcome));
    });

    Ok(view)
}

#[wasm_bindgen(js_name = acceptSuggestion)]
pub fn accept_suggestion() -> Result<JsValue, JsValue> {
    with_session(|session| {
        let outcome = session.editor.accept_suggestion().map_err(editor_error)?;
        serialize(&outcome, "Outcome serialization error")
    })
}

// ============================================================================
// Links
// ============================================================================

#[wasm_bindgen(js_name = openLinks)]
pub fn open_links() -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.editor.open_links().map_err(editor_error)?;
        view_of(session)
    })
}

#[wasm_bindgen(js_name = setLinkKeyword)]
pub fn set_link_keyword(keyword: &str) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.editor.set_keyword(keyword).map_err(editor_error)?;
        view_of(session)
    })
}

/// Start a link search for the panel's keyword
#[wasm_bindgen(js_name = searchLinks)]
pub fn search_links() -> Result<JsValue, JsValue> {
    let (ticket, gateway, view) = with_session(|session| {
        let ticket = session.editor.search_links().map_err(editor_error)?;
        Ok((ticket, session.gateway.clone(), view_of(session)?))
    })?;

    wasm_info!("searchLinks: '{}'", ticket.keyword);
    spawn_local(async move {
        let gateway = Gateway::new(FetchTransport, gateway);
        let outcome = gateway.suggest_links(&ticket.keyword).await;
        deliver(|editor| editor.complete_links(ticket.ticket, outcome));
    });

    Ok(view)
}

#[wasm_bindgen(js_name = toggleLink)]
pub fn toggle_link(index: usize) -> Result<JsValue, JsValue> {
    with_session(|session| {
        session.editor.toggle_link(index).map_err(editor_error)?;
        view_of(session)
    })
}

#[wasm_bindgen(js_name = acceptLink)]
pub fn accept_link() -> Result<JsValue, JsValue> {
    with_session(|session| {
        let outcome = session.editor.accept_link().map_err(editor_error)?;
        serialize(&outcome, "Outcome serialization error")
    })
}

// ============================================================================
// Dismissal and views
// ============================================================================

#[wasm_bindgen(js_name = discardPanel)]
pub fn discard_panel() -> Result<bool, JsValue> {
    with_session(|session| Ok(session.editor.discard()))
}

#[wasm_bindgen(js_name = outsideClick)]
pub fn outside_click() -> Result<bool, JsValue> {
    with_session(|session| Ok(session.editor.outside_click()))
}

#[wasm_bindgen(js_name = getUiView)]
pub fn get_ui_view() -> Result<JsValue, JsValue> {
    with_session(|session| view_of(session))
}

#[wasm_bindgen(js_name = getDocument)]
pub fn get_document() -> Result<JsValue, JsValue> {
    with_session(|session| {
        serialize(
            &session.editor.document().to_view(),
            "Document serialization error",
        )
    })
}

/// Current plain text of `from..to`
#[wasm_bindgen(js_name = getText)]
pub fn get_text(from: usize, to: usize) -> Result<String, JsValue> {
    with_session(|session| {
        session
            .editor
            .document()
            .text_between(DocRange::new(from, to))
            .map_err(editor_error)
    })
}

// ============================================================================
// Undo/Redo
// ============================================================================

/// Undo the last accepted change; false when there is nothing to undo
#[wasm_bindgen(js_name = undo)]
pub fn undo() -> Result<bool, JsValue> {
    with_session(|session| Ok(session.editor.document_mut().undo()))
}

#[wasm_bindgen(js_name = redo)]
pub fn redo() -> Result<bool, JsValue> {
    with_session(|session| Ok(session.editor.document_mut().redo()))
}

#[wasm_bindgen(js_name = canUndo)]
pub fn can_undo() -> Result<bool, JsValue> {
    with_session(|session| Ok(session.editor.document().can_undo()))
}

#[wasm_bindgen(js_name = canRedo)]
pub fn can_redo() -> Result<bool, JsValue> {
    with_session(|session| Ok(session.editor.document().can_redo()))
}
