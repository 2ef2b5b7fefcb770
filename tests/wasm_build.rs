//! WASM build test
//!
//! Drives the exported JS API in a browser to check the module loads and the
//! selection-to-menu path works across the boundary.

use article_assist_wasm::api::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn load() {
    let paragraphs = serde_wasm_bindgen::to_value(&vec![
        "Approachability is key here.",
        "This means making eye contact.",
    ])
    .unwrap();
    create_editor(paragraphs, JsValue::UNDEFINED).unwrap();
}

fn surface(view: &JsValue) -> String {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(view.clone()).unwrap();
    value["surface"].as_str().unwrap_or_default().to_string()
}

#[wasm_bindgen_test]
fn test_editor_creation() {
    load();
    assert_eq!(surface(&get_ui_view().unwrap()), "idle");
    assert!(!can_undo().unwrap());
}

#[wasm_bindgen_test]
fn test_menu_after_debounce() {
    load();
    selection_changed(1, 16, 1_000.0).unwrap();
    assert!(!tick(1_100.0).unwrap());
    assert!(tick(1_200.0).unwrap());
    assert_eq!(surface(&get_ui_view().unwrap()), "menu");

    assert_eq!(surface(&open_rewrite().unwrap()), "kindChooser");
    assert!(outside_click().unwrap());
    assert_eq!(surface(&get_ui_view().unwrap()), "idle");
}

#[wasm_bindgen_test]
fn test_unknown_kind_is_rejected() {
    load();
    selection_changed(1, 16, 0.0).unwrap();
    tick(200.0).unwrap();
    open_rewrite().unwrap();
    assert!(choose_rewrite_kind("poem").is_err());
}

#[wasm_bindgen_test]
fn test_links_route() {
    let response = handle_links_route(r#"{"keyword":"eye contact"}"#).unwrap();
    let value: serde_json::Value = serde_wasm_bindgen::from_value(response).unwrap();
    assert_eq!(value["status"], 200);
    assert_eq!(
        value["body"]["links"][3]["url"],
        "https://example.com/articles/eye-contact"
    );
}

#[wasm_bindgen_test]
fn test_invalid_timestamp() {
    load();
    assert!(tick(f64::NAN).is_err());
}

#[wasm_bindgen_test]
fn test_host_edit_keeps_menu() {
    load();
    selection_changed(0, 62, 0.0).unwrap();
    assert!(tick(200.0).unwrap());
    assert_eq!(surface(&get_ui_view().unwrap()), "menu");

    // "key" becomes "central"
    apply_edit(20, 23, "central").unwrap();
    assert_eq!(get_text(1, 33).unwrap(), "Approachability is central here.");
    assert!(can_undo().unwrap());
    assert_eq!(surface(&get_ui_view().unwrap()), "menu");
    assert!(apply_edit(100, 120, "x").is_err());
}
