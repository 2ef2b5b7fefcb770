//! WASM API for the HTTP route handlers
//!
//! Lets a service worker (or any JS server) answer the editor's own
//! requests with the same handlers the native tests use.

use wasm_bindgen::prelude::*;

use super::editor::gateway_config;
use super::helpers::serialize;
use crate::gateway::{FetchTransport, Gateway};
use crate::routes::{handle_links, handle_transform};
use crate::wasm_info;

/// Handle `POST transform`; resolves to `{status, body}`
#[wasm_bindgen(js_name = handleTransformRoute)]
pub async fn handle_transform_route(body: String) -> Result<JsValue, JsValue> {
    wasm_info!("handleTransformRoute: {} byte body", body.len());
    let gateway = Gateway::new(FetchTransport, gateway_config());
    let response = handle_transform(&gateway, &body).await;
    serialize(&response, "Route response serialization error")
}

/// Handle `POST suggestLinks`; returns `{status, body}`
#[wasm_bindgen(js_name = handleLinksRoute)]
pub fn handle_links_route(body: &str) -> Result<JsValue, JsValue> {
    wasm_info!("handleLinksRoute: {} byte body", body.len());
    serialize(&handle_links(body), "Route response serialization error")
}
