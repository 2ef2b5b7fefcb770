//! `POST transform`: run a transformation through the gateway

use serde::Deserialize;
use serde_json::json;

use super::RouteResponse;
use crate::error::EditorError;
use crate::gateway::{Gateway, HttpTransport};
use crate::models::{TransformKind, TransformRequest};

/// Accepts both the current field names and the older `type` /
/// `previousText` / `nextText` ones
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransformRouteBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, alias = "type")]
    kind: Option<String>,
    #[serde(default, alias = "previousText")]
    context_before: Option<String>,
    #[serde(default, alias = "nextText")]
    context_after: Option<String>,
}

pub async fn handle_transform<T: HttpTransport>(gateway: &Gateway<T>, body: &str) -> RouteResponse {
    let parsed: TransformRouteBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("transform route: unreadable body: {}", e);
            return RouteResponse::error(500, "Failed to generate rewrite");
        }
    };

    let text = match parsed.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return RouteResponse::error(400, "Text is required"),
    };
    let kind: TransformKind = match parsed.kind.as_deref().unwrap_or_default().parse() {
        Ok(kind) => kind,
        Err(e) => return RouteResponse::error(400, e.to_string()),
    };

    let request = TransformRequest::new(text, kind).with_context(
        parsed.context_before.as_deref().filter(|s| !s.is_empty()),
        parsed.context_after.as_deref().filter(|s| !s.is_empty()),
    );

    match gateway.transform(&request).await {
        Ok(result) => RouteResponse::ok(json!({
            "result": result.transformed_text,
            "isMock": !result.is_ai_generated(),
            "synthetic": result.synthetic,
        })),
        Err(EditorError::InvalidInput(msg)) => RouteResponse::error(400, msg),
        Err(e) => {
            log::error!("transform route: {}", e);
            RouteResponse::error(500, "Failed to generate rewrite")
        }
    }
}
