//! Transformation Gateway
//!
//! Uniform boundary to the language-model and link-suggestion backends.
//! Every remote failure is caught here and turned into a flagged local
//! substitute; the only error a caller can see is `InvalidInput`.
//!
//! ## Modules
//!
//! - `transport`: HTTP seam (`HttpTransport`)
//! - `fetch`: browser `fetch` transport
//! - `prompt`: Mustache prompt templates and the chat-completions wire format
//! - `fallback`: deterministic local generators
//! - `links`: link wire format and the fixed offline list

pub mod fallback;
pub mod fetch;
pub mod links;
pub mod prompt;
pub mod transport;

pub use fallback::{random_index, IndexPicker};
pub use fetch::FetchTransport;
pub use transport::{HttpRequest, HttpResponse, HttpTransport};

use crate::config::GatewayConfig;
use crate::error::{EditorError, Result};
use crate::models::{LinkSuggestions, TransformRequest, TransformResult};

pub struct Gateway<T> {
    transport: T,
    config: GatewayConfig,
    pick: IndexPicker,
}

impl<T: HttpTransport> Gateway<T> {
    pub fn new(transport: T, config: GatewayConfig) -> Self {
        Self {
            transport,
            config,
            pick: random_index,
        }
    }

    /// Replace the random choice used by the local "longer" generator
    pub fn with_picker(mut self, pick: IndexPicker) -> Self {
        self.pick = pick;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Transform `request.text` according to `request.kind`
    pub async fn transform(&self, request: &TransformRequest) -> Result<TransformResult> {
        if request.text.trim().is_empty() {
            return Err(EditorError::invalid("text is required"));
        }

        if !request.kind.is_ai_backed() {
            let text = fallback::generate(request.kind, &request.text, self.pick);
            return Ok(TransformResult::synthetic(text));
        }

        match self.complete(request).await {
            Ok(text) => {
                log::debug!("{} completed remotely ({} chars)", request.kind, text.len());
                Ok(TransformResult::remote(text))
            }
            Err(err) => {
                log::warn!("{} falling back to local substitute: {}", request.kind, err);
                let text = fallback::generate(request.kind, &request.text, self.pick);
                Ok(TransformResult::fallback(text))
            }
        }
    }

    async fn complete(&self, request: &TransformRequest) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| EditorError::remote("API key is not configured"))?;

        let chat = prompt::chat_request(request, &self.config)?;
        let body = serde_json::to_string(&chat)
            .map_err(|e| EditorError::remote(format!("encode completion request: {}", e)))?;

        let http = HttpRequest::post_json(&self.config.completions_url, body)
            .header("Authorization", format!("Bearer {}", api_key));
        let response = self.transport.post_json(http).await?;
        if !response.is_success() {
            return Err(EditorError::remote(format!(
                "completion API status {}: {}",
                response.status, response.body
            )));
        }

        prompt::parse_completion(&response.body)
    }

    /// Ask the link backend for suggestions for `keyword`
    pub async fn suggest_links(&self, keyword: &str) -> Result<LinkSuggestions> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(EditorError::invalid("keyword is required"));
        }

        match self.fetch_links(keyword).await {
            Ok(links) => Ok(LinkSuggestions {
                links,
                is_fallback: false,
            }),
            Err(err) => {
                log::warn!("link suggestions for '{}' falling back: {}", keyword, err);
                Ok(LinkSuggestions {
                    links: links::fallback_links(),
                    is_fallback: true,
                })
            }
        }
    }

    async fn fetch_links(&self, keyword: &str) -> Result<Vec<crate::models::LinkSuggestion>> {
        let body = serde_json::to_string(&links::LinksRequestBody { keyword })
            .map_err(|e| EditorError::remote(format!("encode links request: {}", e)))?;
        let response = self
            .transport
            .post_json(HttpRequest::post_json(&self.config.links_url, body))
            .await?;
        if !response.is_success() {
            return Err(EditorError::remote(format!(
                "links API status {}: {}",
                response.status, response.body
            )));
        }

        let (links, is_mock) = links::parse_links(&response.body)?;
        log::debug!("{} link(s) for '{}' (backend mock: {})", links.len(), keyword, is_mock);
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinkSuggestion, TransformKind};
    use async_trait::async_trait;
    use pollster::block_on;
    use std::cell::RefCell;

    /// Replays canned responses and records what was sent
    struct ScriptedTransport {
        response: Result<HttpResponse>,
        sent: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn offline() -> Self {
            Self {
                response: Err(EditorError::remote("connection refused")),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ScriptedTransport {
        async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.sent.borrow_mut().push(request);
            self.response.clone()
        }
    }

    fn keyed() -> GatewayConfig {
        GatewayConfig {
            api_key: Some("test-key".to_string()),
            ..GatewayConfig::default()
        }
    }

    fn first(_: usize) -> usize {
        0
    }

    #[test]
    fn test_remote_simplify() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Be approachable."}}]}"#;
        let gateway = Gateway::new(ScriptedTransport::ok(200, body), keyed());
        let request = TransformRequest::new("Approachability is key here", TransformKind::Simplify)
            .with_context(Some("Before."), None);

        let result = block_on(gateway.transform(&request)).unwrap();
        assert_eq!(result, TransformResult::remote("Be approachable.".to_string()));

        let sent = gateway.transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "https://api.jina.ai/v1/chat/completions");
        assert!(sent[0]
            .headers
            .contains(&("Authorization".to_string(), "Bearer test-key".to_string())));
        assert!(sent[0].body.contains("PREVIOUS PARAGRAPH: Before."));
    }

    #[test]
    fn test_http_error_falls_back() {
        let gateway = Gateway::new(ScriptedTransport::ok(500, "{}"), keyed());
        let request = TransformRequest::new("Approachability is key here", TransformKind::Simplify);
        let result = block_on(gateway.transform(&request)).unwrap();
        assert!(result.is_fallback);
        assert!(!result.synthetic);
        assert_eq!(result.transformed_text, "Being approachable matters most");
    }

    #[test]
    fn test_missing_key_falls_back_without_calling() {
        let gateway = Gateway::new(ScriptedTransport::offline(), GatewayConfig::default());
        let request = TransformRequest::new("Nothing matches", TransformKind::Rewrite);
        let result = block_on(gateway.transform(&request)).unwrap();
        assert!(result.is_fallback);
        assert_eq!(result.transformed_text, "Nothing matches");
        assert!(gateway.transport.sent.borrow().is_empty());
    }

    #[test]
    fn test_local_kinds_never_call_backend() {
        let gateway = Gateway::new(ScriptedTransport::offline(), keyed()).with_picker(first);
        for kind in [
            TransformKind::Longer,
            TransformKind::Shorter,
            TransformKind::List,
            TransformKind::Table,
        ] {
            let request = TransformRequest::new("One sentence. Another one.", kind);
            let result = block_on(gateway.transform(&request)).unwrap();
            assert!(result.synthetic, "{} should be synthetic", kind);
            assert!(!result.is_fallback);
            assert!(!result.transformed_text.is_empty());
        }
        assert!(gateway.transport.sent.borrow().is_empty());
    }

    #[test]
    fn test_empty_text_is_invalid() {
        let gateway = Gateway::new(ScriptedTransport::offline(), keyed());
        let request = TransformRequest::new("  ", TransformKind::Shorter);
        assert!(matches!(
            block_on(gateway.transform(&request)),
            Err(EditorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_links_offline_returns_fixed_list() {
        let gateway = Gateway::new(ScriptedTransport::offline(), keyed());
        let result = block_on(gateway.suggest_links("metadata")).unwrap();
        assert!(result.is_fallback);
        assert_eq!(result.links, links::fallback_links());
    }

    #[test]
    fn test_links_remote() {
        let body = r#"{"links":[{"anchorText":"learn more about metadata","url":"https://example.com/articles/metadata"}],"isMock":true}"#;
        let gateway = Gateway::new(ScriptedTransport::ok(200, body), keyed());
        let result = block_on(gateway.suggest_links(" metadata ")).unwrap();
        assert!(!result.is_fallback);
        assert_eq!(
            result.links,
            vec![LinkSuggestion::new(
                "learn more about metadata",
                "https://example.com/articles/metadata"
            )]
        );
        assert_eq!(gateway.transport.sent.borrow()[0].body, r#"{"keyword":"metadata"}"#);
    }

    #[test]
    fn test_empty_keyword_is_invalid() {
        let gateway = Gateway::new(ScriptedTransport::offline(), keyed());
        assert!(matches!(
            block_on(gateway.suggest_links("")),
            Err(EditorError::InvalidInput(_))
        ));
    }
}
