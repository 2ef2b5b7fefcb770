//! Prompt composition for the language-model backend
//!
//! Prompts are Mustache templates rendered with the selected text and the
//! paragraphs around it, wrapped in a chat-completions request.

use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::error::{EditorError, Result};
use crate::models::{TransformKind, TransformRequest};

pub const SYSTEM_PROMPT: &str =
    "You are an expert editor who helps improve text while maintaining context and flow.";

/// Context data for prompt rendering
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub text: String,
    pub previous: String,
    pub next: String,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PromptContext {
    pub fn from_request(request: &TransformRequest) -> Self {
        let previous = request.context_before.clone().unwrap_or_default();
        let next = request.context_after.clone().unwrap_or_default();
        Self {
            text: request.text.clone(),
            has_previous: !previous.is_empty(),
            has_next: !next.is_empty(),
            previous,
            next,
        }
    }
}

/// Get template content by transform kind
fn template_content(kind: TransformKind) -> Option<&'static str> {
    match kind {
        TransformKind::Simplify => Some(include_str!("templates/simplify.mustache")),
        TransformKind::Rewrite => Some(include_str!("templates/rewrite.mustache")),
        TransformKind::Longer
        | TransformKind::Shorter
        | TransformKind::List
        | TransformKind::Table => None,
    }
}

/// Render the user prompt for an AI-backed transform
pub fn render_prompt(request: &TransformRequest) -> Result<String> {
    let content = template_content(request.kind).ok_or_else(|| {
        EditorError::invalid(format!("'{}' is not sent to the language model", request.kind))
    })?;
    let template = mustache::compile_str(content)
        .map_err(|e| EditorError::remote(format!("prompt template: {}", e)))?;
    template
        .render_to_string(&PromptContext::from_request(request))
        .map_err(|e| EditorError::remote(format!("prompt render: {}", e)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

pub fn chat_request(request: &TransformRequest, config: &GatewayConfig) -> Result<ChatRequest> {
    Ok(ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::new("system", SYSTEM_PROMPT),
            ChatMessage::new("user", render_prompt(request)?),
        ],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    })
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Extract the trimmed content of the first choice
pub fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| EditorError::remote(format!("malformed completion: {}", e)))?;
    let content = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or_else(|| EditorError::remote("completion has no choices"))?;

    if content.is_empty() {
        return Err(EditorError::remote("completion is empty"));
    }
    Ok(content)
}
