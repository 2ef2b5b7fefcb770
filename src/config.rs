//! Editor configuration
//!
//! Every field has a default, so hosts can pass a partial JSON/YAML document
//! (or a plain JS object through the API) and only override what they need.

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};

/// Default debounce applied to selection churn before the menu shows or hides
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Top-level configuration of one editor instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Delay before a selection change drives a visible menu transition
    pub debounce_ms: u64,
    /// Maximum number of undoable steps kept by the in-memory document
    pub history_limit: usize,
    pub gateway: GatewayConfig,
    pub placement: PlacementConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            history_limit: 100,
            gateway: GatewayConfig::default(),
            placement: PlacementConfig::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(src: &str) -> Result<Self> {
        serde_json::from_str(src)
            .map_err(|e| EditorError::invalid(format!("config JSON: {}", e)))
    }

    pub fn from_yaml(src: &str) -> Result<Self> {
        serde_yaml::from_str(src)
            .map_err(|e| EditorError::invalid(format!("config YAML: {}", e)))
    }
}

/// Remote backends used by the transformation gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Chat-completions endpoint of the language-model backend
    pub completions_url: String,
    pub model: String,
    /// Bearer credential; the remote call is skipped (fallback used) when absent
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Link-suggestion endpoint
    pub links_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            completions_url: "https://api.jina.ai/v1/chat/completions".to_string(),
            model: "jina-mistral-8b-instruct".to_string(),
            api_key: None,
            temperature: 0.7,
            max_tokens: 500,
            links_url: "/api/links".to_string(),
        }
    }
}

/// Geometry used to place floating surfaces next to the selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementConfig {
    /// Vertical gap between the selection and a floating surface
    pub gap_px: f32,
    pub suggestion_panel_width: f32,
    pub link_panel_width: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            gap_px: 10.0,
            suggestion_panel_width: 384.0,
            link_panel_width: 450.0,
        }
    }
}
