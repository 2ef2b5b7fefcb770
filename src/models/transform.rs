//! Transformation request/result types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

/// The closed set of selection transformations offered by the kind chooser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Simplify,
    Rewrite,
    Longer,
    Shorter,
    List,
    Table,
}

impl TransformKind {
    /// Chooser order
    pub const ALL: [TransformKind; 6] = [
        TransformKind::Simplify,
        TransformKind::Rewrite,
        TransformKind::Longer,
        TransformKind::Shorter,
        TransformKind::List,
        TransformKind::Table,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::Simplify => "simplify",
            TransformKind::Rewrite => "rewrite",
            TransformKind::Longer => "longer",
            TransformKind::Shorter => "shorter",
            TransformKind::List => "list",
            TransformKind::Table => "table",
        }
    }

    /// Label shown in the kind chooser
    pub fn label(&self) -> &'static str {
        match self {
            TransformKind::Simplify => "Simplify",
            TransformKind::Rewrite => "Re-write",
            TransformKind::Longer => "Make Longer",
            TransformKind::Shorter => "Make Shorter",
            TransformKind::List => "Make List",
            TransformKind::Table => "Make Table",
        }
    }

    /// Title of the suggestion panel
    pub fn title(&self) -> &'static str {
        match self {
            TransformKind::Simplify => "Simplify Text",
            TransformKind::Rewrite => "Rewrite Text",
            TransformKind::Longer => "Make Text Longer",
            TransformKind::Shorter => "Make Text Shorter",
            TransformKind::List => "Convert to List",
            TransformKind::Table => "Convert to Table",
        }
    }

    /// Only simplify and rewrite are ever sent to the language model
    pub fn is_ai_backed(&self) -> bool {
        matches!(self, TransformKind::Simplify | TransformKind::Rewrite)
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EditorError::invalid(format!("unknown transform kind '{}'", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub text: String,
    pub kind: TransformKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_after: Option<String>,
}

impl TransformRequest {
    pub fn new(text: impl Into<String>, kind: TransformKind) -> Self {
        Self {
            text: text.into(),
            kind,
            context_before: None,
            context_after: None,
        }
    }

    pub fn with_context(mut self, before: Option<&str>, after: Option<&str>) -> Self {
        self.context_before = before.map(str::to_string);
        self.context_after = after.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub transformed_text: String,
    /// The remote backend failed and a local substitute was used
    pub is_fallback: bool,
    /// The kind is never backed by the remote model
    pub synthetic: bool,
}

impl TransformResult {
    pub fn remote(text: String) -> Self {
        Self {
            transformed_text: text,
            is_fallback: false,
            synthetic: false,
        }
    }

    pub fn fallback(text: String) -> Self {
        Self {
            transformed_text: text,
            is_fallback: true,
            synthetic: false,
        }
    }

    pub fn synthetic(text: String) -> Self {
        Self {
            transformed_text: text,
            is_fallback: false,
            synthetic: true,
        }
    }

    /// Whether the result came from the language model
    pub fn is_ai_generated(&self) -> bool {
        !self.is_fallback && !self.synthetic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        for kind in TransformKind::ALL {
            assert_eq!(kind.as_str().parse::<TransformKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "summarize".parse::<TransformKind>().unwrap_err();
        assert!(matches!(err, EditorError::InvalidInput(_)));
    }

    #[test]
    fn test_kind_serializes_as_tag() {
        let json = serde_json::to_string(&TransformKind::Shorter).unwrap();
        assert_eq!(json, "\"shorter\"");
    }

    #[test]
    fn test_only_simplify_and_rewrite_are_ai_backed() {
        let backed: Vec<_> = TransformKind::ALL.into_iter().filter(|k| k.is_ai_backed()).collect();
        assert_eq!(backed, vec![TransformKind::Simplify, TransformKind::Rewrite]);
    }

    #[test]
    fn test_result_flags_are_distinct() {
        assert!(TransformResult::remote("a".into()).is_ai_generated());
        let synthetic = TransformResult::synthetic("a".into());
        assert!(synthetic.synthetic && !synthetic.is_fallback);
        let fallback = TransformResult::fallback("a".into());
        assert!(fallback.is_fallback && !fallback.synthetic);
    }
}
