//! Link-suggestion wire format and the fixed offline list

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::models::LinkSuggestion;

#[derive(Debug, Serialize)]
pub struct LinksRequestBody<'a> {
    pub keyword: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinksResponseBody {
    links: Vec<LinkSuggestion>,
    #[serde(default)]
    is_mock: bool,
}

/// Parse `{links, isMock}`; returns the links and the backend's mock flag
pub fn parse_links(body: &str) -> Result<(Vec<LinkSuggestion>, bool)> {
    let parsed: LinksResponseBody = serde_json::from_str(body)
        .map_err(|e| EditorError::remote(format!("malformed links response: {}", e)))?;
    Ok((parsed.links, parsed.is_mock))
}

/// The fixed list offered when the link backend cannot be reached
pub fn fallback_links() -> Vec<LinkSuggestion> {
    vec![
        LinkSuggestion::new(
            "add labels, set a",
            "https://example.com/using-labels-on-your-help-center-articles",
        ),
        LinkSuggestion::new(
            "set a main key",
            "https://example.com/primary-keywords-the-most-critical-part-of-your-seo",
        ),
        LinkSuggestion::new(
            "customize your article's",
            "https://example.com/how-do-i-edit-content-center-article-metadata-before",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_links() {
        let body = r#"{"links":[{"anchorText":"a b","url":"https://x.test"}],"isMock":true}"#;
        let (links, is_mock) = parse_links(body).unwrap();
        assert_eq!(links, vec![LinkSuggestion::new("a b", "https://x.test")]);
        assert!(is_mock);
    }

    #[test]
    fn test_parse_links_rejects_error_body() {
        let err = parse_links(r#"{"error":"Keyword is required"}"#).unwrap_err();
        assert!(matches!(err, EditorError::RemoteUnavailable(_)));
    }

    #[test]
    fn test_fallback_is_fixed() {
        assert_eq!(fallback_links(), fallback_links());
        assert_eq!(fallback_links().len(), 3);
    }
}
