//! `POST suggestLinks`: the mock link backend

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use super::RouteResponse;
use crate::gateway::links::fallback_links;
use crate::models::LinkSuggestion;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Deserialize)]
struct LinksRouteBody {
    #[serde(default)]
    keyword: Option<String>,
}

/// Whitespace runs become `-`
pub fn slug(keyword: &str) -> String {
    WHITESPACE_RE.replace_all(keyword, "-").into_owned()
}

/// The three fixed suggestions plus two built from `keyword`
pub fn mock_links(keyword: &str) -> Vec<LinkSuggestion> {
    let slug = slug(keyword);
    let mut links = fallback_links();
    links.push(LinkSuggestion::new(
        format!("learn more about {}", keyword),
        format!("https://example.com/articles/{}", slug),
    ));
    links.push(LinkSuggestion::new(
        format!("{} best practices", keyword),
        format!("https://example.com/best-practices-for-{}", slug),
    ));
    links
}

pub fn handle_links(body: &str) -> RouteResponse {
    let parsed: LinksRouteBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("links route: unreadable body: {}", e);
            return RouteResponse::error(500, "Failed to fetch external links");
        }
    };

    let keyword = parsed.keyword.as_deref().map(str::trim).unwrap_or_default();
    if keyword.is_empty() {
        return RouteResponse::error(400, "Keyword is required");
    }

    RouteResponse::ok(json!({
        "links": mock_links(keyword),
        "isMock": true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::links::parse_links;

    #[test]
    fn test_keyword_links_are_appended() {
        let links = mock_links("focus  keyword");
        assert_eq!(links.len(), 5);
        assert_eq!(links[3].anchor_text, "learn more about focus  keyword");
        assert_eq!(links[3].url, "https://example.com/articles/focus-keyword");
        assert_eq!(links[4].anchor_text, "focus  keyword best practices");
        assert_eq!(links[4].url, "https://example.com/best-practices-for-focus-keyword");
    }

    #[test]
    fn test_response_parses_as_links_body() {
        let response = handle_links(r#"{"keyword":"metadata"}"#);
        assert_eq!(response.status, 200);
        let (links, is_mock) = parse_links(&response.body.to_string()).unwrap();
        assert!(is_mock);
        assert_eq!(links[0].anchor_text, "add labels, set a");
        assert_eq!(links[4].url, "https://example.com/best-practices-for-metadata");
    }

    #[test]
    fn test_missing_keyword() {
        for body in [r#"{}"#, r#"{"keyword":""}"#, r#"{"keyword":"  "}"#] {
            let response = handle_links(body);
            assert_eq!(response.status, 400);
            assert_eq!(response.body["error"], "Keyword is required");
        }
    }

    #[test]
    fn test_unreadable_body() {
        let response = handle_links("keyword=metadata");
        assert_eq!(response.status, 500);
        assert!(!response.is_success());
    }
}
