//! Link suggestions and their single-select list

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSuggestion {
    pub anchor_text: String,
    pub url: String,
}

impl LinkSuggestion {
    pub fn new(anchor_text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            anchor_text: anchor_text.into(),
            url: url.into(),
        }
    }
}

/// Suggestions returned for one keyword query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSuggestions {
    pub links: Vec<LinkSuggestion>,
    pub is_fallback: bool,
}

/// Suggestion list with radio selection: at most one entry selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkList {
    links: Vec<LinkSuggestion>,
    selected: Option<usize>,
}

impl LinkList {
    pub fn new(links: Vec<LinkSuggestion>) -> Self {
        Self {
            links,
            selected: None,
        }
    }

    pub fn links(&self) -> &[LinkSuggestion] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Select `index`, clearing every other entry. Toggling the selected
    /// entry clears the selection. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.links.len() {
            return;
        }
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&LinkSuggestion> {
        self.selected.and_then(|i| self.links.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LinkList {
        LinkList::new(vec![
            LinkSuggestion::new("a", "https://a.test"),
            LinkSuggestion::new("b", "https://b.test"),
            LinkSuggestion::new("c", "https://c.test"),
        ])
    }

    #[test]
    fn test_selecting_b_after_a_leaves_only_b() {
        let mut list = sample();
        list.toggle(0);
        list.toggle(1);
        assert!(!list.is_selected(0));
        assert!(list.is_selected(1));
        assert_eq!(list.selected().unwrap().anchor_text, "b");
    }

    #[test]
    fn test_toggle_selected_clears() {
        let mut list = sample();
        list.toggle(2);
        list.toggle(2);
        assert!(list.selected().is_none());
    }

    #[test]
    fn test_out_of_range_toggle_is_ignored() {
        let mut list = sample();
        list.toggle(0);
        list.toggle(9);
        assert_eq!(list.selected_index(), Some(0));
    }
}
