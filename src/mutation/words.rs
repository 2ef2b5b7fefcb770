//! Word-boundary expansion
//!
//! Widens a range so that neither end cuts through a word. Scanning stays
//! inside the textblock holding each endpoint.

use crate::document::DocumentModel;
use crate::error::Result;
use crate::models::DocRange;

/// Characters that belong to a word
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Expand `range` outward to the nearest word boundaries
pub fn expand_to_word_boundaries<D: DocumentModel>(doc: &D, range: DocRange) -> Result<DocRange> {
    let start_block = doc.textblock_at(range.from)?;
    let chars: Vec<char> = start_block.text.chars().collect();
    let mut from_offset = range.from - start_block.content_start;
    while from_offset > 0 && is_word_char(chars[from_offset - 1]) {
        from_offset -= 1;
    }

    let end_block = doc.textblock_at(range.to)?;
    let chars: Vec<char> = end_block.text.chars().collect();
    let mut to_offset = range.to - end_block.content_start;
    while to_offset < chars.len() && is_word_char(chars[to_offset]) {
        to_offset += 1;
    }

    Ok(DocRange::new(
        start_block.content_start + from_offset,
        end_block.content_start + to_offset,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockDocument;

    #[test]
    fn test_middle_of_word_expands_to_whole_word() {
        // "approachab" is 10 characters; select "roa"
        let doc = BlockDocument::from_paragraphs(["be approachab now"]);
        let expanded = expand_to_word_boundaries(&doc, DocRange::new(7, 10)).unwrap();
        assert_eq!(doc.text_between(expanded).unwrap(), "approachab");
    }

    #[test]
    fn test_partial_words_at_both_ends() {
        let doc = BlockDocument::from_paragraphs(["making eye contact matters"]);
        // "ing eye cont"
        let expanded = expand_to_word_boundaries(&doc, DocRange::new(4, 16)).unwrap();
        assert_eq!(doc.text_between(expanded).unwrap(), "making eye contact");
    }

    #[test]
    fn test_whole_words_unchanged() {
        let doc = BlockDocument::from_paragraphs(["making eye contact"]);
        let range = DocRange::new(8, 11);
        assert_eq!(expand_to_word_boundaries(&doc, range).unwrap(), range);
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        let doc = BlockDocument::from_paragraphs(["(hello), world"]);
        let expanded = expand_to_word_boundaries(&doc, DocRange::new(3, 5)).unwrap();
        assert_eq!(doc.text_between(expanded).unwrap(), "hello");
    }

    #[test]
    fn test_expansion_stops_at_block_edges() {
        let doc = BlockDocument::from_paragraphs(["alpha", "beta"]);
        // "pha" .. "be" across blocks
        let expanded = expand_to_word_boundaries(&doc, DocRange::new(4, 10)).unwrap();
        assert_eq!(doc.text_between(expanded).unwrap(), "alpha beta");
    }
}
