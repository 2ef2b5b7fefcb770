//! Deterministic local text generators
//!
//! Used in two roles: as the substitute for simplify/rewrite when the
//! language model cannot be reached, and as the only implementation of the
//! longer/shorter/list/table kinds.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::TransformKind;

/// Picks an index in `0..len`; `len` is never zero
pub type IndexPicker = fn(usize) -> usize;

/// Uniform random index from the platform RNG
pub fn random_index(len: usize) -> usize {
    let mut buf = [0u8; 4];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) as usize % len.max(1),
        Err(e) => {
            log::debug!("getrandom unavailable ({}), using first choice", e);
            0
        }
    }
}

static SIMPLIFICATIONS: &[(&str, &str)] = &[
    (
        "Being friendly is like opening a door; it invites people in",
        "Being friendly welcomes people",
    ),
    (
        "No one wants to approach someone who looks like they're about to bite their head off",
        "People avoid unfriendly-looking people",
    ),
    ("Approachability is key here", "Being approachable matters most"),
    (
        "It's not just about looking happy; it's about making people feel comfortable around you",
        "Make others feel comfortable, not just look happy",
    ),
    ("This means making eye contact", "Make eye contact"),
    ("having open body language", "use open body language"),
    ("being willing to strike up a conversation", "start conversations"),
    (
        "Use the sidebar to add tags, set a focus keyword, and customize your article's metadata",
        "Use the sidebar to add tags and settings",
    ),
    (
        "This is a new article. You can start editing it right away",
        "This is a new article. Start editing now",
    ),
];

static REWRITES: &[(&str, &str)] = &[
    (
        "Being friendly is like opening a door; it invites people in",
        "Friendliness acts as an invitation, similar to an open door welcoming guests into your space",
    ),
    (
        "No one wants to approach someone who looks like they're about to bite their head off",
        "People naturally avoid individuals who appear hostile or unapproachable",
    ),
    (
        "Approachability is key here",
        "The essential factor in this situation is creating an approachable presence",
    ),
    (
        "It's not just about looking happy; it's about making people feel comfortable around you",
        "Beyond merely displaying happiness, the goal is to create a comfortable atmosphere for others in your presence",
    ),
    ("This means making eye contact", "This involves establishing eye contact with others"),
    ("having open body language", "maintaining welcoming body language"),
    ("being willing to strike up a conversation", "showing readiness to initiate dialogue"),
    (
        "Use the sidebar to add tags, set a focus keyword, and customize your article's metadata",
        "The sidebar provides options for adding tags, establishing a focus keyword, and modifying your article's metadata",
    ),
    (
        "This is a new article. You can start editing it right away",
        "You're looking at a fresh article that's ready for immediate editing",
    ),
];

/// Generic simplification rules, applied in order to every occurrence
static SIMPLIFY_RULES: &[(&str, &str)] = &[
    ("utilize", "use"),
    ("implement", "use"),
    ("facilitate", "help"),
    ("endeavor", "try"),
    ("commence", "start"),
    ("terminate", "end"),
    ("sufficient", "enough"),
    ("ascertain", "find out"),
    ("subsequently", "later"),
    ("nevertheless", "still"),
    ("approximately", "about"),
    ("demonstrate", "show"),
    ("additionally", "also"),
    ("consequently", "so"),
    ("furthermore", "also"),
    ("however", "but"),
    ("therefore", "so"),
    ("in order to", "to"),
    ("due to the fact that", "because"),
    ("in the event that", "if"),
    ("in spite of the fact that", "although"),
    ("with regard to", "about"),
    ("in reference to", "about"),
];

const INTROS: [&str; 4] = [
    "To begin with, ",
    "First of all, ",
    "It's important to note that ",
    "Interestingly, ",
];

const ELABORATIONS: [&str; 4] = [
    ", which is a crucial aspect to consider,",
    ", as many experts in the field have noted,",
    ", according to recent research,",
    ", which demonstrates the importance of this topic,",
];

const CONCLUSIONS: [&str; 4] = [
    " This highlights the significance of understanding the full context.",
    " This demonstrates why this matter deserves careful consideration.",
    " This shows the complexity of the subject at hand.",
    " This underscores the need for further discussion on this topic.",
];

static INTRO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(To begin with|First of all|It's important to note that|Interestingly,)")
        .expect("intro pattern is valid")
});

static SENTENCE_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence pattern is valid"));

/// Exact table hit, else replace the longest contained phrase once
fn lookup_phrase(table: &[(&str, &str)], text: &str) -> Option<String> {
    if let Some((_, replacement)) = table.iter().find(|(phrase, _)| *phrase == text) {
        return Some(replacement.to_string());
    }

    table
        .iter()
        .filter(|(phrase, _)| text.contains(phrase))
        .fold(None, |best: Option<&(&str, &str)>, entry| match best {
            Some(b) if b.0.len() >= entry.0.len() => Some(b),
            _ => Some(entry),
        })
        .map(|(phrase, replacement)| text.replacen(phrase, replacement, 1))
}

pub fn simplify_text(text: &str) -> String {
    lookup_phrase(SIMPLIFICATIONS, text).unwrap_or_else(|| {
        SIMPLIFY_RULES
            .iter()
            .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
    })
}

pub fn rewrite_text(text: &str) -> String {
    lookup_phrase(REWRITES, text).unwrap_or_else(|| text.to_string())
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Add an intro, a mid-text elaboration and a concluding sentence
pub fn make_longer(text: &str, pick: IndexPicker) -> String {
    let mut expanded = if INTRO_RE.is_match(text) {
        text.to_string()
    } else {
        format!("{}{}", INTROS[pick(INTROS.len())], lowercase_first(text))
    };

    let mut words: Vec<String> = expanded.split(' ').map(str::to_string).collect();
    if words.len() > 8 {
        // the elaboration opens with a comma, so it attaches to the preceding word
        let position = words.len() / 2;
        words[position - 1].push_str(ELABORATIONS[pick(ELABORATIONS.len())]);
        expanded = words.join(" ");
    }

    expanded.push_str(CONCLUSIONS[pick(CONCLUSIONS.len())]);
    expanded
}

/// First `max(5, n / 2)` words (never more than exist) followed by "..."
pub fn make_shorter(text: &str) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    let keep = (words.len() / 2).max(5).min(words.len());
    format!("{}...", words[..keep].join(" "))
}

/// Split after `.`, `!` or `?` followed by whitespace; blank pieces dropped
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END_RE.find_iter(text) {
        // the terminator is a single ASCII byte
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn make_list(text: &str) -> String {
    split_sentences(text)
        .into_iter()
        .map(|s| format!("• {}", s))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn make_table(text: &str) -> String {
    let mut table = String::from("| Item | Description |\n|------|-------------|\n");
    for (i, sentence) in split_sentences(text).into_iter().enumerate() {
        table.push_str(&format!("| Item {} | {} |\n", i + 1, sentence));
    }
    table
}

/// Local generator for the kinds never sent to the language model.
///
/// Returns the input unchanged if a generator would produce nothing.
pub fn generate(kind: TransformKind, text: &str, pick: IndexPicker) -> String {
    let generated = match kind {
        TransformKind::Longer => make_longer(text, pick),
        TransformKind::Shorter => make_shorter(text),
        TransformKind::List => make_list(text),
        TransformKind::Table => make_table(text),
        TransformKind::Simplify => simplify_text(text),
        TransformKind::Rewrite => rewrite_text(text),
    };
    if generated.trim().is_empty() {
        text.to_string()
    } else {
        generated
    }
}

/// Substitute shown by the suggestion panel when the transform itself failed
pub fn panel_substitute(kind: TransformKind, text: &str) -> String {
    match kind {
        TransformKind::Simplify => format!("{} (simplified)", text),
        TransformKind::Rewrite => format!("{} (rewritten)", text),
        TransformKind::Longer => format!("{} (expanded with more details)", text),
        TransformKind::Shorter => make_shorter(text),
        TransformKind::List => format!("• {}", text.replace('.', "\n• ")),
        TransformKind::Table => format!("{} (modified)", text),
    }
}
