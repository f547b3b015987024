//! Person-name recognition seam.
//!
//! [`PersonNer`] is the injection point for a richer model-backed recognizer.
//! The bundled [`PatternNer`] is heuristic only: it looks for adjacent
//! capitalized words near the top of the email and filters out the things
//! that look like names but are not (greetings, months, weekdays, venue
//! words). Without any backend the engine degrades silently to the labelled
//! patterns in [`contact`](super::contact).

use std::sync::LazyLock;

use regex::Regex;

/// Named-entity backend for person names. Implementations must be read-only
/// and safe for concurrent use.
pub trait PersonNer: Send + Sync {
    /// Best-guess person name in the text, or `None`.
    fn person_name(&self, text: &str) -> Option<String>;
}

// ============================================================================
// Pattern-Only Implementation
// ============================================================================

/// Only the top of the email is scanned; signatures and greetings cluster
/// there and quoted threads below produce junk.
const SCAN_PREFIX: usize = 500;

static CAPITALIZED_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+)\s+([A-Z][a-z]+)\b").expect("Invalid regex")
});

/// Words that pass the capitalization test but are never name parts.
const NON_NAME_WORDS: &[&str] = &[
    // Greetings and sign-offs
    "dear", "hello", "hi", "good", "kind", "best", "warm", "many", "regards", "thanks",
    "sincerely", "cheers", "yours", // Common sentence openers
    "the", "we", "our", "my", "this", "that", "please", "thank", "you", "looking",
    "hoping", "just", // Venue vocabulary
    "golf", "club", "course", "links", "resort", "hotel", "society", "tee", "green",
    "fees", // Months
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december", // Weekdays
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Capitalized-pair heuristic recognizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternNer;

impl PatternNer {
    pub fn new() -> Self {
        Self
    }
}

impl PersonNer for PatternNer {
    fn person_name(&self, text: &str) -> Option<String> {
        let mut end = SCAN_PREFIX.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let prefix = &text[..end];

        for cap in CAPITALIZED_PAIR.captures_iter(prefix) {
            let first = cap[1].to_lowercase();
            let second = cap[2].to_lowercase();
            if NON_NAME_WORDS.contains(&first.as_str())
                || NON_NAME_WORDS.contains(&second.as_str())
            {
                continue;
            }
            return Some(format!("{} {}", &cap[1], &cap[2]));
        }
        None
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_plain_name() {
        let ner = PatternNer::new();
        assert_eq!(
            ner.person_name("Booking enquiry from Padraig Walsh about next month"),
            Some("Padraig Walsh".to_string())
        );
    }

    #[test]
    fn test_skips_greeting_and_venue_pairs() {
        let ner = PatternNer::new();
        assert_eq!(
            ner.person_name("Dear Sir, the Portmore Golf Club is lovely in May June"),
            None
        );
    }

    #[test]
    fn test_skips_month_pairs() {
        let ner = PatternNer::new();
        assert_eq!(ner.person_name("Between April May we travel"), None);
    }

    #[test]
    fn test_only_prefix_is_scanned() {
        let ner = PatternNer::new();
        let mut text = "x".repeat(600);
        text.push_str(" Aoife Nolan");
        assert_eq!(ner.person_name(&text), None);
    }
}
