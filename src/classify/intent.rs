//! Intent classification.
//!
//! A state-free priority cascade over the full lowercased text. Question
//! detection runs first on purpose: an availability question that happens to
//! mention dates must not be filed as a firm booking request.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Intent;

/// Phrases indicating the sender is asking rather than asserting.
const QUESTION_INDICATORS: &[&str] = &[
    "could you please advise",
    "could you advise",
    "please advise",
    "would you have availability",
    "do you have availability",
    "do you have",
    "can you accommodate",
    "what tee times",
    "what is the",
    "what are the",
    "how much",
    "what's the pricing",
    "what dates",
    "any availability",
    "any tee times",
    "reaching out to check",
    "checking availability",
    "question",
    "query",
    "wondering",
    "curious",
    "can you tell",
    "what is",
    "how do",
    "when can",
    // Asking for confirmation, not giving it.
    "please confirm",
    "could you confirm",
    "let me know",
    "could you let me know",
];

static CONFIRMATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?:i |we )?confirm(?:ing)?\b",
        r"\byes,? (?:i|we) (?:confirm|accept|agree)\b",
        r"\bproceed with (?:the )?booking\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

const CANCELLATION_WORDS: &[&str] = &["cancel", "cancellation", "no longer", "withdraw"];
const MODIFICATION_WORDS: &[&str] = &["change", "modify", "reschedule", "move", "update"];
const INQUIRY_WORDS: &[&str] = &["book", "reserve", "enquiry", "inquiry", "interested"];

/// Extraction signals the cascade consults after the keyword rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentSignals {
    pub lodging_requested: bool,
    pub has_dates: bool,
    pub has_times: bool,
}

/// Classify intent, first matching rule wins.
pub fn classify_intent(text_lower: &str, signals: IntentSignals) -> Intent {
    if QUESTION_INDICATORS.iter().any(|q| text_lower.contains(q)) {
        return Intent::Question;
    }

    // Confirmation, guarded against "could you confirm..." phrasings.
    if CONFIRMATION_PATTERNS.iter().any(|p| p.is_match(text_lower))
        && !text_lower.contains("could you")
        && !text_lower.contains("please advise")
    {
        return Intent::Confirmation;
    }

    if CANCELLATION_WORDS.iter().any(|w| text_lower.contains(w)) {
        return Intent::Cancellation;
    }

    if MODIFICATION_WORDS.iter().any(|w| text_lower.contains(w)) {
        return Intent::Modification;
    }

    if signals.lodging_requested && signals.has_dates {
        return Intent::CombinedRequest;
    }
    if signals.lodging_requested {
        return Intent::LodgingRequest;
    }
    if signals.has_dates || signals.has_times {
        return Intent::BookingRequest;
    }

    if INQUIRY_WORDS.iter().any(|w| text_lower.contains(w)) {
        return Intent::NewInquiry;
    }

    Intent::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_beats_booking_details() {
        let text = "do you have availability for 4 players on april 10?";
        let signals = IntentSignals {
            has_dates: true,
            ..Default::default()
        };
        assert_eq!(classify_intent(text, signals), Intent::Question);
    }

    #[test]
    fn test_confirmation() {
        assert_eq!(
            classify_intent("we confirm the 9:30 slot", IntentSignals::default()),
            Intent::Confirmation
        );
    }

    #[test]
    fn test_could_you_confirm_is_a_question() {
        assert_eq!(
            classify_intent(
                "could you confirm our tee time for saturday?",
                IntentSignals::default()
            ),
            Intent::Question
        );
    }

    #[test]
    fn test_cancellation_before_modification() {
        assert_eq!(
            classify_intent(
                "we need to cancel and maybe change plans",
                IntentSignals::default()
            ),
            Intent::Cancellation
        );
    }

    #[test]
    fn test_combined_vs_lodging_vs_booking() {
        let both = IntentSignals {
            lodging_requested: true,
            has_dates: true,
            ..Default::default()
        };
        assert_eq!(classify_intent("party of 8", both), Intent::CombinedRequest);

        let lodging_only = IntentSignals {
            lodging_requested: true,
            ..Default::default()
        };
        assert_eq!(
            classify_intent("party of 8", lodging_only),
            Intent::LodgingRequest
        );

        let dates_only = IntentSignals {
            has_dates: true,
            ..Default::default()
        };
        assert_eq!(
            classify_intent("party of 8", dates_only),
            Intent::BookingRequest
        );
    }

    #[test]
    fn test_new_inquiry_and_unknown() {
        assert_eq!(
            classify_intent(
                "we are interested in a society outing",
                IntentSignals::default()
            ),
            Intent::NewInquiry
        );
        assert_eq!(
            classify_intent("hello there", IntentSignals::default()),
            Intent::Unknown
        );
    }
}
