//! Urgency classification.
//!
//! Explicit urgency keywords win; only without one does the classifier fall
//! back to how soon the preferred date is.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::types::Urgency;

/// Keyword tiers checked in order, strongest first.
static URGENCY_TIERS: LazyLock<Vec<(Vec<Regex>, Urgency)>> = LazyLock::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("Invalid regex"))
            .collect()
    };
    vec![
        (
            compile(&[
                r"\burgent\b",
                r"\basap\b",
                r"\bas soon as possible\b",
                r"\bimmediate\b",
                r"\bright away\b",
            ]),
            Urgency::Urgent,
        ),
        (
            compile(&[
                r"\btoday\b",
                r"\btomorrow\b",
                r"\bthis week\b",
                r"\bshort notice\b",
                r"\blast minute\b",
            ]),
            Urgency::High,
        ),
        (
            compile(&[r"\bnext week\b", r"\bupcoming\b", r"\bsoon\b"]),
            Urgency::Normal,
        ),
    ]
});

/// Classify urgency from keywords, falling back to preferred-date proximity.
pub fn classify_urgency(
    text_lower: &str,
    preferred_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Urgency {
    for (patterns, level) in URGENCY_TIERS.iter() {
        if patterns.iter().any(|p| p.is_match(text_lower)) {
            return *level;
        }
    }

    if let Some(date) = preferred_date {
        let days_until = (date - today).num_days();
        return if days_until <= 1 {
            Urgency::Urgent
        } else if days_until <= 3 {
            Urgency::High
        } else if days_until <= 14 {
            Urgency::Normal
        } else {
            Urgency::Low
        };
    }

    Urgency::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_keyword_beats_distant_date() {
        let urgency = classify_urgency(
            "asap please, any day in september",
            Some(ymd(2026, 9, 10)),
            ymd(2026, 3, 1),
        );
        assert_eq!(urgency, Urgency::Urgent);
    }

    #[test]
    fn test_date_proximity_tiers() {
        let today = ymd(2026, 3, 1);
        let classify = |date| classify_urgency("a quiet note", Some(date), today);
        assert_eq!(classify(ymd(2026, 3, 2)), Urgency::Urgent);
        assert_eq!(classify(ymd(2026, 3, 4)), Urgency::High);
        assert_eq!(classify(ymd(2026, 3, 14)), Urgency::Normal);
        assert_eq!(classify(ymd(2026, 6, 1)), Urgency::Low);
    }

    #[test]
    fn test_no_signal_is_unknown() {
        assert_eq!(
            classify_urgency("a quiet note", None, ymd(2026, 3, 1)),
            Urgency::Unknown
        );
    }
}
