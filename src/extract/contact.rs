//! Contact detail extractors: phone, email address, and contact name.
//!
//! Phone acceptance is deliberately strict about digit counts so that
//! booking-reference tokens like "ISL-20251118-DC68" are never read as phone
//! numbers: a candidate needs 10 digits, or 7 when visibly formatted with
//! separators.

use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// Phone
// ============================================================================

/// Phone pattern catalog, keyword-qualified first, then international, then
/// local formats.
static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:phone|mobile|cell|tel)[:\s]\s*([+\d\s().\-]+)",
        r"\+\d{1,3}[\s.\-]?\(?\d{1,4}\)?[\s.\-]?\d{1,4}[\s.\-]?\d{1,4}[\s.\-]?\d{1,4}",
        r"\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid phone pattern"))
    .collect()
});

/// Extract a phone number, cleaned to digits (a leading `+` survives).
pub fn phone(text: &str) -> Option<String> {
    for pattern in PHONE_PATTERNS.iter() {
        for cap in pattern.captures_iter(text) {
            let raw = match cap.get(1).or_else(|| cap.get(0)) {
                Some(m) => m.as_str(),
                None => continue,
            };
            let cleaned: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect();
            let digits = cleaned.chars().filter(char::is_ascii_digit).count();
            let separated = raw
                .chars()
                .any(|c| matches!(c, ' ' | '-' | '.' | '(' | ')'));
            if digits >= 10 || (digits >= 7 && separated) {
                return Some(cleaned);
            }
        }
    }
    None
}

// ============================================================================
// Email
// ============================================================================

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}\b").expect("Invalid regex")
});

/// Extract the first email address in the text. Used as a fallback when the
/// envelope sender address is unavailable.
pub fn email(text: &str) -> Option<String> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
}

// ============================================================================
// Contact Name
// ============================================================================

/// Name pattern attempts in order: labelled, start-of-line, after a closing
/// salutation. Case-sensitive on the captured name itself.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:[Ff]rom|[Nn]ame|[Cc]ontact)[:\s]\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)",
        r"(?m)^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)",
        r"(?:[Rr]egards|[Ss]incerely|[Tt]hanks|[Cc]heers),?\s*([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid name pattern"))
    .collect()
});

/// Extract a contact name from the body by pattern alone. The orchestrator
/// falls back to the NER seam and then the sender display name.
pub fn contact_name(text: &str) -> Option<String> {
    for pattern in NAME_PATTERNS.iter() {
        if let Some(cap) = pattern.captures(text) {
            if let Some(name) = cap.get(1) {
                return Some(name.as_str().trim().to_string());
            }
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_international_phone_accepted() {
        assert_eq!(
            phone("You can reach me on +353 1 843 6205 most days"),
            Some("+35318436205".to_string())
        );
    }

    #[test]
    fn test_booking_reference_not_a_phone() {
        assert_eq!(phone("Your reference is ISL-20251118-DC68"), None);
    }

    #[test]
    fn test_keyword_qualified_short_number_with_separators() {
        // 7 digits pass only when visibly formatted.
        assert_eq!(
            phone("Tel: 843 6205"),
            Some("8436205".to_string())
        );
        assert_eq!(phone("Tel: 8436205"), None);
    }

    #[test]
    fn test_local_ten_digit_format() {
        assert_eq!(
            phone("call (087) 123-4567 after six"),
            Some("0871234567".to_string())
        );
    }

    #[test]
    fn test_email_extraction() {
        assert_eq!(
            email("Write to bookings@links.example.ie for details"),
            Some("bookings@links.example.ie".to_string())
        );
        assert_eq!(email("no address here"), None);
    }

    #[test]
    fn test_name_after_salutation() {
        let body = "Looking forward to it.\n\nKind regards,\nSeamus Kelly";
        assert_eq!(contact_name(body), Some("Seamus Kelly".to_string()));
    }

    #[test]
    fn test_labelled_name() {
        assert_eq!(
            contact_name("Contact: Mary Byrne, society secretary"),
            Some("Mary Byrne".to_string())
        );
    }

    #[test]
    fn test_no_name_found() {
        assert_eq!(contact_name("hello, any slots on saturday?"), None);
    }
}
