//! Pure field extractors: player count, special requests, dietary
//! requirements, golf experience, and flexibility flags.
//!
//! Each extractor is a standalone function of the text with no shared state,
//! safe to run in any order.

use std::sync::LazyLock;

use regex::Regex;

use super::types::GolfExperience;

// ============================================================================
// Player Count
// ============================================================================

/// Accepted player range, wide enough for corporate outings.
const PLAYER_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Per-day attendance patterns. These outrank any total-group figure in the
/// same email ("48 over three days, 16 golfers on any given day" means 16).
pub const PER_DAY_PATTERN_TABLE: &[&str] = &[
    r"(\d+)\s*golfers?\s*(?:on any given day|per day|each day|a day)",
    r"(\d+)\s*players?\s*(?:on any given day|per day|each day|a day)",
];

/// General count patterns, tried in order after the per-day pair.
pub const GENERAL_COUNT_PATTERN_TABLE: &[&str] = &[
    r"(?:group|party)\s*of\s*(\d+)\s*(?:players?|people|persons?|golfers?)",
    r"(\d+)\s*(?:players?|people|persons?|golfers?|guests?)",
    r"(?:party|group)\s*of\s*(\d+)",
];

static PER_DAY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PER_DAY_PATTERN_TABLE
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect()
});

static GENERAL_COUNT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    GENERAL_COUNT_PATTERN_TABLE
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect()
});

/// Colloquial group terms, lowest priority.
const GROUP_TERMS: &[(&str, u32)] = &[
    ("foursome", 4),
    ("four-some", 4),
    ("four ball", 4),
    ("threesome", 3),
    ("three-some", 3),
    ("three ball", 3),
    ("twosome", 2),
    ("two-some", 2),
    ("two ball", 2),
    ("single", 1),
    ("solo", 1),
];

const MONTH_PREFIXES: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Which cascade level produced a player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCountSource {
    /// "N golfers on any given day" style per-day figure.
    PerDay,
    /// Explicit numeric count.
    Explicit,
    /// Colloquial group term (foursome, twosome, ...).
    Colloquial,
}

/// Extract the number of players, first cascade level with a valid hit wins.
pub fn player_count(text: &str) -> Option<u32> {
    player_count_detailed(text, *PLAYER_RANGE.end()).map(|(count, _)| count)
}

/// Player count with the cascade level that produced it.
pub fn player_count_detailed(text: &str, max: u32) -> Option<(u32, PlayerCountSource)> {
    let text_lower = text.to_lowercase();
    let valid = |count: u32| count >= *PLAYER_RANGE.start() && count <= max;

    for pattern in PER_DAY_PATTERNS.iter() {
        if let Some(cap) = pattern.captures(&text_lower) {
            if let Ok(count) = cap[1].parse::<u32>() {
                if valid(count) {
                    return Some((count, PlayerCountSource::PerDay));
                }
            }
        }
    }

    for pattern in GENERAL_COUNT_PATTERNS.iter() {
        for cap in pattern.captures_iter(&text_lower) {
            let m = match cap.get(0) {
                Some(m) => m,
                None => continue,
            };
            // A month name within 20 characters means this is a date, not a
            // head count ("15 April" is not 15 players). Match offsets are
            // char boundaries; the fixed-width window edges may not be.
            let window_start = prev_char_boundary(&text_lower, m.start().saturating_sub(20));
            let window_end =
                prev_char_boundary(&text_lower, (m.end() + 20).min(text_lower.len()));
            let before = &text_lower[window_start..m.start()];
            let after = &text_lower[m.end()..window_end];
            let near_month = MONTH_PREFIXES
                .iter()
                .any(|month| before.contains(month) || after.contains(month));
            // "split into two foursomes" describes grouping, not the total.
            let grouping = before.contains("split into") || before.contains("into");
            if near_month || grouping {
                continue;
            }
            if let Ok(count) = cap[1].parse::<u32>() {
                if valid(count) {
                    return Some((count, PlayerCountSource::Explicit));
                }
            }
        }
    }

    for (term, count) in GROUP_TERMS {
        if text_lower.contains(term) && valid(*count) {
            return Some((*count, PlayerCountSource::Colloquial));
        }
    }

    None
}

/// Largest char boundary at or below `index`.
fn prev_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

// ============================================================================
// Special Requests
// ============================================================================

static REQUEST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:special request|request|need|require|would like)[:\s]\s*([^.!?\n]+)",
        r"(?:also|additionally|furthermore)[:\s,]\s*([^.!?\n]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

const AMENITIES: &[&str] = &[
    "buggy",
    "cart",
    "caddy",
    "caddie",
    "club rental",
    "club hire",
    "lesson",
    "coaching",
    "practice",
    "driving range",
];

/// Extract special requests: indicator-phrase fragments plus tagged amenity
/// mentions.
pub fn special_requests(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut requests = Vec::new();

    for pattern in REQUEST_PATTERNS.iter() {
        for cap in pattern.captures_iter(&text_lower) {
            let fragment = cap[1].trim();
            if fragment.len() > 10 && fragment.len() < 200 {
                requests.push(fragment.to_string());
            }
        }
    }

    for amenity in AMENITIES {
        if text_lower.contains(amenity) {
            requests.push(format!("Mentioned: {amenity}"));
        }
    }

    requests
}

// ============================================================================
// Dietary Requirements
// ============================================================================

const DIETARY_KEYWORDS: &[&str] = &[
    "vegetarian",
    "vegan",
    "gluten-free",
    "dairy-free",
    "nut allergy",
    "shellfish allergy",
    "halal",
    "kosher",
    "pescatarian",
    "lactose intolerant",
    "celiac",
];

/// Extract dietary requirements, one entry per distinct keyword found.
pub fn dietary_requirements(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    DIETARY_KEYWORDS
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

// ============================================================================
// Golf Experience
// ============================================================================

static EXPERIENCE_BUCKETS: LazyLock<Vec<(Regex, GolfExperience)>> = LazyLock::new(|| {
    [
        (
            r"\b(?:beginner|new to golf|first time|never played)\b",
            GolfExperience::Beginner,
        ),
        (
            r"\b(?:intermediate|average|casual)\b",
            GolfExperience::Intermediate,
        ),
        (
            r"\b(?:advanced|experienced|low handicap|scratch)\b",
            GolfExperience::Advanced,
        ),
        (
            r"\b(?:professional|pro|tour)\b",
            GolfExperience::Professional,
        ),
    ]
    .iter()
    .map(|(p, level)| (Regex::new(p).expect("Invalid regex"), *level))
    .collect()
});

/// Extract a self-described experience level, first bucket matched wins.
pub fn golf_experience(text: &str) -> Option<GolfExperience> {
    let text_lower = text.to_lowercase();
    EXPERIENCE_BUCKETS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&text_lower))
        .map(|(_, level)| *level)
}

// ============================================================================
// Flexibility
// ============================================================================

static FLEXIBLE_DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bflexible\b",
        r"\bany day\b",
        r"\bany date\b",
        r"\bopen\b",
        r"\bdoesn't matter\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

static FLEXIBLE_TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bany time\b",
        r"\bflexible\b",
        r"\bwhenever\b",
        r"\banytime\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});

/// Whether the sender signalled date flexibility. Can coexist with concrete
/// dates ("April 9-11, but we're flexible").
pub fn flexible_dates(text_lower: &str) -> bool {
    FLEXIBLE_DATE_PATTERNS.iter().any(|p| p.is_match(text_lower))
}

/// Whether the sender signalled time flexibility.
pub fn flexible_times(text_lower: &str) -> bool {
    FLEXIBLE_TIME_PATTERNS.iter().any(|p| p.is_match(text_lower))
}

// ============================================================================
// Tests
// ============================================================================
