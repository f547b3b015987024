//! Lodging detection and detail extraction.
//!
//! Detection is keyword-scored: any hit across the accommodation catalog sets
//! `requested`, with confidence scaled by the total match count. Details
//! (nights, rooms, room type, check-in/out) are only extracted once a request
//! is detected.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::dates::DateResolver;
use super::types::{LodgingDetails, RoomType};

// ============================================================================
// Keyword Catalog
// ============================================================================

/// Accommodation keyword catalog. Every match counts toward the score.
pub const LODGING_KEYWORD_TABLE: &[&str] = &[
    // Direct accommodation terms
    r"\b(?:room|rooms|accommodation|accommodations|lodging|lodge|stay|staying)\b",
    r"\b(?:hotel|motel|resort|inn|bed and breakfast|b&b|bnb)\b",
    r"\b(?:overnight|sleep|night|nights)\b",
    r"\b(?:check[\s\-]?in|check[\s\-]?out)\b",
    // Booking phrasing
    r"\b(?:book a room|reserve a room|need a room|room for)\b",
    r"\b(?:place to stay|somewhere to stay)\b",
    // Package deals
    r"\b(?:stay and play|golf package|accommodation package)\b",
    r"\b(?:inclusive|all\-inclusive|package deal)\b",
];

static LODGING_KEYWORDS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    LODGING_KEYWORD_TABLE
        .iter()
        .map(|p| Regex::new(p).expect("Invalid lodging pattern"))
        .collect()
});

/// Confidence saturates at this many keyword hits.
const SCORE_CAP: f32 = 10.0;

static NIGHTS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*nights?").expect("Invalid regex"));
static ROOMS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d+)\s*(?:double|single|twin|queen|king|suite)?\s*rooms?",
        r"(\d+)\s*rooms?",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex"))
    .collect()
});
static SINGLE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:single|twin)\b").expect("Invalid regex"));
static DOUBLE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:double|queen|king)\b").expect("Invalid regex"));
static SUITE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsuite\b").expect("Invalid regex"));
static CHECK_IN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"check[\s\-]?in[:\s]\s*([^\n,]+)").expect("Invalid regex"));
static CHECK_OUT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"check[\s\-]?out[:\s]\s*([^\n,]+)").expect("Invalid regex"));

// ============================================================================
// Extraction
// ============================================================================

/// Extract lodging details from lowercased text.
///
/// `booking_dates` supplies the default check-in when none is labelled, and
/// the resolver normalizes labelled check-in/out fragments.
pub fn lodging(
    text_lower: &str,
    resolver: &DateResolver,
    booking_dates: &[NaiveDate],
) -> LodgingDetails {
    let score: usize = LODGING_KEYWORDS
        .iter()
        .map(|p| p.find_iter(text_lower).count())
        .sum();

    if score == 0 {
        return LodgingDetails::default();
    }

    let mut details = LodgingDetails {
        requested: true,
        confidence: (score as f32 / SCORE_CAP).min(1.0),
        ..Default::default()
    };

    if let Some(cap) = NIGHTS_PATTERN.captures(text_lower) {
        details.nights = cap[1].parse().ok();
    }

    details.rooms = ROOMS_PATTERNS
        .iter()
        .find_map(|p| p.captures(text_lower))
        .and_then(|cap| cap[1].parse().ok())
        .or(Some(1));

    details.room_type = if SINGLE_TYPE.is_match(text_lower) {
        Some(RoomType::Single)
    } else if DOUBLE_TYPE.is_match(text_lower) {
        Some(RoomType::Double)
    } else if SUITE_TYPE.is_match(text_lower) {
        Some(RoomType::Suite)
    } else {
        None
    };

    details.check_in = CHECK_IN_PATTERN
        .captures(text_lower)
        .and_then(|cap| resolver.resolve_fragment(trim_label_fragment(&cap[1])));
    details.check_out = CHECK_OUT_PATTERN
        .captures(text_lower)
        .and_then(|cap| resolver.resolve_fragment(trim_label_fragment(&cap[1])));

    // No labelled check-in means arrival on the first day of golf.
    if details.check_in.is_none() {
        details.check_in = booking_dates.first().copied();
    }

    if details.nights.is_none() {
        if let (Some(check_in), Some(check_out)) = (details.check_in, details.check_out) {
            let nights = (check_out - check_in).num_days();
            if nights >= 0 {
                details.nights = Some(nights as u32);
            }
        }
    }

    details
}

/// Labelled fragments run to the next comma or newline, so sentence
/// punctuation can trail the date ("check-out: 2026-08-16.").
fn trim_label_fragment(fragment: &str) -> &str {
    fragment.trim().trim_end_matches(['.', '!', '?', ';'])
}

// ============================================================================
// Tests
// ============================================================================
