//! Tee-time resolution for booking emails.
//!
//! Normalizes time-like text into `HH:MM` 24-hour values. The pattern catalog
//! is ordered from most specific (keyword-qualified clock times) to least
//! specific (bare day-part words), and `preferred` reflects that priority
//! order rather than chronological order: a time mentioned next to "tee time"
//! outranks a vaguer later mention.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

// ============================================================================
// Pattern Catalog
// ============================================================================

/// Ordered time pattern catalog, most specific first.
///
/// Capture group 1 is the time fragment. Index [`BARE_HOUR_PATTERN`] captures
/// an hour with no AM/PM marker and is resolved with the golf-context
/// heuristic.
pub const TIME_PATTERN_TABLE: &[&str] = &[
    // Keyword-qualified clock times
    r"(?:time|tee\s*time|t-time|start)[:\s]\s*(\d{1,2}:\d{2}\s*(?:am|pm)?)",
    r"(?:at|around|about|approximately)\s+(\d{1,2}:\d{2}\s*(?:am|pm)?)",
    r"(?:at|around|about|approximately)\s+(\d{1,2}\s*(?:am|pm))",
    // Group / tee slot format ("group 2: 9:40", "tee 1: 8:00am")
    r"(?:group|tee)\s*\d+[:\s]\s*(\d{1,2}:\d{2}\s*(?:am|pm)?)",
    // General clock times
    r"\b(\d{1,2}:\d{2}\s*(?:am|pm))",
    r"\b(\d{1,2}\s*(?:am|pm))\b",
    r"\b(\d{1,2}:\d{2})\b",
    // Bare hour with a qualifying keyword, golf heuristic applies
    r"(?:at|around|about|approximately)\s+(\d{1,2})\b",
    // Day-part words
    r"\b(early\s+morning)\b",
    r"\b(mid\s*morning)\b",
    r"\b(late\s+morning)\b",
    r"\b(noon|midday)\b",
    r"\b(early\s+afternoon)\b",
    r"\b(mid\s*afternoon)\b",
    r"\b(late\s+afternoon)\b",
    r"\b(evening)\b",
    r"\b(morning)\b",
    r"\b(afternoon)\b",
    r"\b(sunrise)\b",
    r"\b(sunset)\b",
];

/// Catalog index of the bare-hour pattern.
const BARE_HOUR_PATTERN: usize = 7;

static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    TIME_PATTERN_TABLE
        .iter()
        .map(|p| Regex::new(p).expect("Invalid time pattern"))
        .collect()
});

/// Day-part phrases and their canonical clock values, longest phrase first so
/// that "early morning" is not read as "morning".
const DAY_PART_TABLE: &[(&str, (u32, u32))] = &[
    ("early morning", (7, 0)),
    ("mid morning", (9, 0)),
    ("midmorning", (9, 0)),
    ("late morning", (11, 0)),
    ("early afternoon", (13, 0)),
    ("mid afternoon", (15, 0)),
    ("midafternoon", (15, 0)),
    ("late afternoon", (17, 0)),
    ("morning", (9, 0)),
    ("afternoon", (14, 0)),
    ("noon", (12, 0)),
    ("midday", (12, 0)),
    ("evening", (18, 0)),
    ("sunrise", (6, 30)),
    ("sunset", (19, 0)),
];

// ============================================================================
// Time Resolver
// ============================================================================

/// Result of resolving tee times from a block of text.
#[derive(Debug, Clone, Default)]
pub struct TimeResolution {
    /// Deduplicated candidate times, ascending.
    pub times: Vec<NaiveTime>,
    /// First time found in catalog priority order; always a member of
    /// `times` when set.
    pub preferred: Option<NaiveTime>,
    /// Verbatim pattern captures, kept for diagnostics.
    pub raw_fragments: Vec<String>,
    /// Whether any hour was resolved by the AM/PM heuristic rather than an
    /// explicit marker.
    pub heuristic_meridiem: bool,
}

/// Resolves time-like text into normalized 24-hour tee times.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeResolver;

impl TimeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve all candidate tee times from text.
    pub fn resolve(&self, text: &str) -> TimeResolution {
        let text_lower = text.to_lowercase();
        let mut times: BTreeSet<NaiveTime> = BTreeSet::new();
        let mut resolution = TimeResolution::default();

        // Catalog order doubles as priority order. A match whose span
        // overlaps an earlier pattern's match is discarded so that
        // "10:30am" is not re-read as a bare "10:30" or "30".
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        for (index, pattern) in TIME_PATTERNS.iter().enumerate() {
            for cap in pattern.captures_iter(&text_lower) {
                let m = match cap.get(1) {
                    Some(m) => m,
                    None => continue,
                };
                if claimed.iter().any(|&(s, e)| m.start() < e && s < m.end()) {
                    continue;
                }
                claimed.push((m.start(), m.end()));
                resolution.raw_fragments.push(m.as_str().to_string());

                let bare_hour = index == BARE_HOUR_PATTERN;
                if let Some(time) = normalize_time(m.as_str(), bare_hour) {
                    if bare_hour {
                        resolution.heuristic_meridiem = true;
                    }
                    if resolution.preferred.is_none() {
                        resolution.preferred = Some(time);
                    }
                    times.insert(time);
                }
            }
        }

        resolution.times = times.into_iter().collect();
        resolution
    }
}

// ============================================================================
// Normalization
// ============================================================================

static CLOCK_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm)?$").expect("Invalid regex")
});

/// Normalize a single time fragment to a `NaiveTime`.
///
/// `bare_hour` marks a fragment captured without an AM/PM marker, resolved by
/// the golf-context heuristic: hours 7-11 are AM, hour 12 and 1-6 are PM.
fn normalize_time(fragment: &str, bare_hour: bool) -> Option<NaiveTime> {
    let fragment = fragment.trim().to_lowercase();

    for (phrase, (hour, minute)) in DAY_PART_TABLE {
        if fragment.contains(phrase) {
            return NaiveTime::from_hms_opt(*hour, *minute, 0);
        }
    }

    let cap = CLOCK_FRAGMENT.captures(&fragment)?;
    let mut hour: u32 = cap[1].parse().ok()?;
    let minute: u32 = match cap.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match cap.get(3).map(|m| m.as_str()) {
        Some("am") => {
            if hour == 12 {
                hour = 0;
            }
        }
        Some("pm") => {
            if hour < 12 {
                hour += 12;
            }
        }
        _ if bare_hour => {
            // Tee-time-of-day heuristic: 7-11 stay AM, 1-6 become PM,
            // 12 stays noon.
            if (1..=6).contains(&hour) {
                hour += 12;
            }
        }
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_qualified_clock_time() {
        let result = TimeResolver::new().resolve("Tee time: 10:30am for the four of us");
        assert_eq!(result.times, vec![hm(10, 30)]);
        assert_eq!(result.preferred, Some(hm(10, 30)));
    }

    #[test]
    fn test_preferred_follows_pattern_priority_not_clock_order() {
        let text = "A morning round would be nice, but tee time: 2:30pm is what we booked";
        let result = TimeResolver::new().resolve(text);
        // 14:30 was keyword-qualified so it wins despite 09:00 sorting first.
        assert_eq!(result.preferred, Some(hm(14, 30)));
        assert_eq!(result.times, vec![hm(9, 0), hm(14, 30)]);
    }

    #[test]
    fn test_preferred_is_member_of_times() {
        let result = TimeResolver::new().resolve("around 8am or maybe late afternoon");
        let preferred = result.preferred.unwrap();
        assert!(result.times.contains(&preferred));
    }

    #[test]
    fn test_bare_hour_golf_heuristic() {
        let resolver = TimeResolver::new();
        // 7-11 read as AM.
        let early = resolver.resolve("we could start at 8 if that works");
        assert_eq!(early.times, vec![hm(8, 0)]);
        assert!(early.heuristic_meridiem);
        // 1-6 read as PM.
        let late = resolver.resolve("how about at 3 instead");
        assert_eq!(late.times, vec![hm(15, 0)]);
        // 12 stays noon.
        let noon = resolver.resolve("we will arrive at 12 sharp");
        assert_eq!(noon.times, vec![hm(12, 0)]);
    }

    #[test]
    fn test_explicit_meridiem_is_not_heuristic() {
        let result = TimeResolver::new().resolve("at 10 am please");
        assert_eq!(result.times, vec![hm(10, 0)]);
        assert!(!result.heuristic_meridiem);
    }

    #[test]
    fn test_twenty_four_hour_clock() {
        let result = TimeResolver::new().resolve("our slot is 14:00");
        assert_eq!(result.times, vec![hm(14, 0)]);
    }

    #[test]
    fn test_twelve_am_is_midnight() {
        let result = TimeResolver::new().resolve("arriving at 12:00 am");
        assert_eq!(result.times, vec![hm(0, 0)]);
    }

    #[test]
    fn test_day_part_words() {
        let resolver = TimeResolver::new();
        assert_eq!(
            resolver.resolve("an early morning slot").times,
            vec![hm(7, 0)]
        );
        assert_eq!(resolver.resolve("around noon").times, vec![hm(12, 0)]);
        assert_eq!(
            resolver.resolve("late afternoon works").times,
            vec![hm(17, 0)]
        );
        assert_eq!(resolver.resolve("before sunset").times, vec![hm(19, 0)]);
    }

    #[test]
    fn test_early_morning_not_double_counted_as_morning() {
        let result = TimeResolver::new().resolve("an early morning tee would suit");
        assert_eq!(result.times, vec![hm(7, 0)]);
    }

    #[test]
    fn test_invalid_clock_values_dropped() {
        let result = TimeResolver::new().resolve("ref 27:99 is not a time");
        assert!(result.times.is_empty());
    }

    #[test]
    fn test_group_slot_format() {
        let result = TimeResolver::new().resolve("Group 1: 9:40 and group 2: 9:50");
        assert_eq!(result.times, vec![hm(9, 40), hm(9, 50)]);
        assert_eq!(result.preferred, Some(hm(9, 40)));
    }
}
