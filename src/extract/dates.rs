//! Date resolution for booking emails.
//!
//! Converts date-like text fragments into normalized calendar dates using
//! three independent layers that are unioned into one deduplicated set:
//! - **Pattern layer**: a fixed, ordered catalog of fragment patterns (ISO,
//!   numeric, month-name, relative, fuzzy natural terms)
//! - **Fuzzy layer**: an optional whole-sentence parser backend, used when
//!   one is injected
//! - **Range layer**: "Month D-D" forms expanded into one date per day
//!
//! All layers share one normalization rule: a parsed date lacking an explicit
//! year that falls before the reference date is rolled forward to next year,
//! and only dates on or after the reference date are retained. Past-date
//! noise (quoted prior correspondence) must never pollute the result.

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use regex::Regex;

// ============================================================================
// Pattern Catalog
// ============================================================================

/// Ordered date pattern catalog, most specific first.
///
/// Capture group 1 is the date fragment. Priority position matters: when two
/// patterns match overlapping spans of text, the earlier pattern wins and the
/// later match is discarded.
pub const DATE_PATTERN_TABLE: &[&str] = &[
    // ISO / year-first numeric, keyword-qualified then bare
    r"(?:on|for|date[:\s])\s*(\d{4}[/\-.]\d{1,2}[/\-.]\d{1,2})",
    r"\b(\d{4}[/\-.]\d{1,2}[/\-.]\d{1,2})\b",
    // Month-name formats with a year, day leading or trailing
    r"(?:on|for|date[:\s])\s*(\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{2,4})",
    r"(?:on|for|date[:\s])\s*((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2}(?:st|nd|rd|th)?\s*,?\s*\d{2,4})",
    r"\b(\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{2,4})\b",
    r"\b((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2}(?:st|nd|rd|th)?\s*,?\s*\d{2,4})\b",
    // Month-name formats without a year (roll-forward rule applies)
    r"\b(\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b",
    r"\b((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2}(?:st|nd|rd|th)?)\b",
    // Explicit relative terms
    r"\b(next\s+(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b",
    r"\b(this\s+(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday))\b",
    r"\b(this\s+(?:morning|afternoon|evening))\b",
    r"\b(day\s+after\s+tomorrow)\b",
    r"\b(today)\b",
    r"\b(tomorrow)\b",
    r"\b(next\s+week)\b",
    r"\b(next\s+month)\b",
    r"\b(in\s+\d+\s+days?)\b",
    r"\b(in\s+\d+\s+weeks?)\b",
    r"\b(in\s+\d+\s+months?)\b",
    // Numeric day-first formats
    r"(?:on|for|date[:\s])\s*(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4})",
    r"\b(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4})\b",
    // Fuzzy natural-language terms
    r"\b(first\s+(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\s+in\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b",
    r"\b(last\s+(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\s+in\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b",
    r"\b(mid\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b",
    r"\b(early\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b",
    r"\b(late\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b",
    r"\b(end\s+of\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b",
    r"\b(beginning\s+of\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\b",
];

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DATE_PATTERN_TABLE
        .iter()
        .map(|p| Regex::new(p).expect("Invalid date pattern"))
        .collect()
});

/// Range patterns, expanded into one date per day in the inclusive range.
/// "Book us for any day you can fit us in that window" semantics.
const RANGE_PATTERN_TABLE: &[&str] = &[
    // Month D YYYY - D  (e.g. "September 10th 2027 - 22nd")
    r"((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\s+(\d{1,2})(?:st|nd|rd|th)?\s+(\d{4})\s*[-\x{2013}\x{2014}]\s*(\d{1,2})(?:st|nd|rd|th)?",
    // Month D-D[, YYYY]  (e.g. "April 9-11", "June 5-8, 2026")
    r"((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)\s+(\d{1,2})(?:st|nd|rd|th)?\s*[-\x{2013}\x{2014}]\s*(\d{1,2})(?:st|nd|rd|th)?(?:\s*,?\s*(\d{4}))?",
    // D-D Month  (e.g. "9-11 April")
    r"(\d{1,2})(?:st|nd|rd|th)?\s*[-\x{2013}\x{2014}]\s*(\d{1,2})(?:st|nd|rd|th)?\s+((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*)",
];

static RANGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RANGE_PATTERN_TABLE
        .iter()
        .map(|p| Regex::new(p).expect("Invalid range pattern"))
        .collect()
});

// Fragment normalization patterns
static ISO_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[/\-.](\d{1,2})[/\-.](\d{1,2})$").expect("Invalid regex")
});
static NUMERIC_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{2,4})$").expect("Invalid regex")
});
static DAY_MONTH_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?([a-z]+)(?:\s+(\d{2,4}))?$")
        .expect("Invalid regex")
});
static MONTH_DAY_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]+)\s+(\d{1,2})(?:st|nd|rd|th)?(?:\s*,?\s*(\d{2,4}))?$")
        .expect("Invalid regex")
});
static IN_N_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^in\s+(\d+)\s+(day|week|month)s?$").expect("Invalid regex"));
static RELATIVE_WEEKDAY_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(next|this)\s+([a-z]+)$").expect("Invalid regex"));
static ORDINAL_WEEKDAY_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(first|last)\s+([a-z]+)\s+in\s+([a-z]+)$").expect("Invalid regex")
});
static FUZZY_MONTH_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(mid|early|late|end\s+of|beginning\s+of)\s+([a-z]+)$").expect("Invalid regex")
});

// ============================================================================
// Fuzzy Backend Seam
// ============================================================================

/// Optional whole-sentence date parsing backend.
///
/// The engine works correctly without one: the pattern layer alone covers the
/// supported vocabulary. A backend, when injected, is read-only and must be
/// safe for concurrent use.
pub trait FuzzyDateParser: Send + Sync {
    /// Parse a sentence into a calendar date, preferring future
    /// interpretations relative to the reference date.
    fn parse_sentence(&self, sentence: &str, reference_date: NaiveDate) -> Option<NaiveDate>;
}

// ============================================================================
// Date Resolver
// ============================================================================

/// Result of resolving dates from a block of text.
#[derive(Debug, Clone, Default)]
pub struct DateResolution {
    /// Deduplicated candidate dates, ascending, all on or after the
    /// reference date.
    pub dates: Vec<NaiveDate>,
    /// Verbatim pattern-layer captures, kept for diagnostics.
    pub raw_fragments: Vec<String>,
}

/// Resolves date-like text into normalized future-or-today calendar dates.
pub struct DateResolver {
    /// Reference date for relative calculations (defaults to today).
    reference_date: NaiveDate,
    /// Optional fuzzy sentence-level backend.
    fuzzy: Option<Arc<dyn FuzzyDateParser>>,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DateResolver {
    /// Create a resolver with today as the reference date.
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
            fuzzy: None,
        }
    }

    /// Create a resolver with a specific reference date.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            fuzzy: None,
        }
    }

    /// Attach a fuzzy sentence-level parsing backend.
    pub fn with_fuzzy_parser(mut self, fuzzy: Arc<dyn FuzzyDateParser>) -> Self {
        self.fuzzy = Some(fuzzy);
        self
    }

    /// The reference date used for relative calculations.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Resolve all candidate dates from text.
    ///
    /// Applies the pattern, fuzzy, and range layers independently and unions
    /// the results into one deduplicated ascending set.
    pub fn resolve(&self, text: &str) -> DateResolution {
        let text_lower = text.to_lowercase();
        let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut raw_fragments = Vec::new();

        // Pattern layer. Patterns are tried in catalog order; a match whose
        // span overlaps an earlier pattern's match is discarded so that
        // "september 10th 2027" is not re-read as a yearless "september 10th".
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        for pattern in DATE_PATTERNS.iter() {
            for cap in pattern.captures_iter(&text_lower) {
                let m = match cap.get(1) {
                    Some(m) => m,
                    None => continue,
                };
                if claimed.iter().any(|&(s, e)| m.start() < e && s < m.end()) {
                    continue;
                }
                claimed.push((m.start(), m.end()));
                raw_fragments.push(m.as_str().to_string());
                if let Some(date) = self.resolve_fragment(m.as_str()) {
                    if date >= self.reference_date {
                        dates.insert(date);
                    }
                }
            }
        }

        // Fuzzy layer, when a backend is available.
        if let Some(ref fuzzy) = self.fuzzy {
            for sentence in text_lower.split(['.', '!', '?', '\n']) {
                if sentence.trim().len() <= 10 {
                    continue;
                }
                if let Some(date) = fuzzy.parse_sentence(sentence, self.reference_date) {
                    if date >= self.reference_date {
                        dates.insert(date);
                    }
                }
            }
        }

        // Range layer.
        for date in self.expand_ranges(&text_lower) {
            if date >= self.reference_date {
                dates.insert(date);
            }
        }

        DateResolution {
            dates: dates.into_iter().collect(),
            raw_fragments,
        }
    }

    /// Normalize a single date fragment.
    ///
    /// Returns `None` for anything that fails every normalization attempt.
    /// Explicit past years are dropped; yearless dates that fall before the
    /// reference date roll forward to next year.
    pub fn resolve_fragment(&self, fragment: &str) -> Option<NaiveDate> {
        let fragment = fragment.trim().to_lowercase();
        // Under 3 characters is never a date candidate.
        if fragment.len() < 3 {
            return None;
        }

        let today = self.reference_date;

        // Relative terms, longest first.
        if fragment.contains("day after tomorrow") {
            return Some(today + Duration::days(2));
        }
        if fragment.contains("tomorrow") {
            return Some(today + Duration::days(1));
        }
        if fragment.contains("today")
            || fragment.contains("this morning")
            || fragment.contains("this afternoon")
            || fragment.contains("this evening")
        {
            return Some(today);
        }
        if fragment.contains("next week") {
            return Some(today + Duration::weeks(1));
        }
        if fragment.contains("next month") {
            return add_months(today, 1);
        }

        // "in N days/weeks/months"
        if let Some(cap) = IN_N_FRAGMENT.captures(&fragment) {
            let n: i64 = cap[1].parse().ok()?;
            return match &cap[2] {
                "day" => Some(today + Duration::days(n)),
                "week" => Some(today + Duration::weeks(n)),
                "month" => add_months(today, n as i32),
                _ => None,
            };
        }

        // "next/this <weekday>"
        if let Some(cap) = RELATIVE_WEEKDAY_FRAGMENT.captures(&fragment) {
            if let Some(weekday) = weekday_from_name(&cap[2]) {
                let skip_this_week = &cap[1] == "next";
                return Some(next_weekday(today, weekday, skip_this_week));
            }
        }

        // "first/last <weekday> in <month>"
        if let Some(cap) = ORDINAL_WEEKDAY_FRAGMENT.captures(&fragment) {
            let weekday = weekday_from_name(&cap[2])?;
            let month = month_from_name(&cap[3])?;
            let last = &cap[1] == "last";
            return self.ordinal_weekday_in_month(weekday, month, last);
        }

        // "mid/early/late/end of/beginning of <month>"
        if let Some(cap) = FUZZY_MONTH_FRAGMENT.captures(&fragment) {
            let month = month_from_name(&cap[2])?;
            let day = match cap[1].trim() {
                "beginning of" => 1,
                "early" => 5,
                "mid" => 15,
                "late" => 25,
                "end of" => 28,
                _ => return None,
            };
            return self.yearless_date(month, day);
        }

        // ISO / year-first numeric: always year-month-day.
        if let Some(cap) = ISO_FRAGMENT.captures(&fragment) {
            let date = NaiveDate::from_ymd_opt(
                cap[1].parse().ok()?,
                cap[2].parse().ok()?,
                cap[3].parse().ok()?,
            )?;
            return self.keep_if_not_past(date);
        }

        // "15th April [2026]" / "15 of april"
        if let Some(cap) = DAY_MONTH_FRAGMENT.captures(&fragment) {
            let day: u32 = cap[1].parse().ok()?;
            let month = month_from_name(&cap[2])?;
            return self.month_day_date(month, day, cap.get(3).map(|m| m.as_str()));
        }

        // "April 15[, 2026]"
        if let Some(cap) = MONTH_DAY_FRAGMENT.captures(&fragment) {
            let month = month_from_name(&cap[1])?;
            let day: u32 = cap[2].parse().ok()?;
            return self.month_day_date(month, day, cap.get(3).map(|m| m.as_str()));
        }

        // Numeric triple: day-first for non-ISO forms (regional convention).
        if let Some(cap) = NUMERIC_FRAGMENT.captures(&fragment) {
            let day: u32 = cap[1].parse().ok()?;
            let month: u32 = cap[2].parse().ok()?;
            let year = expand_year(cap[3].parse().ok()?);
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            return self.keep_if_not_past(date);
        }

        None
    }

    /// Expand date ranges into one date per day in the inclusive range.
    fn expand_ranges(&self, text_lower: &str) -> Vec<NaiveDate> {
        let mut dates = Vec::new();

        // Month D YYYY - D
        for cap in RANGE_PATTERNS[0].captures_iter(text_lower) {
            if let (Some(month), Ok(start), Ok(year), Ok(end)) = (
                month_from_name(&cap[1]),
                cap[2].parse::<u32>(),
                cap[3].parse::<i32>(),
                cap[4].parse::<u32>(),
            ) {
                self.push_range(&mut dates, year, month, start, end);
            }
        }

        // Month D-D[, YYYY]
        for cap in RANGE_PATTERNS[1].captures_iter(text_lower) {
            if let (Some(month), Ok(start), Ok(end)) = (
                month_from_name(&cap[1]),
                cap[2].parse::<u32>(),
                cap[3].parse::<u32>(),
            ) {
                let year = cap
                    .get(4)
                    .and_then(|m| m.as_str().parse::<i32>().ok())
                    .unwrap_or_else(|| self.range_year(month, end));
                self.push_range(&mut dates, year, month, start, end);
            }
        }

        // D-D Month
        for cap in RANGE_PATTERNS[2].captures_iter(text_lower) {
            if let (Ok(start), Ok(end), Some(month)) = (
                cap[1].parse::<u32>(),
                cap[2].parse::<u32>(),
                month_from_name(&cap[3]),
            ) {
                let year = self.range_year(month, end);
                self.push_range(&mut dates, year, month, start, end);
            }
        }

        dates
    }

    /// Pick the year for a yearless range: the current year unless the whole
    /// range has already passed, in which case next year.
    fn range_year(&self, month: u32, end_day: u32) -> i32 {
        let year = self.reference_date.year();
        match NaiveDate::from_ymd_opt(year, month, end_day) {
            Some(end) if end < self.reference_date => year + 1,
            _ => year,
        }
    }

    fn push_range(&self, dates: &mut Vec<NaiveDate>, year: i32, month: u32, start: u32, end: u32) {
        if start > end {
            return;
        }
        for day in start..=end {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                dates.push(date);
            }
        }
    }

    /// Month/day with an optional explicit year.
    fn month_day_date(&self, month: u32, day: u32, year: Option<&str>) -> Option<NaiveDate> {
        match year {
            Some(y) => {
                let year = expand_year(y.parse().ok()?);
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                self.keep_if_not_past(date)
            }
            None => self.yearless_date(month, day),
        }
    }

    /// Yearless dates roll forward: before the reference date under the
    /// current year means the sender meant next year.
    fn yearless_date(&self, month: u32, day: u32) -> Option<NaiveDate> {
        let year = self.reference_date.year();
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        if date < self.reference_date {
            NaiveDate::from_ymd_opt(year + 1, month, day)
        } else {
            Some(date)
        }
    }

    /// Dates with an explicit year are dropped entirely when in the past.
    fn keep_if_not_past(&self, date: NaiveDate) -> Option<NaiveDate> {
        if date < self.reference_date {
            None
        } else {
            Some(date)
        }
    }

    /// First or last occurrence of a weekday in a month, rolled to next year
    /// when the computed date has passed.
    fn ordinal_weekday_in_month(
        &self,
        weekday: Weekday,
        month: u32,
        last: bool,
    ) -> Option<NaiveDate> {
        let compute = |year: i32| -> Option<NaiveDate> {
            if last {
                let last_day = add_months(NaiveDate::from_ymd_opt(year, month, 1)?, 1)?
                    - Duration::days(1);
                let offset = (last_day.weekday().num_days_from_monday() + 7
                    - weekday.num_days_from_monday())
                    % 7;
                Some(last_day - Duration::days(offset as i64))
            } else {
                let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
                let offset = (weekday.num_days_from_monday() + 7
                    - first_day.weekday().num_days_from_monday())
                    % 7;
                Some(first_day + Duration::days(offset as i64))
            }
        };

        let date = compute(self.reference_date.year())?;
        if date < self.reference_date {
            compute(self.reference_date.year() + 1)
        } else {
            Some(date)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Month number from a (possibly abbreviated) month name.
fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Two-digit years are 2000-based.
fn expand_year(year: i32) -> i32 {
    if year < 100 {
        2000 + year
    } else {
        year
    }
}

/// Next occurrence of a weekday strictly after `from`. With `skip_this_week`
/// ("next monday" rather than "this monday") an occurrence still inside the
/// current week is pushed a week out.
fn next_weekday(from: NaiveDate, target: Weekday, skip_this_week: bool) -> NaiveDate {
    let current = from.weekday().num_days_from_monday() as i64;
    let wanted = target.num_days_from_monday() as i64;

    let mut days_ahead = (wanted - current).rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }
    if skip_this_week && wanted > current {
        days_ahead += 7;
    }

    from + Duration::days(days_ahead)
}

/// Add months to a date, clamping to the end of the target month.
fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total_months = date.year() * 12 + date.month() as i32 - 1 + months;
    let year = total_months.div_euclid(12);
    let month = (total_months.rem_euclid(12) + 1) as u32;

    NaiveDate::from_ymd_opt(year, month, date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 30))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 29))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 28))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_at(year: i32, month: u32, day: u32) -> DateResolver {
        DateResolver::with_reference_date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_iso_date_in_context_patterns() {
        let resolver = resolver_at(2026, 3, 1);
        for text in [
            "We would like to play on 2026-09-10.",
            "Requesting a tee time for 2026-09-10",
            "2026-09-10",
        ] {
            let result = resolver.resolve(text);
            assert_eq!(result.dates, vec![ymd(2026, 9, 10)], "text: {text}");
        }
    }

    #[test]
    fn test_yearless_past_date_rolls_forward() {
        let resolver = resolver_at(2026, 6, 15);
        let result = resolver.resolve("We played on 10th April and loved it");
        assert_eq!(result.dates, vec![ymd(2027, 4, 10)]);
    }

    #[test]
    fn test_explicit_past_year_dropped() {
        let resolver = resolver_at(2026, 6, 15);
        let result = resolver.resolve("Our last visit was April 10, 2024.");
        assert!(result.dates.is_empty());
        // The fragment was still captured for diagnostics.
        assert!(!result.raw_fragments.is_empty());
    }

    #[test]
    fn test_numeric_triple_is_day_first() {
        let resolver = resolver_at(2026, 1, 1);
        let result = resolver.resolve("Arriving 05/09/2026 with the group");
        assert_eq!(result.dates, vec![ymd(2026, 9, 5)]);
    }

    #[test]
    fn test_tomorrow_and_next_weekday() {
        // 2026-03-04 is a Wednesday.
        let resolver = resolver_at(2026, 3, 4);
        let result = resolver.resolve("Could we play tomorrow, or next Monday?");
        assert!(result.dates.contains(&ymd(2026, 3, 5)));
        assert!(result.dates.contains(&ymd(2026, 3, 9)));
    }

    #[test]
    fn test_day_after_tomorrow_not_double_counted() {
        let resolver = resolver_at(2026, 3, 4);
        let result = resolver.resolve("We arrive the day after tomorrow");
        assert_eq!(result.dates, vec![ymd(2026, 3, 6)]);
    }

    #[test]
    fn test_in_n_weeks() {
        let resolver = resolver_at(2026, 3, 4);
        let result = resolver.resolve("thinking of visiting in 2 weeks");
        assert_eq!(result.dates, vec![ymd(2026, 3, 18)]);
    }

    #[test]
    fn test_mid_month_fuzzy_term() {
        let resolver = resolver_at(2026, 3, 4);
        let result = resolver.resolve("sometime mid september would suit us");
        assert_eq!(result.dates, vec![ymd(2026, 9, 15)]);
    }

    #[test]
    fn test_first_weekday_in_month() {
        let resolver = resolver_at(2026, 3, 4);
        let result = resolver.resolve("the first saturday in june works best");
        // 2026-06-06 is the first Saturday of June 2026.
        assert_eq!(result.dates, vec![ymd(2026, 6, 6)]);
    }

    #[test]
    fn test_range_with_year_expands_inclusive() {
        let resolver = resolver_at(2026, 3, 4);
        let result = resolver.resolve("September 10th 2027 \u{2013} 22nd for our society trip");
        assert_eq!(result.dates.len(), 13);
        assert_eq!(result.dates[0], ymd(2027, 9, 10));
        assert_eq!(result.dates[12], ymd(2027, 9, 22));
    }

    #[test]
    fn test_yearless_range_expands() {
        let resolver = resolver_at(2026, 3, 4);
        let result = resolver.resolve("any day April 9-11 suits us");
        assert_eq!(
            result.dates,
            vec![ymd(2026, 4, 9), ymd(2026, 4, 10), ymd(2026, 4, 11)]
        );
    }

    #[test]
    fn test_yearless_range_in_the_past_rolls_forward() {
        let resolver = resolver_at(2026, 6, 1);
        let result = resolver.resolve("April 9-11 again please");
        assert_eq!(
            result.dates,
            vec![ymd(2027, 4, 9), ymd(2027, 4, 10), ymd(2027, 4, 11)]
        );
    }

    #[test]
    fn test_short_fragment_never_a_candidate() {
        let resolver = resolver_at(2026, 3, 4);
        assert_eq!(resolver.resolve_fragment("12"), None);
        assert_eq!(resolver.resolve_fragment(""), None);
    }

    #[test]
    fn test_fuzzy_backend_is_consulted() {
        struct FixedParser;
        impl FuzzyDateParser for FixedParser {
            fn parse_sentence(&self, sentence: &str, _ref: NaiveDate) -> Option<NaiveDate> {
                sentence
                    .contains("the weekend after the captain's prize")
                    .then(|| ymd(2026, 8, 22))
            }
        }

        let resolver =
            resolver_at(2026, 3, 4).with_fuzzy_parser(Arc::new(FixedParser));
        let result =
            resolver.resolve("We'd like the weekend after the captain's prize if possible.");
        assert_eq!(result.dates, vec![ymd(2026, 8, 22)]);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let resolver = resolver_at(2026, 3, 4);
        let text = "tomorrow or April 9-11, maybe 2026-05-01";
        let a = resolver.resolve(text);
        let b = resolver.resolve(text);
        assert_eq!(a.dates, b.dates);
        assert_eq!(a.raw_fragments, b.raw_fragments);
    }
}
