//! Booking extraction engine.
//!
//! [`BookingExtractor`] turns one email into one [`BookingExtraction`]. The
//! engine is stateless and synchronous: no I/O, no shared mutable state, and
//! it never fails. Anything it cannot resolve is left unset and shows up only
//! as lower confidence or an ambiguity note.

pub mod contact;
pub mod dates;
pub mod fields;
pub mod lodging;
pub mod ner;
pub mod times;
pub mod types;

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::classify::{classify_intent, classify_urgency, IntentSignals};
use crate::config::Config;

use dates::{DateResolver, FuzzyDateParser};
use fields::PlayerCountSource;
use ner::{PatternNer, PersonNer};
use times::TimeResolver;
use types::{BookingExtraction, ContactDetails};

/// Default upper bound for accepted player counts.
const DEFAULT_MAX_PLAYERS: u32 = 100;

// ============================================================================
// Booking Extractor
// ============================================================================

/// Orchestrates the individual extractors and classifiers over one email.
pub struct BookingExtractor {
    date_resolver: DateResolver,
    time_resolver: TimeResolver,
    ner: Option<Arc<dyn PersonNer>>,
    max_player_count: u32,
}

impl Default for BookingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingExtractor {
    /// Create an extractor anchored at today, with the bundled pattern NER.
    pub fn new() -> Self {
        Self {
            date_resolver: DateResolver::new(),
            time_resolver: TimeResolver::new(),
            ner: Some(Arc::new(PatternNer::new())),
            max_player_count: DEFAULT_MAX_PLAYERS,
        }
    }

    /// Create an extractor with a fixed reference date. Relative phrases like
    /// "tomorrow" resolve against it, which keeps tests deterministic.
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            date_resolver: DateResolver::with_reference_date(reference_date),
            time_resolver: TimeResolver::new(),
            ner: Some(Arc::new(PatternNer::new())),
            max_player_count: DEFAULT_MAX_PLAYERS,
        }
    }

    /// Build an extractor from configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut extractor = Self::new();
        if !config.extraction.enable_ner {
            extractor.ner = None;
        }
        extractor.max_player_count = config.extraction.max_player_count;
        extractor
    }

    /// Attach a fuzzy sentence-level date backend.
    pub fn with_fuzzy_parser(mut self, fuzzy: Arc<dyn FuzzyDateParser>) -> Self {
        self.date_resolver = self.date_resolver.with_fuzzy_parser(fuzzy);
        self
    }

    /// Replace or remove the person-name backend.
    pub fn with_ner(mut self, ner: Option<Arc<dyn PersonNer>>) -> Self {
        self.ner = ner;
        self
    }

    /// Extract a structured booking intent from one email.
    ///
    /// All four inputs may be empty. Subject and body are analyzed together,
    /// subject first.
    pub fn extract(
        &self,
        body: &str,
        subject: &str,
        sender_email: &str,
        sender_name: &str,
    ) -> BookingExtraction {
        let full_text = if subject.is_empty() {
            body.to_string()
        } else {
            format!("{subject}\n{body}")
        };
        let full_lower = full_text.to_lowercase();

        let mut extraction = BookingExtraction::default();

        let date_resolution = self.date_resolver.resolve(&full_text);
        extraction.preferred_date = date_resolution.dates.first().copied();
        extraction.booking_dates = date_resolution.dates;
        extraction.raw_dates = date_resolution.raw_fragments;

        let time_resolution = self.time_resolver.resolve(&full_text);
        extraction.preferred_time = time_resolution.preferred;
        extraction.tee_times = time_resolution.times;
        extraction.raw_times = time_resolution.raw_fragments;

        let player = fields::player_count_detailed(&full_text, self.max_player_count);
        extraction.player_count = player.map(|(count, _)| count);

        extraction.lodging = lodging::lodging(
            &full_lower,
            &self.date_resolver,
            &extraction.booking_dates,
        );

        extraction.contact = self.resolve_contact(body, sender_email, sender_name);

        extraction.special_requests = fields::special_requests(body);
        extraction.dietary_requirements = fields::dietary_requirements(body);
        extraction.golf_experience = fields::golf_experience(body);
        extraction.flexible_dates = fields::flexible_dates(&full_lower);
        extraction.flexible_times = fields::flexible_times(&full_lower);

        extraction.intent = classify_intent(
            &full_lower,
            IntentSignals {
                lodging_requested: extraction.lodging.requested,
                has_dates: !extraction.booking_dates.is_empty(),
                has_times: !extraction.tee_times.is_empty(),
            },
        );
        extraction.urgency = classify_urgency(
            &full_lower,
            extraction.preferred_date,
            self.date_resolver.reference_date(),
        );

        extraction.date_confidence = band_confidence(
            extraction.preferred_date.is_some(),
            extraction.booking_dates.len(),
            !extraction.raw_dates.is_empty(),
        );
        extraction.time_confidence = band_confidence(
            extraction.preferred_time.is_some(),
            extraction.tee_times.len(),
            !extraction.raw_times.is_empty(),
        );

        self.note_ambiguities(&mut extraction, player, time_resolution.heuristic_meridiem);

        debug!(
            intent = extraction.intent.as_str(),
            urgency = extraction.urgency.as_str(),
            dates = extraction.booking_dates.len(),
            times = extraction.tee_times.len(),
            players = ?extraction.player_count,
            lodging = extraction.lodging.requested,
            confidence = extraction.confidence(),
            "extracted booking intent"
        );

        extraction
    }

    fn resolve_contact(
        &self,
        body: &str,
        sender_email: &str,
        sender_name: &str,
    ) -> ContactDetails {
        let mut name = contact::contact_name(body);
        if name.is_none() {
            if let Some(ner) = &self.ner {
                name = ner.person_name(body);
            }
        }
        if name.is_none() && !sender_name.is_empty() {
            name = Some(sender_name.to_string());
        }

        let email = if sender_email.is_empty() {
            contact::email(body)
        } else {
            Some(sender_email.to_string())
        };

        ContactDetails {
            name,
            email,
            phone: contact::phone(body),
        }
    }

    fn note_ambiguities(
        &self,
        extraction: &mut BookingExtraction,
        player: Option<(u32, PlayerCountSource)>,
        heuristic_meridiem: bool,
    ) {
        if extraction.booking_dates.len() > 1 {
            extraction.ambiguities.push(format!(
                "{} candidate dates found",
                extraction.booking_dates.len()
            ));
        }
        if extraction.tee_times.len() > 1 {
            extraction.ambiguities.push(format!(
                "{} candidate tee times found",
                extraction.tee_times.len()
            ));
        }
        if heuristic_meridiem {
            extraction
                .ambiguities
                .push("tee-time hour resolved without an am/pm marker".to_string());
        }
        if let Some((_, PlayerCountSource::Colloquial)) = player {
            extraction
                .ambiguities
                .push("player count inferred from a colloquial group term".to_string());
        }
        if extraction.lodging.requested && extraction.lodging.check_out.is_none() {
            extraction
                .ambiguities
                .push("lodging requested but no check-out date resolved".to_string());
        }
    }
}

/// Confidence shape shared by dates and times: base 0.5, +0.3 for a single
/// unambiguous candidate, +0.2 when a raw pattern matched, capped at 1.0.
fn band_confidence(found: bool, candidates: usize, raw_pattern: bool) -> f32 {
    if !found {
        return 0.0;
    }
    let mut confidence: f32 = 0.5;
    if candidates == 1 {
        confidence += 0.3;
    }
    if raw_pattern {
        confidence += 0.2;
    }
    confidence.min(1.0)
}

// ============================================================================
// Tests
// ============================================================================
