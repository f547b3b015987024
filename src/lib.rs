//! Fairway turns golf-club inquiry emails into structured booking intents.
//!
//! One email goes in, one [`BookingExtraction`] comes out: candidate dates
//! and tee times, player count, lodging details, contact information, intent
//! and urgency, plus confidence scores and ambiguity notes for the review
//! workflow. Extraction is synchronous, stateless, and infallible; the
//! fallible surfaces are configuration and the [`FeedbackLedger`].
//!
//! ```no_run
//! use fairway::BookingExtractor;
//!
//! let extractor = BookingExtractor::new();
//! let result = extractor.extract(
//!     "We'd like a tee time for 4 players on 2026-06-05, around 9am.",
//!     "Society booking",
//!     "secretary@example.com",
//!     "",
//! );
//! assert_eq!(result.player_count, Some(4));
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod ledger;

pub use classify::{classify_intent, classify_urgency, Intent, IntentSignals, Urgency};
pub use config::Config;
pub use error::{ConfigError, FairwayError, LedgerError, Result};
pub use extract::dates::{DateResolution, DateResolver, FuzzyDateParser, DATE_PATTERN_TABLE};
pub use extract::ner::{PatternNer, PersonNer};
pub use extract::times::{TimeResolution, TimeResolver, TIME_PATTERN_TABLE};
pub use extract::types::{
    BookingExtraction, ContactDetails, GolfExperience, LodgingDetails, RoomType,
};
pub use extract::BookingExtractor;
pub use ledger::{
    AccuracyReport, CorrectedFields, FailurePattern, FeedbackLedger, FeedbackRecord,
};
