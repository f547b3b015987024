//! Types for the booking extraction result entity.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::classify::{Intent, Urgency};

// ============================================================================
// Booking Extraction Entity
// ============================================================================

/// Structured booking intent extracted from a single email.
///
/// Constructed once per email by [`BookingExtractor`](crate::BookingExtractor)
/// and never mutated afterwards. Corrections live in the feedback ledger as
/// separate records; they do not rewrite this entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingExtraction {
    /// All candidate booking dates, deduplicated and ascending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub booking_dates: Vec<NaiveDate>,
    /// Earliest of `booking_dates`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<NaiveDate>,
    /// All candidate tee times, deduplicated and ascending.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tee_times: Vec<NaiveTime>,
    /// First time found in pattern-priority order (textual prominence),
    /// always a member of `tee_times`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<NaiveTime>,
    /// "flexible", "any day" — can coexist with a concrete preferred date.
    #[serde(default)]
    pub flexible_dates: bool,
    /// "any time", "whenever".
    #[serde(default)]
    pub flexible_times: bool,

    /// Accommodation details.
    #[serde(default)]
    pub lodging: LodgingDetails,

    /// Number of players, 1..=100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_count: Option<u32>,

    /// Contact details, with sender-supplied fallbacks.
    #[serde(default)]
    pub contact: ContactDetails,

    /// Free-text request fragments plus amenity keyword notes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_requests: Vec<String>,
    /// Matched dietary keywords.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_requirements: Vec<String>,
    /// Self-described playing level, first rule matched wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub golf_experience: Option<GolfExperience>,

    /// Classified email intent.
    #[serde(default)]
    pub intent: Intent,
    /// Classified urgency.
    #[serde(default)]
    pub urgency: Urgency,

    /// Confidence in the extracted dates (0.0-1.0).
    #[serde(default)]
    pub date_confidence: f32,
    /// Confidence in the extracted times (0.0-1.0).
    #[serde(default)]
    pub time_confidence: f32,

    /// Human-readable notes on unresolved or conflicting signals, for the
    /// downstream review workflow.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ambiguities: Vec<String>,

    /// Verbatim date fragments captured by the pattern layer, kept for
    /// diagnostics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_dates: Vec<String>,
    /// Verbatim time fragments captured by the pattern layer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_times: Vec<String>,
}

impl BookingExtraction {
    /// Overall confidence score.
    ///
    /// A pure function of the other fields: the average of date and time
    /// confidence when a time was found, else date confidence alone, else a
    /// 0.3 floor when any signal exists (dates, player count, or lodging) so
    /// that a lodging-only inquiry is not scored as zero-confidence noise.
    pub fn confidence(&self) -> f32 {
        if self.time_confidence > 0.0 {
            (self.date_confidence + self.time_confidence) / 2.0
        } else if self.date_confidence > 0.0 {
            self.date_confidence
        } else if !self.booking_dates.is_empty()
            || self.player_count.is_some()
            || self.lodging.requested
        {
            0.3
        } else {
            0.0
        }
    }

    /// Whether the email carried any booking signal at all.
    pub fn has_signal(&self) -> bool {
        !self.booking_dates.is_empty()
            || !self.tee_times.is_empty()
            || self.player_count.is_some()
            || self.lodging.requested
    }
}

// ============================================================================
// Lodging
// ============================================================================

/// Accommodation details extracted alongside the golf booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LodgingDetails {
    /// Whether any accommodation signal was detected.
    #[serde(default)]
    pub requested: bool,
    /// Check-in date; defaults to the earliest booking date when unlabelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    /// Check-out date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    /// Number of nights; derived from check-in/out when unstated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights: Option<u32>,
    /// Number of rooms; at least 1 whenever `requested` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<u32>,
    /// Requested room category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    /// Detection confidence, scaled by keyword match count (capped at 1.0).
    #[serde(default)]
    pub confidence: f32,
}

/// Room category, first matching keyword wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// single / twin
    Single,
    /// double / queen / king
    Double,
    /// suite
    Suite,
}

impl RoomType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Suite => "suite",
        }
    }
}

// ============================================================================
// Contact
// ============================================================================

/// Contact details for the sender, each field independently resolvable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// ============================================================================
// Golf Experience
// ============================================================================

/// Self-described golf experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GolfExperience {
    Beginner,
    Intermediate,
    Advanced,
    Professional,
}

impl GolfExperience {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Professional => "professional",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_floor_with_lodging_only() {
        let entity = BookingExtraction {
            lodging: LodgingDetails {
                requested: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(entity.confidence() >= 0.3);
    }

    #[test]
    fn test_confidence_zero_without_signal() {
        let entity = BookingExtraction::default();
        assert_eq!(entity.confidence(), 0.0);
        assert!(!entity.has_signal());
    }

    #[test]
    fn test_confidence_averages_date_and_time() {
        let entity = BookingExtraction {
            date_confidence: 0.8,
            time_confidence: 0.6,
            ..Default::default()
        };
        assert!((entity.confidence() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_confidence_recompute_is_idempotent() {
        let entity = BookingExtraction {
            date_confidence: 0.5,
            player_count: Some(4),
            ..Default::default()
        };
        assert_eq!(entity.confidence(), entity.confidence());
    }

    #[test]
    fn test_entity_round_trips_through_json() {
        let entity = BookingExtraction {
            booking_dates: vec![NaiveDate::from_ymd_opt(2026, 9, 10).unwrap()],
            preferred_date: NaiveDate::from_ymd_opt(2026, 9, 10),
            player_count: Some(4),
            intent: Intent::BookingRequest,
            ..Default::default()
        };
        let json = serde_json::to_string(&entity).unwrap();
        let back: BookingExtraction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.booking_dates, entity.booking_dates);
        assert_eq!(back.player_count, Some(4));
        assert_eq!(back.intent, Intent::BookingRequest);
    }
}
