//! Types for email intent and urgency classification.

use serde::{Deserialize, Serialize};

// ============================================================================
// Intent
// ============================================================================

/// High-level intent classification for an inbound booking email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Generic interest with no concrete dates or times.
    NewInquiry,
    /// A firm request carrying dates and/or tee times.
    BookingRequest,
    /// The sender is confirming a previously proposed booking.
    Confirmation,
    /// Change an existing booking (reschedule, move, update).
    Modification,
    /// Cancel an existing booking.
    Cancellation,
    /// The sender is asking rather than asserting.
    Question,
    /// Accommodation requested with no tee-time dates.
    LodgingRequest,
    /// Tee time plus lodging in one email.
    CombinedRequest,
    /// Nothing recognizable.
    #[default]
    Unknown,
}

impl Intent {
    /// Get a human-readable name for this intent.
    pub fn display_name(&self) -> &str {
        match self {
            Self::NewInquiry => "New Inquiry",
            Self::BookingRequest => "Booking Request",
            Self::Confirmation => "Confirmation",
            Self::Modification => "Modification",
            Self::Cancellation => "Cancellation",
            Self::Question => "Question",
            Self::LodgingRequest => "Lodging Request",
            Self::CombinedRequest => "Combined Request",
            Self::Unknown => "Unknown",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NewInquiry => "new_inquiry",
            Self::BookingRequest => "booking_request",
            Self::Confirmation => "confirmation",
            Self::Modification => "modification",
            Self::Cancellation => "cancellation",
            Self::Question => "question",
            Self::LodgingRequest => "lodging_request",
            Self::CombinedRequest => "combined_request",
            Self::Unknown => "unknown",
        }
    }
}

// ============================================================================
// Urgency
// ============================================================================

/// How quickly staff should act on the email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// ASAP, urgent, or playing within a day.
    Urgent,
    /// Within the next 3 days.
    High,
    /// Within the next 2 weeks.
    Normal,
    /// 15+ days out.
    Low,
    /// No usable signal.
    #[default]
    Unknown,
}

impl Urgency {
    /// Get a human-readable name for this urgency level.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
