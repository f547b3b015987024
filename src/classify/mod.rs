//! Email intent and urgency classification.

mod intent;
mod types;
mod urgency;

pub use intent::{classify_intent, IntentSignals};
pub use types::{Intent, Urgency};
pub use urgency::classify_urgency;
