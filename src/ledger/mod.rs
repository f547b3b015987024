//! Append-only feedback ledger.
//!
//! Every extraction can be recorded here with its booking id; staff
//! confirmations and corrections are written back onto the same records.
//! Records never rewrite the originating extraction result. Storage is one
//! JSONL file, read and rewritten whole under a mutex; volumes are small
//! (one line per inbound email).

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::classify::Intent;
use crate::error::{LedgerError, Result};
use crate::extract::types::BookingExtraction;

/// Snippet length stored for debugging context.
const SNIPPET_CHARS: usize = 200;
/// Review queue size cap.
const REVIEW_QUEUE_CAP: usize = 20;
/// Confidence bucket bounds for the accuracy report.
const HIGH_CONFIDENCE: f32 = 0.7;
const LOW_CONFIDENCE: f32 = 0.5;

// ============================================================================
// Records
// ============================================================================

/// One ledger entry: what was extracted, and later, what was actually right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Ledger-assigned record id.
    pub id: String,
    pub email_id: String,
    pub booking_id: String,
    pub timestamp: DateTime<Utc>,

    // What was extracted
    pub extracted_dates: Vec<chrono::NaiveDate>,
    pub extracted_players: Option<u32>,
    pub extracted_intent: Intent,
    pub extracted_lodging: bool,

    // What was correct, filled in by staff or the customer reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_dates: Option<Vec<chrono::NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_players: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_lodging: Option<bool>,

    pub confidence_score: f32,
    /// First 200 characters of the email body, for debugging.
    pub email_snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub was_correct: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub correction_source: String,
}

/// Corrected values overlaid onto a record. `None` leaves the extracted
/// value untouched.
#[derive(Debug, Clone, Default)]
pub struct CorrectedFields {
    pub dates: Option<Vec<chrono::NaiveDate>>,
    pub players: Option<u32>,
    pub intent: Option<Intent>,
    pub lodging: Option<bool>,
}

/// Accuracy metrics over a recent window.
#[derive(Debug, Clone, Serialize)]
pub struct AccuracyReport {
    pub period_days: i64,
    pub total_emails: usize,
    pub verified: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy: f32,
    pub high_confidence_count: usize,
    pub low_confidence_count: usize,
    pub avg_confidence: f32,
}

/// One failure mode with its share of all incorrect records.
#[derive(Debug, Clone, Serialize)]
pub struct FailurePattern {
    pub failure_type: String,
    pub count: usize,
    pub percentage: f32,
}

// ============================================================================
// Ledger
// ============================================================================

/// Append-only feedback log over a JSONL file.
pub struct FeedbackLedger {
    log_path: PathBuf,
    lock: Mutex<()>,
}

impl FeedbackLedger {
    /// Open (or create) the ledger under `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(LedgerError::CreateDir)?;
        let log_path = data_dir.join("feedback.jsonl");
        info!("Feedback ledger at {}", log_path.display());
        Ok(Self {
            log_path,
            lock: Mutex::new(()),
        })
    }

    /// Record one extraction result. Returns the new record's id.
    pub fn record(
        &self,
        email_id: &str,
        booking_id: &str,
        extraction: &BookingExtraction,
        email_body: &str,
    ) -> Result<String> {
        let record = FeedbackRecord {
            id: Uuid::new_v4().to_string(),
            email_id: email_id.to_string(),
            booking_id: booking_id.to_string(),
            timestamp: Utc::now(),
            extracted_dates: extraction.booking_dates.clone(),
            extracted_players: extraction.player_count,
            extracted_intent: extraction.intent,
            extracted_lodging: extraction.lodging.requested,
            actual_dates: None,
            actual_players: None,
            actual_intent: None,
            actual_lodging: None,
            confidence_score: extraction.confidence(),
            email_snippet: email_body.chars().take(SNIPPET_CHARS).collect(),
            was_correct: None,
            correction_source: String::new(),
        };

        let line = serde_json::to_string(&record).map_err(LedgerError::MalformedRecord)?;
        let _guard = self.lock.lock();
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(LedgerError::WriteLog)?;
        writeln!(file, "{line}").map_err(LedgerError::WriteLog)?;
        Ok(record.id)
    }

    /// Mark the first unverified record for a booking as correct.
    pub fn mark_confirmed(&self, booking_id: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut records = self.read_all()?;
        let record = records
            .iter_mut()
            .find(|r| r.booking_id == booking_id && r.was_correct.is_none())
            .ok_or_else(|| LedgerError::BookingNotFound(booking_id.to_string()))?;
        record.was_correct = Some(true);
        record.correction_source = "customer_confirmation".to_string();
        info!(booking_id, "extraction confirmed correct");
        self.write_all(&records)
    }

    /// Overlay corrected values onto the first record for a booking and mark
    /// it incorrect.
    pub fn submit_correction(
        &self,
        booking_id: &str,
        corrected: CorrectedFields,
        source: &str,
    ) -> Result<()> {
        let _guard = self.lock.lock();
        let mut records = self.read_all()?;
        let record = records
            .iter_mut()
            .find(|r| r.booking_id == booking_id)
            .ok_or_else(|| LedgerError::BookingNotFound(booking_id.to_string()))?;

        if corrected.dates.is_some() {
            record.actual_dates = corrected.dates;
        }
        if corrected.players.is_some() {
            record.actual_players = corrected.players;
        }
        if corrected.intent.is_some() {
            record.actual_intent = corrected.intent;
        }
        if corrected.lodging.is_some() {
            record.actual_lodging = corrected.lodging;
        }
        record.was_correct = Some(false);
        record.correction_source = source.to_string();
        warn!(
            booking_id,
            source, "extraction correction recorded"
        );
        self.write_all(&records)
    }

    /// Accuracy metrics for records within the last N days.
    pub fn accuracy_report(&self, last_n_days: i64) -> Result<AccuracyReport> {
        let _guard = self.lock.lock();
        let records = self.read_all()?;
        let cutoff = Utc::now() - Duration::days(last_n_days);
        let recent: Vec<&FeedbackRecord> =
            records.iter().filter(|r| r.timestamp > cutoff).collect();

        let total = recent.len();
        let verified = recent.iter().filter(|r| r.was_correct.is_some()).count();
        let correct = recent
            .iter()
            .filter(|r| r.was_correct == Some(true))
            .count();
        let incorrect = recent
            .iter()
            .filter(|r| r.was_correct == Some(false))
            .count();

        Ok(AccuracyReport {
            period_days: last_n_days,
            total_emails: total,
            verified,
            correct,
            incorrect,
            accuracy: if verified > 0 {
                correct as f32 / verified as f32
            } else {
                0.0
            },
            high_confidence_count: recent
                .iter()
                .filter(|r| r.confidence_score > HIGH_CONFIDENCE)
                .count(),
            low_confidence_count: recent
                .iter()
                .filter(|r| r.confidence_score < LOW_CONFIDENCE)
                .count(),
            avg_confidence: if total > 0 {
                recent.iter().map(|r| r.confidence_score).sum::<f32>() / total as f32
            } else {
                0.0
            },
        })
    }

    /// Per-field mismatch counts over incorrect records, most common first.
    pub fn failure_patterns(&self) -> Result<Vec<FailurePattern>> {
        let _guard = self.lock.lock();
        let records = self.read_all()?;
        let incorrect: Vec<&FeedbackRecord> = records
            .iter()
            .filter(|r| r.was_correct == Some(false))
            .collect();

        let mut counts: Vec<(&str, usize)> = vec![
            ("date_mismatch", 0),
            ("player_count_mismatch", 0),
            ("intent_mismatch", 0),
            ("lodging_mismatch", 0),
        ];
        for record in &incorrect {
            if record
                .actual_dates
                .as_ref()
                .is_some_and(|actual| *actual != record.extracted_dates)
            {
                counts[0].1 += 1;
            }
            if record
                .actual_players
                .is_some_and(|actual| Some(actual) != record.extracted_players)
            {
                counts[1].1 += 1;
            }
            if record
                .actual_intent
                .is_some_and(|actual| actual != record.extracted_intent)
            {
                counts[2].1 += 1;
            }
            if record
                .actual_lodging
                .is_some_and(|actual| actual != record.extracted_lodging)
            {
                counts[3].1 += 1;
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(failure_type, count)| FailurePattern {
                failure_type: failure_type.to_string(),
                count,
                percentage: if incorrect.is_empty() {
                    0.0
                } else {
                    count as f32 / incorrect.len() as f32 * 100.0
                },
            })
            .collect())
    }

    /// Unverified low-confidence records for human review, lowest confidence
    /// first, capped at 20.
    pub fn review_queue(&self, min_confidence: f32) -> Result<Vec<FeedbackRecord>> {
        let _guard = self.lock.lock();
        let mut flagged: Vec<FeedbackRecord> = self
            .read_all()?
            .into_iter()
            .filter(|r| r.was_correct.is_none() && r.confidence_score < min_confidence)
            .collect();
        flagged.sort_by(|a, b| {
            a.confidence_score
                .partial_cmp(&b.confidence_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        flagged.truncate(REVIEW_QUEUE_CAP);
        Ok(flagged)
    }

    fn read_all(&self) -> Result<Vec<FeedbackRecord>> {
        let content = match fs::read_to_string(&self.log_path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(LedgerError::ReadLog(err).into()),
        };
        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(err) => warn!("Skipping malformed feedback line: {err}"),
            }
        }
        Ok(records)
    }

    fn write_all(&self, records: &[FeedbackRecord]) -> Result<()> {
        let mut out = String::new();
        for record in records {
            out.push_str(&serde_json::to_string(record).map_err(LedgerError::MalformedRecord)?);
            out.push('\n');
        }
        fs::write(&self.log_path, out).map_err(LedgerError::WriteLog)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_extraction(confidence_dates: bool) -> BookingExtraction {
        BookingExtraction {
            booking_dates: if confidence_dates {
                vec![NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()]
            } else {
                Vec::new()
            },
            preferred_date: confidence_dates
                .then(|| NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()),
            player_count: Some(4),
            intent: Intent::BookingRequest,
            date_confidence: if confidence_dates { 1.0 } else { 0.0 },
            ..Default::default()
        }
    }

    #[test]
    fn test_record_and_confirm() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FeedbackLedger::open(dir.path()).unwrap();

        let id = ledger
            .record("em-1", "BK-1", &sample_extraction(true), "Hello, 4 players please")
            .unwrap();
        assert!(!id.is_empty());

        ledger.mark_confirmed("BK-1").unwrap();
        let report = ledger.accuracy_report(30).unwrap();
        assert_eq!(report.total_emails, 1);
        assert_eq!(report.verified, 1);
        assert_eq!(report.correct, 1);
        assert!((report.accuracy - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_confirm_unknown_booking_errors() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FeedbackLedger::open(dir.path()).unwrap();
        assert!(ledger.mark_confirmed("BK-missing").is_err());
    }

    #[test]
    fn test_correction_overlays_and_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FeedbackLedger::open(dir.path()).unwrap();
        ledger
            .record("em-1", "BK-1", &sample_extraction(true), "body")
            .unwrap();

        ledger
            .submit_correction(
                "BK-1",
                CorrectedFields {
                    players: Some(8),
                    ..Default::default()
                },
                "staff",
            )
            .unwrap();

        let patterns = ledger.failure_patterns().unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].failure_type, "player_count_mismatch");
        assert_eq!(patterns[0].count, 1);
        assert!((patterns[0].percentage - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_correction_does_not_mutate_extraction() {
        let extraction = sample_extraction(true);
        let dir = tempfile::tempdir().unwrap();
        let ledger = FeedbackLedger::open(dir.path()).unwrap();
        ledger.record("em-1", "BK-1", &extraction, "body").unwrap();
        ledger
            .submit_correction(
                "BK-1",
                CorrectedFields {
                    players: Some(8),
                    ..Default::default()
                },
                "staff",
            )
            .unwrap();
        // The in-memory extraction is untouched by ledger writes.
        assert_eq!(extraction.player_count, Some(4));
    }

    #[test]
    fn test_review_queue_orders_lowest_first() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FeedbackLedger::open(dir.path()).unwrap();
        // Low-signal extraction scores 0.3, dated one scores 1.0.
        ledger
            .record("em-1", "BK-low", &sample_extraction(false), "")
            .unwrap();
        ledger
            .record("em-2", "BK-high", &sample_extraction(true), "")
            .unwrap();

        let queue = ledger.review_queue(0.5).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].booking_id, "BK-low");
    }

    #[test]
    fn test_reports_never_see_torn_writes() {
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let ledger = Arc::new(FeedbackLedger::open(dir.path()).unwrap());
        for i in 0..10 {
            ledger
                .record(&format!("em-{i}"), &format!("BK-{i}"), &sample_extraction(true), "")
                .unwrap();
        }

        // Corrections rewrite the whole log; reports running alongside must
        // always see all ten records.
        let writer = {
            let ledger = Arc::clone(&ledger);
            std::thread::spawn(move || {
                for i in 0..10 {
                    ledger.mark_confirmed(&format!("BK-{i}")).unwrap();
                }
            })
        };
        for _ in 0..50 {
            let report = ledger.accuracy_report(30).unwrap();
            assert_eq!(report.total_emails, 10);
        }
        writer.join().unwrap();

        let report = ledger.accuracy_report(30).unwrap();
        assert_eq!(report.verified, 10);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FeedbackLedger::open(dir.path()).unwrap();
        ledger
            .record("em-1", "BK-1", &sample_extraction(true), "body")
            .unwrap();
        // Corrupt the log with a junk line.
        let path = dir.path().join("feedback.jsonl");
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("not json\n");
        fs::write(&path, content).unwrap();

        let report = ledger.accuracy_report(30).unwrap();
        assert_eq!(report.total_emails, 1);
    }

    #[test]
    fn test_snippet_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FeedbackLedger::open(dir.path()).unwrap();
        let body = "x".repeat(500);
        ledger
            .record("em-1", "BK-1", &sample_extraction(true), &body)
            .unwrap();
        let queue = ledger.review_queue(2.0).unwrap();
        assert_eq!(queue[0].email_snippet.len(), 200);
    }
}
