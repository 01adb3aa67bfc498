//! Emergency keyword scanning.
//!
//! A fixed list of critical phrases, matched as case-insensitive substrings.
//! Any hit produces the same alert shape; there is no ranking.

use tracing::debug;

use healix_contracts::emergency::{AlertLevel, EmergencyAlert};
use healix_core::traits::EmergencyDetector;

/// Number dialed when no other is configured.
pub const DEFAULT_EMERGENCY_NUMBER: &str = "102";
/// Seconds before the UI auto-dials when no other value is configured.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 10;

const ALERT_MESSAGE: &str = "Emergency detected. Please seek immediate care.";

pub const EMERGENCY_PHRASES: &[&str] = &[
    "chest pain",
    "heart attack",
    "stroke",
    "can't breathe",
    "unconscious",
    "bleeding heavily",
    "suicide",
    "overdose",
    "anaphylaxis",
    "not breathing",
    "severe allergic reaction",
    "seizure",
    "poisoning",
    "electric shock",
];

/// Scan `text` with the default number and countdown.
pub fn scan(text: &str) -> Option<EmergencyAlert> {
    EmergencyScanner::default().scan(text)
}

/// The first emergency phrase found in `text`, if any.
pub fn matched_phrase(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    EMERGENCY_PHRASES.iter().copied().find(|phrase| lower.contains(phrase))
}

/// Emergency scanner with a configurable dial number and countdown.
#[derive(Debug, Clone)]
pub struct EmergencyScanner {
    number: String,
    countdown: u32,
}

impl EmergencyScanner {
    pub fn new(number: impl Into<String>, countdown: u32) -> Self {
        Self { number: number.into(), countdown }
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

impl Default for EmergencyScanner {
    fn default() -> Self {
        Self::new(DEFAULT_EMERGENCY_NUMBER, DEFAULT_COUNTDOWN_SECS)
    }
}

impl EmergencyDetector for EmergencyScanner {
    fn scan(&self, text: &str) -> Option<EmergencyAlert> {
        let phrase = matched_phrase(text)?;
        debug!(phrase, number = %self.number, "emergency phrase matched");

        Some(EmergencyAlert {
            level: AlertLevel::Critical,
            action: format!("CALL_{}", self.number),
            message: ALERT_MESSAGE.to_string(),
            countdown: self.countdown,
        })
    }
}
