//! Symptom identifiers and condition grading.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Identifier for a row in the symptom dictionary (e.g. "fever", "headache").
///
/// Dictionary keys are `'static`; keys that arrive over the wire are owned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomKey(Cow<'static, str>);

impl SymptomKey {
    /// Sentinel returned by the detector when nothing in the dictionary matched.
    pub const GENERAL: SymptomKey = SymptomKey(Cow::Borrowed("general"));

    /// Build a key from a static dictionary name without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Build a key from any owned or borrowed string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the `general` sentinel.
    pub fn is_general(&self) -> bool {
        self.0 == Self::GENERAL.0
    }
}

impl fmt::Display for SymptomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Qualitative likelihood tag attached to a candidate condition.
///
/// This is a label for display, not a calibrated probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clinical severity of a candidate condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// A candidate condition as returned to callers outside the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub name: String,
    pub confidence: Confidence,
    /// Rough likelihood, 0–100. Values across one entry need not sum to 100.
    pub probability: u8,
    pub severity: Severity,
}

/// The result of looking a single symptom key up directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickCheck {
    pub key: SymptomKey,
    /// Empty when the key is not in the dictionary.
    pub conditions: Vec<ConditionSummary>,
    pub advice: String,
    pub emergency_flags: Vec<String>,
    /// Always true: quick checks come from the offline dictionary.
    pub is_fallback: bool,
}
