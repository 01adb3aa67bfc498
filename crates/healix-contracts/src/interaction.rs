//! Drug interaction check results.

use serde::{Deserialize, Serialize};

/// How serious a recorded drug interaction is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionSeverity {
    Moderate,
    Critical,
}

/// One base-drug / substance match found by the interaction checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionHit {
    pub severity: InteractionSeverity,
    /// The base drug from the rule table that matched a current medication.
    pub drug: String,
    /// The new medication exactly as the user typed it.
    pub with: String,
    /// The interacting keyword found inside the new medication's name.
    pub substance: String,
    pub message: String,
}

/// Everything the offline interaction checker returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    pub interactions: Vec<InteractionHit>,
    /// True when any hit is `Critical`.
    pub has_critical: bool,
    /// Human-readable "STATUS: Caution" / "STATUS: Safe" text.
    pub summary: String,
}

impl InteractionReport {
    pub fn is_safe(&self) -> bool {
        self.interactions.is_empty()
    }
}
