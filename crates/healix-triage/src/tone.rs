//! Coarse tone classification for assistant replies.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Concerned,
    Reassuring,
    Analyzing,
    Neutral,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Concerned => "concerned",
            Tone::Reassuring => "reassuring",
            Tone::Analyzing => "analyzing",
            Tone::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Checked in order; the first group with a hit decides.
const GROUPS: &[(Tone, &[&str])] = &[
    (Tone::Concerned, &["serious", "critical", "immediate", "emergency"]),
    (Tone::Reassuring, &["likely", "probably", "common"]),
    (Tone::Analyzing, &["think", "consider", "might"]),
];

pub fn classify_tone(text: &str) -> Tone {
    let lower = text.to_lowercase();
    GROUPS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map_or(Tone::Neutral, |(tone, _)| *tone)
}
