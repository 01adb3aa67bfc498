//! Emergency alert shape returned by the keyword scanner.
//!
//! The alert is informational. Presenting a call-to-action and running the
//! countdown is the consuming UI's job.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
}

/// Fixed-shape emergency result, e.g.
/// `{ level: "critical", action: "CALL_102", message, countdown: 10 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub level: AlertLevel,
    /// `CALL_<number>`; the UI dials `<number>`.
    pub action: String,
    pub message: String,
    /// Seconds before the UI auto-dials.
    pub countdown: u32,
}

impl EmergencyAlert {
    /// The number encoded in `action`, if it has the `CALL_` prefix.
    pub fn dial_number(&self) -> Option<&str> {
        self.action.strip_prefix("CALL_")
    }
}
