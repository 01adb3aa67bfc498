//! Tagged results for each request kind the session serves.
//!
//! Every variant carries a `kind` tag on the wire so consumers never infer
//! meaning from which optional fields happen to be present.

use serde::{Deserialize, Serialize};

use crate::{
    emergency::EmergencyAlert, interaction::InteractionReport, message::ConversationMessage,
    report::ReportAnalysis,
};

/// Outcome of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatResult {
    /// A hosted model answered.
    Remote {
        message: ConversationMessage,
        model: String,
    },
    /// Every backend failed (or none was configured); the offline engine answered.
    Fallback {
        message: ConversationMessage,
        /// Why the remote path was skipped, for logs and diagnostics.
        reason: String,
    },
    /// The input matched an emergency phrase. No backend was contacted.
    Emergency {
        message: ConversationMessage,
        alert: EmergencyAlert,
    },
}

impl ChatResult {
    /// The assistant message produced by this turn.
    pub fn message(&self) -> &ConversationMessage {
        match self {
            ChatResult::Remote { message, .. }
            | ChatResult::Fallback { message, .. }
            | ChatResult::Emergency { message, .. } => message,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ChatResult::Fallback { .. })
    }
}

/// Outcome of a drug interaction check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionResult {
    Remote { content: String, model: String },
    Offline { report: InteractionReport },
}

impl InteractionResult {
    /// Display text regardless of which path produced it.
    pub fn content(&self) -> &str {
        match self {
            InteractionResult::Remote { content, .. } => content,
            InteractionResult::Offline { report } => &report.summary,
        }
    }
}

/// Outcome of a medical report analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    Remote { summary: String, model: String },
    Offline { analysis: ReportAnalysis },
}

impl AnalysisResult {
    pub fn summary(&self) -> &str {
        match self {
            AnalysisResult::Remote { summary, .. } => summary,
            AnalysisResult::Offline { analysis } => &analysis.summary,
        }
    }
}
