//! Core trait definitions for the HEALIX consultation pipeline.
//!
//! These three traits define the seams a `Consultation` is assembled from:
//!
//! - `EmergencyDetector`: checked first, on the raw user text
//! - `ChatBackend`: a hosted model; may fail at any time
//! - `FallbackEngine`: the offline responder; total, never fails
//!
//! The session wires them together in that order. A backend is never
//! contacted for input the detector flagged.

use chrono::{DateTime, Utc};

use healix_contracts::{
    emergency::EmergencyAlert, error::HealixResult, interaction::InteractionReport,
    message::ConversationMessage, report::ReportAnalysis,
};

/// A hosted chat model reachable over the network.
///
/// Implementations are considered **unreliable**: every error they return is
/// absorbed by the session, logged, and answered by the `FallbackEngine`.
pub trait ChatBackend: Send + Sync {
    /// Model identifier reported in `ChatResult::Remote`.
    fn model(&self) -> &str;

    /// Run one completion.
    ///
    /// `messages` holds user/assistant turns in chronological order; the
    /// backend prepends `system_prompt` itself. `on_delta` receives the
    /// accumulated text each time the stream grows. Returns the full text.
    fn complete(
        &self,
        system_prompt: &str,
        messages: &[ConversationMessage],
        on_delta: &mut dyn FnMut(&str),
    ) -> HealixResult<String>;
}

/// The offline, rule-based responder.
///
/// Every method is total and synchronous. The session relies on this: once
/// the remote path has failed, the fallback always produces an answer.
pub trait FallbackEngine: Send + Sync {
    /// Produce a complete triage reply for free-text symptoms.
    fn respond(&self, text: &str) -> String;

    /// Check a candidate medication against the current medication list.
    fn check_interactions(&self, current_meds: &[String], new_med: &str) -> InteractionReport;

    /// Analyze the text of an uploaded report.
    fn analyze_report(&self, text: &str, generated_at: DateTime<Utc>) -> ReportAnalysis;

    /// Present a finished reply through `on_delta`.
    ///
    /// The default delivers the whole text in one call. Engines that
    /// simulate streaming override this.
    fn reveal(&self, content: &str, on_delta: &mut dyn FnMut(&str)) {
        on_delta(content);
    }
}

/// Scans raw user input for phrases that must escalate to emergency care.
pub trait EmergencyDetector: Send + Sync {
    fn scan(&self, text: &str) -> Option<EmergencyAlert>;
}
