//! `TriageEngine`, the offline `FallbackEngine` implementation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use healix_contracts::{interaction::InteractionReport, report::ReportAnalysis};
use healix_core::traits::FallbackEngine;

use crate::{
    compose::compose_with_number,
    detect::detect,
    emergency::DEFAULT_EMERGENCY_NUMBER,
    interactions, report,
    reveal::{Reveal, RevealHandle, RevealMode},
};

/// Rule-based offline responder.
///
/// Holds only presentation settings; every answer comes from the static
/// tables in this crate. Clones share one cancellation handle.
#[derive(Debug, Clone)]
pub struct TriageEngine {
    emergency_number: String,
    reveal_mode: RevealMode,
    frame_delay: Duration,
    cancel: RevealHandle,
}

impl TriageEngine {
    pub fn new(emergency_number: impl Into<String>) -> Self {
        Self {
            emergency_number: emergency_number.into(),
            reveal_mode: RevealMode::default(),
            frame_delay: Duration::ZERO,
            cancel: RevealHandle::new(),
        }
    }

    /// Pace `reveal` output instead of delivering it in one call.
    pub fn with_reveal(mut self, mode: RevealMode, frame_delay: Duration) -> Self {
        self.reveal_mode = mode;
        self.frame_delay = frame_delay;
        self
    }

    pub fn emergency_number(&self) -> &str {
        &self.emergency_number
    }

    /// Handle that abandons the reveal in progress.
    ///
    /// Take it before handing the engine to a `Consultation`. A cancel that
    /// lands between reveals stops the next one. The handle re-arms itself
    /// once that reveal returns.
    pub fn reveal_handle(&self) -> RevealHandle {
        self.cancel.clone()
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new(DEFAULT_EMERGENCY_NUMBER)
    }
}

impl FallbackEngine for TriageEngine {
    fn respond(&self, text: &str) -> String {
        let keys = detect(text);
        debug!(
            keys = %keys.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(","),
            "offline triage"
        );
        compose_with_number(&keys, text, &self.emergency_number)
    }

    fn check_interactions(&self, current_meds: &[String], new_med: &str) -> InteractionReport {
        interactions::check_interactions(current_meds, new_med)
    }

    fn analyze_report(&self, text: &str, generated_at: DateTime<Utc>) -> ReportAnalysis {
        report::analyze_report(text, generated_at)
    }

    fn reveal(&self, content: &str, on_delta: &mut dyn FnMut(&str)) {
        let completed = Reveal::with_handle(content, self.reveal_mode, &self.cancel)
            .play(self.frame_delay, |frame| on_delta(frame));
        if !completed {
            debug!("offline reveal cancelled");
        }
        self.cancel.reset();
    }
}
