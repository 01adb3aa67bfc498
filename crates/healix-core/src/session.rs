//! The HEALIX consultation session.
//!
//! A `Consultation` drives every user request through the same order:
//!
//!   Input → Emergency scan → [ChatBackend, in order] → FallbackEngine → History
//!
//! The invariant: input the `EmergencyDetector` flags never reaches a
//! backend, and a request that passes validation always gets an answer,
//! because the fallback engine is total.

use chrono::Utc;
use tracing::{debug, info, warn};

use healix_contracts::{
    error::{HealixError, HealixResult},
    message::{ConversationMessage, Notification},
    result::{AnalysisResult, ChatResult, InteractionResult},
};

use crate::{
    prompts::{
        interaction_request, report_request, CHAT_SYSTEM_PROMPT, INTERACTION_SYSTEM_PROMPT,
        REPORT_SYSTEM_PROMPT,
    },
    traits::{ChatBackend, EmergencyDetector, FallbackEngine},
};

/// Reason recorded on fallback results when no backend is configured.
const NO_BACKEND: &str = "no chat backend configured";

/// One user's conversation with the assistant.
///
/// History and notifications live in memory only and vanish with the
/// session. Construct one per conversation.
pub struct Consultation {
    backends: Vec<Box<dyn ChatBackend>>,
    fallback: Box<dyn FallbackEngine>,
    detector: Box<dyn EmergencyDetector>,
    history: Vec<ConversationMessage>,
    notifications: Vec<Notification>,
}

impl Consultation {
    /// Create a session.
    ///
    /// `backends` are tried in order; an empty list runs fully offline.
    pub fn new(
        backends: Vec<Box<dyn ChatBackend>>,
        fallback: Box<dyn FallbackEngine>,
        detector: Box<dyn EmergencyDetector>,
    ) -> Self {
        Self {
            backends,
            fallback,
            detector,
            history: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Create a session with no remote backend.
    pub fn offline(fallback: Box<dyn FallbackEngine>, detector: Box<dyn EmergencyDetector>) -> Self {
        Self::new(Vec::new(), fallback, detector)
    }

    /// Handle one chat turn.
    ///
    /// # Pipeline
    ///
    /// 1. Reject blank input with `HealixError::EmptyMessage`
    /// 2. Scan for emergency phrases; on a hit, record the turn and return
    ///    `ChatResult::Emergency` without contacting any backend
    /// 3. Append the user message to history
    /// 4. Try each backend with the chat prompt and the non-emergency history;
    ///    the first non-empty answer wins (`ChatResult::Remote`)
    /// 5. Otherwise answer from the fallback engine, presented through
    ///    `on_delta` (`ChatResult::Fallback`)
    pub fn send(
        &mut self,
        text: &str,
        on_delta: &mut dyn FnMut(&str),
    ) -> HealixResult<ChatResult> {
        let text = text.trim();
        if text.is_empty() {
            return Err(HealixError::EmptyMessage);
        }

        debug!(turn = self.history.len(), chars = text.len(), "consultation turn starting");

        // ── Step 2: Emergency scan ───────────────────────────────────────────
        if let Some(alert) = self.detector.scan(text) {
            warn!(action = %alert.action, countdown = alert.countdown, "emergency phrase detected");

            let reply = ConversationMessage::assistant(format!("EMERGENCY: {}", alert.message))
                .emergency();
            self.history.push(ConversationMessage::user(text).emergency());
            self.history.push(reply.clone());

            return Ok(ChatResult::Emergency { message: reply, alert });
        }

        // ── Step 3: Record the user turn ─────────────────────────────────────
        self.history.push(ConversationMessage::user(text));

        // ── Step 4: Remote backends ──────────────────────────────────────────
        let context: Vec<ConversationMessage> = self
            .history
            .iter()
            .filter(|m| !m.is_emergency)
            .cloned()
            .collect();

        let reason = match self.try_backends(CHAT_SYSTEM_PROMPT, &context, on_delta) {
            Ok((content, model)) => {
                let reply = ConversationMessage::assistant(content);
                self.history.push(reply.clone());
                self.notifications.push(Notification::info("Diagnosis complete"));
                info!(model = %model, "remote diagnosis complete");
                return Ok(ChatResult::Remote { message: reply, model });
            }
            Err(reason) => reason,
        };

        // ── Step 5: Offline fallback ─────────────────────────────────────────
        let content = self.fallback.respond(text);
        self.fallback.reveal(&content, on_delta);

        let reply = ConversationMessage::assistant(content).fallback();
        self.history.push(reply.clone());
        self.notifications.push(Notification::info("Offline diagnosis complete"));
        info!(reason = %reason, "offline diagnosis complete");

        Ok(ChatResult::Fallback { message: reply, reason })
    }

    /// Check `new_med` against `current_meds`.
    ///
    /// Returns `HealixError::EmptyMedication` for a blank name. Otherwise the
    /// backends are tried first and the offline rule table answers if they
    /// all fail.
    pub fn check_interactions(
        &mut self,
        current_meds: &[String],
        new_med: &str,
    ) -> HealixResult<InteractionResult> {
        let new_med = new_med.trim();
        if new_med.is_empty() {
            self.notifications.push(Notification::error("Enter a medication name to check"));
            return Err(HealixError::EmptyMedication);
        }

        let request = [ConversationMessage::user(interaction_request(current_meds, new_med))];
        match self.try_backends(INTERACTION_SYSTEM_PROMPT, &request, &mut |_| {}) {
            Ok((content, model)) => Ok(InteractionResult::Remote { content, model }),
            Err(reason) => {
                debug!(reason = %reason, "checking interactions offline");
                let report = self.fallback.check_interactions(current_meds, new_med);
                if report.has_critical {
                    warn!(new_med = %new_med, "critical interaction found");
                }
                Ok(InteractionResult::Offline { report })
            }
        }
    }

    /// Analyze an uploaded report's text.
    ///
    /// Returns `HealixError::EmptyReport` when there is nothing to analyze.
    pub fn analyze_report(&mut self, report_text: &str) -> HealixResult<AnalysisResult> {
        if report_text.trim().is_empty() {
            self.notifications.push(Notification::error("No content to analyze"));
            return Err(HealixError::EmptyReport);
        }

        let request = [ConversationMessage::user(report_request(report_text))];
        match self.try_backends(REPORT_SYSTEM_PROMPT, &request, &mut |_| {}) {
            Ok((summary, model)) => {
                self.notifications.push(Notification::success("Analysis complete!"));
                Ok(AnalysisResult::Remote { summary, model })
            }
            Err(reason) => {
                debug!(reason = %reason, "analyzing report offline");
                let analysis = self.fallback.analyze_report(report_text, Utc::now());
                self.notifications.push(Notification::success("Offline analysis complete!"));
                Ok(AnalysisResult::Offline { analysis })
            }
        }
    }

    /// All messages in chronological order, including emergency turns.
    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    /// Notifications raised so far and not yet taken.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Remove and return pending notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Render the conversation as `ROLE: content` blocks separated by blank lines.
    pub fn export_transcript(&self) -> String {
        self.history
            .iter()
            .map(|m| format!("{}: {}", m.role.as_str().to_uppercase(), m.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Forget the conversation and any pending notifications.
    pub fn clear(&mut self) {
        self.history.clear();
        self.notifications.clear();
    }

    /// Try each backend in order. Returns `(content, model)` from the first
    /// one that produces non-blank text, or the joined failure reasons.
    fn try_backends(
        &self,
        system_prompt: &str,
        messages: &[ConversationMessage],
        on_delta: &mut dyn FnMut(&str),
    ) -> Result<(String, String), String> {
        if self.backends.is_empty() {
            return Err(NO_BACKEND.to_string());
        }

        let mut failures = Vec::with_capacity(self.backends.len());
        for backend in &self.backends {
            let model = backend.model();
            match backend.complete(system_prompt, messages, on_delta) {
                Ok(content) if !content.trim().is_empty() => {
                    return Ok((content, model.to_string()));
                }
                Ok(_) => {
                    warn!(model = %model, "backend returned an empty response");
                    failures.push(format!("{model}: empty response"));
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "backend request failed");
                    failures.push(format!("{model}: {e}"));
                }
            }
        }
        Err(failures.join("; "))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Utc};

    use healix_contracts::{
        emergency::{AlertLevel, EmergencyAlert},
        error::{HealixError, HealixResult},
        interaction::InteractionReport,
        message::{ConversationMessage, NotificationKind, Role},
        report::ReportAnalysis,
        result::{AnalysisResult, ChatResult, InteractionResult},
    };

    use crate::traits::{ChatBackend, EmergencyDetector, FallbackEngine};

    use super::Consultation;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A backend that returns a fixed answer (or error) and records what it saw.
    struct MockBackend {
        model: String,
        answer: Result<String, u16>,
        seen: Arc<Mutex<Vec<Vec<ConversationMessage>>>>,
    }

    impl MockBackend {
        fn answering(model: &str, answer: &str) -> Self {
            Self {
                model: model.to_string(),
                answer: Ok(answer.to_string()),
                seen: Arc::new(Mutex::new(vec![])),
            }
        }

        fn failing(model: &str, status: u16) -> Self {
            Self {
                model: model.to_string(),
                answer: Err(status),
                seen: Arc::new(Mutex::new(vec![])),
            }
        }
    }

    impl ChatBackend for MockBackend {
        fn model(&self) -> &str {
            &self.model
        }

        fn complete(
            &self,
            _system_prompt: &str,
            messages: &[ConversationMessage],
            on_delta: &mut dyn FnMut(&str),
        ) -> HealixResult<String> {
            self.seen.lock().unwrap().push(messages.to_vec());
            match &self.answer {
                Ok(text) => {
                    on_delta(text);
                    Ok(text.clone())
                }
                Err(status) => Err(HealixError::BackendStatus {
                    status: *status,
                    body: "unavailable".to_string(),
                }),
            }
        }
    }

    /// A fallback engine with canned answers that counts reveals.
    struct MockFallback {
        reveals: Arc<Mutex<u32>>,
    }

    impl MockFallback {
        fn new() -> Self {
            Self { reveals: Arc::new(Mutex::new(0)) }
        }
    }

    impl FallbackEngine for MockFallback {
        fn respond(&self, text: &str) -> String {
            format!("offline answer for: {text}")
        }

        fn check_interactions(&self, _current_meds: &[String], new_med: &str) -> InteractionReport {
            InteractionReport {
                interactions: vec![],
                has_critical: false,
                summary: format!("STATUS: Safe ({new_med})"),
            }
        }

        fn analyze_report(&self, _text: &str, _generated_at: DateTime<Utc>) -> ReportAnalysis {
            ReportAnalysis { summary: "offline summary".to_string(), findings: vec![] }
        }

        fn reveal(&self, content: &str, on_delta: &mut dyn FnMut(&str)) {
            *self.reveals.lock().unwrap() += 1;
            on_delta(content);
        }
    }

    /// Flags any text containing "chest pain".
    struct MockDetector;

    impl EmergencyDetector for MockDetector {
        fn scan(&self, text: &str) -> Option<EmergencyAlert> {
            text.to_lowercase().contains("chest pain").then(|| EmergencyAlert {
                level: AlertLevel::Critical,
                action: "CALL_102".to_string(),
                message: "Emergency detected. Please seek immediate care.".to_string(),
                countdown: 10,
            })
        }
    }

    fn offline_session() -> Consultation {
        Consultation::offline(Box::new(MockFallback::new()), Box::new(MockDetector))
    }

    // ── 1. blank input ───────────────────────────────────────────────────────

    #[test]
    fn blank_message_is_rejected() {
        let mut session = offline_session();
        let result = session.send("   ", &mut |_| {});
        assert!(matches!(result, Err(HealixError::EmptyMessage)));
        assert!(session.history().is_empty());
    }

    // ── 2. emergency short-circuit ───────────────────────────────────────────

    #[test]
    fn emergency_input_never_reaches_backend() {
        let backend = MockBackend::answering("remote-model", "should not be used");
        let seen = Arc::clone(&backend.seen);
        let mut session = Consultation::new(
            vec![Box::new(backend)],
            Box::new(MockFallback::new()),
            Box::new(MockDetector),
        );

        let result = session.send("I have chest pain", &mut |_| {}).unwrap();

        match result {
            ChatResult::Emergency { message, alert } => {
                assert!(message.is_emergency);
                assert_eq!(alert.action, "CALL_102");
            }
            other => panic!("expected Emergency, got {:?}", other),
        }
        assert!(seen.lock().unwrap().is_empty(), "backend must not be called");
        assert_eq!(session.history().len(), 2);
        assert!(session.history().iter().all(|m| m.is_emergency));
    }

    // ── 3. remote success ────────────────────────────────────────────────────

    #[test]
    fn remote_answer_is_recorded_with_notification() {
        let mut session = Consultation::new(
            vec![Box::new(MockBackend::answering("remote-model", "- Likely a cold"))],
            Box::new(MockFallback::new()),
            Box::new(MockDetector),
        );

        let mut streamed = Vec::new();
        let result = session.send("I have a cough", &mut |s| streamed.push(s.to_string())).unwrap();

        match &result {
            ChatResult::Remote { message, model } => {
                assert_eq!(model, "remote-model");
                assert_eq!(message.content, "- Likely a cold");
                assert!(!message.is_fallback);
            }
            other => panic!("expected Remote, got {:?}", other),
        }
        assert_eq!(streamed, vec!["- Likely a cold".to_string()]);
        assert_eq!(session.notifications()[0].message, "Diagnosis complete");
        assert_eq!(session.notifications()[0].kind, NotificationKind::Info);
    }

    // ── 4. fallback after every backend fails ────────────────────────────────

    #[test]
    fn all_backends_failing_falls_back_offline() {
        let fallback = MockFallback::new();
        let reveals = Arc::clone(&fallback.reveals);
        let mut session = Consultation::new(
            vec![
                Box::new(MockBackend::failing("primary", 500)),
                Box::new(MockBackend::failing("secondary", 429)),
            ],
            Box::new(fallback),
            Box::new(MockDetector),
        );

        let result = session.send("I have a fever", &mut |_| {}).unwrap();

        match &result {
            ChatResult::Fallback { message, reason } => {
                assert!(message.is_fallback);
                assert_eq!(message.content, "offline answer for: I have a fever");
                assert!(reason.contains("primary"));
                assert!(reason.contains("secondary"));
            }
            other => panic!("expected Fallback, got {:?}", other),
        }
        assert_eq!(*reveals.lock().unwrap(), 1);
        assert_eq!(session.notifications()[0].message, "Offline diagnosis complete");
    }

    #[test]
    fn second_backend_answers_when_first_fails() {
        let mut session = Consultation::new(
            vec![
                Box::new(MockBackend::failing("primary", 503)),
                Box::new(MockBackend::answering("secondary", "ok")),
            ],
            Box::new(MockFallback::new()),
            Box::new(MockDetector),
        );

        match session.send("hello", &mut |_| {}).unwrap() {
            ChatResult::Remote { model, .. } => assert_eq!(model, "secondary"),
            other => panic!("expected Remote from secondary, got {:?}", other),
        }
    }

    #[test]
    fn empty_remote_answer_counts_as_failure() {
        let mut session = Consultation::new(
            vec![Box::new(MockBackend::answering("remote-model", "   "))],
            Box::new(MockFallback::new()),
            Box::new(MockDetector),
        );

        match session.send("hello", &mut |_| {}).unwrap() {
            ChatResult::Fallback { reason, .. } => assert!(reason.contains("empty response")),
            other => panic!("expected Fallback, got {:?}", other),
        }
    }

    #[test]
    fn offline_session_reports_missing_backend() {
        let mut session = offline_session();
        match session.send("hello", &mut |_| {}).unwrap() {
            ChatResult::Fallback { reason, .. } => assert_eq!(reason, "no chat backend configured"),
            other => panic!("expected Fallback, got {:?}", other),
        }
    }

    // ── 5. history sent to backends ──────────────────────────────────────────

    #[test]
    fn backend_sees_history_without_emergency_turns() {
        let backend = MockBackend::answering("remote-model", "noted");
        let seen = Arc::clone(&backend.seen);
        let mut session = Consultation::new(
            vec![Box::new(backend)],
            Box::new(MockFallback::new()),
            Box::new(MockDetector),
        );

        session.send("chest pain again", &mut |_| {}).unwrap();
        session.send("first question", &mut |_| {}).unwrap();
        session.send("second question", &mut |_| {}).unwrap();

        let calls = seen.lock().unwrap();
        assert_eq!(calls.len(), 2);
        let last = &calls[1];
        let contents: Vec<&str> = last.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first question", "noted", "second question"]);
        assert_eq!(last[0].role, Role::User);
    }

    // ── 6. interaction checks ────────────────────────────────────────────────

    #[test]
    fn interaction_check_requires_a_name() {
        let mut session = offline_session();
        let result = session.check_interactions(&["Warfarin".to_string()], "  ");
        assert!(matches!(result, Err(HealixError::EmptyMedication)));
        assert_eq!(session.notifications()[0].kind, NotificationKind::Error);
    }

    #[test]
    fn interaction_check_falls_back_offline() {
        let mut session = offline_session();
        let result = session.check_interactions(&["Warfarin".to_string()], "Ibuprofen").unwrap();
        match result {
            InteractionResult::Offline { report } => {
                assert_eq!(report.summary, "STATUS: Safe (Ibuprofen)");
            }
            other => panic!("expected Offline, got {:?}", other),
        }
    }

    #[test]
    fn interaction_check_prefers_remote() {
        let backend = MockBackend::answering("remote-model", "STATUS: Caution");
        let seen = Arc::clone(&backend.seen);
        let mut session = Consultation::new(
            vec![Box::new(backend)],
            Box::new(MockFallback::new()),
            Box::new(MockDetector),
        );

        let meds = vec!["Warfarin".to_string(), "Metformin".to_string()];
        let result = session.check_interactions(&meds, "Aspirin").unwrap();
        assert_eq!(result.content(), "STATUS: Caution");
        assert_eq!(seen.lock().unwrap()[0][0].content, "Check: Warfarin, Metformin + Aspirin");
    }

    // ── 7. report analysis ───────────────────────────────────────────────────

    #[test]
    fn report_analysis_offline_raises_success_notification() {
        let mut session = offline_session();
        let result = session.analyze_report("blood test: glucose 95").unwrap();
        assert!(matches!(result, AnalysisResult::Offline { .. }));
        assert_eq!(result.summary(), "offline summary");
        assert_eq!(session.notifications()[0].message, "Offline analysis complete!");
    }

    #[test]
    fn empty_report_is_rejected() {
        let mut session = offline_session();
        assert!(matches!(session.analyze_report("\n "), Err(HealixError::EmptyReport)));
    }

    // ── 8. transcript and housekeeping ───────────────────────────────────────

    #[test]
    fn transcript_uses_upper_case_roles() {
        let mut session = offline_session();
        session.send("hello", &mut |_| {}).unwrap();

        let transcript = session.export_transcript();
        assert_eq!(transcript, "USER: hello\n\nASSISTANT: offline answer for: hello");
    }

    #[test]
    fn take_notifications_drains_and_clear_resets() {
        let mut session = offline_session();
        session.send("hello", &mut |_| {}).unwrap();

        assert_eq!(session.take_notifications().len(), 1);
        assert!(session.notifications().is_empty());

        session.clear();
        assert!(session.history().is_empty());
    }
}
