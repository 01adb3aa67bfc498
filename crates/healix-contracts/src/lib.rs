//! # healix-contracts
//!
//! Shared types, tagged results, and errors for the HEALIX triage runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions and error types.

pub mod emergency;
pub mod error;
pub mod interaction;
pub mod message;
pub mod report;
pub mod result;
pub mod symptom;

#[cfg(test)]
mod tests {
    use super::*;
    use emergency::{AlertLevel, EmergencyAlert};
    use error::HealixError;
    use interaction::InteractionReport;
    use message::{ConversationMessage, Notification, NotificationKind, Role};
    use report::{Finding, FindingStatus, ReportAnalysis};
    use result::{ChatResult, InteractionResult};
    use symptom::{Confidence, Severity, SymptomKey};

    // ── SymptomKey ───────────────────────────────────────────────────────────

    #[test]
    fn symptom_key_general_sentinel() {
        assert!(SymptomKey::GENERAL.is_general());
        assert!(SymptomKey::new("general").is_general());
        assert!(!SymptomKey::from_static("fever").is_general());
    }

    #[test]
    fn symptom_key_static_and_owned_compare_equal() {
        assert_eq!(SymptomKey::from_static("fever"), SymptomKey::new("fever".to_string()));
        assert_eq!(SymptomKey::from_static("back_pain").to_string(), "back_pain");
    }

    #[test]
    fn symptom_key_serializes_as_plain_string() {
        let json = serde_json::to_string(&SymptomKey::from_static("stomach pain")).unwrap();
        assert_eq!(json, "\"stomach pain\"");
        let decoded: SymptomKey = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.as_str(), "stomach pain");
    }

    // ── Grading enums ────────────────────────────────────────────────────────

    #[test]
    fn confidence_labels() {
        assert_eq!(Confidence::Low.to_string(), "Low");
        assert_eq!(Confidence::Medium.label(), "Medium");
        assert_eq!(Confidence::High.to_string(), "High");
    }

    #[test]
    fn severity_orders_from_mild_to_critical() {
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Severe < Severity::Critical);
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
    }

    // ── Messages and notifications ───────────────────────────────────────────

    #[test]
    fn conversation_message_builders_set_flags() {
        let user = ConversationMessage::user("I have a cough");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_emergency && !user.is_fallback);

        let reply = ConversationMessage::assistant("ok").fallback();
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.is_fallback);

        let alert = ConversationMessage::assistant("call now").emergency();
        assert!(alert.is_emergency);
        assert_ne!(user.id, reply.id);
    }

    #[test]
    fn notification_ids_are_unique() {
        let a = Notification::info("Diagnosis complete");
        let b = Notification::info("Diagnosis complete");
        assert_ne!(a.id, b.id);
        assert_eq!(Notification::error("bad").kind, NotificationKind::Error);
        assert_eq!(Notification::success("ok").kind, NotificationKind::Success);
    }

    // ── Emergency alert ──────────────────────────────────────────────────────

    #[test]
    fn emergency_alert_wire_shape() {
        let alert = EmergencyAlert {
            level: AlertLevel::Critical,
            action: "CALL_102".to_string(),
            message: "Emergency detected. Please seek immediate care.".to_string(),
            countdown: 10,
        };
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["level"], "critical");
        assert_eq!(value["action"], "CALL_102");
        assert_eq!(value["countdown"], 10);
        assert_eq!(alert.dial_number(), Some("102"));
    }

    // ── Tagged results ───────────────────────────────────────────────────────

    #[test]
    fn chat_result_carries_kind_tag() {
        let result = ChatResult::Fallback {
            message: ConversationMessage::assistant("LIKELY:").fallback(),
            reason: "no backend configured".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["kind"], "fallback");
        assert_eq!(value["reason"], "no backend configured");
        assert!(result.is_fallback());
        assert_eq!(result.message().content, "LIKELY:");
    }

    #[test]
    fn interaction_result_offline_round_trips() {
        let original = InteractionResult::Offline {
            report: InteractionReport {
                interactions: vec![],
                has_critical: false,
                summary: "STATUS: Safe".to_string(),
            },
        };
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("\"kind\":\"offline\""));
        let decoded: InteractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.content(), "STATUS: Safe");
    }

    // ── Report rendering ─────────────────────────────────────────────────────

    #[test]
    fn report_render_lists_findings() {
        let analysis = ReportAnalysis {
            summary: "Looks fine.".to_string(),
            findings: vec![Finding {
                parameter: "Glucose".to_string(),
                value: "See Report".to_string(),
                range: "70-100 mg/dL".to_string(),
                status: FindingStatus::Attention,
            }],
        };
        let text = analysis.render("2026-01-01 09:00 UTC");
        assert!(text.starts_with("MEDICAL REPORT ANALYSIS\n"));
        assert!(text.contains("Date: 2026-01-01 09:00 UTC"));
        assert!(text.contains("Looks fine."));
        assert!(text.ends_with("- Glucose: See Report (attention)"));
    }

    #[test]
    fn report_render_without_findings_says_none() {
        let analysis = ReportAnalysis { summary: String::new(), findings: vec![] };
        assert!(analysis.render("today").ends_with("Key Findings:\nNone"));
    }

    // ── HealixError display messages ─────────────────────────────────────────

    #[test]
    fn error_config_display() {
        let err = HealixError::Config { reason: "missing providers".to_string() };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("missing providers"));
    }

    #[test]
    fn error_backend_status_display() {
        let err = HealixError::BackendStatus { status: 429, body: "rate limited".to_string() };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limited"));
    }

    #[test]
    fn error_empty_medication_display() {
        assert_eq!(HealixError::EmptyMedication.to_string(), "enter a medication name to check");
    }

    #[test]
    fn error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HealixError = io.into();
        assert!(err.to_string().contains("gone"));
    }
}
