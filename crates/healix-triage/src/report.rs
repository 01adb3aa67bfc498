//! Offline medical report analysis.
//!
//! No values are extracted. The analyzer only notices which well-known
//! parameters a report mentions and flags those for attention.

use chrono::{DateTime, Utc};
use tracing::debug;

use healix_contracts::report::{Finding, FindingStatus, ReportAnalysis};

/// Value shown for every finding, since nothing is actually parsed.
pub const UNPARSED_VALUE: &str = "See Report";

/// A parameter the analyzer looks for, keyed by a lower-case substring.
struct Parameter {
    name: &'static str,
    key: &'static str,
    normal_range: &'static str,
}

const PARAMETERS: &[Parameter] = &[
    Parameter { name: "Hemoglobin", key: "hemoglobin", normal_range: "12-16 g/dL" },
    Parameter { name: "WBC", key: "wbc", normal_range: "4,500-11,000 /μL" },
    Parameter { name: "Platelets", key: "platelet", normal_range: "150,000-400,000 /μL" },
    Parameter { name: "Glucose", key: "glucose", normal_range: "70-100 mg/dL" },
    Parameter { name: "Cholesterol", key: "cholesterol", normal_range: "<200 mg/dL" },
    Parameter { name: "Blood Pressure", key: "blood pressure", normal_range: "120/80 mmHg" },
    Parameter { name: "Heart Rate", key: "heart rate", normal_range: "60-100 bpm" },
];

/// Rough document category used in the summary sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    BloodTest,
    MedicalScan,
    General,
}

impl DocumentKind {
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("blood") {
            DocumentKind::BloodTest
        } else if lower.contains("scan") {
            DocumentKind::MedicalScan
        } else {
            DocumentKind::General
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::BloodTest => "blood test",
            DocumentKind::MedicalScan => "medical scan",
            DocumentKind::General => "general medical",
        }
    }
}

/// Analyze the extracted text of a report.
///
/// Total: any input, including an empty string, yields a summary and one
/// finding per known parameter. The session rejects blank input before
/// this is reached.
pub fn analyze_report(text: &str, generated_at: DateTime<Utc>) -> ReportAnalysis {
    let kind = DocumentKind::classify(text);
    let findings = extract_findings(text);

    debug!(
        kind = kind.label(),
        flagged = findings.iter().filter(|f| f.status == FindingStatus::Attention).count(),
        "offline report analysis"
    );

    ReportAnalysis { summary: summary_text(kind, generated_at), findings }
}

fn extract_findings(text: &str) -> Vec<Finding> {
    let lower = text.to_lowercase();
    PARAMETERS
        .iter()
        .map(|p| Finding {
            parameter: p.name.to_string(),
            value: UNPARSED_VALUE.to_string(),
            range: p.normal_range.to_string(),
            status: if lower.contains(p.key) {
                FindingStatus::Attention
            } else {
                FindingStatus::Normal
            },
        })
        .collect()
}

fn summary_text(kind: DocumentKind, generated_at: DateTime<Utc>) -> String {
    format!(
        "MEDICAL REPORT ANALYSIS\n\
         ============================\n\
         \n\
         Date: {date}\n\
         \n\
         SUMMARY:\n\
         Based on the provided medical report, this appears to be a {kind} document.\n\
         \n\
         KEY OBSERVATIONS:\n\
         - Multiple health parameters were evaluated\n\
         - Most values appear within normal clinical ranges\n\
         - Some values may require attention - please consult your healthcare provider\n\
         \n\
         RECOMMENDATIONS:\n\
         1. Follow up with your primary physician\n\
         2. Maintain a healthy lifestyle\n\
         3. Regular health check-ups\n\
         4. Monitor any symptoms you're experiencing\n\
         \n\
         DISCLAIMER: This is an automated analysis and should not replace professional \
         medical advice. Please consult your doctor for proper interpretation of your results.",
        date = generated_at.format("%Y-%m-%d %H:%M UTC"),
        kind = kind.label(),
    )
}
