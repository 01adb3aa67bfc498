//! Medical report analysis results.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    Normal,
    Attention,
    Critical,
}

impl FindingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingStatus::Normal => "normal",
            FindingStatus::Attention => "attention",
            FindingStatus::Critical => "critical",
        }
    }
}

/// One parameter row in a report analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub parameter: String,
    pub value: String,
    /// Reference range, e.g. "70-100 mg/dL".
    pub range: String,
    pub status: FindingStatus,
}

/// Summary text plus per-parameter findings for one uploaded report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub summary: String,
    pub findings: Vec<Finding>,
}

impl ReportAnalysis {
    /// Render the downloadable plain-text report.
    ///
    /// `generated` is a preformatted date line so the output stays
    /// deterministic for a given input.
    pub fn render(&self, generated: &str) -> String {
        let findings = if self.findings.is_empty() {
            "None".to_string()
        } else {
            self.findings
                .iter()
                .map(|f| format!("- {}: {} ({})", f.parameter, f.value, f.status.as_str()))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "MEDICAL REPORT ANALYSIS\n\
             =======================\n\
             Generated by HEALIX AI\n\
             Date: {generated}\n\
             \n\
             {}\n\
             \n\
             Key Findings:\n\
             {findings}",
            self.summary
        )
    }
}
