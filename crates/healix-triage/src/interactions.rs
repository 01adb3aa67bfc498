//! Drug interaction checking against a small static rule table.
//!
//! Both sides are matched as case-insensitive substrings, not drug names:
//! "Warfarin 5mg" matches the warfarin rule and "Ibuprofen 200" matches the
//! ibuprofen keyword. Multi-word keywords such as "st john's wort" only match
//! when typed with the same spelling.

use tracing::debug;

use healix_contracts::interaction::{InteractionHit, InteractionReport, InteractionSeverity};

/// A base drug and the substances known to interact with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionRule {
    pub base_drug: &'static str,
    pub interacts_with: &'static [&'static str],
    pub severity: InteractionSeverity,
}

/// Footer appended to every interaction summary.
pub const DISCLAIMER: &str = "_Disclaimer: Consult a doctor or pharmacist._";

pub static INTERACTION_RULES: &[InteractionRule] = &[
    InteractionRule {
        base_drug: "warfarin",
        interacts_with: &["aspirin", "ibuprofen", "naproxen"],
        severity: InteractionSeverity::Moderate,
    },
    InteractionRule {
        base_drug: "metformin",
        interacts_with: &["alcohol"],
        severity: InteractionSeverity::Moderate,
    },
    InteractionRule {
        base_drug: "lisinopril",
        interacts_with: &["potassium"],
        severity: InteractionSeverity::Moderate,
    },
    InteractionRule {
        base_drug: "simvastatin",
        interacts_with: &["grapefruit"],
        severity: InteractionSeverity::Moderate,
    },
    InteractionRule {
        base_drug: "amlodipine",
        interacts_with: &["grapefruit"],
        severity: InteractionSeverity::Moderate,
    },
    InteractionRule {
        base_drug: "levothyroxine",
        interacts_with: &["calcium", "iron"],
        severity: InteractionSeverity::Moderate,
    },
    InteractionRule {
        base_drug: "sertraline",
        interacts_with: &["tramadol", "st john's wort"],
        severity: InteractionSeverity::Moderate,
    },
    InteractionRule {
        base_drug: "escitalopram",
        interacts_with: &["tramadol", "st john's wort"],
        severity: InteractionSeverity::Moderate,
    },
];

/// Check `new_med` against every medication in `current_meds`.
///
/// Never fails. An empty list or an unknown drug yields a "Safe" report.
pub fn check_interactions<S: AsRef<str>>(current_meds: &[S], new_med: &str) -> InteractionReport {
    let current: Vec<String> = current_meds.iter().map(|m| m.as_ref().to_lowercase()).collect();
    let new_lower = new_med.to_lowercase();

    let mut interactions = Vec::new();
    for rule in INTERACTION_RULES {
        if !current.iter().any(|m| m.contains(rule.base_drug)) {
            continue;
        }
        for substance in rule.interacts_with {
            if new_lower.contains(substance) {
                interactions.push(InteractionHit {
                    severity: rule.severity,
                    drug: rule.base_drug.to_string(),
                    with: new_med.to_string(),
                    substance: substance.to_string(),
                    message: format!(
                        "{} may interact with {}-containing products",
                        rule.base_drug, substance
                    ),
                });
            }
        }
    }

    let has_critical = interactions.iter().any(|i| i.severity == InteractionSeverity::Critical);
    debug!(new_med, hits = interactions.len(), has_critical, "interaction check complete");

    let summary = summarize(&interactions);
    InteractionReport { interactions, has_critical, summary }
}

fn summarize(interactions: &[InteractionHit]) -> String {
    let mut out = String::new();
    if interactions.is_empty() {
        out.push_str("STATUS: Safe\n\nDETAILS:\n");
        out.push_str("- No known interactions found\n\n");
        out.push_str("RECOMMENDATION: Always inform your doctor about all medications.\n");
    } else {
        out.push_str("STATUS: Caution\n\nDETAILS:\n");
        for hit in interactions {
            out.push_str(&format!("- {}\n", hit.message));
        }
        out.push_str("\nRECOMMENDATION: Consult pharmacist before combining.\n");
    }
    out.push('\n');
    out.push_str(DISCLAIMER);
    out
}
