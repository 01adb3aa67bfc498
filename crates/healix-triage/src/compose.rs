//! Offline response composition.
//!
//! Turns detected symptom keys into the plain-text reply shown to the user.
//! Output uses light heading and bullet markers and is rendered as
//! preformatted text, so nothing is escaped.
//!
//! Only the FIRST resolvable entry shapes the body (conditions, red flags,
//! advice, follow-ups). Later matches are named in the header and nothing
//! else.

use healix_contracts::symptom::SymptomKey;

use crate::{
    emergency::DEFAULT_EMERGENCY_NUMBER,
    knowledge::{lookup, SymptomEntry, GENERIC_FOLLOW_UPS},
};

/// Footer appended to every triage reply.
pub const DISCLAIMER: &str = "_Disclaimer: Consult a doctor._";

/// How many conditions the LIKELY section lists.
pub const MAX_CONDITIONS: usize = 3;
/// How many of the entry's emergency flags are surfaced as red flags.
pub const MAX_RED_FLAGS: usize = 2;
/// How many follow-up questions are asked.
pub const MAX_FOLLOW_UPS: usize = 3;

/// Compose a reply for `matched_keys`, using the default emergency number.
pub fn compose(matched_keys: &[SymptomKey], raw_text: &str) -> String {
    compose_with_number(matched_keys, raw_text, DEFAULT_EMERGENCY_NUMBER)
}

/// Compose a reply, quoting `emergency_number` in the general templates.
///
/// Falls through to `general_response` when no key resolves to a
/// dictionary entry (an empty list or just `general`).
pub fn compose_with_number(
    matched_keys: &[SymptomKey],
    raw_text: &str,
    emergency_number: &str,
) -> String {
    let entries: Vec<&'static SymptomEntry> = matched_keys
        .iter()
        .filter(|key| !key.is_general())
        .filter_map(|key| lookup(key.as_str()))
        .collect();

    match entries.first() {
        Some(primary) => symptom_response(primary, &entries),
        None => general_response(raw_text, emergency_number),
    }
}

fn symptom_response(primary: &SymptomEntry, all: &[&SymptomEntry]) -> String {
    let mut out = String::new();

    let names = all.iter().map(|e| display_name(e.key)).collect::<Vec<_>>().join(", ");
    out.push_str(&format!("ASSESSMENT: Symptoms reported: {names}\n\n"));

    out.push_str("LIKELY:\n");
    for condition in primary.conditions.iter().take(MAX_CONDITIONS) {
        out.push_str(&format!("- {} ({} confidence)\n", condition.name, condition.confidence));
    }

    if !primary.emergency_flags.is_empty() {
        out.push_str("\nRED FLAGS (get urgent care if you notice):\n");
        for flag in primary.emergency_flags.iter().take(MAX_RED_FLAGS) {
            out.push_str(&format!("- {flag}\n"));
        }
    }

    out.push_str(&format!("\nDO:\n- {}\n", primary.advice));

    let questions = if primary.follow_ups.is_empty() {
        GENERIC_FOLLOW_UPS
    } else {
        primary.follow_ups
    };
    out.push_str("\nANSWER:\n");
    for (i, question) in questions.iter().take(MAX_FOLLOW_UPS).enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, question));
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out
}

/// Reply for input that named no known symptom.
///
/// Checks medication, healthy-living and appointment topics in that order
/// and otherwise asks for more detail.
pub fn general_response(raw_text: &str, emergency_number: &str) -> String {
    let lower = raw_text.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if mentions(&["medicine", "medication", "drug"]) {
        return format!(
            "CANNOT PRESCRIBE\n\n\
             - Ask doctor/pharmacist\n\
             - Never take meds without advice\n\n\
             Emergencies: Call {emergency_number}\n\n\
             {DISCLAIMER}"
        );
    }

    if mentions(&["healthy", "diet", "exercise"]) {
        return format!(
            "STAY HEALTHY:\n\
             - Balanced meals\n\
             - Exercise regularly\n\
             - Sleep 7-9 hours\n\
             - Stay hydrated\n\n\
             {DISCLAIMER}"
        );
    }

    if mentions(&["appointment", "doctor"]) {
        return format!(
            "SEE DOCTOR IF:\n\
             1. Symptoms last > 1 week\n\
             2. Getting worse\n\
             3. High fever or severe pain\n\n\
             Emergencies: Call {emergency_number}\n\n\
             {DISCLAIMER}"
        );
    }

    format!(
        "Please tell me a little more so I can help.\n\n\
         ANSWER:\n\
         1. When symptoms started?\n\
         2. Severity (mild/moderate/severe)?\n\
         3. Location of any pain?\n\
         4. Any triggering factors?\n\n\
         {DISCLAIMER}"
    )
}

/// "stomach pain" and "back_pain" both read as plain words in the header.
fn display_name(key: &str) -> String {
    key.replace('_', " ")
}
