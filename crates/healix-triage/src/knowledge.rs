//! The static symptom dictionary.
//!
//! All data in this module is hardcoded. Entries are listed in match order:
//! the detector tests them top to bottom and the composer answers from the
//! first one that matched, so moving an entry changes behavior.

use healix_contracts::symptom::{
    Confidence::{self, High, Low, Medium},
    ConditionSummary, QuickCheck,
    Severity::{self, Critical, Mild, Moderate, Severe},
    SymptomKey,
};

/// A candidate condition in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub name: &'static str,
    pub confidence: Confidence,
    pub probability: u8,
    pub severity: Severity,
}

impl Condition {
    const fn new(name: &'static str, confidence: Confidence, probability: u8, severity: Severity) -> Self {
        Self { name, confidence, probability, severity }
    }

    pub fn to_summary(&self) -> ConditionSummary {
        ConditionSummary {
            name: self.name.to_string(),
            confidence: self.confidence,
            probability: self.probability,
            severity: self.severity,
        }
    }
}

/// One row of the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomEntry {
    pub key: &'static str,
    /// Lower-case substrings; never empty.
    pub keywords: &'static [&'static str],
    /// Most likely first; never empty.
    pub conditions: &'static [Condition],
    pub advice: &'static str,
    /// Red-flag phrases that should push the user toward emergency care.
    pub emergency_flags: &'static [&'static str],
    /// May be empty; the composer then uses `GENERIC_FOLLOW_UPS`.
    pub follow_ups: &'static [&'static str],
}

impl SymptomEntry {
    pub fn symptom_key(&self) -> SymptomKey {
        SymptomKey::from_static(self.key)
    }
}

/// Follow-up questions for entries that define none of their own.
pub const GENERIC_FOLLOW_UPS: &[&str] = &[
    "How long have you had fever?",
    "What is your temperature?",
    "Any chills or sweating?",
    "Other symptoms like cough, headache?",
];

pub static SYMPTOMS: &[SymptomEntry] = &[
    SymptomEntry {
        key: "fever",
        keywords: &["fever", "temperature", "hot", "high temperature", "pyrexia"],
        conditions: &[
            Condition::new("Common Cold", Medium, 30, Mild),
            Condition::new("Flu (Influenza)", Medium, 35, Moderate),
            Condition::new("Viral Infection", Medium, 25, Mild),
            Condition::new("Bacterial Infection", Low, 10, Moderate),
        ],
        advice: "Monitor temperature. Stay hydrated. Take paracetamol. Rest.",
        emergency_flags: &["chest pain", "difficulty breathing", "confusion", "rash"],
        follow_ups: GENERIC_FOLLOW_UPS,
    },
    SymptomEntry {
        key: "cough",
        keywords: &["cough", "coughing", "hacking", "dry cough", "wet cough"],
        conditions: &[
            Condition::new("Common Cold", High, 40, Mild),
            Condition::new("Bronchitis", Medium, 25, Moderate),
            Condition::new("Allergies", Medium, 20, Mild),
            Condition::new("GERD/Acid Reflux", Low, 15, Mild),
        ],
        advice: "Stay hydrated. Honey helps. Avoid smoke.",
        emergency_flags: &["coughing up blood", "shortness of breath", "chest pain"],
        follow_ups: &[
            "Dry or wet cough?",
            "How long coughing?",
            "Coughing up blood/mucus?",
            "Shortness of breath?",
        ],
    },
    SymptomEntry {
        key: "cold",
        keywords: &["cold", "runny nose", "stuffy nose", "sneezing", "congestion", "sore throat"],
        conditions: &[
            Condition::new("Common Cold (Viral)", High, 60, Mild),
            Condition::new("Allergic Rhinitis", Medium, 25, Mild),
            Condition::new("Sinusitis", Low, 15, Moderate),
        ],
        advice: "Rest. Stay hydrated. Use saline drops.",
        emergency_flags: &["high fever", "severe headache", "stiff neck"],
        follow_ups: &[
            "How long symptoms?",
            "Clear or colored discharge?",
            "Any fever?",
            "Facial pressure?",
        ],
    },
    SymptomEntry {
        key: "headache",
        keywords: &["headache", "head pain", "migraine", "throbbing head", "pressure in head"],
        conditions: &[
            Condition::new("Tension Headache", High, 45, Mild),
            Condition::new("Dehydration", Medium, 20, Mild),
            Condition::new("Migraine", Medium, 20, Moderate),
            Condition::new("Sinus Headache", Low, 15, Mild),
        ],
        advice: "Rest in dark room. Stay hydrated. Take pain relievers.",
        emergency_flags: &[
            "sudden severe headache",
            "weakness on one side",
            "vision changes",
            "confusion",
        ],
        follow_ups: &[
            "Where is pain (front/back/side)?",
            "Throbbing or constant?",
            "How long lasts?",
            "Nausea, vision changes, light sensitivity?",
        ],
    },
    SymptomEntry {
        key: "stomach pain",
        keywords: &["stomach pain", "abdominal pain", "stomach ache", "belly pain", " tummy pain"],
        conditions: &[
            Condition::new("Indigestion", Medium, 30, Mild),
            Condition::new("Gastritis", Medium, 25, Mild),
            Condition::new("Food Poisoning", Medium, 20, Moderate),
            Condition::new("IBS", Low, 15, Mild),
            Condition::new("Appendicitis", Low, 10, Severe),
        ],
        advice: "Eat bland foods. Stay hydrated. Avoid spicy foods.",
        emergency_flags: &["severe pain", "vomiting blood", "blood in stool", "high fever"],
        follow_ups: &[
            "Where pain (upper/lower/right/left)?",
            "Sharp, dull, or cramping?",
            "When did it start?",
            "Nausea, vomiting, bowel changes?",
        ],
    },
    SymptomEntry {
        key: "body pain",
        keywords: &["body pain", "muscle pain", "aches", "joint pain", "muscle ache", "pain all over"],
        conditions: &[
            Condition::new("Flu (Influenza)", High, 40, Moderate),
            Condition::new("Muscle Strain", Medium, 25, Mild),
            Condition::new("Fibromyalgia", Low, 15, Moderate),
            Condition::new("Arthritis", Low, 20, Mild),
        ],
        advice: "Rest. Gentle stretching. Pain relievers. Warm compress.",
        emergency_flags: &["chest pain", "difficulty breathing", "unable to move"],
        follow_ups: &[
            "Which areas affected?",
            "How long?",
            "Fever or other symptoms?",
            "Recent strenuous activity?",
        ],
    },
    SymptomEntry {
        key: "fatigue",
        keywords: &["fatigue", "tired", "exhausted", "no energy", "always sleepy", "exhaustion"],
        conditions: &[
            Condition::new("Lack of Sleep", High, 35, Mild),
            Condition::new("Stress/Anxiety", Medium, 25, Mild),
            Condition::new("Depression", Medium, 20, Moderate),
            Condition::new("Anemia", Low, 10, Moderate),
            Condition::new("Hypothyroidism", Low, 10, Moderate),
        ],
        advice: "Sleep 7-9 hours. Exercise. Eat balanced diet.",
        emergency_flags: &["sudden weakness", "shortness of breath", "chest pain"],
        follow_ups: &[
            "How long feeling tired?",
            "Hours of sleep daily?",
            "Sleep difficulty?",
            "Appetite or mood changes?",
        ],
    },
    SymptomEntry {
        key: "nausea",
        keywords: &["nausea", "nauseous", "feel sick", "want to vomit", "queasy"],
        conditions: &[
            Condition::new("Indigestion", Medium, 30, Mild),
            Condition::new("Food Poisoning", Medium, 25, Moderate),
            Condition::new("Pregnancy", Medium, 15, Mild),
            Condition::new("Migraine", Low, 15, Mild),
            Condition::new("Gastroenteritis", Medium, 15, Moderate),
        ],
        advice: "Sip clear fluids. Eat bland foods. Rest.",
        emergency_flags: &["vomiting blood", "severe abdominal pain", "confusion"],
        follow_ups: &[
            "Vomiting?",
            "What triggers it?",
            "Diarrhea or abdominal pain?",
            "Could you be pregnant?",
        ],
    },
    SymptomEntry {
        key: "diarrhea",
        keywords: &["diarrhea", "loose stool", "watery stool", "frequent bowel movements"],
        conditions: &[
            Condition::new("Viral Gastroenteritis", High, 40, Moderate),
            Condition::new("Food Poisoning", Medium, 30, Moderate),
            Condition::new("Bacterial Infection", Medium, 15, Moderate),
            Condition::new("IBS Flare-up", Low, 15, Mild),
        ],
        advice: "Stay hydrated with electrolytes. Eat bland foods.",
        emergency_flags: &[
            "blood in stool",
            "severe dehydration",
            "high fever",
            "lasts more than 3 days",
        ],
        follow_ups: &[],
    },
    SymptomEntry {
        key: "dizziness",
        keywords: &["dizzy", "dizziness", "lightheaded", "vertigo", "spinning"],
        conditions: &[
            Condition::new("Dehydration", High, 35, Mild),
            Condition::new("Low Blood Sugar", Medium, 25, Mild),
            Condition::new("Inner Ear Problem", Medium, 20, Mild),
            Condition::new("Low Blood Pressure", Low, 15, Mild),
            Condition::new("Anemia", Low, 5, Moderate),
        ],
        advice: "Sit or lie down slowly. Stay hydrated. Eat regular meals.",
        emergency_flags: &["chest pain", "shortness of breath", "slurred speech", "fainting"],
        follow_ups: &[
            "Room spinning or lightheaded?",
            "When started?",
            "Hearing loss or ringing?",
            "Heart conditions or medications?",
        ],
    },
    SymptomEntry {
        key: "chest_pain",
        keywords: &["chest pain", "chest tightness", "pain in chest", "pressure in chest"],
        conditions: &[
            Condition::new("Muscle Strain", Medium, 30, Mild),
            Condition::new("Acid Reflux/GERD", Medium, 25, Mild),
            Condition::new("Anxiety/Panic Attack", Medium, 20, Moderate),
            Condition::new("Heart Attack", Low, 15, Critical),
            Condition::new("Angina", Low, 10, Severe),
        ],
        advice: "Seek immediate medical attention.",
        emergency_flags: &["radiating to arm", "shortness of breath", "sweating", "nausea"],
        follow_ups: &[
            "Sharp, dull, or pressure?",
            "Radiates to arm/jaw/back?",
            "Shortness of breath or sweating?",
            "Heart problem history?",
        ],
    },
    SymptomEntry {
        key: "shortness_of_breath",
        keywords: &[
            "shortness of breath",
            "breathless",
            "cant breathe",
            "difficulty breathing",
            "wheezing",
        ],
        conditions: &[
            Condition::new("Asthma", Medium, 30, Moderate),
            Condition::new("Anxiety/Panic Attack", Medium, 25, Moderate),
            Condition::new("COPD", Low, 15, Severe),
            Condition::new("Heart Failure", Low, 10, Severe),
            Condition::new("Pulmonary Embolism", Low, 10, Critical),
            Condition::new("Allergic Reaction", Low, 10, Severe),
        ],
        advice: "Seek immediate medical attention.",
        emergency_flags: &["cant breathe", "blue lips", "chest pain", "confusion"],
        follow_ups: &[
            "When started?",
            "Constant or comes/goes?",
            "Wheezing or chest tightness?",
            "Asthma or respiratory conditions?",
        ],
    },
    SymptomEntry {
        key: "sore_throat",
        keywords: &["sore throat", "throat pain", "pain when swallowing", "scratchy throat"],
        conditions: &[
            Condition::new("Viral Pharyngitis", High, 50, Mild),
            Condition::new("Strep Throat", Medium, 25, Moderate),
            Condition::new("Tonsillitis", Medium, 15, Moderate),
            Condition::new("Allergies", Low, 10, Mild),
        ],
        advice: "Gargle salt water. Stay hydrated. Use lozenges.",
        emergency_flags: &["difficulty breathing", "difficulty swallowing", "high fever"],
        follow_ups: &[
            "Severity (mild/moderate/severe)?",
            "White patches on throat?",
            "Difficulty swallowing?",
            "Fever or swollen lymph nodes?",
        ],
    },
    SymptomEntry {
        key: "rash",
        keywords: &["rash", "skin rash", "hives", "red skin", "itchy rash"],
        conditions: &[
            Condition::new("Allergic Reaction", High, 40, Moderate),
            Condition::new("Eczema", Medium, 25, Mild),
            Condition::new("Contact Dermatitis", Medium, 20, Mild),
            Condition::new("Viral Infection", Low, 15, Mild),
        ],
        advice: "Avoid scratching. Apply moisturizer. Antihistamines help.",
        emergency_flags: &["difficulty breathing", "swelling of face", "rash spreads rapidly"],
        follow_ups: &[
            "Where started and spread?",
            "Itchy, painful, or neither?",
            "Fever or swelling?",
            "New soaps, foods, or plants?",
        ],
    },
    SymptomEntry {
        key: "back_pain",
        keywords: &["back pain", "lower back pain", "backache", "pain in back"],
        conditions: &[
            Condition::new("Muscle Strain", High, 45, Mild),
            Condition::new("Poor Posture", Medium, 25, Mild),
            Condition::new("Herniated Disc", Low, 15, Moderate),
            Condition::new("Kidney Stone", Low, 10, Severe),
            Condition::new("Arthritis", Low, 5, Moderate),
        ],
        advice: "Rest but stay mobile. Apply ice/heat. Gentle stretching.",
        emergency_flags: &["numbness in legs", "loss of bladder control", "fever"],
        follow_ups: &[
            "Where (upper/middle/lower)?",
            "Sudden or gradual?",
            "Pain down legs?",
            "Numbness, tingling, weakness?",
        ],
    },
];

/// Find an entry by key. The `general` sentinel never resolves.
pub fn lookup(key: &str) -> Option<&'static SymptomEntry> {
    SYMPTOMS.iter().find(|entry| entry.key == key)
}

/// Look a single symptom up directly, without going through the detector.
///
/// Unknown keys produce an empty result asking for more detail.
pub fn quick_check(key: &str) -> QuickCheck {
    match lookup(key) {
        Some(entry) => QuickCheck {
            key: entry.symptom_key(),
            conditions: entry.conditions.iter().map(Condition::to_summary).collect(),
            advice: entry.advice.to_string(),
            emergency_flags: entry.emergency_flags.iter().map(|s| s.to_string()).collect(),
            is_fallback: true,
        },
        None => QuickCheck {
            key: SymptomKey::new(key),
            conditions: Vec::new(),
            advice: "Describe symptoms for assessment.".to_string(),
            emergency_flags: Vec::new(),
            is_fallback: true,
        },
    }
}
