//! Free-text symptom detection.
//!
//! Matching is a case-insensitive substring test against each entry's
//! keywords. It is deliberately naive: "hot" inside "photo" counts as a
//! fever keyword, and the first keyword hit settles an entry.

use healix_contracts::symptom::SymptomKey;

use crate::knowledge::{SymptomEntry, SYMPTOMS};

/// Return the keys of every dictionary entry with a keyword in `text`.
///
/// Keys come back in dictionary order. When nothing matches the result is
/// exactly `[SymptomKey::GENERAL]`, so the list is never empty.
pub fn detect(text: &str) -> Vec<SymptomKey> {
    let matched: Vec<SymptomKey> = matching_entries(text).map(SymptomEntry::symptom_key).collect();

    if matched.is_empty() {
        vec![SymptomKey::GENERAL]
    } else {
        matched
    }
}

/// Iterate the entries that match `text`, in dictionary order.
pub fn matching_entries(text: &str) -> impl Iterator<Item = &'static SymptomEntry> {
    let lower = text.to_lowercase();
    SYMPTOMS
        .iter()
        .filter(move |entry| entry.keywords.iter().any(|kw| lower.contains(kw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(text: &str) -> Vec<String> {
        detect(text).iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn single_symptom_is_detected() {
        assert_eq!(keys("I have been coughing for 3 days"), vec!["cough"]);
    }

    #[test]
    fn detection_ignores_case() {
        assert_eq!(keys("MIGRAINE since noon"), vec!["headache"]);
    }

    #[test]
    fn multiple_symptoms_come_back_in_dictionary_order() {
        assert_eq!(keys("headache and fever"), vec!["fever", "headache"]);
    }

    #[test]
    fn every_keyword_detects_its_own_entry() {
        for entry in SYMPTOMS {
            for keyword in entry.keywords {
                let text = format!("lately{keyword}today");
                assert!(
                    detect(&text).iter().any(|k| k.as_str() == entry.key),
                    "keyword {keyword:?} did not detect {}",
                    entry.key
                );
            }
        }
    }

    #[test]
    fn unmatched_text_yields_general() {
        assert_eq!(detect("what should I eat for lunch"), vec![SymptomKey::GENERAL]);
    }

    #[test]
    fn empty_text_yields_general() {
        assert_eq!(detect(""), vec![SymptomKey::GENERAL]);
    }

    #[test]
    fn substring_matching_is_not_word_bounded() {
        // "hot" is a fever keyword, so a photo counts.
        assert_eq!(keys("I took a photo"), vec!["fever"]);
    }

    #[test]
    fn one_entry_is_reported_once_even_with_several_keyword_hits() {
        assert_eq!(keys("dry cough, wet cough, coughing"), vec!["cough"]);
    }
}
