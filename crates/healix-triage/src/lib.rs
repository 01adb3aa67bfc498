//! # healix-triage
//!
//! The offline half of HEALIX. Everything here is static data plus pure
//! functions over it:
//!
//! - `knowledge`: the symptom dictionary and direct lookups
//! - `detect` / `compose`: free text in, a formatted triage reply out
//! - `interactions`: the drug interaction table
//! - `emergency`: critical phrase scanning
//! - `report`: keyword-level report analysis
//! - `tone`: coarse reply tone
//! - `reveal`: cancellable typewriter presentation
//!
//! `TriageEngine` bundles these behind `healix_core::traits::FallbackEngine`
//! and `EmergencyScanner` implements `EmergencyDetector`.

pub mod compose;
pub mod detect;
pub mod emergency;
pub mod engine;
pub mod interactions;
pub mod knowledge;
pub mod report;
pub mod reveal;
pub mod tone;

pub use compose::compose;
pub use detect::detect;
pub use emergency::{scan, EmergencyScanner};
pub use engine::TriageEngine;
pub use interactions::check_interactions;
pub use knowledge::quick_check;
pub use report::analyze_report;
pub use reveal::{Reveal, RevealHandle, RevealMode};
pub use tone::{classify_tone, Tone};
