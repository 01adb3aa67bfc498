//! # healix-core
//!
//! The consultation runtime for the HEALIX assistant.
//!
//! This crate provides:
//! - The three seam traits (`ChatBackend`, `FallbackEngine`, `EmergencyDetector`)
//! - The `Consultation` session that wires them together in the right order
//! - The system prompts sent to hosted models
//!
//! ## Usage
//!
//! ```rust,ignore
//! use healix_core::{Consultation, traits::{ChatBackend, FallbackEngine, EmergencyDetector}};
//! ```

pub mod prompts;
pub mod session;
pub mod traits;

pub use session::Consultation;
