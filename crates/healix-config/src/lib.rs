//! # healix-config
//!
//! TOML configuration for the HEALIX runtime: which hosted providers to try
//! and in what order, the local emergency number, and how offline replies
//! are paced.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use healix_config::HealixConfig;
//!
//! let config = HealixConfig::from_file(Path::new("config/healix.toml"))?;
//! ```
//!
//! API keys are never read from the file. Each provider names the
//! environment variable that holds its key.

pub mod loader;
pub mod schema;

pub use schema::{EmergencyConfig, HealixConfig, ProviderConfig, RevealConfig, RevealStyle};

// ── Tests ─────────────────────────────────────────────────────────────────────
