//! Runtime error types for the HEALIX triage runtime.
//!
//! The offline triage functions are total and never fail. Everything that
//! touches configuration, the network, or user-supplied input returns
//! `HealixResult<T>`.

use thiserror::Error;

/// The unified error type for the HEALIX crates.
#[derive(Debug, Error)]
pub enum HealixError {
    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// The remote chat backend could not be reached or the transfer broke off.
    #[error("chat backend error: {reason}")]
    Backend { reason: String },

    /// The remote chat backend answered with a non-success HTTP status.
    #[error("chat backend returned status {status}: {body}")]
    BackendStatus { status: u16, body: String },

    /// A chat turn was submitted with no text.
    #[error("message is empty")]
    EmptyMessage,

    /// An interaction check was requested without a medication name.
    #[error("enter a medication name to check")]
    EmptyMedication,

    /// A report analysis was requested with no content.
    #[error("no content to analyze")]
    EmptyReport,

    /// Reading or writing a local file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the HEALIX crates.
pub type HealixResult<T> = Result<T, HealixError>;
