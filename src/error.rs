//! Error types for the mixing core.
//!
//! The core never logs or prints. Every failure is returned as an [`Error`]
//! and the caller decides whether to skip the record, abort the run, or
//! re-validate its input.

use thiserror::Error;

/// Result type for core mixing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the mixing core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A key string could not be decoded into a Camelot position and scale
    #[error("Invalid Camelot key `{key}`: {reason}")]
    InvalidKeyFormat { key: String, reason: &'static str },

    /// A BPM weight override that the selected scoring formula cannot use
    #[error("Invalid BPM weight {weight}: {reason}")]
    InvalidWeight { weight: f64, reason: &'static str },
}

impl Error {
    pub(crate) fn invalid_key(key: &str, reason: &'static str) -> Self {
        Self::InvalidKeyFormat {
            key: key.to_string(),
            reason,
        }
    }
}
