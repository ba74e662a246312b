//! Top-level error taxonomy for one ask-the-model operation
//!
//! Exactly one of these reaches the caller when a turn fails. The host maps
//! them to UI treatments: `RateLimited` gets a timed cooldown notice,
//! `Provider` a generic try-again message, `Configuration` a persistent
//! setup notice.

use crate::config::ConfigError;
use crate::provider::ProviderError;
use thiserror::Error;

/// Result type for core operations
pub type TutorResult<T> = Result<T, TutorError>;

/// Failures surfaced to the host UI
#[derive(Debug, Error)]
pub enum TutorError {
    /// Missing or unusable credential; raised before any request is attempted
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Malformed history or options; never retried
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A transient provider condition survived the full retry and downgrade
    /// policy
    #[error("rate limited: retries exhausted against a transient provider condition")]
    RateLimited,

    /// Any other provider or network failure, propagated on first occurrence
    /// with the original diagnostic intact
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl TutorError {
    /// Whether the host should offer a timed cooldown rather than an
    /// immediate retry
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TutorError::RateLimited)
    }
}
