//! Provider error types and transient-failure classification

use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur when talking to the generative-language API
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimit { message: String },

    /// Provider temporarily overloaded
    #[error("Service temporarily unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid request that must not be retried
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Response could not be parsed
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Any other error reported by the provider
    #[error("Provider error ({code}): {message}")]
    Api { code: u16, message: String },
}

impl ProviderError {
    /// Whether this failure is a transient provider condition worth a retry
    /// or a model downgrade
    ///
    /// Transient means rate-limit/quota (429) or overload (503). Everything
    /// else is fatal and propagates to the caller on first occurrence.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimit { .. } | ProviderError::ServiceUnavailable { .. }
        )
    }

    /// Map an HTTP status code and error body to a provider error
    pub fn from_status(status: u16, body: Option<&str>) -> Self {
        let message = body.unwrap_or("").trim().to_string();
        match status {
            429 => ProviderError::RateLimit {
                message: if message.is_empty() {
                    "Too many requests".to_string()
                } else {
                    message
                },
            },
            503 => ProviderError::ServiceUnavailable {
                message: if message.is_empty() {
                    "Service unavailable".to_string()
                } else {
                    message
                },
            },
            401 | 403 => ProviderError::Authentication(message),
            400 => ProviderError::InvalidRequest(message),
            408 | 504 => ProviderError::Timeout(30),
            _ => {
                // Some gateways report quota exhaustion or overload behind a
                // generic status; fall back to message wording.
                match Self::from_message(&message) {
                    Some(classified) => classified,
                    None => ProviderError::Api {
                        code: status,
                        message,
                    },
                }
            }
        }
    }

    /// Classify an error message by wording alone
    ///
    /// Returns `Some` only for wording that identifies a transient
    /// condition: quota/limit phrasing maps to a rate limit, "overloaded"
    /// maps to unavailability.
    pub fn from_message(message: &str) -> Option<Self> {
        let lower = message.to_lowercase();
        if lower.contains("quota") || lower.contains("rate limit") || lower.contains("limit") {
            return Some(ProviderError::RateLimit {
                message: message.to_string(),
            });
        }
        if lower.contains("overloaded") {
            return Some(ProviderError::ServiceUnavailable {
                message: message.to_string(),
            });
        }
        None
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(30)
        } else if err.is_connect() {
            ProviderError::Network(format!("Connection failed: {}", err))
        } else if let Some(status) = err.status() {
            ProviderError::from_status(status.as_u16(), Some(&err.to_string()))
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ProviderError::RateLimit {
            message: "quota exceeded".to_string()
        }
        .is_transient());
        assert!(ProviderError::ServiceUnavailable {
            message: "overloaded".to_string()
        }
        .is_transient());

        assert!(!ProviderError::Authentication("bad key".to_string()).is_transient());
        assert!(!ProviderError::InvalidRequest("bad schema".to_string()).is_transient());
        assert!(!ProviderError::Network("refused".to_string()).is_transient());
        assert!(!ProviderError::Timeout(30).is_transient());
        assert!(!ProviderError::Api {
            code: 500,
            message: "internal".to_string()
        }
        .is_transient());
    }

    #[test]
    fn test_from_status_codes() {
        assert!(matches!(
            ProviderError::from_status(429, None),
            ProviderError::RateLimit { .. }
        ));
        assert!(matches!(
            ProviderError::from_status(503, Some("overloaded")),
            ProviderError::ServiceUnavailable { .. }
        ));
        assert!(matches!(
            ProviderError::from_status(401, Some("invalid key")),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            ProviderError::from_status(400, Some("bad field")),
            ProviderError::InvalidRequest(_)
        ));
        assert!(matches!(
            ProviderError::from_status(504, None),
            ProviderError::Timeout(_)
        ));
        assert!(matches!(
            ProviderError::from_status(500, Some("internal error")),
            ProviderError::Api { code: 500, .. }
        ));
    }

    #[test]
    fn test_message_wording_classification() {
        let error = ProviderError::from_message("Resource quota exhausted").unwrap();
        assert!(matches!(error, ProviderError::RateLimit { .. }));

        let error = ProviderError::from_message("The model is overloaded").unwrap();
        assert!(matches!(error, ProviderError::ServiceUnavailable { .. }));

        assert!(ProviderError::from_message("schema mismatch").is_none());
    }

    #[test]
    fn test_generic_status_with_quota_wording_is_transient() {
        let error = ProviderError::from_status(500, Some("daily limit reached"));
        assert!(error.is_transient());
    }
}
