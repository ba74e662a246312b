//! Configuration error types

use thiserror::Error;

/// Errors raised while assembling core configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable '{var}' not found")]
    EnvVarNotFound { var: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
