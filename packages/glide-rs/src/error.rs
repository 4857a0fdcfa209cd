//! Error types for the Glide client.

use thiserror::Error;

/// Result type for Glide client operations.
pub type Result<T> = std::result::Result<T, GlideError>;

/// Glide client errors.
#[derive(Debug, Error)]
pub enum GlideError {
    /// Configuration error (missing credentials, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response from the gateway)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
