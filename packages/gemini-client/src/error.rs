//! Error types for the Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Missing API key or unusable settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// No complete response within the configured timeout
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Non-2xx response or a response without candidates
    #[error("API error: {0}")]
    Api(String),

    /// Body did not match the expected response shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// The prompt was refused by the provider's safety filters
    #[error("Prompt blocked: {0}")]
    Blocked(String),
}
