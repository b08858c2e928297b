//! Error types for the Cortex optimizer

use thiserror::Error;

/// Result type alias for optimizer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing an optimized prompt
#[derive(Debug, Error)]
pub enum Error {
    /// Required input fields are missing or malformed
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
