//! Error types for the inciq CLI.
//!
//! This module defines a unified error enum covering every failure category
//! in the application: ingestion, embedding, indexing, retrieval, generation,
//! text extraction, configuration, and I/O.

use thiserror::Error;

/// Unified error type for the inciq CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset ingestion errors (unparsable rows, empty dataset)
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Embedding provider errors (transport or model failure, retryable)
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector index errors (dimensionality mismatch, empty corpus — fatal)
    #[error("Index error: {0}")]
    Index(String),

    /// Retrieval errors (invalid k, no dataset loaded)
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Generation endpoint errors (transport, timeout, malformed prompt)
    #[error("Generation error: {0}")]
    Generation(String),

    /// Document text extraction errors (unreadable or unsupported input)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Retrieval("k must be at least 1".to_string());
        assert_eq!(err.to_string(), "Retrieval error: k must be at least 1");
    }

    #[test]
    fn test_json_error_conversion() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: AppError = bad.unwrap_err().into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
