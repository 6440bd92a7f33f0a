//! Error types for the decision extractor.
//!
//! This module defines all error types that can occur while rendering reports,
//! talking to the language model and reading or writing the vector store.

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and report generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error
    #[error("UTF-8 decoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Language-model API returned a non-success status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },

    /// Language-model response contained no text
    #[error("Language model returned no text")]
    EmptyCompletion,

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Vector store failure
    #[error("Vector store error: {0}")]
    Store(String),

    /// Embedding has the wrong number of dimensions
    #[error("Embedding dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension of the collection
        expected: usize,
        /// Dimension of the offending vector
        found: usize,
    },
}
