//! Error types for corpus scanning and report I/O.
//!
//! Extraction itself never fails; these errors come only from the file
//! system and from (de)serializing configuration and report files.

use thiserror::Error;

/// Errors that can occur while scanning a corpus or persisting a report.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid caller input (e.g. a corpus path that is a file).
    #[error("{0}")]
    InvalidInput(String),
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
