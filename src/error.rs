//! Error types for the loanword corpus pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for pipeline operations.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A stage's required upstream file does not exist.
    #[error("missing input file: {}", .0.display())]
    MissingInput(PathBuf),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// A record or tag could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A remote collaborator call failed.
    #[error("http error: {0}")]
    Http(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for CorpusError {
    fn from(e: reqwest::Error) -> Self {
        CorpusError::Http(e.to_string())
    }
}

impl From<tempfile::PersistError> for CorpusError {
    fn from(e: tempfile::PersistError) -> Self {
        CorpusError::Io(e.error)
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, CorpusError>;
