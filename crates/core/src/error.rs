//! Error types for the nomalign reconciliation library.

use thiserror::Error;

/// Primary error type for reconciliation operations.
#[derive(Error, Debug)]
pub enum AlignError {
    #[error("malformed region geometry: {0}")]
    MalformedGeometry(String),

    #[error("label parse error: {0}")]
    LabelParse(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dictionary parse error at line {line}: {msg}")]
    DictParse { line: usize, msg: String },
}

/// Convenience Result type alias for AlignError.
pub type Result<T> = std::result::Result<T, AlignError>;
