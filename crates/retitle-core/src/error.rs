//! Error types for retitle
//!
//! All fallible operations return `Result<T, Error>`.
//! Title normalization and deduplication are total and never fail;
//! errors only come from the I/O boundary and configuration.

use std::path::PathBuf;

/// retitle error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying file or stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tabular input/output failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read or decoded
    #[error("Config error in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Vocabulary definition is unusable
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// Required column absent from the header row
    #[error("Missing column '{0}' in input header")]
    MissingColumn(String),

    /// Data row lacks a required field
    #[error("Malformed row at line {line}: missing '{column}'")]
    MalformedRow { line: u64, column: String },
}

/// Result type alias for retitle operations
pub type Result<T> = std::result::Result<T, Error>;
