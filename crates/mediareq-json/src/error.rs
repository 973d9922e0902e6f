//! Error types for mediareq-json operations.

use std::io;
use thiserror::Error;

/// The error type for mediareq-json operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document exists but is not usable JSON (e.g. an empty file).
    #[error("Invalid document format: {0}")]
    InvalidFormat(String),
}

/// A specialized Result type for mediareq-json operations.
pub type Result<T> = std::result::Result<T, Error>;
